//! Per-container field strategies.
//!
//! Every function here reads a single review container (or a block nested in
//! one) and never fails; a field nothing matches is `None` or zero.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::dom::{attr, compact_text, shortest, spaced_text, star_rating_label};
use crate::strategy::{count_in, Strategy};
use crate::types::ReviewerDetails;

/// Profile links carry this in their target.
const PROFILE_LINK_MARKER: &str = "/user_details?";
/// Review photos are hosted on the vendor's CDN; other images are UI chrome.
const MEDIA_HOST_MARKER: &str = "yelp";
/// Paragraphs with this many words or fewer are treated as UI labels.
const MIN_PARAGRAPH_WORDS: usize = 3;

static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid link selector"));
static BOLD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("strong, b").expect("valid bold selector"));
static IMG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("valid image selector"));
static IMG_WITH_SRC: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img[src]").expect("valid image source selector"));
static VIDEO_SOURCE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("video source[src]").expect("valid video source selector"));
static SPAN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span").expect("valid span selector"));
static TIME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("time").expect("valid time selector"));
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid paragraph selector"));

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid integer regex"));
static LETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{L}").expect("valid letter regex"));
static DATE_HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\b|\b(?:19|20)\d{2}\b",
    )
    .expect("valid date hint regex")
});

static REVIEWS_COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*)\s+reviews?\b").expect("valid reviews count regex")
});
static FRIENDS_COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*)\s+friends?\b").expect("valid friends count regex")
});
static PHOTOS_COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*)\s+photos?\b").expect("valid photos count regex")
});

static HELPFUL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*)\s+helpful\b").expect("valid helpful regex")
});
static THANKS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*)\s+thanks\b").expect("valid thanks regex")
});
static LOVE_THIS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*)\s+love\s+this\b").expect("valid love this regex")
});
static OH_NO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*)\s+oh\s+no\b").expect("valid oh no regex")
});

pub(crate) const REVIEWER_NAME_STRATEGIES: &[Strategy<String>] = &[profile_link_text, bold_text];
pub(crate) const DATE_TEXT_STRATEGIES: &[Strategy<String>] = &[time_element_text, dated_span_text];

/// Reaction button counts, 0 when a button shows no number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Reactions {
    pub helpful: u32,
    pub thanks: u32,
    pub love_this: u32,
    pub oh_no: u32,
}

// ---------------------------------------------------------------------------
// Reviewer
// ---------------------------------------------------------------------------

/// Text of the first link to a user profile.
pub(crate) fn profile_link_text(scope: ElementRef<'_>) -> Option<String> {
    scope
        .select(&LINK)
        .filter(|a| {
            a.value()
                .attr("href")
                .is_some_and(|href| href.contains(PROFILE_LINK_MARKER))
        })
        .map(compact_text)
        .find(|text| !text.is_empty())
}

/// Text of the first `<strong>`/`<b>`, if it has any.
pub(crate) fn bold_text(scope: ElementRef<'_>) -> Option<String> {
    let bold = scope.select(&BOLD).next()?;
    let text = compact_text(bold);
    (!text.is_empty()).then_some(text)
}

pub(crate) fn avatar_url(scope: ElementRef<'_>) -> Option<String> {
    scope.select(&IMG).next().and_then(|img| attr(img, "src"))
}

pub(crate) fn reviewer_details(scope: ElementRef<'_>) -> ReviewerDetails {
    let text = spaced_text(scope);
    ReviewerDetails {
        total_reviews: count_in(&text, &REVIEWS_COUNT_RE),
        total_friends: count_in(&text, &FRIENDS_COUNT_RE),
        business_photos_uploaded: count_in(&text, &PHOTOS_COUNT_RE),
    }
}

/// Shortest span reading like "City, ST".
pub(crate) fn reviewer_location(scope: ElementRef<'_>) -> Option<String> {
    let candidates = scope
        .select(&SPAN)
        .map(compact_text)
        .filter(|text| text.contains(',') && LETTER_RE.is_match(text));
    shortest(candidates)
}

/// Leading integer of the container's star-rating label, kept only in `1..=5`.
pub(crate) fn reviewer_rating(scope: ElementRef<'_>) -> Option<u8> {
    let label = star_rating_label(scope)?;
    let rating = INTEGER_RE.find(&label)?.as_str().parse::<u8>().ok()?;
    (1..=5).contains(&rating).then_some(rating)
}

// ---------------------------------------------------------------------------
// Review body
// ---------------------------------------------------------------------------

pub(crate) fn time_element_text(scope: ElementRef<'_>) -> Option<String> {
    scope
        .select(&TIME)
        .map(compact_text)
        .find(|text| !text.is_empty())
}

/// First span mentioning a month name or a four-digit year.
pub(crate) fn dated_span_text(scope: ElementRef<'_>) -> Option<String> {
    scope
        .select(&SPAN)
        .map(compact_text)
        .find(|text| DATE_HINT_RE.is_match(text))
}

/// All substantial paragraphs, whitespace collapsed, joined by single spaces.
pub(crate) fn body_text(scope: ElementRef<'_>) -> Option<String> {
    let paragraphs: Vec<String> = scope
        .select(&PARAGRAPH)
        .map(|p| spaced_text(p).split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|text| text.split_whitespace().count() > MIN_PARAGRAPH_WORDS)
        .collect();
    (!paragraphs.is_empty()).then(|| paragraphs.join(" "))
}

/// Hosted review images, then video sources; first occurrence wins.
pub(crate) fn media_urls(scope: ElementRef<'_>) -> Vec<String> {
    let images = scope
        .select(&IMG_WITH_SRC)
        .filter_map(|img| attr(img, "src"))
        .filter(|src| src.contains(MEDIA_HOST_MARKER));
    let videos = scope
        .select(&VIDEO_SOURCE)
        .filter_map(|source| attr(source, "src"));

    let mut urls: Vec<String> = Vec::new();
    for url in images.chain(videos) {
        if !urls.contains(&url) {
            urls.push(url);
        }
    }
    urls
}

pub(crate) fn reactions(scope: ElementRef<'_>) -> Reactions {
    let text = spaced_text(scope);
    Reactions {
        helpful: count_in(&text, &HELPFUL_RE),
        thanks: count_in(&text, &THANKS_RE),
        love_this: count_in(&text, &LOVE_THIS_RE),
        oh_no: count_in(&text, &OH_NO_RE),
    }
}

#[cfg(test)]
#[path = "fields_test.rs"]
mod tests;
