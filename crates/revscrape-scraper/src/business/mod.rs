//! Business metadata extraction.
//!
//! Each field has its own cascade of strategies over the whole document;
//! markup hints come first and JSON-LD structured data is the fallback.

mod jsonld;

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::dom::{attr, compact_text, spaced_text, star_rating_label, text_nodes};
use crate::strategy::{cascade, Strategy};
use crate::types::BusinessInfo;

static H1: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("valid h1 selector"));
static OG_TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:title"]"#).expect("valid og:title selector")
});
static ADDRESS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("address").expect("valid address selector"));
static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid link selector"));

static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9.]+").expect("valid decimal regex"));
static REVIEWS_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\breviews?\b").expect("valid reviews regex"));
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("valid digit regex"));
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\$+|€+|£+|¥+)$").expect("valid price regex"));

const MAX_PRICE_SYMBOLS: usize = 4;
const TEL_SCHEME: &str = "tel:";

const NAME_STRATEGIES: &[Strategy<String>] = &[heading_text, og_title];
const RATING_STRATEGIES: &[Strategy<f64>] = &[labelled_average_rating, jsonld_average_rating];
const TOTAL_REVIEWS_STRATEGIES: &[Strategy<String>] = &[shortest_reviews_text];
const PRICE_STRATEGIES: &[Strategy<String>] = &[currency_symbols];
const ADDRESS_STRATEGIES: &[Strategy<String>] = &[address_element, jsonld_address];
const CONTACT_STRATEGIES: &[Strategy<String>] = &[telephone_link];

/// Build the business record for one page.
///
/// Never fails: every field that no strategy finds is left `None`.
#[must_use]
pub fn extract_business(root: ElementRef<'_>, business_url: &str) -> BusinessInfo {
    let info = BusinessInfo {
        business_url: business_url.to_string(),
        business_name: cascade("business_name", root, NAME_STRATEGIES),
        average_rating: cascade("average_rating", root, RATING_STRATEGIES),
        total_reviews_text: cascade("total_reviews_text", root, TOTAL_REVIEWS_STRATEGIES),
        price_range: cascade("price_range", root, PRICE_STRATEGIES),
        business_address: cascade("business_address", root, ADDRESS_STRATEGIES),
        contact_number: cascade("contact_number", root, CONTACT_STRATEGIES),
    };

    tracing::debug!(
        business_url,
        name = ?info.business_name,
        rating = ?info.average_rating,
        reviews = ?info.total_reviews_text,
        "business parsed"
    );
    info
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Text of the first `<h1>`, if it has any.
pub(crate) fn heading_text(scope: ElementRef<'_>) -> Option<String> {
    let h1 = scope.select(&H1).next()?;
    let text = compact_text(h1);
    (!text.is_empty()).then_some(text)
}

pub(crate) fn og_title(scope: ElementRef<'_>) -> Option<String> {
    scope
        .select(&OG_TITLE)
        .next()
        .and_then(|meta| attr(meta, "content"))
}

/// Numeric part of the first "N star rating" accessible label.
pub(crate) fn labelled_average_rating(scope: ElementRef<'_>) -> Option<f64> {
    let label = star_rating_label(scope)?;
    let rating = DECIMAL_RE.find(&label)?.as_str().parse::<f64>().ok()?;
    in_rating_range(rating)
}

pub(crate) fn jsonld_average_rating(scope: ElementRef<'_>) -> Option<f64> {
    jsonld::business_nodes(scope)
        .iter()
        .filter_map(jsonld::aggregate_rating)
        .find_map(in_rating_range)
}

fn in_rating_range(rating: f64) -> Option<f64> {
    (0.0..=5.0).contains(&rating).then_some(rating)
}

/// Shortest text node mentioning "review(s)" alongside a digit; the shortest
/// is the least likely to drag surrounding prose along.
pub(crate) fn shortest_reviews_text(scope: ElementRef<'_>) -> Option<String> {
    let candidates = text_nodes(scope)
        .filter(|raw| REVIEWS_WORD_RE.is_match(raw))
        .map(str::trim)
        .filter(|text| DIGIT_RE.is_match(text))
        .map(str::to_string);
    crate::dom::shortest(candidates)
}

/// First text node made of one to four repeats of a currency symbol (`$$`).
pub(crate) fn currency_symbols(scope: ElementRef<'_>) -> Option<String> {
    text_nodes(scope)
        .map(str::trim)
        .find(|text| {
            PRICE_RE.is_match(text) && (1..=MAX_PRICE_SYMBOLS).contains(&text.chars().count())
        })
        .map(str::to_string)
}

/// Visible text of the first `<address>` element.
pub(crate) fn address_element(scope: ElementRef<'_>) -> Option<String> {
    let el = scope.select(&ADDRESS).next()?;
    let text = spaced_text(el);
    (!text.is_empty()).then_some(text)
}

pub(crate) fn jsonld_address(scope: ElementRef<'_>) -> Option<String> {
    jsonld::business_nodes(scope).iter().find_map(jsonld::address)
}

/// First `tel:` link: its text, or the number from the link target when blank.
pub(crate) fn telephone_link(scope: ElementRef<'_>) -> Option<String> {
    let link = scope.select(&LINK).find(|a| {
        a.value()
            .attr("href")
            .is_some_and(|href| href.trim_start().starts_with(TEL_SCHEME))
    })?;

    let text = compact_text(link);
    if !text.is_empty() {
        return Some(text);
    }
    link.value()
        .attr("href")
        .and_then(|href| href.trim().strip_prefix(TEL_SCHEME))
        .map(str::trim)
        .filter(|number| !number.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "business_test.rs"]
mod tests;
