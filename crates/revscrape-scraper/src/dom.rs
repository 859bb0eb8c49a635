//! Text and attribute helpers over a parsed `scraper` tree.
//!
//! Everything here reads only; callers hand in an [`ElementRef`] scope (the
//! document root or a review container) and get owned strings back.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

/// Elements whose text is never user-visible.
const HIDDEN_TEXT_PARENTS: &[&str] = &["script", "style", "noscript", "template"];

static STAR_RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)star rating").expect("valid star rating regex"));
static ARIA_LABEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[aria-label]").expect("valid aria-label selector"));

#[cfg(test)]
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid test selector")
}

/// Visible text fragments under `scope`, trimmed, empties dropped, in document order.
pub(crate) fn stripped_strings<'a>(scope: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    scope.descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|el| HIDDEN_TEXT_PARENTS.contains(&el.name()));
        if hidden {
            return None;
        }
        let trimmed = text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}

/// Raw text nodes under `scope` (untrimmed, hidden containers excluded).
pub(crate) fn text_nodes<'a>(scope: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    scope.descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|el| HIDDEN_TEXT_PARENTS.contains(&el.name()));
        (!hidden).then_some(&**text)
    })
}

/// Fragments glued with no separator: `<b>Jane</b> <i>D.</i>` → `JaneD.`.
pub(crate) fn compact_text(scope: ElementRef<'_>) -> String {
    stripped_strings(scope).collect()
}

/// Fragments joined with single spaces.
pub(crate) fn spaced_text(scope: ElementRef<'_>) -> String {
    stripped_strings(scope).collect::<Vec<_>>().join(" ")
}

/// Attribute value, trimmed, `None` when missing or blank.
pub(crate) fn attr(el: ElementRef<'_>, name: &str) -> Option<String> {
    el.value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// First descendant carrying an `aria-label` that reads like "4.5 star rating".
pub(crate) fn star_rating_label(scope: ElementRef<'_>) -> Option<String> {
    scope
        .select(&ARIA_LABEL)
        .find_map(|el| el.value().attr("aria-label").filter(|l| STAR_RATING_RE.is_match(l)))
        .map(str::to_string)
}

/// Does `scope` contain a star-rating labelled descendant?
pub(crate) fn has_star_rating(scope: ElementRef<'_>) -> bool {
    star_rating_label(scope).is_some()
}

/// Keep the first of the shortest candidates (by character count).
pub(crate) fn shortest<I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    candidates.into_iter().min_by_key(|c| c.chars().count())
}
