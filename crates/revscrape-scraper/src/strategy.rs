//! Strategy cascades.
//!
//! Every field is located by an ordered list of independent heuristics, each a
//! plain function from a scope to an optional value. The first heuristic that
//! yields something wins; a field nobody finds is simply absent.

use regex::Regex;
use scraper::ElementRef;

/// One extraction heuristic over a document or review sub-tree.
pub type Strategy<T> = for<'a> fn(ElementRef<'a>) -> Option<T>;

/// Run `strategies` in order against `scope` and return the first hit.
#[must_use]
pub fn first_match<T>(scope: ElementRef<'_>, strategies: &[Strategy<T>]) -> Option<T> {
    strategies.iter().find_map(|strategy| strategy(scope))
}

/// [`first_match`] that records a debug event naming `field` when every strategy misses.
pub(crate) fn cascade<T>(
    field: &'static str,
    scope: ElementRef<'_>,
    strategies: &[Strategy<T>],
) -> Option<T> {
    let found = first_match(scope, strategies);
    if found.is_none() {
        tracing::debug!(field, "no extraction strategy matched");
    }
    found
}

/// First integer captured by group 1 of `pattern` in `text`, or 0.
///
/// Thousands separators are tolerated (`1,204 reviews` → 1204).
pub(crate) fn count_in(text: &str, pattern: &Regex) -> u32 {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().replace(',', "").parse::<u32>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;
    use crate::dom::{attr, selector};

    fn title(scope: ElementRef<'_>) -> Option<String> {
        scope
            .select(&selector("title"))
            .next()
            .map(|el| el.text().collect::<String>())
    }

    fn link(scope: ElementRef<'_>) -> Option<String> {
        scope
            .select(&selector("a"))
            .next()
            .and_then(|el| attr(el, "href"))
    }

    fn never(_: ElementRef<'_>) -> Option<String> {
        None
    }

    #[test]
    fn first_non_absent_strategy_wins() {
        let html = Html::parse_document(r#"<title>T</title><a href="/x">x</a>"#);
        let strategies: [Strategy<String>; 3] = [never, link, title];
        let got = first_match(html.root_element(), &strategies);
        assert_eq!(got.as_deref(), Some("/x"));
    }

    #[test]
    fn all_strategies_missing_is_none() {
        let html = Html::parse_document("<p>nothing</p>");
        let strategies: [Strategy<String>; 2] = [never, link];
        let got = first_match(html.root_element(), &strategies);
        assert!(got.is_none());
    }

    #[test]
    fn empty_cascade_is_none() {
        let html = Html::parse_document("<p>nothing</p>");
        assert!(cascade::<String>("nothing", html.root_element(), &[]).is_none());
    }

    #[test]
    fn count_in_reads_first_group() {
        let re = Regex::new(r"(?i)(\d[\d,]*)\s+friends?\b").unwrap();
        assert_eq!(count_in("1,204 friends 3 friends", &re), 1204);
        assert_eq!(count_in("no friends listed", &re), 0);
    }
}
