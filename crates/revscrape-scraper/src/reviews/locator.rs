//! Finding the sub-trees that each hold one review.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::dom::has_star_rating;

static REVIEW_ID: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[data-review-id]").expect("valid review id selector"));
static REVIEW_LIST_ITEM: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"li[class*="review"]"#).expect("valid review list item selector")
});
static SECTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section").expect("valid section selector"));

type Locator = for<'a> fn(ElementRef<'a>) -> Vec<ElementRef<'a>>;

const LOCATORS: &[(&str, Locator)] = &[
    ("review_id_attribute", by_review_id),
    ("review_list_item", by_review_list_item),
    ("rated_section", by_rated_section),
];

/// Review containers in document order.
///
/// The first locator that finds anything wins. A page with no recognizable
/// containers yields an empty list.
#[must_use]
pub fn locate_review_containers(root: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    for (name, locate) in LOCATORS {
        let found = locate(root);
        if !found.is_empty() {
            tracing::debug!(locator = *name, count = found.len(), "review containers located");
            return found;
        }
    }
    tracing::debug!("no review containers located");
    Vec::new()
}

fn by_review_id(root: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    root.select(&REVIEW_ID).collect()
}

fn by_review_list_item(root: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    root.select(&REVIEW_LIST_ITEM).collect()
}

fn by_rated_section(root: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    root.select(&SECTION).filter(|s| has_star_rating(*s)).collect()
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    fn ids(html: &Html) -> Vec<String> {
        locate_review_containers(html.root_element())
            .into_iter()
            .map(|el| el.value().attr("id").unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn review_id_attribute_takes_priority() {
        let html = Html::parse_document(
            r#"<ul>
                 <li class="review" id="li"></li>
                 <div data-review-id="r1" id="a"></div>
                 <div data-review-id="r2" id="b"></div>
               </ul>"#,
        );
        assert_eq!(ids(&html), vec!["a", "b"]);
    }

    #[test]
    fn falls_back_to_review_list_items() {
        let html = Html::parse_document(
            r#"<ul>
                 <li class="menu-item" id="menu"></li>
                 <li class="css-1 review__item" id="one"></li>
                 <li class="reviewCard" id="two"></li>
               </ul>"#,
        );
        assert_eq!(ids(&html), vec!["one", "two"]);
    }

    #[test]
    fn falls_back_to_sections_with_star_ratings() {
        let html = Html::parse_document(
            r#"<section id="about"><p>About</p></section>
               <section id="rated"><div aria-label="5 star rating"></div></section>"#,
        );
        assert_eq!(ids(&html), vec!["rated"]);
    }

    #[test]
    fn nothing_recognizable_is_empty() {
        let html = Html::parse_document("<div><p>Just a page</p></div>");
        assert!(locate_review_containers(html.root_element()).is_empty());
    }
}
