//! Business owner replies nested inside a review container.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use super::fields::{body_text, bold_text, DATE_TEXT_STRATEGIES};
use crate::dates::normalize_to_canonical;
use crate::dom::spaced_text;
use crate::error::DateParseError;
use crate::strategy::first_match;

static DIV: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div").expect("valid div selector"));
static OWNER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bowner").expect("valid owner regex"));

/// Author, canonical date and body of an owner reply. All absent when the
/// container has no reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct BusinessResponse {
    pub author_name: Option<String>,
    pub date: Option<String>,
    pub content: Option<String>,
}

/// First `<div>` under `container` whose text mentions an owner, in document order.
pub(crate) fn response_block(container: ElementRef<'_>) -> Option<ElementRef<'_>> {
    container
        .select(&DIV)
        .find(|div| OWNER_RE.is_match(&spaced_text(*div)))
}

/// Pull the reply out of `container`.
///
/// # Errors
///
/// Returns [`DateParseError`] when the reply carries date text that cannot be
/// normalized.
pub(crate) fn extract_response(
    container: ElementRef<'_>,
) -> Result<BusinessResponse, DateParseError> {
    let Some(block) = response_block(container) else {
        return Ok(BusinessResponse::default());
    };

    let date = first_match(block, DATE_TEXT_STRATEGIES)
        .map(|raw| normalize_to_canonical(&raw))
        .transpose()?;

    Ok(BusinessResponse {
        author_name: bold_text(block),
        date,
        content: body_text(block),
    })
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    fn response_of(html: &str) -> Result<BusinessResponse, DateParseError> {
        let doc = Html::parse_fragment(html);
        extract_response(doc.root_element())
    }

    #[test]
    fn extracts_author_date_and_body() {
        let got = response_of(
            r#"<div>
                 <p>The reviewer's own words go right here.</p>
               </div>
               <div>
                 <strong>Maria G.</strong><span>Business Owner</span>
                 <time>Feb 2, 2024</time>
                 <p>Thanks so much for visiting us!</p>
               </div>"#,
        )
        .unwrap();

        assert_eq!(got.author_name.as_deref(), Some("Maria G."));
        assert_eq!(got.date.as_deref(), Some("2024-02-02T00:00:00"));
        assert_eq!(got.content.as_deref(), Some("Thanks so much for visiting us!"));
    }

    #[test]
    fn no_owner_block_means_all_absent() {
        let got = response_of("<div><strong>Jane</strong><p>Great food and friendly staff.</p></div>").unwrap();
        assert_eq!(got, BusinessResponse::default());
    }

    #[test]
    fn owner_marker_is_case_insensitive() {
        let doc = Html::parse_fragment(
            "<section><div id='body'>Lovely</div><div id='reply'>Comment from the OWNER</div></section>",
        );
        let block = response_block(doc.root_element()).unwrap();
        assert_eq!(block.value().attr("id"), Some("reply"));
    }

    #[test]
    fn unparseable_reply_date_is_an_error() {
        let err = response_of("<div><span>Owner</span><time>not a date</time></div>").unwrap_err();
        assert!(matches!(err, DateParseError::Unrecognized { .. }));
    }
}
