//! Review extraction: locate containers, then build one record per container.

mod fields;
mod locator;
mod response;

use scraper::ElementRef;

pub use locator::locate_review_containers;

use crate::dates::normalize_to_canonical;
use crate::error::DateParseError;
use crate::strategy::cascade;
use crate::types::ReviewRecord;

use self::fields::{DATE_TEXT_STRATEGIES, REVIEWER_NAME_STRATEGIES};
use self::response::extract_response;

/// Build the record for one review container.
///
/// Missing fields are left empty. Date text that is present but cannot be
/// normalized, in the review itself or in an owner reply, fails the whole
/// container.
///
/// # Errors
///
/// Returns [`DateParseError`] for unparseable review or reply dates.
pub fn extract_review(container: ElementRef<'_>) -> Result<ReviewRecord, DateParseError> {
    let review_date = cascade("review_date", container, DATE_TEXT_STRATEGIES)
        .map(|raw| normalize_to_canonical(&raw))
        .transpose()?;
    let reactions = fields::reactions(container);
    let response = extract_response(container)?;

    Ok(ReviewRecord {
        reviewer_name: cascade("reviewer_name", container, REVIEWER_NAME_STRATEGIES),
        avatar_url: fields::avatar_url(container),
        reviewer_details: fields::reviewer_details(container),
        reviewer_location: fields::reviewer_location(container),
        reviewer_rating: fields::reviewer_rating(container),
        review_date,
        review_text: fields::body_text(container),
        media_urls: fields::media_urls(container),
        helpful_count: reactions.helpful,
        thanks_count: reactions.thanks,
        love_this_count: reactions.love_this,
        oh_no_count: reactions.oh_no,
        response_author_name: response.author_name,
        response_date: response.date,
        response_content: response.content,
    })
}

/// Extract every review on the page, in document order.
///
/// Containers that fail are logged and skipped; siblings are unaffected.
#[must_use]
pub fn extract_reviews(root: ElementRef<'_>) -> Vec<ReviewRecord> {
    let containers = locate_review_containers(root);
    let mut reviews = Vec::with_capacity(containers.len());

    for (index, container) in containers.into_iter().enumerate() {
        match extract_review(container) {
            Ok(review) => reviews.push(review),
            Err(e) => {
                tracing::debug!(index, error = %e, "skipping review container");
            }
        }
    }

    tracing::info!(count = reviews.len(), "parsed review blocks");
    reviews
}
