//! Records produced by the extraction pipeline.
//!
//! Field names follow the page model; the `serde` renames give the flat
//! JSON shape consumers of the exported file already read
//! (`latest_reviewer_name`, `total_reviews`, `review_counts_by_rating`, ...).
//! Absent optional fields serialize as `null`, counters as `0`.

use serde::{Serialize, Serializer};

use crate::histogram::RatingHistogram;

/// Business-level metadata, extracted once per page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessInfo {
    pub business_url: String,
    pub business_name: Option<String>,
    /// Always within `0.0..=5.0` when present.
    #[serde(serialize_with = "one_decimal")]
    pub average_rating: Option<f64>,
    /// Raw "123 reviews" style text as printed on the page.
    #[serde(rename = "total_reviews")]
    pub total_reviews_text: Option<String>,
    /// Repeated currency symbols, e.g. `$$`.
    pub price_range: Option<String>,
    pub business_address: Option<String>,
    pub contact_number: Option<String>,
}

impl BusinessInfo {
    /// A record with only the URL set.
    #[must_use]
    pub fn new(business_url: impl Into<String>) -> Self {
        Self {
            business_url: business_url.into(),
            business_name: None,
            average_rating: None,
            total_reviews_text: None,
            price_range: None,
            business_address: None,
            contact_number: None,
        }
    }
}

/// `4.5` → `"4.5"`, `4.0` → `"4.0"`.
fn one_decimal<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_str(&format!("{v:.1}")),
        None => serializer.serialize_none(),
    }
}

/// Reviewer profile counters; unmatched counters stay 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewerDetails {
    pub total_reviews: u32,
    pub total_friends: u32,
    pub business_photos_uploaded: u32,
}

/// One review, best effort: any optional field may be missing independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewRecord {
    #[serde(rename = "latest_reviewer_name")]
    pub reviewer_name: Option<String>,
    #[serde(rename = "review_avatar_url")]
    pub avatar_url: Option<String>,
    #[serde(rename = "latest_reviewer_details")]
    pub reviewer_details: ReviewerDetails,
    #[serde(rename = "latest_reviewer_location")]
    pub reviewer_location: Option<String>,
    /// Integer star rating, 1 through 5.
    #[serde(rename = "latest_reviewer_rating")]
    pub reviewer_rating: Option<u8>,
    /// Canonical ISO-8601 text (see [`crate::dates::to_canonical`]).
    pub review_date: Option<String>,
    pub review_text: Option<String>,
    /// Insertion-ordered, no duplicates.
    #[serde(rename = "review_media_urls")]
    pub media_urls: Vec<String>,
    pub helpful_count: u32,
    pub thanks_count: u32,
    pub love_this_count: u32,
    pub oh_no_count: u32,
    pub response_author_name: Option<String>,
    /// Canonical ISO-8601 text.
    pub response_date: Option<String>,
    pub response_content: Option<String>,
}

/// One exported row: the page's business fields, its rating histogram, and
/// a single surviving review, flattened into one object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRecord {
    #[serde(flatten)]
    pub business: BusinessInfo,
    pub review_counts_by_rating: RatingHistogram,
    #[serde(flatten)]
    pub review: ReviewRecord,
}
