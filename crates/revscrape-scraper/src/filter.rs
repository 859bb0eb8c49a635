//! Rating and date filters over extracted reviews.

use revscrape_core::{RawSetting, ScraperSettings};

use crate::dates::{normalize, PointInTime};
use crate::types::ReviewRecord;

/// Constraints applied to a page's reviews. Unset fields constrain nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewFilters {
    pub min_rating: Option<i64>,
    pub max_rating: Option<i64>,
    pub from_date: Option<PointInTime>,
}

impl ReviewFilters {
    /// Build filters from the scraper settings.
    ///
    /// Decimal rating bounds are truncated (`4.5` is 4). A bound that does not
    /// parse is dropped with a warning; the run goes on as if it had not been
    /// configured.
    #[must_use]
    pub fn from_settings(settings: &ScraperSettings) -> Self {
        Self {
            min_rating: rating_bound("min_rating", settings.min_rating.as_ref()),
            max_rating: rating_bound("max_rating", settings.max_rating.as_ref()),
            from_date: date_bound(settings.from_date.as_ref()),
        }
    }

    fn has_rating_bound(&self) -> bool {
        self.min_rating.is_some() || self.max_rating.is_some()
    }

    /// Whether `review` survives every configured constraint.
    #[must_use]
    pub fn passes(&self, review: &ReviewRecord) -> bool {
        self.passes_rating(review) && self.passes_date(review)
    }

    fn passes_rating(&self, review: &ReviewRecord) -> bool {
        let Some(rating) = review.reviewer_rating.map(i64::from) else {
            return !self.has_rating_bound();
        };
        !self.min_rating.is_some_and(|min| rating < min)
            && !self.max_rating.is_some_and(|max| rating > max)
    }

    fn passes_date(&self, review: &ReviewRecord) -> bool {
        let Some(from) = self.from_date else {
            return true;
        };
        let Some(raw) = review.review_date.as_deref() else {
            return false;
        };
        match normalize(raw) {
            Ok(date) => date >= from,
            Err(e) => {
                tracing::debug!(review_date = raw, error = %e, "dropping review with unreadable date");
                false
            }
        }
    }
}

fn rating_bound(name: &'static str, raw: Option<&RawSetting>) -> Option<i64> {
    let raw = raw?;
    if raw.as_str().trim().is_empty() {
        return None;
    }
    let bound = raw.as_integer();
    if bound.is_none() {
        tracing::warn!(setting = name, value = %raw, "ignoring invalid rating bound");
    }
    bound
}

fn date_bound(raw: Option<&RawSetting>) -> Option<PointInTime> {
    let raw = raw.map(RawSetting::as_str).map(str::trim)?;
    if raw.is_empty() {
        return None;
    }
    match normalize(raw) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(setting = "from_date", value = raw, error = %e, "ignoring invalid from_date");
            None
        }
    }
}

/// Keep the reviews that pass `filters`, preserving order.
#[must_use]
pub fn apply_filters(reviews: Vec<ReviewRecord>, filters: &ReviewFilters) -> Vec<ReviewRecord> {
    let before = reviews.len();
    let kept: Vec<ReviewRecord> = reviews.into_iter().filter(|r| filters.passes(r)).collect();

    tracing::info!(
        min_rating = ?filters.min_rating,
        max_rating = ?filters.max_rating,
        from_date = ?filters.from_date,
        before,
        after = kept.len(),
        "filters applied"
    );
    kept
}
