//! Star-rating histogram over a set of reviews.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::types::ReviewRecord;

/// Count of reviews per star value, always covering all five buckets.
///
/// Serializes as `{"1stars": n, "2stars": n, ..., "5stars": n}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingHistogram {
    counts: [u32; 5],
}

impl RatingHistogram {
    /// Count known ratings in `1..=5`; reviews without one land in no bucket.
    #[must_use]
    pub fn from_reviews(reviews: &[ReviewRecord]) -> Self {
        let mut histogram = Self::default();
        for rating in reviews.iter().filter_map(|r| r.reviewer_rating) {
            histogram.record(rating);
        }
        histogram
    }

    fn record(&mut self, stars: u8) {
        if let Some(slot) = bucket_index(stars).and_then(|i| self.counts.get_mut(i)) {
            *slot += 1;
        }
    }

    /// Reviews counted for `stars`; 0 for values outside `1..=5`.
    #[must_use]
    pub fn count(&self, stars: u8) -> u32 {
        bucket_index(stars)
            .and_then(|i| self.counts.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Sum over all buckets.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

fn bucket_index(stars: u8) -> Option<usize> {
    (1..=5).contains(&stars).then(|| usize::from(stars - 1))
}

impl Serialize for RatingHistogram {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (i, count) in self.counts.iter().enumerate() {
            map.serialize_entry(&format!("{}stars", i + 1), count)?;
        }
        map.end()
    }
}
