//! Page-level pipeline: business info, reviews, truncation, filters,
//! histogram, flat output records.

use revscrape_core::ScraperSettings;
use scraper::Html;

use crate::business::extract_business;
use crate::filter::{apply_filters, ReviewFilters};
use crate::histogram::RatingHistogram;
use crate::reviews::extract_reviews;
use crate::types::{BusinessInfo, OutputRecord, ReviewRecord};

/// Turn extracted data for one page into output records.
///
/// Reviews are cut to `max_reviews` before the filters run, and the histogram
/// counts only the reviews that survive the filters.
#[must_use]
pub fn assemble_records(
    business: &BusinessInfo,
    mut reviews: Vec<ReviewRecord>,
    settings: &ScraperSettings,
) -> Vec<OutputRecord> {
    reviews.truncate(settings.max_reviews);

    let filters = ReviewFilters::from_settings(settings);
    let reviews = apply_filters(reviews, &filters);
    let histogram = RatingHistogram::from_reviews(&reviews);

    reviews
        .into_iter()
        .map(|review| OutputRecord {
            business: business.clone(),
            review_counts_by_rating: histogram,
            review,
        })
        .collect()
}

/// Run the whole extraction pipeline over one HTML page.
#[must_use]
pub fn extract_page(html: &str, business_url: &str, settings: &ScraperSettings) -> Vec<OutputRecord> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let business = extract_business(root, business_url);
    let reviews = extract_reviews(root);
    let records = assemble_records(&business, reviews, settings);

    tracing::info!(url = business_url, records = records.len(), "page extracted");
    records
}

#[cfg(test)]
mod tests {
    use revscrape_core::RawSetting;

    use super::*;

    fn rated(rating: Option<u8>) -> ReviewRecord {
        ReviewRecord {
            reviewer_rating: rating,
            ..ReviewRecord::default()
        }
    }

    fn settings(max_reviews: usize, min_rating: Option<&str>) -> ScraperSettings {
        ScraperSettings {
            max_reviews,
            min_rating: min_rating.map(RawSetting::new),
            ..ScraperSettings::default()
        }
    }

    #[test]
    fn truncates_before_filtering() {
        // First 200 alternate 5/1 (100 pass); the 50 beyond the cut are all 5s.
        let mut reviews: Vec<ReviewRecord> = (0..200)
            .map(|i| rated(Some(if i % 2 == 0 { 5 } else { 1 })))
            .collect();
        reviews.extend((0..50).map(|_| rated(Some(5))));

        let business = BusinessInfo::new("https://x.test/biz");
        let records = assemble_records(&business, reviews, &settings(200, Some("4")));

        assert_eq!(records.len(), 100);
    }

    #[test]
    fn histogram_reflects_filtered_reviews() {
        let reviews = vec![rated(Some(5)), rated(Some(4)), rated(Some(2)), rated(None)];
        let business = BusinessInfo::new("u");
        let records = assemble_records(&business, reviews, &settings(200, Some("4")));

        assert_eq!(records.len(), 2);
        let histogram = records[0].review_counts_by_rating;
        assert_eq!(histogram.count(5), 1);
        assert_eq!(histogram.count(4), 1);
        assert_eq!(histogram.count(2), 0);
        assert_eq!(histogram.total(), 2);
    }

    #[test]
    fn every_record_carries_the_same_business() {
        let mut business = BusinessInfo::new("u");
        business.business_name = Some("Tacos".to_string());
        let records = assemble_records(
            &business,
            vec![rated(Some(3)), rated(Some(1))],
            &ScraperSettings::default(),
        );
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.business == business));
    }

    #[test]
    fn no_reviews_means_no_records() {
        let records = extract_page(
            "<html><body><h1>Empty</h1></body></html>",
            "u",
            &ScraperSettings::default(),
        );
        assert!(records.is_empty());
    }
}
