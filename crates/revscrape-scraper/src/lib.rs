//! Business and review extraction from business listing pages.
//!
//! [`extract_page`] runs the offline pipeline over an HTML string;
//! [`scrape_business_page`] fetches the page first.

pub mod assemble;
pub mod business;
pub mod client;
pub mod dates;
mod dom;
pub mod error;
pub mod filter;
pub mod histogram;
mod rate_limit;
pub mod reviews;
pub mod strategy;
pub mod types;

pub use assemble::{assemble_records, extract_page};
pub use business::extract_business;
pub use client::{scrape_business_page, PageClient};
pub use dates::{normalize, normalize_at, normalize_to_canonical, to_canonical, PointInTime};
pub use error::{DateParseError, ScraperError};
pub use filter::{apply_filters, ReviewFilters};
pub use histogram::RatingHistogram;
pub use reviews::{extract_review, extract_reviews, locate_review_containers};
pub use strategy::{first_match, Strategy};
pub use types::{BusinessInfo, OutputRecord, ReviewRecord, ReviewerDetails};
