//! Free-text date normalization.
//!
//! Review pages print dates in whatever shape the current markup uses
//! (`1/5/2024`, `Jan 5, 2024`, `2024-01-05T10:00:00Z`, `2 weeks ago`). All of
//! them normalize to a naive [`NaiveDateTime`]: inputs carrying an offset are
//! converted to UTC first, inputs without one are taken at face value.
//! The canonical text form ([`to_canonical`]) parses back to the same value.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;

use crate::error::DateParseError;

/// The comparable value produced by [`normalize`].
pub type PointInTime = NaiveDateTime;

const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Tried in order. Two-digit-year formats come before their four-digit twins:
/// `%Y` happily reads `24` as the year 24, while `%y` rejects `2024`. Every
/// `%Y` match must also show the year as four digits in the input.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
    "%B %d, %Y %I:%M %p",
    "%B %d, %Y %H:%M",
];

/// ISO datetimes whose offset has no colon (`+0200`), which RFC 3339 rejects.
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m-%d-%y",
    "%m-%d-%Y",
    "%d-%b-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

const MONTH_YEAR_FORMATS: &[&str] = &["%B %Y", "%B, %Y", "%m/%Y", "%Y-%m"];

/// Dates printed without a year take the year of the reference instant.
const YEARLESS_FORMATS: &[&str] = &["%B %d", "%d %B", "%m/%d"];

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").expect("valid ordinal regex"));
static WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:mon|tue|tues|wed|thu|thur|thurs|fri|sat|sun)(?:day|nesday|rsday|urday)?\.?,?\s+")
        .expect("valid weekday regex")
});
static MONTH_DOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(jan|feb|mar|apr|jun|jul|aug|sept?|oct|nov|dec)\.").expect("valid month regex")
});
static SEPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bsept\b").expect("valid sept regex"));
static YEAR_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("valid year regex"));
static FULL_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}\b").expect("valid full year regex"));
static RELATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+|an?|one)\s+(minute|hour|day|week|month|year)s?\s+ago$")
        .expect("valid relative date regex")
});

/// Normalize `text` relative to the current UTC instant.
///
/// # Errors
///
/// Returns [`DateParseError`] if the text is empty or matches no known pattern.
pub fn normalize(text: &str) -> Result<PointInTime, DateParseError> {
    normalize_at(text, Utc::now().naive_utc())
}

/// Normalize `text`, resolving relative phrases (`yesterday`, `3 days ago`)
/// and dates without a year (`Jan 5`) against `now`.
///
/// # Errors
///
/// Returns [`DateParseError`] if the text is empty or matches no known pattern.
pub fn normalize_at(text: &str, now: NaiveDateTime) -> Result<PointInTime, DateParseError> {
    let cleaned = clean(text);
    if cleaned.is_empty() {
        return Err(DateParseError::Empty);
    }

    parse_relative(&cleaned, now)
        .or_else(|| parse_absolute(&cleaned, now))
        .ok_or_else(|| DateParseError::Unrecognized {
            input: text.trim().to_string(),
        })
}

/// Canonical text form, e.g. `2024-01-05T00:00:00`.
#[must_use]
pub fn to_canonical(value: &PointInTime) -> String {
    value.format(CANONICAL_FORMAT).to_string()
}

/// Shorthand for `normalize` followed by `to_canonical`.
///
/// # Errors
///
/// Returns [`DateParseError`] if `text` cannot be normalized.
pub fn normalize_to_canonical(text: &str) -> Result<String, DateParseError> {
    normalize(text).map(|dt| to_canonical(&dt))
}

fn clean(text: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(text.trim(), " ");
    let no_weekday = WEEKDAY_RE.replace(&collapsed, "");
    let no_ordinals = ORDINAL_RE.replace_all(&no_weekday, "$1");
    let no_dots = MONTH_DOT_RE.replace_all(&no_ordinals, "$1");
    SEPT_RE.replace_all(&no_dots, "Sep").trim().to_string()
}

fn parse_absolute(cleaned: &str, now: NaiveDateTime) -> Option<PointInTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(cleaned) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(cleaned) {
        return Some(dt.naive_utc());
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(cleaned, format) {
            if has_full_year(cleaned, dt.year()) {
                return Some(dt.naive_utc());
            }
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cleaned, format) {
            if year_is_explicit(cleaned, format, dt.year()) {
                return Some(dt);
            }
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(cleaned, format) {
            if year_is_explicit(cleaned, format, date.year()) {
                return Some(date.and_time(NaiveTime::MIN));
            }
        }
    }

    parse_month_year(cleaned)
        .or_else(|| parse_year(cleaned))
        .or_else(|| parse_yearless(cleaned, now.year()))
}

/// `%y` formats bring their own century; `%Y` ones need the full year in the text.
fn year_is_explicit(cleaned: &str, format: &str, year: i32) -> bool {
    !format.contains("%Y") || has_full_year(cleaned, year)
}

fn has_full_year(cleaned: &str, year: i32) -> bool {
    let year = year.to_string();
    FULL_YEAR_RE.find_iter(cleaned).any(|m| m.as_str() == year)
}

fn parse_month_year(value: &str) -> Option<PointInTime> {
    let padded = format!("1 {value}");
    MONTH_YEAR_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(&padded, &format!("%d {format}"))
            .ok()
            .filter(|date| has_full_year(value, date.year()))
            .map(|date| date.and_time(NaiveTime::MIN))
    })
}

fn parse_year(value: &str) -> Option<PointInTime> {
    if !YEAR_ONLY_RE.is_match(value) {
        return None;
    }
    let year = value.parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, 1, 1).map(|d| d.and_time(NaiveTime::MIN))
}

fn parse_yearless(value: &str, year: i32) -> Option<PointInTime> {
    let dated = format!("{value} {year}");
    YEARLESS_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(&dated, &format!("{format} %Y"))
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN))
    })
}

fn parse_relative(cleaned: &str, now: NaiveDateTime) -> Option<PointInTime> {
    let midnight = now.date().and_time(NaiveTime::MIN);
    match cleaned.to_ascii_lowercase().as_str() {
        "today" | "just now" => return Some(midnight),
        "yesterday" => return midnight.checked_sub_signed(Duration::days(1)),
        _ => {}
    }

    let caps = RELATIVE_RE.captures(cleaned)?;
    let amount: u32 = match caps[1].to_ascii_lowercase().as_str() {
        "a" | "an" | "one" => 1,
        digits => digits.parse().ok()?,
    };

    match caps[2].to_ascii_lowercase().as_str() {
        "minute" => now.checked_sub_signed(Duration::minutes(i64::from(amount))),
        "hour" => now.checked_sub_signed(Duration::hours(i64::from(amount))),
        "day" => midnight.checked_sub_signed(Duration::days(i64::from(amount))),
        "week" => midnight.checked_sub_signed(Duration::weeks(i64::from(amount))),
        "month" => midnight.checked_sub_months(Months::new(amount)),
        "year" => midnight.checked_sub_months(Months::new(amount.checked_mul(12)?)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "dates_test.rs"]
mod tests;
