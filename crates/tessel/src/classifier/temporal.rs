// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::model::DateGranularity;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(19|20)\d{2}$").expect("valid year regex"));
static QUARTER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Q[1-4][\s\-]*\d{4}$").expect("valid quarter regex"));
static MONTH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(jan(uary)?|feb(ruary)?|mar(ch)?|apr(il)?|may|june?|july?|aug(ust)?|sep(t(ember)?)?|oct(ober)?|nov(ember)?|dec(ember)?)\b",
    )
    .expect("valid month regex")
});
static SLASH_DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("valid slash date regex"));
static ISO_DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("valid iso date regex"));

pub const BOOLEAN_TOKENS: [&str; 6] = ["true", "false", "yes", "no", "0", "1"];

pub fn is_year_like(value: &str) -> bool {
    YEAR_PATTERN.is_match(value.trim())
}
pub fn is_quarter_like(value: &str) -> bool {
    QUARTER_PATTERN.is_match(value.trim())
}
pub fn is_month_like(value: &str) -> bool {
    MONTH_PATTERN.is_match(value.trim())
}
/// Any of the value shapes that mark a column as a time series.
pub fn matches_time_pattern(value: &str) -> bool {
    let value = value.trim();
    is_year_like(value)
        || is_quarter_like(value)
        || is_month_like(value)
        || SLASH_DATE_PATTERN.is_match(value)
        || ISO_DATE_PATTERN.is_match(value)
}
pub fn is_boolean_token(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    BOOLEAN_TOKENS.contains(&lower.as_str())
}

/// Parses a calendar date whose year lies strictly between `min_year` and `max_year`.
/// Formats without a day component are anchored to the first of the month.
pub fn parse_date(
    value: &str,
    formats: &[String],
    min_year: i32,
    max_year: i32,
) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let parsed = DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
        .or_else(|| formats.iter().find_map(|format| parse_with(value, format)));
    parsed.filter(|date| date.year() > min_year && date.year() < max_year)
}
fn parse_with(value: &str, format: &str) -> Option<NaiveDate> {
    if format.contains("%H") {
        return NaiveDateTime::parse_from_str(value, format)
            .ok()
            .map(|dt| dt.date());
    }
    if format.contains("%d") {
        return NaiveDate::parse_from_str(value, format).ok();
    }
    NaiveDate::parse_from_str(&format!("{value} 01"), &format!("{format} %d")).ok()
}

/// Buckets the covered span of a date column.
pub fn granularity_from_span(span_days: i64) -> DateGranularity {
    match span_days {
        d if d > 730 => DateGranularity::Year,
        d if d > 180 => DateGranularity::Quarter,
        d if d > 60 => DateGranularity::Month,
        d if d > 14 => DateGranularity::Week,
        _ => DateGranularity::Day,
    }
}
pub fn span_days(dates: &[NaiveDate]) -> Option<i64> {
    let min = dates.iter().min()?;
    let max = dates.iter().max()?;
    Some(max.signed_duration_since(*min).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassifierConfig;

    fn parse(value: &str) -> Option<NaiveDate> {
        let config = ClassifierConfig::default();
        parse_date(value, &config.date_formats, config.min_year, config.max_year)
    }

    #[test]
    fn test_parses_common_formats() {
        let jan = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse("2024-01-15"), Some(jan));
        assert_eq!(parse("01/15/2024"), Some(jan));
        assert_eq!(parse("2024-01-15T08:30:00Z"), Some(jan));
        assert_eq!(parse("2024-01-15 08:30:00"), Some(jan));
        assert_eq!(parse("Jan 2024"), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(parse("March 2023"), NaiveDate::from_ymd_opt(2023, 3, 1));
        assert_eq!(parse("2023-07"), NaiveDate::from_ymd_opt(2023, 7, 1));
    }

    #[test]
    fn test_year_bounds_are_exclusive() {
        assert_eq!(parse("1900-06-01"), None);
        assert_eq!(parse("2100-06-01"), None);
        assert!(parse("1901-06-01").is_some());
        assert_eq!(parse("not a date"), None);
    }

    #[test]
    fn test_time_patterns() {
        assert!(matches_time_pattern("2021"));
        assert!(!matches_time_pattern("1500"));
        assert!(matches_time_pattern("Q3 2024"));
        assert!(matches_time_pattern("Feb"));
        assert!(!matches_time_pattern("Marketing"));
        assert!(matches_time_pattern("3/7/2024"));
        assert!(matches_time_pattern("2024-03-07"));
    }

    #[test]
    fn test_span_buckets() {
        assert_eq!(granularity_from_span(1000), DateGranularity::Year);
        assert_eq!(granularity_from_span(335), DateGranularity::Quarter);
        assert_eq!(granularity_from_span(90), DateGranularity::Month);
        assert_eq!(granularity_from_span(30), DateGranularity::Week);
        assert_eq!(granularity_from_span(6), DateGranularity::Day);
    }

    #[test]
    fn test_boolean_tokens() {
        assert!(is_boolean_token("Yes"));
        assert!(is_boolean_token(" false "));
        assert!(!is_boolean_token("maybe"));
    }
}
