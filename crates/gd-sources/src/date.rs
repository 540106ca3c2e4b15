//! Strict `DD-MM-YYYY` date validation

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, SourceError};

/// Format string matching the upstream date convention
pub const DATE_FORMAT: &str = "%d-%m-%Y";

// chrono alone accepts unpadded fields, so the shape is checked first.
static DATE_SHAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}-[0-9]{2}-[0-9]{4}$").ok());

/// Validate a `DD-MM-YYYY` date, returning it unchanged
///
/// Day and month must be zero-padded and the date must exist in the
/// calendar (`30-02-2024` fails). Year 0000 is rejected.
pub fn validate_date(input: &str) -> Result<&str> {
    let shaped = DATE_SHAPE
        .as_ref()
        .is_some_and(|re| re.is_match(input));

    let in_calendar = NaiveDate::parse_from_str(input, DATE_FORMAT).is_ok_and(|d| d.year() >= 1);

    if shaped && in_calendar {
        Ok(input)
    } else {
        Err(SourceError::InvalidDateFormat(input.to_string()))
    }
}

/// Validate a `(from, to)` pair, reporting the first bad one
pub fn validate_range<'a>(from: &'a str, to: &'a str) -> Result<(&'a str, &'a str)> {
    Ok((validate_date(from)?, validate_date(to)?))
}
