//! Field-level sanitizers and checks used by the validation pipeline

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use validator::{ValidateLength, ValidationError};

/// One step applied to a single form field, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Strip surrounding whitespace
    Trim,
    /// Character count bounds; an empty value reports "must be specified"
    Length { min: u64, max: Option<u64> },
    /// Neutralize markup-significant characters
    Escape,
    /// ASCII letters and digits only (skipped for empty values)
    Alphanumeric,
    /// Empty means absent; anything else must be an ISO-8601 date
    OptionalIsoDate,
}

fn error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::from(message));
    err
}

pub fn check_length(
    value: &str,
    label: &str,
    min: u64,
    max: Option<u64>,
) -> Result<(), ValidationError> {
    if value.validate_length(Some(min), max, None) {
        return Ok(());
    }
    let message = match max {
        _ if value.is_empty() => format!("{} must be specified.", label),
        Some(max) if value.chars().count() as u64 > max => {
            format!("{} must be at most {} characters.", label, max)
        }
        _ => format!("{} must be at least {} characters.", label, min),
    };
    Err(error("length", message))
}

pub fn check_alphanumeric(value: &str, label: &str) -> Result<(), ValidationError> {
    if value.is_empty() || is_alphanumeric(value) {
        Ok(())
    } else {
        Err(error(
            "alphanumeric",
            format!("{} has non-alphanumeric characters.", label),
        ))
    }
}

pub fn check_optional_date(value: &str, label: &str) -> Result<Option<NaiveDate>, ValidationError> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_iso_date(value)
        .map(Some)
        .ok_or_else(|| error("iso8601", format!("Invalid {}", label.to_lowercase())))
}

pub fn is_alphanumeric(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Accepts `YYYY-MM-DD`, a naive `YYYY-MM-DDTHH:MM:SS` timestamp or an
/// RFC 3339 timestamp; timestamps keep only their calendar date.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Replace markup-significant characters (ampersand, angle brackets, quotes,
/// slashes and backtick) with HTML entities.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}
