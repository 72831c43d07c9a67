//! Formatting helpers
//!
//! Pure string helpers shared by the builders: yes/no answers, lists, reasons,
//! display dates and markup escaping.

use crate::component::Content;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Default text for an unanswered question
pub const NOT_ANSWERED: &str = "Not answered";

/// Default text for an empty list
pub const NONE: &str = "None";

/// Default text for a missing value
pub const NOT_PROVIDED: &str = "Not provided";

/// Default display date pattern (`1 January 2024`)
pub const DEFAULT_DATE_PATTERN: &str = "%-d %B %Y";

const BULLET_LIST_OPEN: &str = r#"<ul class="govuk-list govuk-list--bullet">"#;

/// Date formatting failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateFormatError {
    /// Input is neither RFC 3339 nor `YYYY-MM-DD`
    #[error("unparseable date: {0}")]
    Unparseable(String),

    /// strftime pattern is malformed
    #[error("invalid date pattern: {0}")]
    InvalidPattern(String),
}

/// Named reason with optional free-text entries
///
/// Used for validation outcomes ("incomplete"/"invalid" reasons).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    /// Reason label
    pub name: String,

    /// Free-text entries given for the reason
    #[serde(default)]
    pub text: Vec<String>,
}

impl Reason {
    /// Reason without free text
    #[inline]
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Vec::new(),
        }
    }

    /// Add free-text entry
    #[inline]
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text.push(text.into());
        self
    }
}

/// Escape text for inclusion in markup
#[inline]
#[must_use]
pub fn escape_html(text: &str) -> String {
    v_htmlescape::escape(text).to_string()
}

/// `Yes`/`No`, or [`NOT_ANSWERED`] when unset
#[inline]
#[must_use]
pub fn format_yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "Yes",
        Some(false) => "No",
        None => NOT_ANSWERED,
    }
}

/// `Yes`/`No`, or `default_text` when unset
#[inline]
#[must_use]
pub fn format_yes_no_or(value: Option<bool>, default_text: &str) -> &str {
    match value {
        Some(_) => format_yes_no(value),
        None => default_text,
    }
}

/// Fallback text when empty, the sole item verbatim, otherwise a bullet list
///
/// List items are escaped; the single-item case stays plain text.
#[must_use]
pub fn list_or_only_item<S: AsRef<str>>(items: &[S], fallback_text: &str) -> Content {
    match items {
        [] => Content::text(fallback_text),
        [only] => Content::text(only.as_ref()),
        _ => {
            let escaped: Vec<String> = items.iter().map(|i| escape_html(i.as_ref())).collect();
            Content::Html(bullet_list(&escaped))
        }
    }
}

/// Bullet list from already-escaped entries
#[must_use]
pub fn bullet_list<S: AsRef<str>>(entries_html: &[S]) -> String {
    let mut out = String::from(BULLET_LIST_OPEN);
    for entry in entries_html {
        let _ = write!(out, "<li>{}</li>", entry.as_ref());
    }
    out.push_str("</ul>");
    out
}

/// Escape each line and join with `<br>`
#[must_use]
pub fn join_lines_html<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(|l| escape_html(l.as_ref()))
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Reason as markup: `name: text` per free-text entry joined by `<br>`,
/// the bare name without entries, empty for no reason
#[must_use]
pub fn format_reason(reason: Option<&Reason>) -> String {
    let Some(reason) = reason else {
        return String::new();
    };
    let name = escape_html(&reason.name);
    if reason.text.is_empty() {
        return name;
    }
    reason
        .text
        .iter()
        .map(|t| format!("{name}: {}", escape_html(t)))
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Several reasons: the sole one inline, more than one as a bullet list
#[must_use]
pub fn format_reasons(reasons: &[Reason], fallback_text: &str) -> Content {
    match reasons {
        [] => Content::text(fallback_text),
        [only] => Content::Html(format_reason(Some(only))),
        _ => {
            let formatted: Vec<String> = reasons.iter().map(|r| format_reason(Some(r))).collect();
            Content::Html(bullet_list(&formatted))
        }
    }
}

/// Check that a strftime pattern is well formed
///
/// # Errors
/// [`DateFormatError::InvalidPattern`] when chrono rejects any item.
pub fn validate_date_pattern(pattern: &str) -> Result<(), DateFormatError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(DateFormatError::InvalidPattern(pattern.to_string()));
    }
    Ok(())
}

/// Parse an ISO-8601 date or timestamp to its UTC calendar date
///
/// # Errors
/// [`DateFormatError::Unparseable`] for anything else.
pub fn parse_iso_date(iso: &str) -> Result<NaiveDate, DateFormatError> {
    let trimmed = iso.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| DateFormatError::Unparseable(iso.to_string()))
}

/// Format a calendar date with a strftime pattern
///
/// # Errors
/// [`DateFormatError::InvalidPattern`] for malformed patterns.
pub fn date_to_display_date(date: NaiveDate, pattern: &str) -> Result<String, DateFormatError> {
    validate_date_pattern(pattern)?;
    let mut out = String::new();
    write!(out, "{}", date.format(pattern))
        .map_err(|_| DateFormatError::InvalidPattern(pattern.to_string()))?;
    Ok(out)
}

/// ISO-8601 string to display date
///
/// # Errors
/// See [`parse_iso_date`] and [`date_to_display_date`].
pub fn date_iso_string_to_display_date(iso: &str, pattern: &str) -> Result<String, DateFormatError> {
    date_to_display_date(parse_iso_date(iso)?, pattern)
}
