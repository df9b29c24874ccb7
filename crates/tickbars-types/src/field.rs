//! Field-addressable input rows.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// A single field value as exposed by an input row.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// Floating-point number.
    Number(f64),
    /// Integer number.
    Integer(i64),
    /// Unparsed text, as found in CSV cells or JSON strings.
    Text(Cow<'a, str>),
    /// Native timestamp.
    Timestamp(DateTime<Utc>),
    /// Explicit missing value.
    Null,
}

impl FieldValue<'_> {
    /// Interprets the value as a finite number.
    ///
    /// Text is trimmed and parsed; nulls, timestamps and non-finite values
    /// yield `None`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            #[allow(clippy::cast_precision_loss)]
            Self::Integer(i) => *i as f64,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Timestamp(_) | Self::Null => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Interprets the value as a UTC instant.
    ///
    /// Integers are Unix epoch milliseconds. Text is parsed with
    /// [`parse_timestamp`].
    #[must_use]
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            Self::Integer(ms) => DateTime::from_timestamp_millis(*ms),
            Self::Text(s) => parse_timestamp(s),
            Self::Number(_) | Self::Null => None,
        }
    }
}

impl std::fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            Self::Null => write!(f, "null"),
        }
    }
}

/// An input row whose fields can be looked up by name.
pub trait FieldAccess {
    /// Returns the named field, or `None` if the row has no such field.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl FieldAccess for Map<String, Value> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).map(|value| match value {
            Value::Null => FieldValue::Null,
            Value::Number(n) => n
                .as_i64()
                .map_or_else(|| FieldValue::Number(n.as_f64().unwrap_or(f64::NAN)), FieldValue::Integer),
            Value::String(s) => FieldValue::Text(Cow::Borrowed(s)),
            other => FieldValue::Text(Cow::Owned(other.to_string())),
        })
    }
}

/// Parses a textual time key into a UTC instant.
///
/// Accepted forms, in order: RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]` and
/// `YYYY-MM-DDTHH:MM:SS[.f]` (taken as UTC), `YYYY-MM-DD` (midnight UTC), and
/// a bare integer of Unix epoch milliseconds.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(dt.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    text.parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}
