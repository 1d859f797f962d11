//! Field validation primitives shared by every marketplace record.
//!
//! # Responsibility
//! - Coerce raw caller input (form text, replayed rows) into canonical
//!   in-memory field values.
//! - Reject malformed or out-of-bounds input before any store call.
//!
//! # Invariants
//! - Validators perform no I/O and never read the clock.
//! - The first failing check wins; no partial coercion is exposed.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store encoding for every date-time crossing the persistence boundary.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Money fields allow at most seven digits before the decimal point.
const MONEY_INTEGER_LIMIT: f64 = 10_000_000.0;

/// Tolerance when checking that an amount carries no sub-cent precision.
const MONEY_CENTS_EPSILON: f64 = 1e-6;

static MARKUP_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid markup tag regex"));
static DATE_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2}) (\d{2}):(\d{2}):(\d{2})$").expect("valid date-time regex")
});

pub type FieldResult<T> = Result<T, FieldError>;

/// Validation failure for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The value failed type coercion or content checks.
    Invalid { field: &'static str, reason: &'static str },
    /// The value coerced cleanly but violates a bound.
    OutOfRange { field: &'static str, reason: &'static str },
}

impl FieldError {
    /// The field the failure belongs to, for callers that map errors to form inputs.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Invalid { field, .. } | Self::OutOfRange { field, .. } => field,
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid { field, reason } | Self::OutOfRange { field, reason } => {
                write!(f, "{field} {reason}")
            }
        }
    }
}

impl Error for FieldError {}

/// Primary-key lifecycle of a record.
///
/// `Transient` means the record has never been inserted; the only path to
/// `Persisted` is a successful insert, which assigns the store-generated key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "Option<i64>")]
pub enum EntityKey {
    Transient,
    Persisted(i64),
}

impl EntityKey {
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Transient)
    }

    /// The assigned key, or `None` while transient.
    pub fn value(self) -> Option<i64> {
        match self {
            Self::Transient => None,
            Self::Persisted(id) => Some(id),
        }
    }
}

impl From<EntityKey> for Option<i64> {
    fn from(key: EntityKey) -> Self {
        key.value()
    }
}

/// Raw field input as supplied by an application layer.
///
/// Form submissions arrive as text; replayed store rows and programmatic
/// callers arrive already typed. Validators accept both through this one
/// representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawField<'a> {
    Absent,
    Integer(i64),
    Decimal(f64),
    Text(&'a str),
    DateTime(NaiveDateTime),
}

impl<'a> From<i64> for RawField<'a> {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl<'a> From<i32> for RawField<'a> {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl<'a> From<f64> for RawField<'a> {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl<'a> From<&'a str> for RawField<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for RawField<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl<'a> From<NaiveDateTime> for RawField<'a> {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl<'a, T: Into<RawField<'a>>> From<Option<T>> for RawField<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawField::Absent, Into::into)
    }
}

/// Validates a primary-key value. `Absent` is legal and means transient.
pub fn entity_key(field: &'static str, raw: RawField<'_>) -> FieldResult<EntityKey> {
    if matches!(raw, RawField::Absent) {
        return Ok(EntityKey::Transient);
    }

    let value = coerce_int(field, raw)?;
    if value <= 0 {
        return Err(FieldError::OutOfRange {
            field,
            reason: "is not positive",
        });
    }
    Ok(EntityKey::Persisted(value))
}

/// Validates a required reference to another record's key.
pub fn foreign_key(field: &'static str, raw: RawField<'_>) -> FieldResult<i64> {
    match entity_key(field, raw)? {
        EntityKey::Persisted(value) => Ok(value),
        EntityKey::Transient => Err(FieldError::Invalid {
            field,
            reason: "is required",
        }),
    }
}

/// Validates a required, strictly positive integer quantity.
pub fn positive_int(field: &'static str, raw: RawField<'_>) -> FieldResult<i64> {
    let value = coerce_int(field, raw)?;
    if value <= 0 {
        return Err(FieldError::OutOfRange {
            field,
            reason: "is not positive",
        });
    }
    Ok(value)
}

/// Trims, sanitizes and bounds a free-text field.
///
/// Markup tags and control characters are stripped before the emptiness and
/// length checks, so input that is nothing but markup is rejected as empty.
pub fn bounded_text(field: &'static str, raw: RawField<'_>, max_chars: usize) -> FieldResult<String> {
    let text = match raw {
        RawField::Text(text) => text,
        RawField::Absent => {
            return Err(FieldError::Invalid {
                field,
                reason: "is required",
            })
        }
        _ => {
            return Err(FieldError::Invalid {
                field,
                reason: "is not a string",
            })
        }
    };

    let stripped = MARKUP_TAG_RE.replace_all(text.trim(), "");
    let sanitized: String = stripped.chars().filter(|ch| !ch.is_control()).collect();
    let sanitized = sanitized.trim().to_string();

    if sanitized.is_empty() {
        return Err(FieldError::Invalid {
            field,
            reason: "content is empty or insecure",
        });
    }
    if sanitized.chars().count() > max_chars {
        return Err(FieldError::OutOfRange {
            field,
            reason: "content too large",
        });
    }
    Ok(sanitized)
}

/// Validates a positive money amount.
///
/// Bounds are exact rather than the legacy formatted-length check: at most
/// seven digits before the decimal point and at most two after it.
pub fn money(field: &'static str, raw: RawField<'_>) -> FieldResult<f64> {
    let value = match raw {
        RawField::Decimal(value) => value,
        RawField::Integer(value) => value as f64,
        RawField::Text(text) => text.trim().parse::<f64>().map_err(|_| FieldError::Invalid {
            field,
            reason: "is not a valid amount",
        })?,
        RawField::Absent => {
            return Err(FieldError::Invalid {
                field,
                reason: "is required",
            })
        }
        RawField::DateTime(_) => {
            return Err(FieldError::Invalid {
                field,
                reason: "is not a valid amount",
            })
        }
    };

    if !value.is_finite() {
        return Err(FieldError::Invalid {
            field,
            reason: "is not a valid amount",
        });
    }
    if value <= 0.0 {
        return Err(FieldError::OutOfRange {
            field,
            reason: "is not positive",
        });
    }
    if value >= MONEY_INTEGER_LIMIT {
        return Err(FieldError::OutOfRange {
            field,
            reason: "exceeds seven digits before the decimal point",
        });
    }
    let cents = value * 100.0;
    if (cents - cents.round()).abs() > MONEY_CENTS_EPSILON {
        return Err(FieldError::OutOfRange {
            field,
            reason: "has more than two fractional digits",
        });
    }
    Ok(value)
}

/// Validates a date-time value.
///
/// Already-typed values are accepted as-is. Text must match
/// `YYYY-MM-DD HH:MM:SS` exactly and name a real calendar date and a real
/// wall-clock time; `2021-02-29` is out of range, `2020-02-29` is not.
pub fn date_time(field: &'static str, raw: RawField<'_>) -> FieldResult<NaiveDateTime> {
    let text = match raw {
        RawField::DateTime(value) => return Ok(value),
        RawField::Text(text) => text.trim(),
        RawField::Absent => {
            return Err(FieldError::Invalid {
                field,
                reason: "is required",
            })
        }
        _ => {
            return Err(FieldError::Invalid {
                field,
                reason: "is not a valid date",
            })
        }
    };

    let captures = DATE_TIME_RE.captures(text).ok_or(FieldError::Invalid {
        field,
        reason: "is not a valid date",
    })?;

    let year = date_component(field, &captures[1])? as i32;
    let month = date_component(field, &captures[2])?;
    let day = date_component(field, &captures[3])?;
    let hour = date_component(field, &captures[4])?;
    let minute = date_component(field, &captures[5])?;
    let second = date_component(field, &captures[6])?;

    if hour >= 24 || minute >= 60 || second >= 60 {
        return Err(FieldError::OutOfRange {
            field,
            reason: "is not a valid wall-clock time",
        });
    }

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(FieldError::OutOfRange {
        field,
        reason: "is not a real calendar date",
    })?;
    let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or(FieldError::OutOfRange {
        field,
        reason: "is not a valid wall-clock time",
    })?;
    Ok(NaiveDateTime::new(date, time))
}

/// Renders a date-time in the fixed store encoding.
pub fn format_date_time(value: NaiveDateTime) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

fn coerce_int(field: &'static str, raw: RawField<'_>) -> FieldResult<i64> {
    match raw {
        RawField::Integer(value) => Ok(value),
        RawField::Text(text) => text.trim().parse::<i64>().map_err(|_| FieldError::Invalid {
            field,
            reason: "is not a valid integer",
        }),
        RawField::Absent => Err(FieldError::Invalid {
            field,
            reason: "is required",
        }),
        _ => Err(FieldError::Invalid {
            field,
            reason: "is not a valid integer",
        }),
    }
}

fn date_component(field: &'static str, digits: &str) -> FieldResult<u32> {
    digits.parse::<u32>().map_err(|_| FieldError::Invalid {
        field,
        reason: "is not a valid date",
    })
}

#[cfg(test)]
mod tests {
    use super::{
        bounded_text, date_time, entity_key, foreign_key, format_date_time, money, positive_int,
        EntityKey, FieldError, RawField,
    };

    #[test]
    fn entity_key_accepts_absent_as_transient() {
        let key = entity_key("member id", RawField::Absent).unwrap();
        assert_eq!(key, EntityKey::Transient);
        assert!(key.is_transient());
        assert_eq!(key.value(), None);
    }

    #[test]
    fn entity_key_accepts_positive_integers_and_numeric_text() {
        assert_eq!(
            entity_key("member id", 42.into()).unwrap(),
            EntityKey::Persisted(42)
        );
        assert_eq!(
            entity_key("member id", " 7 ".into()).unwrap(),
            EntityKey::Persisted(7)
        );
    }

    #[test]
    fn entity_key_rejects_zero_negative_and_garbage() {
        assert!(matches!(
            entity_key("member id", 0.into()),
            Err(FieldError::OutOfRange { .. })
        ));
        assert!(matches!(
            entity_key("member id", (-3).into()),
            Err(FieldError::OutOfRange { .. })
        ));
        assert!(matches!(
            entity_key("member id", "forty-two".into()),
            Err(FieldError::Invalid { .. })
        ));
    }

    #[test]
    fn foreign_key_requires_a_value() {
        let err = foreign_key("auction id", RawField::Absent).unwrap_err();
        assert!(matches!(err, FieldError::Invalid { .. }));
        assert_eq!(foreign_key("auction id", 9.into()).unwrap(), 9);
    }

    #[test]
    fn positive_int_rejects_zero() {
        assert!(matches!(
            positive_int("item qty", 0.into()),
            Err(FieldError::OutOfRange { .. })
        ));
        assert_eq!(positive_int("item qty", "12".into()).unwrap(), 12);
    }

    #[test]
    fn bounded_text_trims_and_strips_markup() {
        let value = bounded_text("first name", "  <b>Nick</b>  ".into(), 25).unwrap();
        assert_eq!(value, "Nick");
    }

    #[test]
    fn bounded_text_rejects_empty_and_markup_only_input() {
        assert!(matches!(
            bounded_text("first name", "   ".into(), 25),
            Err(FieldError::Invalid { .. })
        ));
        assert!(matches!(
            bounded_text("first name", "<script></script>".into(), 25),
            Err(FieldError::Invalid { .. })
        ));
    }

    #[test]
    fn bounded_text_boundary_is_inclusive() {
        let exactly = "a".repeat(25);
        assert_eq!(bounded_text("first name", (&exactly).into(), 25).unwrap(), exactly);

        let over = "a".repeat(26);
        assert!(matches!(
            bounded_text("first name", (&over).into(), 25),
            Err(FieldError::OutOfRange { .. })
        ));
    }

    #[test]
    fn money_accepts_cents_precision_within_bounds() {
        assert_eq!(money("bid amount", 12.50.into()).unwrap(), 12.50);
        assert_eq!(money("bid amount", "9999999.99".into()).unwrap(), 9_999_999.99);
        assert_eq!(money("bid amount", 4.into()).unwrap(), 4.0);
    }

    #[test]
    fn money_rejects_nonpositive_oversized_and_subcent_values() {
        assert!(matches!(
            money("bid amount", 0.0.into()),
            Err(FieldError::OutOfRange { .. })
        ));
        assert!(matches!(
            money("bid amount", 10_000_000.0.into()),
            Err(FieldError::OutOfRange { .. })
        ));
        assert!(matches!(
            money("bid amount", "1.999".into()),
            Err(FieldError::OutOfRange { .. })
        ));
        assert!(matches!(
            money("bid amount", "ten dollars".into()),
            Err(FieldError::Invalid { .. })
        ));
    }

    #[test]
    fn date_time_accepts_leap_day_in_leap_years_only() {
        let parsed = date_time("bid date", "2020-02-29 00:00:00".into()).unwrap();
        assert_eq!(format_date_time(parsed), "2020-02-29 00:00:00");

        assert!(matches!(
            date_time("bid date", "2021-02-29 00:00:00".into()),
            Err(FieldError::OutOfRange { .. })
        ));
    }

    #[test]
    fn date_time_rejects_bad_months_and_hours() {
        assert!(matches!(
            date_time("bid date", "2021-13-01 00:00:00".into()),
            Err(FieldError::OutOfRange { .. })
        ));
        assert!(matches!(
            date_time("bid date", "2021-01-01 24:00:00".into()),
            Err(FieldError::OutOfRange { .. })
        ));
    }

    #[test]
    fn date_time_rejects_pattern_mismatch_as_invalid() {
        assert!(matches!(
            date_time("bid date", "2021/01/01 10:00:00".into()),
            Err(FieldError::Invalid { .. })
        ));
        assert!(matches!(
            date_time("bid date", "yesterday".into()),
            Err(FieldError::Invalid { .. })
        ));
        assert!(matches!(
            date_time("bid date", RawField::Absent),
            Err(FieldError::Invalid { .. })
        ));
    }

    #[test]
    fn date_time_passes_typed_values_through() {
        let typed = date_time("bid date", "2026-08-06 18:30:00".into()).unwrap();
        assert_eq!(date_time("bid date", typed.into()).unwrap(), typed);
    }
}
