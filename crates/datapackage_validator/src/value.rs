//! Typed interpretation of string cells.
//!
//! Tables are loaded as strings; checks that compare values (ranges,
//! ordering, cross-table dates) first parse cells according to the field type
//! declared in the package metadata.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use datapackage_core::FieldType;
use std::cmp::Ordering;
use std::fmt;

/// A cell value parsed according to its field type.
#[derive(Debug, Clone)]
pub enum TypedValue {
    /// Whole number
    Integer(i64),
    /// Floating point number
    Number(f64),
    /// Boolean
    Boolean(bool),
    /// Calendar date
    Date(NaiveDate),
    /// Date and time (UTC when an offset was given)
    Datetime(NaiveDateTime),
    /// Time of day
    Time(NaiveTime),
    /// Calendar year
    Year(i32),
    /// Untyped text
    Text(String),
}

impl TypedValue {
    /// Parses `raw` as a value of `field_type`.
    ///
    /// `format` is the field's type-specific format; `None`, `"default"` and
    /// `"any"` select the standard formats. Returns a description of the
    /// problem when the value does not parse.
    pub fn parse(
        raw: &str,
        field_type: &FieldType,
        format: Option<&str>,
    ) -> Result<TypedValue, String> {
        let raw = raw.trim();
        let pattern = format.filter(|f| !matches!(*f, "default" | "any"));

        match field_type {
            FieldType::String | FieldType::Any | FieldType::Other(_) => {
                Ok(TypedValue::Text(raw.to_string()))
            }
            FieldType::Integer => raw
                .parse::<i64>()
                .map(TypedValue::Integer)
                .map_err(|_| format!("'{}' is not an integer", raw)),
            FieldType::Number => raw
                .parse::<f64>()
                .map(TypedValue::Number)
                .map_err(|_| format!("'{}' is not a number", raw)),
            FieldType::Boolean => parse_boolean(raw)
                .map(TypedValue::Boolean)
                .ok_or_else(|| format!("'{}' is not a boolean", raw)),
            FieldType::Date => parse_date(raw, pattern)
                .map(TypedValue::Date)
                .ok_or_else(|| format!("'{}' is not a date", raw)),
            FieldType::Datetime => parse_datetime(raw, pattern)
                .map(TypedValue::Datetime)
                .ok_or_else(|| format!("'{}' is not a datetime", raw)),
            FieldType::Time => parse_time(raw, pattern)
                .map(TypedValue::Time)
                .ok_or_else(|| format!("'{}' is not a time", raw)),
            FieldType::Year => raw
                .parse::<i32>()
                .map(TypedValue::Year)
                .map_err(|_| format!("'{}' is not a year", raw)),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Integer(i) => Some(*i as f64),
            TypedValue::Number(n) => Some(*n),
            TypedValue::Year(y) => Some(f64::from(*y)),
            _ => None,
        }
    }

    fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            TypedValue::Date(d) => d.and_hms_opt(0, 0, 0),
            TypedValue::Datetime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl PartialEq for TypedValue {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for TypedValue {
    /// Values of the same kind compare naturally. Numbers compare across
    /// integer/number/year, and dates compare with datetimes at midnight.
    /// Anything else is incomparable.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        use TypedValue::*;

        match (self, other) {
            (Integer(a), Integer(b)) => a.partial_cmp(b),
            (Year(a), Year(b)) => a.partial_cmp(b),
            (Boolean(a), Boolean(b)) => a.partial_cmp(b),
            (Date(a), Date(b)) => a.partial_cmp(b),
            (Datetime(a), Datetime(b)) => a.partial_cmp(b),
            (Time(a), Time(b)) => a.partial_cmp(b),
            (Text(a), Text(b)) => a.partial_cmp(b),
            (Integer(_) | Number(_) | Year(_), Integer(_) | Number(_) | Year(_)) => {
                self.as_f64()?.partial_cmp(&other.as_f64()?)
            }
            (Date(_) | Datetime(_), Date(_) | Datetime(_)) => {
                self.as_datetime()?.partial_cmp(&other.as_datetime()?)
            }
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Integer(i) => write!(f, "{}", i),
            TypedValue::Number(n) => write!(f, "{}", n),
            TypedValue::Boolean(b) => write!(f, "{}", b),
            TypedValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            TypedValue::Datetime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            TypedValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            TypedValue::Year(y) => write!(f, "{}", y),
            TypedValue::Text(s) => f.write_str(s),
        }
    }
}

fn parse_boolean(raw: &str) -> Option<bool> {
    match raw {
        "true" | "True" | "TRUE" | "1" => Some(true),
        "false" | "False" | "FALSE" | "0" => Some(false),
        _ => None,
    }
}

fn parse_date(raw: &str, pattern: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, pattern.unwrap_or("%Y-%m-%d")).ok()
}

/// Parses a datetime in several formats.
///
/// Supports:
/// - ISO 8601 / RFC 3339 with offset (e.g., "2024-01-15T10:30:00Z"), converted to UTC
/// - ISO 8601 without offset (e.g., "2024-01-15T10:30:00")
/// - Space separated (e.g., "2024-01-15 10:30:00")
/// - An explicit strftime pattern when the field declares one
fn parse_datetime(raw: &str, pattern: Option<&str>) -> Option<NaiveDateTime> {
    if let Some(pattern) = pattern {
        return NaiveDateTime::parse_from_str(raw, pattern).ok();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

fn parse_time(raw: &str, pattern: Option<&str>) -> Option<NaiveTime> {
    match pattern {
        Some(pattern) => NaiveTime::parse_from_str(raw, pattern).ok(),
        None => NaiveTime::parse_from_str(raw, "%H:%M:%S%.f")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
            .ok(),
    }
}
