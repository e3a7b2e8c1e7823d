//! Schema-driven validation and type coercion for free-form row data.
//!
//! [`validate`] takes a table's column schema and a raw field mapping and
//! produces the payload the store should persist, or a typed failure. The
//! looser [`coerce_loose`] variant backs the command interpreter, which
//! prefers a wrong-typed capture over aborting a whole utterance.

pub mod error;

pub use error::ValidationError;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use common::types::{ColumnDefinition, ColumnType, Entity, FieldMap};
use log::debug;
use serde_json::Value as Json;

/// Validate a raw row against the schema, in schema order.
///
/// Rules per column:
/// - required and absent: recorded as missing, except an integer `id` column
///   which is deferred and auto-generated from `existing_rows` (`max + 1`);
/// - absent with a declared default: the default is used;
/// - absent otherwise: the key is omitted entirely, never written as null;
/// - present: coerced to the declared type, failing with
///   [`ValidationError::TypeMismatch`] on unparseable input.
///
/// All missing required fields are reported together in one error.
///
/// The generated id is computed from a snapshot of `existing_rows` with no
/// reservation; callers must guarantee single-writer semantics per table or
/// route inserts through a store that serialises them.
pub fn validate(
    schema: &[ColumnDefinition],
    raw: &FieldMap,
    existing_rows: &[Entity],
) -> Result<FieldMap, ValidationError> {
    let mut validated = FieldMap::new();
    let mut missing: Vec<String> = Vec::new();
    let mut generate_id = false;

    for column in schema {
        let value = raw.get(&column.name).filter(|v| !v.is_null());

        if value.is_none() && column.required {
            if column.name == "id" && column.column_type == ColumnType::Integer {
                generate_id = true;
            } else {
                missing.push(column.name.clone());
            }
            continue;
        }

        let value = match (value, &column.default) {
            (Some(v), _) => v,
            (None, Some(default)) => {
                validated.insert(column.name.clone(), default.clone());
                continue;
            }
            (None, None) => continue,
        };

        validated.insert(column.name.clone(), coerce(column, value)?);
    }

    if generate_id {
        let id = next_generated_id(existing_rows);
        debug!("generated id {id} for new row");
        validated.insert("id".to_string(), Json::from(id));
    }

    if !missing.is_empty() {
        return Err(ValidationError::missing_required(missing));
    }

    Ok(validated)
}

/// Coerce a single value to its column's declared type.
pub fn coerce(column: &ColumnDefinition, value: &Json) -> Result<Json, ValidationError> {
    let mismatch = || {
        ValidationError::type_mismatch(
            &column.name,
            column.column_type.as_str(),
            value.to_string(),
        )
    };

    match column.column_type {
        ColumnType::Integer => parse_integer(value).map(Json::from).ok_or_else(mismatch),
        ColumnType::Float => parse_float(value).map(Json::from).ok_or_else(mismatch),
        ColumnType::Date => match value {
            Json::String(s) => parse_date(s)
                .map(|d| Json::String(d.to_rfc3339()))
                .ok_or_else(mismatch),
            _ => Err(mismatch()),
        },
        ColumnType::Boolean => Ok(Json::Bool(truthy(value))),
        ColumnType::String => Ok(match value {
            Json::String(s) => Json::String(s.clone()),
            other => Json::String(other.to_string()),
        }),
    }
}

/// Lenient per-type coercion used on interpreter captures: a failed numeric
/// parse leaves the raw string in place instead of erroring, and boolean is a
/// case-insensitive `"true"` check.
pub fn coerce_loose(column_type: ColumnType, text: &str) -> Json {
    let trimmed = text.trim();
    match column_type {
        ColumnType::Integer => match trimmed.parse::<i64>() {
            Ok(n) => Json::from(n),
            Err(_) => Json::String(trimmed.to_string()),
        },
        ColumnType::Float => match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() => Json::from(f),
            _ => Json::String(trimmed.to_string()),
        },
        ColumnType::Boolean => Json::Bool(trimmed.eq_ignore_ascii_case("true")),
        ColumnType::Date | ColumnType::String => Json::String(trimmed.to_string()),
    }
}

/// Sequential id for a row that needs one: the maximum `id` across existing
/// rows (unparseable values count as 0) plus one. The first row gets 1.
pub fn next_generated_id(existing_rows: &[Entity]) -> i64 {
    existing_rows
        .iter()
        .filter_map(|row| row.field("id"))
        .map(|id| parse_integer(id).unwrap_or(0))
        .max()
        .unwrap_or(0)
        + 1
}

fn parse_integer(value: &Json) -> Option<i64> {
    match value {
        Json::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Json::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn parse_float(value: &Json) -> Option<f64> {
    match value {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Everything non-empty is true, except the literal strings `"false"` (any
/// case), zero, JSON `false` and null.
fn truthy(value: &Json) -> bool {
    match value {
        Json::Bool(b) => *b,
        Json::Null => false,
        Json::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Json::String(s) => {
            let trimmed = s.trim();
            !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("false")
        }
        Json::Array(_) | Json::Object(_) => true,
    }
}

// Accepted date inputs, tried in order. Date-only values normalise to
// midnight UTC.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%B %d %Y", "%d %B %Y"];

fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}
