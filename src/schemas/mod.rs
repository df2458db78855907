//! Request and response records for every endpoint.
//!
//! Requests are plain structs with optional fields; unset fields are left out
//! of the query string or JSON body. Every record implements [`Validate`],
//! which entity clients run before a request is sent and after a response is
//! decoded.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::api::Query;
use crate::error::ValidationError;

pub mod base;
pub mod current_user;
pub mod project;
pub mod report_time_entry;
pub mod time_entry;
pub mod workspace;

/// Field constraints and cross-field checks.
///
/// `now` is the reference instant for rules relative to the current time,
/// such as the `since` window.
pub trait Validate {
    fn validate_at(&self, _now: DateTime<Utc>) -> Result<(), ValidationError> {
        Ok(())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.validate_at(Utc::now())
    }
}

/// Flattens a serializable query record into query string pairs.
///
/// `null` fields are skipped and arrays repeat their key.
pub fn to_query<T: Serialize>(value: &T) -> Result<Query, serde_json::Error> {
    let mut query = Query::new();
    if let Value::Object(fields) = serde_json::to_value(value)? {
        for (key, field) in fields {
            match field {
                Value::Array(items) => {
                    for item in items {
                        if let Some(item) = scalar(item) {
                            query.push((key.clone(), item));
                        }
                    }
                }
                other => {
                    if let Some(other) = scalar(other) {
                        query.push((key, other));
                    }
                }
            }
        }
    }
    Ok(query)
}

fn scalar(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Array(_) | Value::Object(_) => None,
        Value::String(text) => Some(text),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
    }
}

pub(crate) fn check_min(field: &'static str, value: Option<i64>, min: i64) -> Result<(), ValidationError> {
    match value {
        Some(value) if value < min => Err(ValidationError::TooSmall { field, min }),
        _ => Ok(()),
    }
}

pub(crate) fn check_max(field: &'static str, value: Option<i64>, max: i64) -> Result<(), ValidationError> {
    match value {
        Some(value) if value > max => Err(ValidationError::TooLarge { field, max }),
        _ => Ok(()),
    }
}

pub(crate) fn check_length(
    field: &'static str,
    value: Option<&str>,
    min: usize,
    max: Option<usize>,
) -> Result<(), ValidationError> {
    let Some(value) = value else {
        return Ok(());
    };
    let length = value.chars().count();
    if length < min {
        return Err(ValidationError::TooShort { field, min });
    }
    match max {
        Some(max) if length > max => Err(ValidationError::TooLong { field, max }),
        _ => Ok(()),
    }
}

pub(crate) fn check_exact_length(
    field: &'static str,
    value: Option<&str>,
    len: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(value) if value.chars().count() != len => {
            Err(ValidationError::WrongLength { field, len })
        }
        _ => Ok(()),
    }
}
