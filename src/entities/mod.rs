//! Typed clients, one per group of endpoints.
//!
//! Every method validates its arguments, issues exactly one request and
//! decodes the response. Nothing is cached between calls.

mod current_user;
mod report_time_entry;
mod workspace;

pub use current_user::CurrentUser;
pub use report_time_entry::ReportTimeEntry;
pub use workspace::Workspace;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;
use crate::schemas::Validate;

/// Decodes a body that may be `null` or `{}` when there is nothing to return.
pub(crate) fn decode_optional<T>(body: &str) -> Result<Option<T>, Error>
where
    T: DeserializeOwned + Validate,
{
    let value: Value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(body)?
    };
    let empty = match &value {
        Value::Null => true,
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    };
    if empty {
        return Ok(None);
    }
    let decoded: T = serde_json::from_value(value)?;
    decoded.validate()?;
    Ok(Some(decoded))
}
