use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::dates::check_since;
use crate::error::ValidationError;
use crate::schemas::Validate;

pub const MAX_BULK_EDIT_IDS: usize = 100;

/// A bare `since` filter, emitted as Unix seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SinceQuery {
    #[serde(
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub since: Option<DateTime<Utc>>,
}

impl Validate for SinceQuery {
    fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        check_since(self.since, now)
    }
}

/// JSON-Patch operation kind. `Change` goes over the wire as `"replace"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkEditOperationKind {
    Add,
    Remove,
    #[serde(rename = "replace")]
    Change,
}

impl BulkEditOperationKind {
    pub const ALL: [BulkEditOperationKind; 3] = [Self::Add, Self::Remove, Self::Change];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Change => "replace",
        }
    }
}

/// A field that can be targeted by a bulk edit.
pub trait BulkEditField: Copy {
    fn name(self) -> &'static str;
}

/// One field mutation, serialized as `{"op", "path", "value"}`.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkEditOperation<F> {
    pub operation: BulkEditOperationKind,
    pub field: F,
    pub value: Value,
}

impl<F: BulkEditField> BulkEditOperation<F> {
    pub fn new(operation: BulkEditOperationKind, field: F, value: impl Into<Value>) -> Self {
        Self {
            operation,
            field,
            value: value.into(),
        }
    }

    pub fn add(field: F, value: impl Into<Value>) -> Self {
        Self::new(BulkEditOperationKind::Add, field, value)
    }

    pub fn remove(field: F, value: impl Into<Value>) -> Self {
        Self::new(BulkEditOperationKind::Remove, field, value)
    }

    pub fn change(field: F, value: impl Into<Value>) -> Self {
        Self::new(BulkEditOperationKind::Change, field, value)
    }

    pub fn path(&self) -> String {
        format!("/{}", self.field.name())
    }
}

impl<F: BulkEditField> Serialize for BulkEditOperation<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BulkEditOperation", 3)?;
        state.serialize_field("op", &self.operation)?;
        state.serialize_field("path", &self.path())?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}

/// Checks the id list and operation count of a bulk edit and returns the ids
/// joined for the URL path.
pub fn bulk_edit_path_ids(
    entity: &'static str,
    ids: &[u64],
    operations: usize,
) -> Result<String, ValidationError> {
    if ids.is_empty() {
        return Err(ValidationError::EmptyIds { entity });
    }
    if ids.len() > MAX_BULK_EDIT_IDS {
        return Err(ValidationError::TooManyIds {
            entity,
            max: MAX_BULK_EDIT_IDS,
        });
    }
    if operations == 0 {
        return Err(ValidationError::EmptyOperations);
    }
    Ok(ids
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(","))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkEditFailure {
    pub id: u64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkEditResponse {
    pub success: Vec<u64>,
    pub failure: Vec<BulkEditFailure>,
}

impl Validate for BulkEditResponse {}
