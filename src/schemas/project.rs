use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dates::check_since;
use crate::error::ValidationError;
use crate::schemas::Validate;
use crate::schemas::base::BulkEditField;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub active: bool,
    pub actual_hours: Option<i64>,
    pub actual_seconds: Option<i64>,
    pub at: DateTime<FixedOffset>,
    pub auto_estimates: Option<bool>,
    pub billable: Option<bool>,
    pub can_track_time: bool,
    pub client_id: Option<u64>,
    pub color: String,
    pub created_at: DateTime<FixedOffset>,
    pub currency: Option<String>,
    /// Only present when the project has an end date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub estimated_hours: Option<i64>,
    pub estimated_seconds: Option<i64>,
    pub fixed_fee: Option<f64>,
    pub id: u64,
    pub is_private: bool,
    pub is_shared: bool,
    pub name: String,
    pub rate: Option<f64>,
    pub rate_last_updated: Option<DateTime<FixedOffset>>,
    pub recurring: bool,
    pub recurring_parameters: Option<Vec<Value>>,
    pub server_deleted_at: Option<DateTime<FixedOffset>>,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub template: Option<bool>,
    pub template_id: Option<u64>,
    pub workspace_id: u64,
}

impl Validate for ProjectResponse {}

/// Filters for `GET /workspaces/{id}/projects`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<String>,
    #[serde(
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub since: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_templates: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_me: Option<bool>,
}

impl Validate for ProjectsQuery {
    fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        check_since(self.since, now)
    }
}

/// Filters for `GET /me/projects`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeProjectsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_archived: Option<bool>,
    #[serde(
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub since: Option<DateTime<Utc>>,
}

impl Validate for MeProjectsQuery {
    fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        check_since(self.since, now)
    }
}

/// Filters for `GET /me/projects/paginated`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MePaginatedProjectsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_project_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub since: Option<DateTime<Utc>>,
}

impl Validate for MePaginatedProjectsQuery {
    fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        check_since(self.since, now)
    }
}

/// Body for creating or updating a project.
///
/// Only fields available on the free plan are listed; `status` follows from
/// `active`, `start_date` and `end_date` and cannot be set directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_estimates: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_shared: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<u64>,
}

impl Validate for ProjectRequest {
    fn validate_at(&self, _now: DateTime<Utc>) -> Result<(), ValidationError> {
        if self.client_id.is_some() && self.client_name.is_some() {
            return Err(ValidationError::ClientIdAndName);
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(ValidationError::InvalidTimeframe);
            }
        }
        Ok(())
    }
}

/// Project fields accepted by bulk edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    AutoEstimates,
    EndDate,
    EstimatedHours,
    IsPrivate,
    ProjectName,
    StartDate,
    Template,
}

impl BulkEditField for ProjectField {
    fn name(self) -> &'static str {
        match self {
            ProjectField::AutoEstimates => "auto_estimates",
            ProjectField::EndDate => "end_date",
            ProjectField::EstimatedHours => "estimated_hours",
            ProjectField::IsPrivate => "is_private",
            ProjectField::ProjectName => "name",
            ProjectField::StartDate => "start_date",
            ProjectField::Template => "template",
        }
    }
}
