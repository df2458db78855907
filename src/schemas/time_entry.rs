use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dates::{check_recent_date, check_since};
use crate::error::ValidationError;
use crate::schemas::Validate;
use crate::schemas::base::BulkEditField;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeTimeEntryResponse {
    pub at: DateTime<FixedOffset>,
    pub billable: bool,
    pub description: Option<String>,
    /// Negative while the entry is running.
    pub duration: i64,
    pub duronly: bool,
    pub id: u64,
    pub permissions: Option<Vec<Value>>,
    pub project_id: Option<u64>,
    pub server_deleted_at: Option<DateTime<FixedOffset>>,
    pub start: DateTime<FixedOffset>,
    pub stop: Option<DateTime<FixedOffset>>,
    pub tag_ids: Vec<u64>,
    pub tags: Vec<String>,
    pub task_id: Option<u64>,
    pub user_id: u64,
    pub workspace_id: u64,
}

impl MeTimeEntryResponse {
    pub fn is_running(&self) -> bool {
        self.stop.is_none() && self.duration < 0
    }
}

impl Validate for MeTimeEntryResponse {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeTimeEntryWithMetaResponse {
    #[serde(flatten)]
    pub entry: MeTimeEntryResponse,
    pub user_avatar_url: String,
    pub user_name: String,
}

impl Validate for MeTimeEntryWithMetaResponse {}

/// Filters for `GET /me/time_entries`.
///
/// `start_date`/`end_date` and `since`/`before` are mutually exclusive on the
/// server side; that conflict is reported by Toggl, not checked here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeEntriesQuery {
    #[serde(
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub since: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Validate for TimeEntriesQuery {
    fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        check_since(self.since, now)?;
        check_recent_date(self.start_date, now)?;
        check_recent_date(self.end_date, now)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebTimerTimeEntryResponse {
    pub billable: bool,
    pub description: Option<String>,
    pub project_id: Option<u64>,
    pub tag_ids: Vec<u64>,
    pub task_id: Option<u64>,
    pub user_id: u64,
    pub workspace_id: u64,
    pub deleted: Option<DateTime<FixedOffset>>,
    pub duration_in_seconds: i64,
    pub ignore_start_and_stop: bool,
    pub planned_task_id: Option<u64>,
    pub updated_at: DateTime<FixedOffset>,
    pub utc_start: DateTime<FixedOffset>,
    pub utc_stop: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeWebTimerResponse {
    pub clients: Option<Vec<Value>>,
    pub projects: Option<Vec<Value>>,
    pub tags: Vec<Value>,
    pub time_entries: Vec<WebTimerTimeEntryResponse>,
}

impl Validate for MeWebTimerResponse {}

/// Body for `POST /workspaces/{id}/time_entries`.
///
/// When both `duration` and `stop` are given they must agree with `start`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTimeEntry {
    pub created_with: String,
    pub start: DateTime<FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl NewTimeEntry {
    pub fn new(created_with: impl Into<String>, start: DateTime<FixedOffset>) -> Self {
        Self {
            created_with: created_with.into(),
            start,
            billable: None,
            description: None,
            duration: None,
            stop: None,
            project_id: None,
            tag_ids: None,
            tags: None,
            task_id: None,
            user_id: None,
        }
    }
}

impl Validate for NewTimeEntry {
    fn validate_at(&self, _now: DateTime<Utc>) -> Result<(), ValidationError> {
        if let (Some(duration), Some(stop)) = (self.duration, self.stop) {
            let expected = TimeDelta::try_seconds(duration)
                .and_then(|duration| self.start.checked_add_signed(duration));
            if expected != Some(stop) {
                return Err(ValidationError::InconsistentTimeEntry);
            }
        }
        Ok(())
    }
}

/// Wire body of a create call: the entry plus its workspace.
#[derive(Debug, Serialize)]
pub(crate) struct CreateTimeEntryBody<'a> {
    pub workspace_id: u64,
    #[serde(flatten)]
    pub entry: &'a NewTimeEntry,
}

/// Body for `PUT /workspaces/{id}/time_entries/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeEntryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_with_user_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl Validate for TimeEntryRequest {}

/// Time entry fields accepted by bulk edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeEntryField {
    Billable,
    Description,
    Duration,
    ProjectId,
    SharedWithUserIds,
    Start,
    Stop,
    TagIds,
    Tags,
    TaskId,
    UserId,
}

impl TimeEntryField {
    pub const ALL: [TimeEntryField; 11] = [
        Self::Billable,
        Self::Description,
        Self::Duration,
        Self::ProjectId,
        Self::SharedWithUserIds,
        Self::Start,
        Self::Stop,
        Self::TagIds,
        Self::Tags,
        Self::TaskId,
        Self::UserId,
    ];
}

impl BulkEditField for TimeEntryField {
    fn name(self) -> &'static str {
        match self {
            TimeEntryField::Billable => "billable",
            TimeEntryField::Description => "description",
            TimeEntryField::Duration => "duration",
            TimeEntryField::ProjectId => "project_id",
            TimeEntryField::SharedWithUserIds => "shared_with_user_ids",
            TimeEntryField::Start => "start",
            TimeEntryField::Stop => "stop",
            TimeEntryField::TagIds => "tag_ids",
            TimeEntryField::Tags => "tags",
            TimeEntryField::TaskId => "task_id",
            TimeEntryField::UserId => "user_id",
        }
    }
}
