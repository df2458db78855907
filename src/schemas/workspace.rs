use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::schemas::{Validate, check_length, check_max, check_min};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceResponse {
    pub admin: bool,
    /// Deprecated upstream, usually `null`.
    #[serde(default)]
    pub api_token: Option<String>,
    pub at: DateTime<FixedOffset>,
    /// Premium subscription.
    pub business_ws: bool,
    pub csv_upload: Option<Vec<Value>>,
    pub default_currency: String,
    pub default_hourly_rate: Option<f64>,
    pub hide_start_end_times: bool,
    pub ical_enabled: bool,
    pub ical_url: Option<String>,
    pub id: u64,
    pub last_modified: Option<DateTime<FixedOffset>>,
    pub logo_url: String,
    pub name: String,
    pub only_admins_may_create_projects: bool,
    pub only_admins_may_create_tags: bool,
    #[serde(default)]
    pub only_admins_see_billable_rates: bool,
    pub only_admins_see_team_dashboard: bool,
    pub organization_id: u64,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
    pub premium: bool,
    #[serde(default)]
    pub profile: Option<i64>,
    pub projects_billable_by_default: bool,
    pub projects_enforce_billable: bool,
    pub projects_private_by_default: bool,
    pub rate_last_updated: Option<DateTime<FixedOffset>>,
    pub reports_collapse: bool,
    pub role: String,
    /// -1 rounds down, 0 to nearest, 1 up.
    pub rounding: i8,
    pub rounding_minutes: u32,
    pub server_deleted_at: Option<DateTime<FixedOffset>>,
    pub subscription: Option<Value>,
    pub suspended_at: Option<DateTime<FixedOffset>>,
    pub working_hours_in_minutes: Option<u32>,
}

impl Validate for WorkspaceResponse {
    fn validate_at(&self, _now: DateTime<Utc>) -> Result<(), ValidationError> {
        let rounding = Some(i64::from(self.rounding));
        check_min("rounding", rounding, -1)?;
        check_max("rounding", rounding, 1)
    }
}

/// Body for `PUT /workspaces/{id}`.
///
/// Only settings available on the free plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateWorkspaceRequest {
    /// User ids to make workspace admins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admins: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_admins_may_create_tags: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_admins_see_team_dashboard: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reports_collapse: Option<bool>,
}

impl Validate for UpdateWorkspaceRequest {
    fn validate_at(&self, _now: DateTime<Utc>) -> Result<(), ValidationError> {
        check_length("name", self.name.as_deref(), 1, Some(140))
    }
}
