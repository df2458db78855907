use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::schemas::{Validate, check_exact_length, check_length, check_max, check_min};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    pub at: DateTime<FixedOffset>,
    /// 0 is Sunday, 1 is Monday and so on.
    pub beginning_of_week: u8,
    pub country_id: Option<u64>,
    pub created_at: DateTime<FixedOffset>,
    pub default_workspace_id: u64,
    pub email: String,
    pub fullname: String,
    pub has_password: bool,
    pub id: u64,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_provides: Option<Vec<String>>,
    pub openid_email: Option<String>,
    pub openid_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    pub timezone: String,
    pub toggl_accounts_id: String,
    pub updated_at: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_updated_at: Option<DateTime<FixedOffset>>,
    /// Returned by `PUT /me` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggl_accounts_updated_at: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intercom_hash: Option<String>,
}

impl Validate for MeResponse {
    fn validate_at(&self, _now: DateTime<Utc>) -> Result<(), ValidationError> {
        check_exact_length("api_token", self.api_token.as_deref(), 32)?;
        check_max("beginning_of_week", Some(i64::from(self.beginning_of_week)), 6)?;
        check_exact_length("toggl_accounts_id", Some(&self.toggl_accounts_id), 22)?;
        check_exact_length("intercom_hash", self.intercom_hash.as_deref(), 64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeWithRelatedData {
    #[serde(flatten)]
    pub me: MeResponse,
    pub clients: Option<Vec<Value>>,
    pub projects: Option<Vec<Value>>,
    pub tags: Option<Vec<Value>>,
    pub time_entries: Option<Vec<Value>>,
    pub workspaces: Vec<Value>,
}

impl Validate for MeWithRelatedData {
    fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        self.me.validate_at(now)
    }
}

/// Body for `PUT /me`. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateMeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beginning_of_week: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_workspace_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Validate for UpdateMeRequest {
    fn validate_at(&self, _now: DateTime<Utc>) -> Result<(), ValidationError> {
        check_max("beginning_of_week", self.beginning_of_week.map(i64::from), 6)?;
        check_min("country_id", self.country_id, 1)?;
        check_min("default_workspace_id", self.default_workspace_id, 1)?;
        if let Some(email) = &self.email {
            check_email(email)?;
        }
        check_length("fullname", self.fullname.as_deref(), 1, None)?;
        match self.timezone.as_deref() {
            Some(timezone) if !timezone.is_empty() => check_timezone(timezone),
            _ => Ok(()),
        }
    }
}

/// Body for the password variant of `PUT /me`.
#[derive(Clone, PartialEq, Serialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub password: String,
}

impl ChangePasswordRequest {
    pub fn new(current_password: impl Into<String>, new_password: impl Into<String>) -> Self {
        Self {
            current_password: current_password.into(),
            password: new_password.into(),
        }
    }
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordRequest").finish_non_exhaustive()
    }
}

impl Validate for ChangePasswordRequest {
    fn validate_at(&self, _now: DateTime<Utc>) -> Result<(), ValidationError> {
        if self.current_password == self.password {
            return Err(ValidationError::PasswordUnchanged);
        }
        if !is_strong_password(&self.password) {
            return Err(ValidationError::WeakPassword);
        }
        Ok(())
    }
}

/// At least 8 characters with both upper and lower case letters.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(char::is_uppercase)
        && password.chars().any(char::is_lowercase)
}

pub fn check_timezone(timezone: &str) -> Result<(), ValidationError> {
    timezone
        .parse::<Tz>()
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidTimezone(timezone.to_string()))
}

/// Structural check: one `@`, a non-empty local part and a dotted domain.
pub fn check_email(email: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidEmail(email.to_string());
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    #[serde(rename = "MM/DD/YYYY")]
    MonthDayYearSlash,
    #[serde(rename = "DD-MM-YYYY")]
    DayMonthYearDash,
    #[serde(rename = "MM-DD-YYYY")]
    MonthDayYearDash,
    #[serde(rename = "YYYY-MM-DD")]
    Iso,
    #[serde(rename = "DD/MM/YYYY")]
    DayMonthYearSlash,
    #[serde(rename = "DD.MM.YYYY")]
    DayMonthYearDot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationFormat {
    Classic,
    Improved,
    Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "h:mm A")]
    TwelveHour,
    #[serde(rename = "H:mm")]
    TwentyFourHour,
}

/// Body for `POST /me/preferences`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdatePreferencesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<DateFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_format: Option<DurationFormat>,
    #[serde(rename = "timeofday_format", skip_serializing_if = "Option::is_none")]
    pub time_format: Option<TimeFormat>,
}

impl Validate for UpdatePreferencesRequest {
    fn validate_at(&self, _now: DateTime<Utc>) -> Result<(), ValidationError> {
        if self.date_format.is_none() && self.duration_format.is_none() && self.time_format.is_none() {
            return Err(ValidationError::NoParameters);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphaFeature {
    pub code: String,
    pub enabled: bool,
}

/// Known preference keys; everything else the server sends is kept in
/// `other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MePreferencesResponse {
    #[serde(default)]
    pub alpha_features: Vec<AlphaFeature>,
    pub date_format: DateFormat,
    pub duration_format: DurationFormat,
    pub timeofday_format: TimeFormat,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Validate for MePreferencesResponse {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeFeature {
    pub feature_id: u64,
    pub enabled: bool,
    pub name: String,
}

/// Features enabled for one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeFeaturesResponse {
    pub workspace_id: u64,
    pub features: Vec<MeFeature>,
}

impl Validate for MeFeaturesResponse {}
