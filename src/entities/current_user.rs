use tracing::debug;

use crate::api::{API_ROOT_URL, ApiClient, decode, decode_list};
use crate::auth::Auth;
use crate::entities::decode_optional;
use crate::error::{ApiError, Result};
use crate::response::ListResponse;
use crate::schemas::current_user::{
    ChangePasswordRequest, MeFeaturesResponse, MePreferencesResponse, MeResponse,
    MeWithRelatedData, UpdateMeRequest, UpdatePreferencesRequest,
};
use crate::schemas::project::{MePaginatedProjectsQuery, MeProjectsQuery, ProjectResponse};
use crate::schemas::time_entry::{
    MeTimeEntryResponse, MeTimeEntryWithMetaResponse, MeWebTimerResponse, TimeEntriesQuery,
};
use crate::schemas::{Validate, to_query};

const PREFIX: &str = "/me";

/// Endpoints under `/me`: the authenticated user, their preferences and
/// their time entries across workspaces.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    api: ApiClient,
}

impl CurrentUser {
    pub fn new(auth: Auth) -> Result<Self> {
        Self::with_base_url(API_ROOT_URL, auth)
    }

    pub fn with_base_url(base_url: &str, auth: Auth) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(base_url, auth)?,
        })
    }

    /// `true` when the credentials are accepted, `false` on 401 or 403.
    pub fn logged(&self) -> Result<bool> {
        match self.api.get(&format!("{PREFIX}/logged"), &[]) {
            Ok(_) => Ok(true),
            Err(ApiError::Unauthorized { .. } | ApiError::Forbidden { .. }) => {
                debug!("credentials rejected");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn me(&self) -> Result<MeResponse> {
        let body = self.api.get(PREFIX, &[])?;
        decode(&body)
    }

    pub fn me_with_related_data(&self) -> Result<MeWithRelatedData> {
        let query = vec![("with_related_data".to_string(), "true".to_string())];
        let body = self.api.get(PREFIX, &query)?;
        decode(&body)
    }

    pub fn update_me(&self, request: &UpdateMeRequest) -> Result<MeResponse> {
        request.validate()?;
        let body = self.api.put(PREFIX, Some(request))?;
        decode(&body)
    }

    /// Both checks run before any request: the new password must differ from
    /// the current one and be strong enough.
    pub fn change_password(&self, current_password: &str, new_password: &str) -> Result<bool> {
        let request = ChangePasswordRequest::new(current_password, new_password);
        request.validate()?;
        self.api.put(PREFIX, Some(&request))?;
        Ok(true)
    }

    pub fn features(&self) -> Result<ListResponse<MeFeaturesResponse>> {
        let body = self.api.get(&format!("{PREFIX}/features"), &[])?;
        decode_list(&body)
    }

    pub fn preferences(&self) -> Result<MePreferencesResponse> {
        let body = self.api.get(&format!("{PREFIX}/preferences"), &[])?;
        decode(&body)
    }

    pub fn update_preferences(&self, request: &UpdatePreferencesRequest) -> Result<bool> {
        request.validate()?;
        self.api.post(&format!("{PREFIX}/preferences"), Some(request))?;
        Ok(true)
    }

    pub fn get_projects(&self, query: &MeProjectsQuery) -> Result<ListResponse<ProjectResponse>> {
        query.validate()?;
        let body = self.api.get(&format!("{PREFIX}/projects"), &to_query(query)?)?;
        decode_list(&body)
    }

    pub fn get_paginated_projects(
        &self,
        query: &MePaginatedProjectsQuery,
    ) -> Result<ListResponse<ProjectResponse>> {
        query.validate()?;
        let body = self
            .api
            .get(&format!("{PREFIX}/projects/paginated"), &to_query(query)?)?;
        decode_list(&body)
    }

    pub fn get_time_entry(&self, time_entry_id: u64) -> Result<MeTimeEntryResponse> {
        let body = self
            .api
            .get(&format!("{PREFIX}/time_entries/{time_entry_id}"), &[])?;
        decode(&body)
    }

    pub fn get_time_entry_with_meta(&self, time_entry_id: u64) -> Result<MeTimeEntryWithMetaResponse> {
        let query = vec![("meta".to_string(), "true".to_string())];
        let body = self
            .api
            .get(&format!("{PREFIX}/time_entries/{time_entry_id}"), &query)?;
        decode(&body)
    }

    /// The running entry, or `None` when no timer is running.
    pub fn get_current_time_entry(&self) -> Result<Option<MeTimeEntryResponse>> {
        let body = self.api.get(&format!("{PREFIX}/time_entries/current"), &[])?;
        decode_optional(&body)
    }

    pub fn get_time_entries(&self, query: &TimeEntriesQuery) -> Result<ListResponse<MeTimeEntryResponse>> {
        let body = self.time_entries(query, false)?;
        decode_list(&body)
    }

    pub fn get_time_entries_with_meta(
        &self,
        query: &TimeEntriesQuery,
    ) -> Result<ListResponse<MeTimeEntryWithMetaResponse>> {
        let body = self.time_entries(query, true)?;
        decode_list(&body)
    }

    pub fn get_web_timer(&self) -> Result<MeWebTimerResponse> {
        let body = self.api.get(&format!("{PREFIX}/web-timer"), &[])?;
        decode(&body)
    }

    fn time_entries(&self, query: &TimeEntriesQuery, meta: bool) -> Result<String> {
        query.validate()?;
        let mut pairs = to_query(query)?;
        pairs.push(("meta".to_string(), meta.to_string()));
        Ok(self.api.get(&format!("{PREFIX}/time_entries"), &pairs)?)
    }
}
