use chrono::{DateTime, Utc};

use crate::api::{API_ROOT_URL, ApiClient, decode, decode_list};
use crate::auth::Auth;
use crate::error::Result;
use crate::response::ListResponse;
use crate::schemas::base::{BulkEditOperation, BulkEditResponse, SinceQuery, bulk_edit_path_ids};
use crate::schemas::project::{ProjectField, ProjectRequest, ProjectResponse, ProjectsQuery};
use crate::schemas::time_entry::{
    CreateTimeEntryBody, MeTimeEntryResponse, NewTimeEntry, TimeEntryField, TimeEntryRequest,
};
use crate::schemas::workspace::{UpdateWorkspaceRequest, WorkspaceResponse};
use crate::schemas::{Validate, to_query};

const PREFIX: &str = "/workspaces";

/// Workspaces and the projects and time entries scoped to one.
#[derive(Debug, Clone)]
pub struct Workspace {
    api: ApiClient,
}

impl Workspace {
    pub fn new(auth: Auth) -> Result<Self> {
        Self::with_base_url(API_ROOT_URL, auth)
    }

    pub fn with_base_url(base_url: &str, auth: Auth) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(base_url, auth)?,
        })
    }

    pub fn get(&self, workspace_id: u64) -> Result<WorkspaceResponse> {
        let body = self.api.get(&format!("{PREFIX}/{workspace_id}"), &[])?;
        decode(&body)
    }

    /// Workspaces of the current user, optionally only those changed since
    /// `since` (at most 90 days back).
    pub fn list(&self, since: Option<DateTime<Utc>>) -> Result<ListResponse<WorkspaceResponse>> {
        let query = SinceQuery { since };
        query.validate()?;
        let body = self.api.get(PREFIX, &to_query(&query)?)?;
        decode_list(&body)
    }

    pub fn update(&self, workspace_id: u64, request: &UpdateWorkspaceRequest) -> Result<WorkspaceResponse> {
        request.validate()?;
        let body = self
            .api
            .put(&format!("{PREFIX}/{workspace_id}"), Some(request))?;
        decode(&body)
    }

    pub fn create_project(&self, workspace_id: u64, request: &ProjectRequest) -> Result<ProjectResponse> {
        request.validate()?;
        let body = self
            .api
            .post(&format!("{PREFIX}/{workspace_id}/projects"), Some(request))?;
        decode(&body)
    }

    pub fn get_project(&self, workspace_id: u64, project_id: u64) -> Result<ProjectResponse> {
        let body = self
            .api
            .get(&format!("{PREFIX}/{workspace_id}/projects/{project_id}"), &[])?;
        decode(&body)
    }

    pub fn get_projects(
        &self,
        workspace_id: u64,
        query: &ProjectsQuery,
    ) -> Result<ListResponse<ProjectResponse>> {
        query.validate()?;
        let body = self.api.get(
            &format!("{PREFIX}/{workspace_id}/projects"),
            &to_query(query)?,
        )?;
        decode_list(&body)
    }

    pub fn update_project(
        &self,
        workspace_id: u64,
        project_id: u64,
        request: &ProjectRequest,
    ) -> Result<ProjectResponse> {
        request.validate()?;
        let body = self.api.put(
            &format!("{PREFIX}/{workspace_id}/projects/{project_id}"),
            Some(request),
        )?;
        decode(&body)
    }

    /// Applies every operation to every listed project in one request.
    pub fn bulk_edit_projects(
        &self,
        workspace_id: u64,
        project_ids: &[u64],
        operations: &[BulkEditOperation<ProjectField>],
    ) -> Result<BulkEditResponse> {
        let ids = bulk_edit_path_ids("Project", project_ids, operations.len())?;
        let body = self
            .api
            .patch(&format!("{PREFIX}/{workspace_id}/projects/{ids}"), Some(operations))?;
        decode(&body)
    }

    pub fn delete_project(&self, workspace_id: u64, project_id: u64) -> Result<()> {
        self.api
            .delete(&format!("{PREFIX}/{workspace_id}/projects/{project_id}"))?;
        Ok(())
    }

    pub fn create_time_entry(&self, workspace_id: u64, entry: &NewTimeEntry) -> Result<MeTimeEntryResponse> {
        entry.validate()?;
        let request = CreateTimeEntryBody { workspace_id, entry };
        let body = self.api.post(
            &format!("{PREFIX}/{workspace_id}/time_entries"),
            Some(&request),
        )?;
        decode(&body)
    }

    pub fn update_time_entry(
        &self,
        workspace_id: u64,
        time_entry_id: u64,
        request: &TimeEntryRequest,
    ) -> Result<MeTimeEntryResponse> {
        request.validate()?;
        let body = self.api.put(
            &format!("{PREFIX}/{workspace_id}/time_entries/{time_entry_id}"),
            Some(request),
        )?;
        decode(&body)
    }

    pub fn delete_time_entry(&self, workspace_id: u64, time_entry_id: u64) -> Result<()> {
        self.api
            .delete(&format!("{PREFIX}/{workspace_id}/time_entries/{time_entry_id}"))?;
        Ok(())
    }

    pub fn bulk_edit_time_entries(
        &self,
        workspace_id: u64,
        time_entry_ids: &[u64],
        operations: &[BulkEditOperation<TimeEntryField>],
    ) -> Result<BulkEditResponse> {
        let ids = bulk_edit_path_ids("TimeEntry", time_entry_ids, operations.len())?;
        let body = self.api.patch(
            &format!("{PREFIX}/{workspace_id}/time_entries/{ids}"),
            Some(operations),
        )?;
        decode(&body)
    }

    /// Stops a running entry. Toggl answers 409 when it is already stopped.
    pub fn stop_time_entry(&self, workspace_id: u64, time_entry_id: u64) -> Result<MeTimeEntryResponse> {
        let body = self.api.patch::<()>(
            &format!("{PREFIX}/{workspace_id}/time_entries/{time_entry_id}/stop"),
            None,
        )?;
        decode(&body)
    }
}
