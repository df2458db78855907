#![allow(dead_code)]

use serde_json::{Value, json};
use tokio::runtime::{Builder, Runtime};
use wiremock::{Mock, MockServer, Request};

use toggl_track::{Auth, CurrentUser, ReportTimeEntry, Workspace};

pub const FAKE_TOKEN: &str = "flstsapa42cdwiueii2tjg2t08f91kdr";
pub const WORKSPACE_ID: u64 = 43644207;

/// A mock Toggl server driven by its own runtime, so the blocking client can
/// be called from plain test code.
pub struct TestServer {
    server: MockServer,
    runtime: Runtime,
}

impl TestServer {
    pub fn start() -> Self {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn requests(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    pub fn single_request(&self) -> Request {
        let mut requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.remove(0)
    }

    pub fn current_user(&self) -> CurrentUser {
        CurrentUser::with_base_url(&self.uri(), Auth::token(FAKE_TOKEN)).unwrap()
    }

    pub fn workspace(&self) -> Workspace {
        Workspace::with_base_url(&self.uri(), Auth::token(FAKE_TOKEN)).unwrap()
    }

    pub fn reports(&self) -> ReportTimeEntry {
        ReportTimeEntry::with_base_url(&self.uri(), Auth::token(FAKE_TOKEN)).unwrap()
    }
}

pub fn query_pairs(request: &Request) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = request
        .url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    pairs.sort();
    pairs
}

pub fn me_response() -> Value {
    json!({
        "api_token": FAKE_TOKEN,
        "at": "2024-07-24T09:42:55.391879Z",
        "authorization_updated_at": "2024-07-02T16:13:32.109174Z",
        "beginning_of_week": 1,
        "country_id": null,
        "created_at": "2024-05-16T12:01:04.834085Z",
        "default_workspace_id": WORKSPACE_ID,
        "email": "example@mail.com",
        "fullname": "Test User",
        "has_password": true,
        "id": 30809356,
        "image_url": "https://assets.track.toggl.com/images/profile.png",
        "intercom_hash": "78hcsq59lsca33ivsd5iwy42yu3gdf0sctutuku5gvjfk1qbj71puu7r1z74dzdp",
        "openid_email": null,
        "openid_enabled": false,
        "timezone": "Europe/London",
        "toggl_accounts_id": "uWGsHAeXZGhJvQ3XjdY63h",
        "updated_at": "2024-05-16T12:01:24.447981Z"
    })
}

pub fn workspace_response() -> Value {
    json!({
        "admin": true, "api_token": null, "at": "2024-07-30T08:13:46+00:00",
        "business_ws": false, "csv_upload": null, "default_currency": "USD",
        "default_hourly_rate": null, "hide_start_end_times": false,
        "ical_enabled": false, "ical_url": null, "id": WORKSPACE_ID,
        "last_modified": null,
        "logo_url": "https://assets.track.toggl.com/images/workspace.jpg",
        "name": "test workspace", "only_admins_may_create_projects": false,
        "only_admins_may_create_tags": false, "only_admins_see_team_dashboard": false,
        "organization_id": 8364520, "premium": false, "profile": 0,
        "projects_billable_by_default": true, "projects_enforce_billable": false,
        "projects_private_by_default": true, "rate_last_updated": null,
        "reports_collapse": false, "role": "admin", "rounding": 1,
        "rounding_minutes": 0, "server_deleted_at": null, "subscription": null,
        "suspended_at": null, "working_hours_in_minutes": null
    })
}

pub fn project_response() -> Value {
    json!({
        "active": true, "actual_hours": 0, "actual_seconds": 83,
        "at": "2024-05-16T12:40:29+00:00", "auto_estimates": null, "billable": false,
        "can_track_time": true, "client_id": null, "color": "#c9806b",
        "created_at": "2024-05-16T12:40:29+00:00", "currency": null,
        "estimated_hours": null, "estimated_seconds": null, "fixed_fee": null,
        "id": 202793181, "is_private": true, "is_shared": false, "name": "test project",
        "rate": null, "rate_last_updated": null, "recurring": false,
        "recurring_parameters": null, "server_deleted_at": null,
        "start_date": "2024-05-16", "status": "active", "template": null,
        "template_id": null, "workspace_id": WORKSPACE_ID
    })
}

pub fn time_entry_response() -> Value {
    json!({
        "at": "2024-07-29T12:28:56+00:00", "billable": false, "description": "test timer",
        "duration": 22, "duronly": true, "id": 3544298808u64, "permissions": null,
        "project_id": null, "server_deleted_at": null,
        "start": "2024-07-29T12:28:33+00:00", "stop": "2024-07-29T12:28:55+00:00",
        "tag_ids": [], "tags": [], "task_id": null,
        "user_id": 30809356, "workspace_id": WORKSPACE_ID
    })
}

pub fn running_time_entry_response() -> Value {
    let mut entry = time_entry_response();
    entry["duration"] = json!(-1722256113);
    entry["stop"] = Value::Null;
    entry
}

pub fn report_row_response() -> Value {
    json!({
        "billable": false, "billable_amount_in_cents": null, "currency": "USD",
        "description": "sample description", "hourly_rate_in_cents": null,
        "project_id": 202793182, "row_number": 1, "tag_ids": [16501871],
        "task_id": null,
        "time_entries": [{
            "at": "2024-07-30T08:14:38+00:00", "at_tz": "2024-07-30T11:14:38+03:00",
            "id": 3545645770u64, "seconds": 52,
            "start": "2024-07-30T11:13:46+03:00", "stop": "2024-07-30T11:14:38+03:00"
        }],
        "user_id": 30809356, "username": "test user"
    })
}
