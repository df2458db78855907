mod common;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rstest::rstest;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{
    TestServer, WORKSPACE_ID, project_response, query_pairs, time_entry_response,
    workspace_response,
};
use toggl_track::schemas::project::{ProjectField, ProjectRequest, ProjectsQuery};
use toggl_track::schemas::time_entry::{NewTimeEntry, TimeEntryField, TimeEntryRequest};
use toggl_track::schemas::workspace::UpdateWorkspaceRequest;
use toggl_track::{ApiError, BulkEditOperation, Error, ValidationError};

fn start() -> DateTime<chrono::FixedOffset> {
    DateTime::parse_from_rfc3339("2024-07-29T12:28:33+00:00").unwrap()
}

#[test]
fn get_workspace() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("GET"))
            .and(path(format!("/workspaces/{WORKSPACE_ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(workspace_response())),
    );

    let workspace = server.workspace().get(WORKSPACE_ID).unwrap();

    assert_eq!(workspace.id, WORKSPACE_ID);
    assert_eq!(workspace.organization_id, 8364520);
}

#[test]
fn missing_workspace_is_not_found() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("GET"))
            .and(path("/workspaces/1"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found")),
    );

    let err = server.workspace().get(1).unwrap_err();

    assert!(matches!(err, Error::Api(ApiError::NotFound { .. })));
}

#[test]
fn list_without_since_sends_no_query() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("GET"))
            .and(path("/workspaces"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([workspace_response()]))),
    );

    let workspaces = server.workspace().list(None).unwrap();

    assert_eq!(workspaces.len(), 1);
    let request = server.single_request();
    assert_eq!(request.url.query(), None);
}

#[rstest]
#[case::inside(30, true)]
#[case::edge(89, true)]
#[case::outside(91, false)]
fn list_since_window(#[case] days: i64, #[case] accepted: bool) {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("GET"))
            .and(path("/workspaces"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([]))),
    );
    let since = Utc::now() - Duration::days(days);

    let result = server.workspace().list(Some(since));

    if accepted {
        assert!(result.unwrap().is_empty());
        assert_eq!(
            query_pairs(&server.single_request()),
            vec![("since".to_string(), since.timestamp().to_string())]
        );
    } else {
        assert!(matches!(result, Err(Error::Validation(ValidationError::SinceTooOld))));
        assert!(server.requests().is_empty());
    }
}

#[test]
fn update_workspace_name() {
    let server = TestServer::start();
    let mut updated = workspace_response();
    updated["name"] = json!("renamed");
    server.mount(
        Mock::given(method("PUT"))
            .and(path(format!("/workspaces/{WORKSPACE_ID}")))
            .and(body_json(json!({"name": "renamed"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(updated)),
    );
    let request = UpdateWorkspaceRequest {
        name: Some("renamed".to_string()),
        ..Default::default()
    };

    assert_eq!(server.workspace().update(WORKSPACE_ID, &request).unwrap().name, "renamed");
}

#[test]
fn update_workspace_all_settings() {
    let server = TestServer::start();
    let mut updated = workspace_response();
    updated["name"] = json!("renamed");
    updated["only_admins_may_create_tags"] = json!(true);
    updated["only_admins_see_team_dashboard"] = json!(true);
    updated["reports_collapse"] = json!(true);
    server.mount(
        Mock::given(method("PUT"))
            .and(path(format!("/workspaces/{WORKSPACE_ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(updated)),
    );
    let request = UpdateWorkspaceRequest {
        admins: Some(vec![30809356]),
        name: Some("renamed".to_string()),
        only_admins_may_create_tags: Some(true),
        only_admins_see_team_dashboard: Some(true),
        reports_collapse: Some(true),
    };

    let workspace = server.workspace().update(WORKSPACE_ID, &request).unwrap();

    assert!(workspace.only_admins_may_create_tags);
    assert!(workspace.reports_collapse);
    let sent: Value = server.single_request().body_json().unwrap();
    assert_eq!(
        sent,
        json!({
            "admins": [30809356],
            "name": "renamed",
            "only_admins_may_create_tags": true,
            "only_admins_see_team_dashboard": true,
            "reports_collapse": true
        })
    );
}

#[test]
fn create_project_posts_only_set_fields() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("POST"))
            .and(path(format!("/workspaces/{WORKSPACE_ID}/projects")))
            .respond_with(ResponseTemplate::new(200).set_body_json(project_response())),
    );
    let request = ProjectRequest {
        name: Some("test project".to_string()),
        is_private: Some(true),
        ..Default::default()
    };

    let project = server.workspace().create_project(WORKSPACE_ID, &request).unwrap();

    assert_eq!(project.name, "test project");
    let sent: Value = server.single_request().body_json().unwrap();
    assert_eq!(sent, json!({"name": "test project", "is_private": true}));
}

#[rstest]
#[case::client_id_and_name(
    ProjectRequest { client_id: Some(1), client_name: Some("Client".to_string()), ..Default::default() },
    "Both client_id and client_name provided"
)]
#[case::reversed_dates(
    ProjectRequest {
        start_date: NaiveDate::from_ymd_opt(2024, 6, 1),
        end_date: NaiveDate::from_ymd_opt(2024, 5, 1),
        ..Default::default()
    },
    "Project timeframe is not valid"
)]
fn invalid_project_is_rejected_locally(#[case] request: ProjectRequest, #[case] message: &str) {
    let server = TestServer::start();
    let workspace = server.workspace();

    let created = workspace.create_project(WORKSPACE_ID, &request).unwrap_err();
    let updated = workspace.update_project(WORKSPACE_ID, 202793181, &request).unwrap_err();

    assert_eq!(created.to_string(), message);
    assert_eq!(updated.to_string(), message);
    assert!(server.requests().is_empty());
}

#[test]
fn get_projects_repeats_list_filters() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("GET"))
            .and(path(format!("/workspaces/{WORKSPACE_ID}/projects")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([project_response()]))),
    );
    let query = ProjectsQuery {
        active: Some(true),
        client_ids: Some(vec![1, 2]),
        ..Default::default()
    };

    let projects = server.workspace().get_projects(WORKSPACE_ID, &query).unwrap();

    assert_eq!(projects[0].id, 202793181);
    assert_eq!(
        query_pairs(&server.single_request()),
        vec![
            ("active".to_string(), "true".to_string()),
            ("client_ids".to_string(), "1".to_string()),
            ("client_ids".to_string(), "2".to_string()),
        ]
    );
}

#[test]
fn get_and_delete_project() {
    let server = TestServer::start();
    let project_path = format!("/workspaces/{WORKSPACE_ID}/projects/202793181");
    server.mount(
        Mock::given(method("GET"))
            .and(path(project_path.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(project_response())),
    );
    server.mount(
        Mock::given(method("DELETE"))
            .and(path(project_path))
            .respond_with(ResponseTemplate::new(200)),
    );
    let workspace = server.workspace();

    assert_eq!(workspace.get_project(WORKSPACE_ID, 202793181).unwrap().id, 202793181);
    workspace.delete_project(WORKSPACE_ID, 202793181).unwrap();
    assert_eq!(server.requests().len(), 2);
}

#[test]
fn bulk_edit_projects_patches_joined_ids() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("PATCH"))
            .and(path(format!("/workspaces/{WORKSPACE_ID}/projects/1,2,3")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": [1, 2, 3], "failure": []})),
            ),
    );
    let operations = [
        BulkEditOperation::change(ProjectField::ProjectName, "renamed"),
        BulkEditOperation::add(ProjectField::IsPrivate, false),
    ];

    let response = server
        .workspace()
        .bulk_edit_projects(WORKSPACE_ID, &[1, 2, 3], &operations)
        .unwrap();

    assert_eq!(response.success, vec![1, 2, 3]);
    let sent: Value = server.single_request().body_json().unwrap();
    assert_eq!(
        sent,
        json!([
            {"op": "replace", "path": "/name", "value": "renamed"},
            {"op": "add", "path": "/is_private", "value": false}
        ])
    );
}

#[rstest]
#[case::no_ids(vec![], 1, "Specify at least one Project ID")]
#[case::too_many_ids((1..=101).collect(), 1, "Limit to max Project IDs exceeded. Max 100 ids per request are allowed")]
#[case::no_operations(vec![202793181], 0, "Specify at least one edit operation")]
fn bulk_edit_projects_is_checked_locally(
    #[case] ids: Vec<u64>,
    #[case] operation_count: usize,
    #[case] message: &str,
) {
    let server = TestServer::start();
    let operations: Vec<_> = (0..operation_count)
        .map(|_| BulkEditOperation::change(ProjectField::Template, true))
        .collect();

    let err = server
        .workspace()
        .bulk_edit_projects(WORKSPACE_ID, &ids, &operations)
        .unwrap_err();

    assert_eq!(err.to_string(), message);
    assert!(server.requests().is_empty());
}

#[rstest]
#[case::no_ids(vec![], 1)]
#[case::too_many_ids((1..=101).collect(), 1)]
#[case::no_operations(vec![3544298808], 0)]
fn bulk_edit_time_entries_is_checked_locally(#[case] ids: Vec<u64>, #[case] operation_count: usize) {
    let server = TestServer::start();
    let operations: Vec<_> = (0..operation_count)
        .map(|_| BulkEditOperation::remove(TimeEntryField::Tags, json!(["tag"])))
        .collect();

    let err = server
        .workspace()
        .bulk_edit_time_entries(WORKSPACE_ID, &ids, &operations)
        .unwrap_err();

    assert!(err.is_validation());
    assert!(server.requests().is_empty());
}

#[test]
fn bulk_edit_time_entries_reports_failures() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("PATCH"))
            .and(path(format!("/workspaces/{WORKSPACE_ID}/time_entries/10,11")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": [10],
                "failure": [{"id": 11, "message": "Time entry not found"}]
            }))),
    );
    let operations = [BulkEditOperation::change(TimeEntryField::Description, "renamed")];

    let response = server
        .workspace()
        .bulk_edit_time_entries(WORKSPACE_ID, &[10, 11], &operations)
        .unwrap();

    assert_eq!(response.failure[0].id, 11);
}

#[test]
fn create_time_entry_carries_workspace_id() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("POST"))
            .and(path(format!("/workspaces/{WORKSPACE_ID}/time_entries")))
            .respond_with(ResponseTemplate::new(200).set_body_json(time_entry_response())),
    );
    let mut entry = NewTimeEntry::new("toggl-track tests", start());
    entry.duration = Some(22);
    entry.stop = Some(start() + Duration::seconds(22));
    entry.description = Some("test timer".to_string());

    let created = server.workspace().create_time_entry(WORKSPACE_ID, &entry).unwrap();

    assert_eq!(created.duration, 22);
    let sent: Value = server.single_request().body_json().unwrap();
    assert_eq!(sent["workspace_id"], json!(WORKSPACE_ID));
    assert_eq!(sent["created_with"], json!("toggl-track tests"));
    assert_eq!(sent["duration"], json!(22));
    let sent_start: DateTime<chrono::FixedOffset> =
        serde_json::from_value(sent["start"].clone()).unwrap();
    assert_eq!(sent_start, start());
}

#[rstest]
#[case::one_second_short(21)]
#[case::one_second_over(23)]
#[case::negative(-22)]
fn inconsistent_time_entry_sends_nothing(#[case] duration: i64) {
    let server = TestServer::start();
    let mut entry = NewTimeEntry::new("toggl-track tests", start());
    entry.duration = Some(duration);
    entry.stop = Some(start() + Duration::seconds(22));

    let err = server.workspace().create_time_entry(WORKSPACE_ID, &entry).unwrap_err();

    assert_eq!(
        err.to_string(),
        "`start`, `stop` and `duration` must be consistent - `start` + `duration` == `stop`"
    );
    assert!(server.requests().is_empty());
}

#[test]
fn update_and_delete_time_entry() {
    let server = TestServer::start();
    let entry_path = format!("/workspaces/{WORKSPACE_ID}/time_entries/3544298808");
    let mut updated = time_entry_response();
    updated["billable"] = json!(true);
    server.mount(
        Mock::given(method("PUT"))
            .and(path(entry_path.clone()))
            .and(body_json(json!({"billable": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(updated)),
    );
    server.mount(
        Mock::given(method("DELETE"))
            .and(path(entry_path))
            .respond_with(ResponseTemplate::new(200)),
    );
    let workspace = server.workspace();
    let request = TimeEntryRequest {
        billable: Some(true),
        ..Default::default()
    };

    assert!(workspace.update_time_entry(WORKSPACE_ID, 3544298808, &request).unwrap().billable);
    workspace.delete_time_entry(WORKSPACE_ID, 3544298808).unwrap();
}

#[test]
fn stop_time_entry_patches_stop_path() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("PATCH"))
            .and(path(format!("/workspaces/{WORKSPACE_ID}/time_entries/3544298808/stop")))
            .respond_with(ResponseTemplate::new(200).set_body_json(time_entry_response())),
    );

    let stopped = server.workspace().stop_time_entry(WORKSPACE_ID, 3544298808).unwrap();

    assert!(!stopped.is_running());
}

#[test]
fn stopping_stopped_entry_keeps_status() {
    let server = TestServer::start();
    server.mount(
        Mock::given(method("PATCH"))
            .and(path(format!("/workspaces/{WORKSPACE_ID}/time_entries/3544298808/stop")))
            .respond_with(ResponseTemplate::new(409).set_body_string("Time entry already stopped")),
    );

    let err = server.workspace().stop_time_entry(WORKSPACE_ID, 3544298808).unwrap_err();

    match err {
        Error::Api(ApiError::Status { status, message }) => {
            assert_eq!(status, 409);
            assert_eq!(message, "Time entry already stopped");
        }
        other => panic!("unexpected error {other:?}"),
    }
}
