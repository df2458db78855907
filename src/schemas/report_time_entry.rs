use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::schemas::Validate;

/// Rows per page when a search does not set `page_size`.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTimeEntryItem {
    pub at: DateTime<FixedOffset>,
    pub at_tz: DateTime<FixedOffset>,
    pub id: u64,
    pub seconds: i64,
    pub start: DateTime<FixedOffset>,
    pub stop: DateTime<FixedOffset>,
}

/// One grouped report row; entries sharing description, project and tags
/// are merged under `time_entries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReportTimeEntriesResponse {
    pub billable: bool,
    pub billable_amount_in_cents: Option<i64>,
    pub currency: String,
    pub description: Option<String>,
    pub hourly_rate_in_cents: Option<i64>,
    pub project_id: Option<u64>,
    pub row_number: u64,
    pub tag_ids: Vec<u64>,
    pub task_id: Option<u64>,
    pub time_entries: Vec<ReportTimeEntryItem>,
    pub user_id: u64,
    pub username: String,
}

impl Validate for SearchReportTimeEntriesResponse {}

/// Filters for a report search. `page_number` counts from zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSearch {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub user_ids: Vec<u64>,
    pub project_ids: Vec<u64>,
    pub page_size: Option<u32>,
    pub page_number: Option<u32>,
}

impl ReportSearch {
    fn page_size(&self) -> Option<u32> {
        self.page_size.filter(|size| *size > 0)
    }

    fn page_number(&self) -> Option<u32> {
        self.page_number.filter(|page| *page > 0)
    }

    /// Row the requested page starts at, if a page past the first was asked for.
    pub fn first_row_number(&self) -> Option<u64> {
        self.page_number().map(|page| {
            let size = self.page_size().unwrap_or(DEFAULT_PAGE_SIZE);
            u64::from(page) * u64::from(size) + 1
        })
    }

    pub(crate) fn to_request(&self) -> SearchReportTimeEntriesRequest {
        SearchReportTimeEntriesRequest {
            start_date: self.start_date,
            end_date: self.end_date,
            user_ids: (!self.user_ids.is_empty()).then(|| self.user_ids.clone()),
            project_ids: (!self.project_ids.is_empty()).then(|| self.project_ids.clone()),
            page_size: self.page_size(),
            first_row_number: self.first_row_number(),
        }
    }
}

impl Validate for ReportSearch {
    fn validate_at(&self, _now: DateTime<Utc>) -> Result<(), ValidationError> {
        let any_set = self.start_date.is_some()
            || self.end_date.is_some()
            || !self.user_ids.is_empty()
            || !self.project_ids.is_empty()
            || self.page_size().is_some()
            || self.page_number().is_some();
        if any_set {
            Ok(())
        } else {
            Err(ValidationError::NoParameters)
        }
    }
}

/// Wire body of `POST /{workspace_id}/search/time_entries`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub(crate) struct SearchReportTimeEntriesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_row_number: Option<u64>,
}
