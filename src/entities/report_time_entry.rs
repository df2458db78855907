use crate::api::{ApiClient, REPORTS_ROOT_URL, decode_list};
use crate::auth::Auth;
use crate::error::Result;
use crate::response::ListResponse;
use crate::schemas::Validate;
use crate::schemas::report_time_entry::{ReportSearch, SearchReportTimeEntriesResponse};

/// Detailed reports from the Reports API.
#[derive(Debug, Clone)]
pub struct ReportTimeEntry {
    api: ApiClient,
}

impl ReportTimeEntry {
    pub fn new(auth: Auth) -> Result<Self> {
        Self::with_base_url(REPORTS_ROOT_URL, auth)
    }

    pub fn with_base_url(base_url: &str, auth: Auth) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(base_url, auth)?,
        })
    }

    /// Grouped time entry rows for one workspace.
    ///
    /// The Reports API pages by row offset, so `page_number` is sent as the
    /// `first_row_number` of that page.
    pub fn search(
        &self,
        workspace_id: u64,
        search: &ReportSearch,
    ) -> Result<ListResponse<SearchReportTimeEntriesResponse>> {
        search.validate()?;
        let request = search.to_request();
        let body = self
            .api
            .post(&format!("/{workspace_id}/search/time_entries"), Some(&request))?;
        decode_list(&body)
    }
}
