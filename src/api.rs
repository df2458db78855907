use reqwest::Method;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::Auth;
use crate::error::{ApiError, Error};
use crate::response::ListResponse;
use crate::schemas::Validate;

pub const API_ROOT_URL: &str = "https://api.track.toggl.com/api/v9";
pub const REPORTS_ROOT_URL: &str = "https://api.track.toggl.com/reports/api/v3/workspace";

const USER_AGENT: &str = concat!("toggl-track/", env!("CARGO_PKG_VERSION"));

/// Query string pairs; a key may repeat for list-valued filters.
pub type Query = Vec<(String, String)>;

/// One persistent HTTP client bound to a base URL and a credential.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Auth,
}

impl ApiClient {
    pub fn new(base_url: &str, auth: Auth) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get(&self, path: &str, query: &[(String, String)]) -> Result<String, ApiError> {
        self.send::<()>(Method::GET, path, query, None)
    }

    pub fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<String, ApiError> {
        self.send(Method::POST, path, &[], body)
    }

    pub fn put<B: Serialize + ?Sized>(&self, path: &str, body: Option<&B>) -> Result<String, ApiError> {
        self.send(Method::PUT, path, &[], body)
    }

    pub fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<String, ApiError> {
        self.send(Method::PATCH, path, &[], body)
    }

    pub fn delete(&self, path: &str) -> Result<String, ApiError> {
        self.send::<()>(Method::DELETE, path, &[], None)
    }

    /// Issues one request and returns the body text of a 2xx response.
    ///
    /// Any other status becomes an [`ApiError`] carrying the raw body.
    pub fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> Result<String, ApiError> {
        let url = self.url(path, query)?;
        debug!(%method, %url, "sending request");

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(AUTHORIZATION, self.auth.header_value());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            warn!(%method, path, status = status.as_u16(), "request rejected by Toggl");
            return Err(ApiError::from_status(status.as_u16(), text));
        }

        Ok(text)
    }

    fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url = Url::parse(&raw).map_err(|err| ApiError::InvalidUrl {
            url: raw.clone(),
            reason: err.to_string(),
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

/// Decodes a single response object and runs its schema checks.
pub(crate) fn decode<T>(body: &str) -> Result<T, Error>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_str(body)?;
    value.validate()?;
    Ok(value)
}

pub(crate) fn decode_list<T>(body: &str) -> Result<ListResponse<T>, Error>
where
    T: DeserializeOwned + Validate,
{
    let value = serde_json::from_str(body)?;
    let list = ListResponse::<T>::from_json(value)?;
    for item in list.iter() {
        item.validate()?;
    }
    Ok(list)
}
