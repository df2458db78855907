use chrono::NaiveDate;
use thiserror::Error;

/// Every failure a client method can report.
///
/// The two families never overlap: `Validation` is produced before a request
/// leaves the process (or when a response does not match its schema), `Api`
/// comes from the remote service or the transport.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            Error::Validation(_) => None,
        }
    }
}

/// Error reported by the remote service.
///
/// The display text is the raw response body, so callers see exactly what
/// Toggl sent back.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest { message: String },
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("{message}")]
    Forbidden { message: String },
    #[error("{message}")]
    NotFound { message: String },
    #[error("{message}")]
    MethodNotAllowed { message: String },
    #[error("{message}")]
    TooManyRequests { message: String },
    #[error("{message}")]
    Status { status: u16, message: String },
    /// No HTTP response was received at all.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ApiError {
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => ApiError::BadRequest { message },
            401 => ApiError::Unauthorized { message },
            403 => ApiError::Forbidden { message },
            404 => ApiError::NotFound { message },
            405 => ApiError::MethodNotAllowed { message },
            429 => ApiError::TooManyRequests { message },
            _ => ApiError::Status { status, message },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest { .. } => Some(400),
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::MethodNotAllowed { .. } => Some(405),
            ApiError::TooManyRequests { .. } => Some(429),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|status| status.as_u16()),
            ApiError::InvalidUrl { .. } => None,
        }
    }

    /// Raw response body text, or the transport error description.
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest { message }
            | ApiError::Unauthorized { message }
            | ApiError::Forbidden { message }
            | ApiError::NotFound { message }
            | ApiError::MethodNotAllowed { message }
            | ApiError::TooManyRequests { message }
            | ApiError::Status { message, .. } => message.clone(),
            ApiError::Transport(err) => err.to_string(),
            ApiError::InvalidUrl { .. } => self.to_string(),
        }
    }
}

/// Client-side validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Since cannot be older than 3 months")]
    SinceTooOld,
    #[error("Start and end dates must not be earlier than {earliest}")]
    DatesTooOld { earliest: NaiveDate },
    #[error("`start`, `stop` and `duration` must be consistent - `start` + `duration` == `stop`")]
    InconsistentTimeEntry,
    #[error("Specify at least one {entity} ID")]
    EmptyIds { entity: &'static str },
    #[error("Limit to max {entity} IDs exceeded. Max {max} ids per request are allowed")]
    TooManyIds { entity: &'static str, max: usize },
    #[error("Specify at least one edit operation")]
    EmptyOperations,
    #[error("New password should differ from current password")]
    PasswordUnchanged,
    #[error("Password is too weak")]
    WeakPassword,
    #[error("Specified timezone {0} is invalid")]
    InvalidTimezone(String),
    #[error("{0} is not a valid email address")]
    InvalidEmail(String),
    #[error("Both client_id and client_name provided")]
    ClientIdAndName,
    #[error("Project timeframe is not valid")]
    InvalidTimeframe,
    #[error("At least one parameter must be set")]
    NoParameters,
    #[error("{field}: input should be greater than or equal to {min}")]
    TooSmall { field: &'static str, min: i64 },
    #[error("{field}: input should be less than or equal to {max}")]
    TooLarge { field: &'static str, max: i64 },
    #[error("{field}: string should have at least {min} characters")]
    TooShort { field: &'static str, min: usize },
    #[error("{field}: string should have at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field}: length should be exactly {len} characters")]
    WrongLength { field: &'static str, len: usize },
    /// The response body did not match the expected schema.
    #[error("invalid response: {0}")]
    Response(String),
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ValidationError::Response(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(err.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
