//! Blocking client for the Toggl Track API v9 and Reports API v3.
//!
//! ```no_run
//! use toggl_track::{Auth, CurrentUser};
//!
//! let user = CurrentUser::new(Auth::token("my-api-token"))?;
//! if let Some(entry) = user.get_current_time_entry()? {
//!     println!("running: {:?}", entry.description);
//! }
//! # Ok::<(), toggl_track::Error>(())
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod dates;
pub mod entities;
pub mod error;
pub mod response;
pub mod schemas;

pub use api::{API_ROOT_URL, ApiClient, REPORTS_ROOT_URL};
pub use auth::Auth;
pub use config::{Config, ConfigError};
pub use entities::{CurrentUser, ReportTimeEntry, Workspace};
pub use error::{ApiError, Error, Result, ValidationError};
pub use response::ListResponse;
pub use schemas::Validate;
pub use schemas::base::{BulkEditOperation, BulkEditOperationKind, BulkEditResponse};
