//! File listing state and the client for the fileshelf file service.
//!
//! [`FileStore`] holds the listed records together with the user's search,
//! date-range, sort and page intent, and derives the page to render.
//! [`FileApi`] talks to the service; [`FileSession`] binds the two and makes
//! sure a slow, outdated list response never overwrites a newer one.

mod api;
mod config;
mod error;
mod file;
mod filter;
pub mod http;
mod pagination;
mod query;
mod session;
mod store;

pub use api::{FileApi, HealthStatus, ListFilesResponse, UploadResponse};
pub use config::{BusinessConfig, DEFAULT_TIMEOUT_SECS};
pub use error::ApiError;
pub use file::{Attachment, FileRecord, format_size, parse_timestamp};
pub use filter::{FilterState, ParseError, SortBy, SortOrder, end_of_day, start_of_day};
pub use pagination::{
    DEFAULT_PER_PAGE, MAX_PER_PAGE, PaginationMetadata, PaginationState, clamp_page, total_pages,
};
pub use query::{BackendSearchParams, ListQuery};
pub use session::{FetchStatus, FileSession, PendingFetch, RefreshOutcome};
pub use store::{FileStore, FilterMode, OptimisticChange};
