//! Request sequencing primitives shared by the fileshelf client crates.
//!
//! List fetches may overlap (a user pages forward twice quickly). These types
//! tag each request with a generation and decide whether its response may
//! still be applied.

mod error;
mod latest;
mod task;

pub use error::Error;
pub use latest::LatestOnly;
pub use task::{RequestHandle, RequestId};
