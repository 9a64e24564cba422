//! Request identity types for sequenced async work.
//!
//! - `RequestId`: a monotonically increasing generation assigned when a request starts
//! - `RequestHandle`: pairs a `RequestId` with the `CancellationToken` of the in-flight work
//!
//! # Usage
//!
//! ```ignore
//! use fileshelf_states::{RequestHandle, RequestId};
//! use tokio_util::sync::CancellationToken;
//!
//! let handle = RequestHandle::new(RequestId::new(1), CancellationToken::new());
//!
//! // Later, a newer request supersedes this one
//! handle.cancel();
//! ```

use std::fmt;

use tokio_util::sync::CancellationToken;

/// Identifier of one issued request.
///
/// Generations are issued in increasing order by [`crate::LatestOnly`], so a
/// higher generation always belongs to a request that was started later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId {
    generation: u64,
}

impl RequestId {
    /// Creates a `RequestId` with the given generation.
    pub fn new(generation: u64) -> Self {
        Self { generation }
    }

    /// Returns the generation counter.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true if `self` was issued after `other`.
    pub fn is_newer_than(&self, other: Self) -> bool {
        self.generation > other.generation
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.generation)
    }
}

/// Handle to an in-flight request with cooperative cancellation support.
///
/// Cancelling does not abort the future. Work that holds the token should
/// check `is_cancelled()` or race `cancelled()` with `tokio::select!`.
///
/// ```ignore
/// tokio::select! {
///     _ = token.cancelled() => None,
///     page = api.list_files(&query) => Some(page),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequestHandle {
    id: RequestId,
    cancel_token: CancellationToken,
}

impl RequestHandle {
    /// Creates a new `RequestHandle` with the given ID and cancellation token.
    pub fn new(id: RequestId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    /// Returns the `RequestId` of this request.
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Returns a clone of the cancellation token.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Requests cooperative cancellation of this request.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// Returns `true` if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}
