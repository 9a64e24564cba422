//! Latest-only sequencing for overlapping requests.
//!
//! Every `begin()` issues a fresh [`RequestId`] and cancels the request it
//! supersedes. A completed request may only be applied through `accept()`,
//! which rejects anything cancelled or older than what was already applied.
//! Out-of-order responses therefore never overwrite newer state.

use tokio_util::sync::CancellationToken;

use crate::{Error, RequestHandle, RequestId};

#[derive(Debug, Default)]
pub struct LatestOnly {
    next_generation: u64,
    in_flight: Option<RequestHandle>,
    last_applied: Option<RequestId>,
}

impl LatestOnly {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, cancelling the previous in-flight one.
    pub fn begin(&mut self) -> RequestHandle {
        self.next_generation += 1;
        let handle = RequestHandle::new(
            RequestId::new(self.next_generation),
            CancellationToken::new(),
        );

        if let Some(previous) = self.in_flight.replace(handle.clone()) {
            log::debug!("Request {} superseded by {}", previous.id(), handle.id());
            previous.cancel();
        }

        handle
    }

    /// Marks `handle` as applied if it is still current.
    pub fn accept(&mut self, handle: &RequestHandle) -> Result<(), Error> {
        let id = handle.id();

        if let Some(latest) = self.last_applied
            && !id.is_newer_than(latest)
        {
            return Err(Error::stale(id, latest));
        }

        if handle.is_cancelled() {
            return Err(Error::superseded(id));
        }

        self.last_applied = Some(id);
        if self.in_flight.as_ref().is_some_and(|h| h.id() == id) {
            self.in_flight = None;
        }
        Ok(())
    }

    /// Forgets `handle` without applying it (the request failed).
    pub fn abandon(&mut self, handle: &RequestHandle) {
        if self.in_flight.as_ref().is_some_and(|h| h.id() == handle.id()) {
            self.in_flight = None;
        }
    }

    /// Cancels the in-flight request, if any.
    pub fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.cancel();
        }
    }

    pub fn last_applied(&self) -> Option<RequestId> {
        self.last_applied
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight.as_ref().map(RequestHandle::id)
    }
}
