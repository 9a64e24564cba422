use thiserror::Error;

use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Request {id} is older than applied request {latest}")]
    Stale { id: RequestId, latest: RequestId },
    #[error("Request {id} was superseded before completion")]
    Superseded { id: RequestId },
}

impl Error {
    pub fn stale(id: RequestId, latest: RequestId) -> Self {
        Self::Stale { id, latest }
    }

    pub fn superseded(id: RequestId) -> Self {
        Self::Superseded { id }
    }

    /// The request this error refers to.
    pub fn id(&self) -> RequestId {
        match self {
            Self::Stale { id, .. } | Self::Superseded { id } => *id,
        }
    }
}
