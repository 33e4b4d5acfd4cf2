//! Result of a single dispatch.

use crate::error::DispatchError;

/// How a dispatch ended.
///
/// A resolved error still counts as [`DispatchOutcome::Dispatched`]: the
/// response then carries the fault written by the resolver.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// The request was handled; any response is in the context.
    Dispatched,
    /// No mapping produced an endpoint. No interceptor or resolver ran.
    NoEndpointFound {
        /// Description of the unmatched request.
        request: String,
    },
    /// Dispatch failed and no resolver handled the error.
    Failed(DispatchError),
}

impl DispatchOutcome {
    /// Returns `true` for [`DispatchOutcome::Dispatched`].
    #[must_use]
    pub const fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched)
    }

    /// Converts the outcome into a `Result` for callers that treat a missing
    /// endpoint as an error.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NoEndpointFound`] or the failure's error.
    pub fn into_result(self) -> Result<(), DispatchError> {
        match self {
            Self::Dispatched => Ok(()),
            Self::NoEndpointFound { request } => Err(DispatchError::NoEndpointFound { request }),
            Self::Failed(error) => Err(error),
        }
    }
}
