//! Endpoint exception resolvers.

use crate::context::MessageContext;
use crate::endpoint::Endpoint;
use crate::error::EndpointError;

/// Turns an error raised during dispatch into a response.
///
/// The dispatcher tries resolvers in registration order and stops at the
/// first one that returns `true`. A resolver that declines must not write
/// a fault.
pub trait EndpointExceptionResolver: Send + Sync {
    /// Attempts to resolve `error`, usually by writing a fault into the
    /// response. `endpoint` is `None` when the error arose before an endpoint
    /// was resolved.
    fn resolve_exception(
        &self,
        context: &mut MessageContext,
        endpoint: Option<&Endpoint>,
        error: &EndpointError,
    ) -> bool;
}
