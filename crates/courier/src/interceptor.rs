//! Endpoint interceptors.
//!
//! Interceptors wrap endpoint invocation. Request hooks run in chain order
//! before the endpoint; response and fault hooks run in reverse order over the
//! interceptors whose request hook was entered.

use tracing::debug;

use crate::context::MessageContext;
use crate::endpoint::Endpoint;
use crate::error::EndpointError;
use crate::soap::SoapEndpointInterceptor;

/// Tracing target for the built-in logging interceptors.
pub(crate) const INTERCEPTOR_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::interceptor");

/// Hook invoked around endpoint invocation.
///
/// Every hook returns `Ok(true)` to continue processing and `Ok(false)` to
/// stop. Returning an error aborts the dispatch and hands the error to the
/// exception resolvers.
pub trait EndpointInterceptor: Send + Sync {
    /// Runs before the endpoint is invoked.
    ///
    /// # Errors
    ///
    /// Returns an [`EndpointError`] to abort the dispatch.
    fn handle_request(
        &self,
        context: &mut MessageContext,
        endpoint: &Endpoint,
    ) -> Result<bool, EndpointError> {
        let _ = (context, endpoint);
        Ok(true)
    }

    /// Runs after a response without a fault was produced.
    ///
    /// # Errors
    ///
    /// Returns an [`EndpointError`] to abort the dispatch.
    fn handle_response(
        &self,
        context: &mut MessageContext,
        endpoint: &Endpoint,
    ) -> Result<bool, EndpointError> {
        let _ = (context, endpoint);
        Ok(true)
    }

    /// Runs after a response carrying a fault was produced.
    ///
    /// # Errors
    ///
    /// Returns an [`EndpointError`] to abort the dispatch.
    fn handle_fault(
        &self,
        context: &mut MessageContext,
        endpoint: &Endpoint,
    ) -> Result<bool, EndpointError> {
        let _ = (context, endpoint);
        Ok(true)
    }

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Returns the SOAP view of this interceptor, if it has one.
    ///
    /// SOAP interceptors override this so the SOAP dispatcher can ask them
    /// which header elements they understand and call their fault hook.
    fn as_soap(&self) -> Option<&dyn SoapEndpointInterceptor> {
        None
    }
}

/// Logs request and response payloads at debug level.
#[derive(Debug, Clone, Copy)]
pub struct PayloadLoggingInterceptor {
    log_request: bool,
    log_response: bool,
}

impl PayloadLoggingInterceptor {
    /// Logs both directions.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            log_request: true,
            log_response: true,
        }
    }

    /// Enables or disables request logging.
    #[must_use]
    pub const fn with_request_logging(mut self, enabled: bool) -> Self {
        self.log_request = enabled;
        self
    }

    /// Enables or disables response and fault logging.
    #[must_use]
    pub const fn with_response_logging(mut self, enabled: bool) -> Self {
        self.log_response = enabled;
        self
    }

    fn log_response(&self, context: &MessageContext, endpoint: &Endpoint, label: &str) {
        if !self.log_response {
            return;
        }
        let payload = context.response().and_then(|response| response.payload());
        debug!(
            target: INTERCEPTOR_TARGET,
            endpoint = %endpoint,
            root = payload.map(|p| p.root().to_string()),
            content = payload.map(|p| p.content()),
            "{label}"
        );
    }
}

impl Default for PayloadLoggingInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

impl EndpointInterceptor for PayloadLoggingInterceptor {
    fn handle_request(
        &self,
        context: &mut MessageContext,
        endpoint: &Endpoint,
    ) -> Result<bool, EndpointError> {
        if self.log_request {
            let payload = context.request().payload();
            debug!(
                target: INTERCEPTOR_TARGET,
                endpoint = %endpoint,
                root = payload.map(|p| p.root().to_string()),
                content = payload.map(|p| p.content()),
                "request"
            );
        }
        Ok(true)
    }

    fn handle_response(
        &self,
        context: &mut MessageContext,
        endpoint: &Endpoint,
    ) -> Result<bool, EndpointError> {
        self.log_response(context, endpoint, "response");
        Ok(true)
    }

    fn handle_fault(
        &self,
        context: &mut MessageContext,
        endpoint: &Endpoint,
    ) -> Result<bool, EndpointError> {
        self.log_response(context, endpoint, "fault");
        Ok(true)
    }
}
