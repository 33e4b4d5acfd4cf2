//! Protocol hooks injected into the dispatcher.

use std::sync::Arc;

use crate::chain::EndpointInvocationChain;
use crate::context::MessageContext;
use crate::error::EndpointError;
use crate::interceptor::EndpointInterceptor;
use crate::resolver::EndpointExceptionResolver;

/// Protocol-specific behaviour plugged into [`MessageDispatcher`].
///
/// The generic dispatch algorithm calls these hooks at fixed points; a
/// protocol such as SOAP supplies its own implementation instead of
/// overriding the dispatcher.
///
/// [`MessageDispatcher`]: super::MessageDispatcher
pub trait DispatchHooks: Send + Sync {
    /// Protocol check run after the endpoint is resolved and before any
    /// interceptor is entered. Returning `Ok(false)` stops the dispatch
    /// without invoking the endpoint.
    ///
    /// # Errors
    ///
    /// An error is routed to the exception resolvers like any endpoint error.
    fn handle_request(
        &self,
        chain: &EndpointInvocationChain,
        context: &mut MessageContext,
    ) -> Result<bool, EndpointError> {
        let _ = (chain, context);
        Ok(true)
    }

    /// Decides whether the response carries a fault, which selects the
    /// fault hooks over the response hooks when unwinding interceptors.
    fn response_has_fault(&self, context: &MessageContext) -> bool {
        context
            .response()
            .and_then(|response| response.as_fault_aware())
            .is_some_and(|message| message.has_fault())
    }

    /// Whether `interceptor` receives its fault hook. Interceptors for which
    /// this is `false` are skipped while unwinding a fault.
    fn handles_faults(&self, interceptor: &dyn EndpointInterceptor) -> bool {
        let _ = interceptor;
        true
    }

    /// Resolvers installed when the dispatcher is built without any.
    fn default_resolvers(&self) -> Vec<Arc<dyn EndpointExceptionResolver>> {
        Vec::new()
    }
}

/// Protocol-agnostic hooks: no request check, fault detection through
/// [`FaultAwareMessage`](crate::FaultAwareMessage), and every
/// interceptor receives fault hooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProtocolHooks;

impl DispatchHooks for NoProtocolHooks {}
