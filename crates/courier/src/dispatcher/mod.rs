//! The message dispatcher.
//!
//! [`MessageDispatcher`] resolves an endpoint chain for each request, runs the
//! chain's interceptors around the endpoint, and unwinds them in reverse order
//! once a response exists. Errors raised along the way are offered to the
//! exception resolvers; a resolved error still completes the dispatch, with
//! the fault carried in the response.
//!
//! Protocol specifics are injected through [`DispatchHooks`]. The generic
//! behaviour lives in [`NoProtocolHooks`]; SOAP supplies its own hooks in
//! [`crate::soap`].

mod hooks;
mod outcome;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, trace, warn};

use crate::adapter::{EndpointAdapter, default_adapters};
use crate::chain::EndpointInvocationChain;
use crate::context::MessageContext;
use crate::endpoint::Endpoint;
use crate::error::EndpointError;
use crate::mapping::EndpointMapping;
use crate::resolver::EndpointExceptionResolver;

pub use self::hooks::{DispatchHooks, NoProtocolHooks};
pub use self::outcome::DispatchOutcome;

/// Tracing target for dispatch decisions.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");
/// Tracing target for inbound requests.
pub(crate) const RECEIVED_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch::received");
/// Tracing target for outbound responses.
pub(crate) const SENT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch::sent");
/// Tracing target for requests no mapping could handle.
pub(crate) const ENDPOINT_NOT_FOUND_TARGET: &str =
    concat!(env!("CARGO_PKG_NAME"), "::dispatch::endpoint_not_found");

/// Dispatches requests to endpoints through mappings, adapters, interceptors
/// and exception resolvers.
///
/// The dispatcher holds no per-request state and can be shared between
/// threads; each call works on its own [`MessageContext`].
pub struct MessageDispatcher<H = NoProtocolHooks> {
    mappings: Vec<Arc<dyn EndpointMapping>>,
    adapters: Vec<Arc<dyn EndpointAdapter>>,
    resolvers: Vec<Arc<dyn EndpointExceptionResolver>>,
    hooks: H,
}

impl MessageDispatcher<NoProtocolHooks> {
    /// Starts building a protocol-agnostic dispatcher.
    #[must_use]
    pub fn builder() -> MessageDispatcherBuilder<NoProtocolHooks> {
        MessageDispatcherBuilder::new(NoProtocolHooks)
    }
}

impl<H: DispatchHooks> MessageDispatcher<H> {
    /// The protocol hooks in use.
    #[must_use]
    pub const fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Entry point for transports: traces the exchange around [`Self::dispatch`].
    pub fn receive(&self, context: &mut MessageContext) -> DispatchOutcome {
        trace!(
            target: RECEIVED_TARGET,
            request = ?context.request(),
            "received request"
        );
        let outcome = self.dispatch(context);
        trace!(
            target: SENT_TARGET,
            has_response = context.has_response(),
            response = ?context.response(),
            "dispatch finished"
        );
        outcome
    }

    /// Dispatches the request held by `context`.
    ///
    /// When no mapping yields an endpoint, the outcome is
    /// [`DispatchOutcome::NoEndpointFound`] and neither interceptors nor
    /// resolvers run.
    pub fn dispatch(&self, context: &mut MessageContext) -> DispatchOutcome {
        let chain = match self.get_endpoint(context) {
            Ok(Some(chain)) => chain,
            Ok(None) => {
                let request = describe_request(context);
                warn!(
                    target: ENDPOINT_NOT_FOUND_TARGET,
                    %request,
                    "no endpoint mapping found"
                );
                return DispatchOutcome::NoEndpointFound { request };
            }
            Err(lookup) => {
                debug!(target: DISPATCH_TARGET, error = %lookup, "endpoint lookup failed");
                return self.recover(context, None, None, lookup);
            }
        };
        debug!(
            target: DISPATCH_TARGET,
            endpoint = %chain.endpoint(),
            interceptors = chain.interceptors().len(),
            "resolved endpoint"
        );

        let mut last_entered = None;
        match self.invoke_chain(&chain, context, &mut last_entered) {
            Ok(()) => DispatchOutcome::Dispatched,
            Err(failure) => self.recover(context, Some(&chain), last_entered, failure),
        }
    }

    fn get_endpoint(
        &self,
        context: &MessageContext,
    ) -> Result<Option<EndpointInvocationChain>, EndpointError> {
        for mapping in &self.mappings {
            if let Some(chain) = mapping.get_endpoint(context)? {
                return Ok(Some(chain));
            }
        }
        Ok(None)
    }

    fn get_endpoint_adapter(&self, endpoint: &Endpoint) -> Result<&dyn EndpointAdapter, EndpointError> {
        let Some(adapter) = self.adapters.iter().find(|adapter| adapter.supports(endpoint)) else {
            error!(
                target: DISPATCH_TARGET,
                %endpoint,
                "no adapter supports the endpoint; check the dispatcher configuration"
            );
            return Err(EndpointError::no_adapter(endpoint.name()));
        };
        Ok(adapter.as_ref())
    }

    /// Runs the protocol check, the request phase, the endpoint and the
    /// response phase. `last_entered` tracks the last interceptor whose
    /// request hook was called so the caller can unwind after an error.
    fn invoke_chain(
        &self,
        chain: &EndpointInvocationChain,
        context: &mut MessageContext,
        last_entered: &mut Option<usize>,
    ) -> Result<(), EndpointError> {
        if !self.hooks.handle_request(chain, context)? {
            debug!(
                target: DISPATCH_TARGET,
                endpoint = %chain.endpoint(),
                "protocol check stopped the dispatch"
            );
            self.trigger_handle_response(chain, None, context)?;
            return Ok(());
        }

        for (index, interceptor) in chain.interceptors().iter().enumerate() {
            *last_entered = Some(index);
            if !interceptor.handle_request(context, chain.endpoint())? {
                debug!(
                    target: DISPATCH_TARGET,
                    interceptor = interceptor.name(),
                    "interceptor stopped the request phase"
                );
                self.trigger_handle_response(chain, Some(index), context)?;
                return Ok(());
            }
        }

        let adapter = self.get_endpoint_adapter(chain.endpoint())?;
        adapter.invoke(context, chain.endpoint())?;
        self.trigger_handle_response(chain, *last_entered, context)?;
        Ok(())
    }

    /// Unwinds interceptors `0..=last_entered` in reverse order. Nothing runs
    /// without a response or when no interceptor was entered.
    fn trigger_handle_response(
        &self,
        chain: &EndpointInvocationChain,
        last_entered: Option<usize>,
        context: &mut MessageContext,
    ) -> Result<(), EndpointError> {
        let Some(last) = last_entered else {
            return Ok(());
        };
        if !context.has_response() || chain.interceptors().is_empty() {
            return Ok(());
        }

        let has_fault = self.hooks.response_has_fault(context);
        for interceptor in chain.interceptors().iter().take(last + 1).rev() {
            let resume = if has_fault {
                if !self.hooks.handles_faults(interceptor.as_ref()) {
                    continue;
                }
                interceptor.handle_fault(context, chain.endpoint())?
            } else {
                interceptor.handle_response(context, chain.endpoint())?
            };
            if !resume {
                debug!(
                    target: DISPATCH_TARGET,
                    interceptor = interceptor.name(),
                    has_fault,
                    "interceptor stopped the response phase"
                );
                break;
            }
        }
        Ok(())
    }

    /// Offers `failure` to the resolvers, then unwinds the entered
    /// interceptors whether or not it was resolved.
    fn recover(
        &self,
        context: &mut MessageContext,
        chain: Option<&EndpointInvocationChain>,
        last_entered: Option<usize>,
        failure: EndpointError,
    ) -> DispatchOutcome {
        let endpoint = chain.map(EndpointInvocationChain::endpoint);
        let resolution = self.process_endpoint_exception(context, endpoint, failure);
        let unwinding = chain.map_or(Ok(()), |active| {
            self.trigger_handle_response(active, last_entered, context)
        });

        match (resolution, unwinding) {
            (Ok(()), Ok(())) => DispatchOutcome::Dispatched,
            (Ok(()), Err(late)) => {
                warn!(
                    target: DISPATCH_TARGET,
                    error = %late,
                    "response phase failed after resolving an endpoint error"
                );
                DispatchOutcome::Failed(late.into())
            }
            (Err(unresolved), unwound) => {
                if let Err(late) = unwound {
                    warn!(
                        target: DISPATCH_TARGET,
                        error = %late,
                        "response phase failed while propagating an unresolved error"
                    );
                }
                DispatchOutcome::Failed(unresolved.into())
            }
        }
    }

    fn process_endpoint_exception(
        &self,
        context: &mut MessageContext,
        endpoint: Option<&Endpoint>,
        failure: EndpointError,
    ) -> Result<(), EndpointError> {
        for resolver in &self.resolvers {
            if resolver.resolve_exception(context, endpoint, &failure) {
                debug!(
                    target: DISPATCH_TARGET,
                    kind = failure.kind(),
                    error = %failure,
                    "endpoint error resolved"
                );
                return Ok(());
            }
        }
        warn!(
            target: DISPATCH_TARGET,
            kind = failure.kind(),
            error = %failure,
            "no resolver handled endpoint error"
        );
        Err(failure)
    }
}

impl<H: fmt::Debug> fmt::Debug for MessageDispatcher<H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MessageDispatcher")
            .field("mappings", &self.mappings.len())
            .field("adapters", &self.adapters.len())
            .field("resolvers", &self.resolvers.len())
            .field("hooks", &self.hooks)
            .finish()
    }
}

/// Builder for [`MessageDispatcher`].
///
/// Mappings, adapters and resolvers are consulted in the order they are
/// added. Without explicit adapters the built-in message and payload adapters
/// are used; without explicit resolvers the hooks' defaults apply.
pub struct MessageDispatcherBuilder<H = NoProtocolHooks> {
    mappings: Vec<Arc<dyn EndpointMapping>>,
    adapters: Vec<Arc<dyn EndpointAdapter>>,
    resolvers: Vec<Arc<dyn EndpointExceptionResolver>>,
    hooks: H,
}

impl<H: DispatchHooks> MessageDispatcherBuilder<H> {
    /// Creates a builder using `hooks`.
    #[must_use]
    pub const fn new(hooks: H) -> Self {
        Self {
            mappings: Vec::new(),
            adapters: Vec::new(),
            resolvers: Vec::new(),
            hooks,
        }
    }

    /// Appends an endpoint mapping.
    #[must_use]
    pub fn mapping<M: EndpointMapping + 'static>(mut self, mapping: M) -> Self {
        self.mappings.push(Arc::new(mapping));
        self
    }

    /// Appends an endpoint adapter.
    #[must_use]
    pub fn adapter<A: EndpointAdapter + 'static>(mut self, adapter: A) -> Self {
        self.adapters.push(Arc::new(adapter));
        self
    }

    /// Appends an exception resolver.
    #[must_use]
    pub fn resolver<R: EndpointExceptionResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolvers.push(Arc::new(resolver));
        self
    }

    /// Replaces the protocol hooks.
    #[must_use]
    pub fn hooks<K: DispatchHooks>(self, hooks: K) -> MessageDispatcherBuilder<K> {
        MessageDispatcherBuilder {
            mappings: self.mappings,
            adapters: self.adapters,
            resolvers: self.resolvers,
            hooks,
        }
    }

    /// Finishes the dispatcher, filling in default adapters and resolvers.
    #[must_use]
    pub fn build(self) -> MessageDispatcher<H> {
        let adapters = if self.adapters.is_empty() {
            default_adapters()
        } else {
            self.adapters
        };
        let resolvers = if self.resolvers.is_empty() {
            self.hooks.default_resolvers()
        } else {
            self.resolvers
        };
        MessageDispatcher {
            mappings: self.mappings,
            adapters,
            resolvers,
            hooks: self.hooks,
        }
    }
}

impl Default for MessageDispatcherBuilder<NoProtocolHooks> {
    fn default() -> Self {
        Self::new(NoProtocolHooks)
    }
}

fn describe_request(context: &MessageContext) -> String {
    context
        .request()
        .payload()
        .map_or_else(|| String::from("<no payload>"), |payload| payload.root().to_string())
}

#[cfg(test)]
mod tests;
