//! Endpoint adapters.
//!
//! An adapter knows how to invoke one endpoint shape. The dispatcher asks each
//! registered adapter in turn whether it supports the resolved endpoint and
//! invokes the first that does.

use std::sync::Arc;

use crate::context::MessageContext;
use crate::endpoint::{Endpoint, MessageEndpointHandle, PayloadEndpointHandle};
use crate::error::EndpointError;

/// Invokes endpoints of a particular shape.
pub trait EndpointAdapter: Send + Sync {
    /// Returns `true` when this adapter can invoke `endpoint`.
    fn supports(&self, endpoint: &Endpoint) -> bool;

    /// Invokes `endpoint` for the request held by `context`.
    ///
    /// # Errors
    ///
    /// Propagates the endpoint's error, or returns
    /// [`EndpointError::UnsupportedEndpoint`] when called with an endpoint
    /// this adapter does not support.
    fn invoke(&self, context: &mut MessageContext, endpoint: &Endpoint)
    -> Result<(), EndpointError>;
}

/// Adapter for endpoints built with [`Endpoint::message`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageEndpointAdapter;

impl EndpointAdapter for MessageEndpointAdapter {
    fn supports(&self, endpoint: &Endpoint) -> bool {
        endpoint.downcast_ref::<MessageEndpointHandle>().is_some()
    }

    fn invoke(
        &self,
        context: &mut MessageContext,
        endpoint: &Endpoint,
    ) -> Result<(), EndpointError> {
        let handle = endpoint
            .downcast_ref::<MessageEndpointHandle>()
            .ok_or_else(|| EndpointError::unsupported_endpoint(endpoint.name()))?;
        handle.0.invoke(context)
    }
}

/// Adapter for endpoints built with [`Endpoint::payload`].
///
/// The request payload is handed to the endpoint; a returned payload becomes
/// the response payload. No response is created when the endpoint returns
/// nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadEndpointAdapter;

impl EndpointAdapter for PayloadEndpointAdapter {
    fn supports(&self, endpoint: &Endpoint) -> bool {
        endpoint.downcast_ref::<PayloadEndpointHandle>().is_some()
    }

    fn invoke(
        &self,
        context: &mut MessageContext,
        endpoint: &Endpoint,
    ) -> Result<(), EndpointError> {
        let handle = endpoint
            .downcast_ref::<PayloadEndpointHandle>()
            .ok_or_else(|| EndpointError::unsupported_endpoint(endpoint.name()))?;
        if let Some(payload) = handle.0.invoke(context.request().payload())? {
            context.response_mut().set_payload(payload);
        }
        Ok(())
    }
}

/// Adapters used when a dispatcher is built without any.
#[must_use]
pub fn default_adapters() -> Vec<Arc<dyn EndpointAdapter>> {
    vec![
        Arc::new(MessageEndpointAdapter),
        Arc::new(PayloadEndpointAdapter),
    ]
}

#[cfg(test)]
mod tests;
