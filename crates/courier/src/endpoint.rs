//! Endpoint handles and the built-in endpoint shapes.
//!
//! The dispatcher treats endpoints as opaque: an [`Endpoint`] is a named,
//! cheaply cloneable handle around any `Send + Sync` value. Adapters decide
//! which shapes they can invoke by downcasting the handle's target.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::context::MessageContext;
use crate::error::EndpointError;
use crate::message::Payload;

/// Opaque, named handle to an application endpoint.
#[derive(Clone)]
pub struct Endpoint {
    name: Arc<str>,
    target: Arc<dyn Any + Send + Sync>,
}

impl Endpoint {
    /// Wraps an arbitrary endpoint value. Only adapters that recognise `T`
    /// will be able to invoke it.
    #[must_use]
    pub fn new<T>(name: impl Into<String>, target: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            name: Arc::from(name.into()),
            target: Arc::new(target),
        }
    }

    /// Wraps a [`MessageEndpoint`], invoked by
    /// [`MessageEndpointAdapter`](crate::MessageEndpointAdapter).
    #[must_use]
    pub fn message<E>(name: impl Into<String>, endpoint: E) -> Self
    where
        E: MessageEndpoint + 'static,
    {
        Self::new(name, MessageEndpointHandle(Arc::new(endpoint)))
    }

    /// Wraps a [`PayloadEndpoint`], invoked by
    /// [`PayloadEndpointAdapter`](crate::PayloadEndpointAdapter).
    #[must_use]
    pub fn payload<E>(name: impl Into<String>, endpoint: E) -> Self
    where
        E: PayloadEndpoint + 'static,
    {
        Self::new(name, PayloadEndpointHandle(Arc::new(endpoint)))
    }

    /// Name used in logs, errors and fault-mapping restrictions.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the wrapped value when it has type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.target.downcast_ref()
    }

    /// Returns `true` when both handles refer to the same endpoint value.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.target, &other.target)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Endpoint")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.name)
    }
}

/// Endpoint that works with the whole message context.
pub trait MessageEndpoint: Send + Sync {
    /// Handles the request, writing any reply through
    /// [`MessageContext::response_mut`].
    ///
    /// # Errors
    ///
    /// Returns an [`EndpointError`] when the request cannot be handled; the
    /// dispatcher routes it to the configured exception resolvers.
    fn invoke(&self, context: &mut MessageContext) -> Result<(), EndpointError>;
}

/// Endpoint that maps a request payload to an optional response payload.
pub trait PayloadEndpoint: Send + Sync {
    /// Handles the request payload.
    ///
    /// Returning `Ok(None)` leaves the response untouched, so one-way
    /// operations produce no response.
    ///
    /// # Errors
    ///
    /// Returns an [`EndpointError`] when the payload cannot be handled.
    fn invoke(&self, request: Option<&Payload>) -> Result<Option<Payload>, EndpointError>;
}

#[derive(Clone)]
pub(crate) struct MessageEndpointHandle(pub(crate) Arc<dyn MessageEndpoint>);

#[derive(Clone)]
pub(crate) struct PayloadEndpointHandle(pub(crate) Arc<dyn PayloadEndpoint>);
