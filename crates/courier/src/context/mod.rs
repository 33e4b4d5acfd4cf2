//! Per-dispatch message context.
//!
//! A [`MessageContext`] owns the request for one dispatch and lazily creates
//! the response through a [`MessageFactory`]. Once created, the response is
//! the same instance for the rest of the dispatch. A string property bag lets
//! interceptors carry state from the request phase to the response phase.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::message::{MessageFactory, WebServiceMessage};

/// Request, lazily created response, and properties for one dispatch.
pub struct MessageContext {
    request: Box<dyn WebServiceMessage>,
    response: Option<Box<dyn WebServiceMessage>>,
    factory: Arc<dyn MessageFactory>,
    properties: BTreeMap<String, String>,
}

impl MessageContext {
    /// Creates a context for `request`; responses are built by `factory`.
    #[must_use]
    pub fn new<M: WebServiceMessage>(request: M, factory: Arc<dyn MessageFactory>) -> Self {
        Self {
            request: Box::new(request),
            response: None,
            factory,
            properties: BTreeMap::new(),
        }
    }

    /// Returns the request message.
    #[must_use]
    pub fn request(&self) -> &dyn WebServiceMessage {
        self.request.as_ref()
    }

    /// Returns the request message for in-place modification by interceptors.
    pub fn request_mut(&mut self) -> &mut dyn WebServiceMessage {
        self.request.as_mut()
    }

    /// Returns the request downcast to a concrete message type.
    #[must_use]
    pub fn request_as<M: WebServiceMessage>(&self) -> Option<&M> {
        self.request.as_any().downcast_ref()
    }

    /// Returns `true` once a response has been created.
    #[must_use]
    pub const fn has_response(&self) -> bool {
        self.response.is_some()
    }

    /// Returns the response without creating one.
    #[must_use]
    pub fn response(&self) -> Option<&dyn WebServiceMessage> {
        self.response.as_deref()
    }

    /// Returns the response, creating it on first access.
    pub fn response_mut(&mut self) -> &mut dyn WebServiceMessage {
        let factory = &self.factory;
        let request = &self.request;
        self.response
            .get_or_insert_with(|| factory.create_response(request.as_ref()))
            .as_mut()
    }

    /// Returns the response downcast to a concrete type, creating it first
    /// when needed.
    ///
    /// Yields `None` when the response is of another type. A response created
    /// by this call is then discarded, so a caller that cannot use it leaves
    /// the context without a response.
    pub fn response_as_mut<M: WebServiceMessage>(&mut self) -> Option<&mut M> {
        let created = !self.has_response();
        if !self.response_mut().as_any().is::<M>() {
            if created {
                self.clear_response();
            }
            return None;
        }
        self.response_mut().as_any_mut().downcast_mut()
    }

    /// Discards the response, if any.
    pub fn clear_response(&mut self) {
        self.response = None;
    }

    /// Stores a property, returning the previous value.
    pub fn set_property(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.properties.insert(name.into(), value.into())
    }

    /// Looks up a property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Removes a property, returning its value.
    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        self.properties.remove(name)
    }

    /// Iterates over property names in sorted order.
    #[must_use]
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }
}

impl fmt::Debug for MessageContext {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MessageContext")
            .field("request", &self.request)
            .field("response", &self.response)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
