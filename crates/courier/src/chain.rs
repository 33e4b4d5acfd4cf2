//! Endpoint invocation chains.

use std::fmt;
use std::sync::Arc;

use crate::endpoint::Endpoint;
use crate::interceptor::EndpointInterceptor;

/// SOAP actors or roles an endpoint acts in, plus the ultimate-receiver flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoapRoles {
    actors_or_roles: Vec<String>,
    ultimate_receiver: bool,
}

impl SoapRoles {
    /// Creates a role set.
    #[must_use]
    pub fn new<I, S>(actors_or_roles: I, ultimate_receiver: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            actors_or_roles: actors_or_roles.into_iter().map(Into::into).collect(),
            ultimate_receiver,
        }
    }

    /// Configured actor or role URIs, in declaration order.
    #[must_use]
    pub fn actors_or_roles(&self) -> &[String] {
        &self.actors_or_roles
    }

    /// Whether the endpoint declares itself the ultimate receiver.
    ///
    /// mustUnderstand processing does not read this flag. It checks the
    /// declared roles plus the version's next role, so header elements
    /// targeted at the ultimate receiver are only checked when that role is
    /// declared explicitly. Transports and interceptors may still consult it.
    #[must_use]
    pub const fn is_ultimate_receiver(&self) -> bool {
        self.ultimate_receiver
    }
}

/// A resolved endpoint with the interceptors to run around it.
#[derive(Clone)]
pub struct EndpointInvocationChain {
    endpoint: Endpoint,
    interceptors: Vec<Arc<dyn EndpointInterceptor>>,
    soap_roles: Option<SoapRoles>,
}

impl EndpointInvocationChain {
    /// Creates a chain without interceptors.
    #[must_use]
    pub const fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            interceptors: Vec::new(),
            soap_roles: None,
        }
    }

    /// Sets the interceptors, run in the given order.
    #[must_use]
    pub fn with_interceptors(mut self, interceptors: Vec<Arc<dyn EndpointInterceptor>>) -> Self {
        self.interceptors = interceptors;
        self
    }

    /// Appends a single interceptor.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: Arc<dyn EndpointInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Declares the SOAP actors or roles of the endpoint.
    #[must_use]
    pub fn with_soap_roles(mut self, roles: SoapRoles) -> Self {
        self.soap_roles = Some(roles);
        self
    }

    /// The endpoint to invoke.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Interceptors in request order.
    #[must_use]
    pub fn interceptors(&self) -> &[Arc<dyn EndpointInterceptor>] {
        &self.interceptors
    }

    /// SOAP role configuration, if any.
    #[must_use]
    pub const fn soap_roles(&self) -> Option<&SoapRoles> {
        self.soap_roles.as_ref()
    }
}

impl fmt::Debug for EndpointInvocationChain {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.interceptors.iter().map(|i| i.name()).collect();
        formatter
            .debug_struct("EndpointInvocationChain")
            .field("endpoint", &self.endpoint)
            .field("interceptors", &names)
            .field("soap_roles", &self.soap_roles)
            .finish()
    }
}
