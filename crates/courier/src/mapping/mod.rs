//! Endpoint mappings.
//!
//! A mapping inspects the request and yields an [`EndpointInvocationChain`]
//! when it knows which endpoint should handle it. The dispatcher consults its
//! mappings in registration order and takes the first chain produced.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::chain::{EndpointInvocationChain, SoapRoles};
use crate::context::MessageContext;
use crate::endpoint::Endpoint;
use crate::error::EndpointError;
use crate::interceptor::EndpointInterceptor;
use crate::qname::QName;

/// Tracing target for endpoint lookups.
pub(crate) const MAPPING_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::mapping");

/// Resolves the endpoint chain for a request.
pub trait EndpointMapping: Send + Sync {
    /// Returns the chain for the request, or `None` when this mapping has no
    /// endpoint for it.
    ///
    /// # Errors
    ///
    /// Returns an [`EndpointError`] when the lookup itself fails; the
    /// dispatcher hands it to the exception resolvers.
    fn get_endpoint(
        &self,
        context: &MessageContext,
    ) -> Result<Option<EndpointInvocationChain>, EndpointError>;
}

/// Chain-building state shared by the concrete mappings: interceptors to
/// attach, an optional default endpoint, and optional SOAP roles.
#[derive(Clone, Default)]
pub struct MappingSupport {
    interceptors: Vec<Arc<dyn EndpointInterceptor>>,
    default_endpoint: Option<Endpoint>,
    soap_roles: Option<SoapRoles>,
}

impl MappingSupport {
    /// Appends an interceptor attached to every chain.
    pub fn add_interceptor(&mut self, interceptor: Arc<dyn EndpointInterceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Sets the endpoint used when a lookup finds nothing.
    pub fn set_default_endpoint(&mut self, endpoint: Endpoint) {
        self.default_endpoint = Some(endpoint);
    }

    /// Sets the SOAP roles attached to every chain.
    pub fn set_soap_roles(&mut self, roles: SoapRoles) {
        self.soap_roles = Some(roles);
    }

    /// Wraps `endpoint`, or the default endpoint when `endpoint` is `None`,
    /// in a chain. Returns `None` when neither is available.
    #[must_use]
    pub fn build_chain(&self, endpoint: Option<Endpoint>) -> Option<EndpointInvocationChain> {
        let target = endpoint.or_else(|| self.default_endpoint.clone())?;
        let mut chain =
            EndpointInvocationChain::new(target).with_interceptors(self.interceptors.clone());
        if let Some(roles) = &self.soap_roles {
            chain = chain.with_soap_roles(roles.clone());
        }
        Some(chain)
    }
}

/// Maps requests to endpoints by the qualified name of the payload root.
#[derive(Clone, Default)]
pub struct PayloadRootQNameEndpointMapping {
    endpoints: HashMap<QName, Endpoint>,
    support: MappingSupport,
}

impl PayloadRootQNameEndpointMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `endpoint` for payloads rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::MappingFailed`] when `root` already has an
    /// endpoint.
    pub fn register(&mut self, root: QName, endpoint: Endpoint) -> Result<(), EndpointError> {
        if let Some(existing) = self.endpoints.get(&root) {
            return Err(EndpointError::mapping_failed(format!(
                "payload root {root} is already mapped to endpoint '{existing}'"
            )));
        }
        self.endpoints.insert(root, endpoint);
        Ok(())
    }

    /// Registers `endpoint`, consuming and returning the mapping.
    ///
    /// # Errors
    ///
    /// See [`Self::register`].
    pub fn with_endpoint(mut self, root: QName, endpoint: Endpoint) -> Result<Self, EndpointError> {
        self.register(root, endpoint)?;
        Ok(self)
    }

    /// Attaches an interceptor to every chain this mapping produces.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: Arc<dyn EndpointInterceptor>) -> Self {
        self.support.add_interceptor(interceptor);
        self
    }

    /// Sets the endpoint used for unmatched payloads.
    #[must_use]
    pub fn with_default_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.support.set_default_endpoint(endpoint);
        self
    }

    /// Attaches SOAP roles to every chain this mapping produces.
    #[must_use]
    pub fn with_soap_roles(mut self, roles: SoapRoles) -> Self {
        self.support.set_soap_roles(roles);
        self
    }
}

impl EndpointMapping for PayloadRootQNameEndpointMapping {
    fn get_endpoint(
        &self,
        context: &MessageContext,
    ) -> Result<Option<EndpointInvocationChain>, EndpointError> {
        let root = context.request().payload().map(|payload| payload.root());
        let endpoint = root.and_then(|name| self.endpoints.get(name)).cloned();
        debug!(
            target: MAPPING_TARGET,
            root = root.map(ToString::to_string),
            endpoint = endpoint.as_ref().map(Endpoint::name),
            "looked up endpoint by payload root"
        );
        Ok(self.support.build_chain(endpoint))
    }
}
