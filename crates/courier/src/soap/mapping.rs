//! Endpoint mapping by `SOAPAction`.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::chain::{EndpointInvocationChain, SoapRoles};
use crate::context::MessageContext;
use crate::endpoint::Endpoint;
use crate::error::EndpointError;
use crate::interceptor::EndpointInterceptor;
use crate::mapping::{EndpointMapping, MAPPING_TARGET, MappingSupport};
use crate::soap::message::SoapMessage;

/// Maps SOAP requests to endpoints by their `SOAPAction` value.
///
/// Non-SOAP requests and requests without an action fall through to the
/// default endpoint, if one is set.
#[derive(Clone, Default)]
pub struct SoapActionEndpointMapping {
    endpoints: HashMap<String, Endpoint>,
    support: MappingSupport,
}

impl SoapActionEndpointMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `endpoint` for `soap_action`. Surrounding quotes are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::MappingFailed`] when the action is empty or
    /// already mapped.
    pub fn register(
        &mut self,
        soap_action: &str,
        endpoint: Endpoint,
    ) -> Result<(), EndpointError> {
        let action = soap_action.trim_matches('"');
        if action.is_empty() {
            return Err(EndpointError::mapping_failed(
                "cannot map an empty SOAPAction",
            ));
        }
        if let Some(existing) = self.endpoints.get(action) {
            return Err(EndpointError::mapping_failed(format!(
                "SOAPAction '{action}' is already mapped to endpoint '{existing}'"
            )));
        }
        self.endpoints.insert(action.to_owned(), endpoint);
        Ok(())
    }

    /// Registers `endpoint`, consuming and returning the mapping.
    ///
    /// # Errors
    ///
    /// See [`Self::register`].
    pub fn with_endpoint(mut self, soap_action: &str, endpoint: Endpoint) -> Result<Self, EndpointError> {
        self.register(soap_action, endpoint)?;
        Ok(self)
    }

    /// Attaches an interceptor to every chain this mapping produces.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: Arc<dyn EndpointInterceptor>) -> Self {
        self.support.add_interceptor(interceptor);
        self
    }

    /// Sets the endpoint used for unmatched requests.
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

impl EndpointMapping for SoapActionEndpointMapping {
    fn get_endpoint(
        &self,
        context: &MessageContext,
    ) -> Result<Option<EndpointInvocationChain>, EndpointError> {
        let action = context
            .request_as::<SoapMessage>()
            .and_then(SoapMessage::soap_action);
        let endpoint = action.and_then(|key| self.endpoints.get(key)).cloned();
        debug!(
            target: MAPPING_TARGET,
            soap_action = action,
            endpoint = endpoint.as_ref().map(Endpoint::name),
            "looked up endpoint by SOAPAction"
        );
        Ok(self.support.build_chain(endpoint))
    }
}
