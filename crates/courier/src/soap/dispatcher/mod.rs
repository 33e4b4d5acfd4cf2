//! SOAP protocol hooks: mustUnderstand processing and fault-aware unwinding.
//!
//! Before any interceptor runs, every mandatory header block aimed at a role
//! this node plays must be understood by at least one SOAP interceptor in the
//! chain. Roles are the chain's declared actors or roles followed by the
//! version's "next" role. Checking stops at the first role with unprocessed
//! blocks; that role's fault lists every block it failed to understand.

use std::sync::Arc;

use courier_config::{Config, Locale};
use tracing::{debug, warn};

use crate::chain::EndpointInvocationChain;
use crate::context::MessageContext;
use crate::dispatcher::{DispatchHooks, MessageDispatcher, MessageDispatcherBuilder};
use crate::error::EndpointError;
use crate::interceptor::EndpointInterceptor;
use crate::qname::QName;
use crate::resolver::EndpointExceptionResolver;
use crate::soap::header::SoapHeaderElement;
use crate::soap::message::SoapMessage;
use crate::soap::resolver::SimpleSoapExceptionResolver;
use crate::soap::version::SoapVersion;

/// Tracing target for SOAP header processing.
pub(crate) const SOAP_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::soap");

/// Dispatcher with SOAP protocol hooks.
pub type SoapMessageDispatcher = MessageDispatcher<SoapProtocolHooks>;

/// [`DispatchHooks`] implementing SOAP mustUnderstand processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapProtocolHooks {
    fault_string: String,
    fault_string_locale: Locale,
}

impl SoapProtocolHooks {
    /// Creates hooks producing `MustUnderstand` faults with the given reason.
    #[must_use]
    pub fn new(fault_string: impl Into<String>, fault_string_locale: Locale) -> Self {
        Self {
            fault_string: fault_string.into(),
            fault_string_locale,
        }
    }

    /// Creates hooks from the `must_understand_*` settings of `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.must_understand_fault_string(),
            config.must_understand_fault_locale().clone(),
        )
    }

    /// Reason used for `MustUnderstand` faults.
    #[must_use]
    pub fn fault_string(&self) -> &str {
        &self.fault_string
    }

    /// Locale of the `MustUnderstand` fault reason.
    #[must_use]
    pub const fn fault_string_locale(&self) -> &Locale {
        &self.fault_string_locale
    }

    /// Checks the mandatory header blocks targeted at `actor_or_role`.
    ///
    /// Returns `Ok(true)` when every such block is understood. Otherwise a
    /// `MustUnderstand` fault naming `actor_or_role` is written to the
    /// response, SOAP 1.2 responses also receive one `NotUnderstood` block
    /// per offending header, and `Ok(false)` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::UnsupportedMessage`] when the response is not
    /// a SOAP message.
    pub fn handle_request_for_role(
        &self,
        chain: &EndpointInvocationChain,
        context: &mut MessageContext,
        actor_or_role: &str,
    ) -> Result<bool, EndpointError> {
        let not_understood: Vec<QName> = {
            let Some(header) = context
                .request_as::<SoapMessage>()
                .and_then(SoapMessage::header)
            else {
                return Ok(true);
            };
            header
                .examine_must_understand_header_elements(actor_or_role)
                .filter(|element| !is_understood(chain, element))
                .map(|element| element.name().clone())
                .collect()
        };
        if not_understood.is_empty() {
            return Ok(true);
        }

        warn!(
            target: SOAP_TARGET,
            actor_or_role,
            headers = ?not_understood.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "mandatory SOAP headers not understood"
        );
        let response = context.response_as_mut::<SoapMessage>().ok_or_else(|| {
            EndpointError::unsupported_message("MustUnderstand faults need a SOAP response")
        })?;
        response
            .body_mut()
            .add_must_understand_fault(
                self.fault_string.as_str(),
                Some(self.fault_string_locale.clone()),
            )
            .set_actor_or_role(actor_or_role);

        if response.version() == SoapVersion::V12 {
            let header = response.header_mut();
            for name in &not_understood {
                header
                    .add_not_understood_header_element(name)
                    .map_err(|error| EndpointError::unsupported_message(error.to_string()))?;
            }
        }
        Ok(false)
    }

    fn roles(chain: &EndpointInvocationChain, next: &str) -> Vec<String> {
        let mut roles: Vec<String> = chain
            .soap_roles()
            .map(|declared| declared.actors_or_roles().to_vec())
            .unwrap_or_default();
        if !roles.iter().any(|role| role == next) {
            roles.push(next.to_owned());
        }
        roles
    }
}

impl Default for SoapProtocolHooks {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl DispatchHooks for SoapProtocolHooks {
    fn handle_request(
        &self,
        chain: &EndpointInvocationChain,
        context: &mut MessageContext,
    ) -> Result<bool, EndpointError> {
        let Some(request) = context.request_as::<SoapMessage>() else {
            return Ok(true);
        };
        if request.header().is_none() {
            return Ok(true);
        }
        let roles = Self::roles(chain, request.version().next_actor_or_role_uri());
        debug!(target: SOAP_TARGET, roles = ?roles, "checking mandatory SOAP headers");

        for role in &roles {
            if !self.handle_request_for_role(chain, context, role)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn response_has_fault(&self, context: &MessageContext) -> bool {
        context
            .response()
            .and_then(|response| response.as_any().downcast_ref::<SoapMessage>())
            .is_some_and(|message| message.body().has_fault())
    }

    fn handles_faults(&self, interceptor: &dyn EndpointInterceptor) -> bool {
        interceptor.as_soap().is_some()
    }

    fn default_resolvers(&self) -> Vec<Arc<dyn EndpointExceptionResolver>> {
        vec![Arc::new(SimpleSoapExceptionResolver::default())]
    }
}

impl MessageDispatcher<SoapProtocolHooks> {
    /// Starts building a SOAP dispatcher configured from `config`.
    #[must_use]
    pub fn soap_builder(config: &Config) -> MessageDispatcherBuilder<SoapProtocolHooks> {
        MessageDispatcherBuilder::new(SoapProtocolHooks::from_config(config))
    }
}

fn is_understood(chain: &EndpointInvocationChain, element: &SoapHeaderElement) -> bool {
    let understood = chain
        .interceptors()
        .iter()
        .filter_map(|interceptor| interceptor.as_soap())
        .any(|interceptor| interceptor.understands(element));
    debug!(
        target: SOAP_TARGET,
        header = %element.name(),
        understood,
        "examined mandatory header"
    );
    understood
}
