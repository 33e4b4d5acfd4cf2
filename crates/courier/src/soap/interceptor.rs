//! SOAP-aware interceptors.

use tracing::debug;

use crate::context::MessageContext;
use crate::endpoint::Endpoint;
use crate::error::EndpointError;
use crate::interceptor::{EndpointInterceptor, INTERCEPTOR_TARGET};
use crate::soap::header::SoapHeaderElement;
use crate::soap::message::SoapMessage;

/// An interceptor that can process SOAP header blocks.
///
/// Implementors must also override [`EndpointInterceptor::as_soap`] to return
/// `Some(self)`; otherwise the SOAP dispatcher treats them as plain
/// interceptors.
pub trait SoapEndpointInterceptor: EndpointInterceptor {
    /// Returns `true` when this interceptor processes `header_element`, which
    /// satisfies its mustUnderstand flag.
    fn understands(&self, header_element: &SoapHeaderElement) -> bool;
}

/// Logs a summary of SOAP envelopes at debug level.
///
/// The interceptor claims no header blocks but, being SOAP capable, also
/// sees faults when the SOAP dispatcher unwinds a fault response.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoapEnvelopeLoggingInterceptor;

impl SoapEnvelopeLoggingInterceptor {
    fn log(message: Option<&SoapMessage>, endpoint: &Endpoint, direction: &str) {
        let Some(envelope) = message else {
            return;
        };
        let headers: Vec<String> = envelope
            .header()
            .map(|header| {
                header
                    .examine_all_header_elements()
                    .map(|element| element.name().to_string())
                    .collect()
            })
            .unwrap_or_default();
        debug!(
            target: INTERCEPTOR_TARGET,
            endpoint = %endpoint,
            version = %envelope.version(),
            soap_action = envelope.soap_action(),
            headers = ?headers,
            payload = envelope.body().payload().map(|p| p.root().to_string()),
            fault = envelope.body().fault().map(|f| f.code().to_string()),
            "{direction} envelope"
        );
    }
}

impl EndpointInterceptor for SoapEnvelopeLoggingInterceptor {
    fn handle_request(
        &self,
        context: &mut MessageContext,
        endpoint: &Endpoint,
    ) -> Result<bool, EndpointError> {
        Self::log(context.request_as::<SoapMessage>(), endpoint, "request");
        Ok(true)
    }

    fn handle_response(
        &self,
        context: &mut MessageContext,
        endpoint: &Endpoint,
    ) -> Result<bool, EndpointError> {
        Self::log(response_envelope(context), endpoint, "response");
        Ok(true)
    }

    fn handle_fault(
        &self,
        context: &mut MessageContext,
        endpoint: &Endpoint,
    ) -> Result<bool, EndpointError> {
        Self::log(response_envelope(context), endpoint, "fault");
        Ok(true)
    }

    fn as_soap(&self) -> Option<&dyn SoapEndpointInterceptor> {
        Some(self)
    }
}

impl SoapEndpointInterceptor for SoapEnvelopeLoggingInterceptor {
    fn understands(&self, _header_element: &SoapHeaderElement) -> bool {
        false
    }
}

fn response_envelope(context: &MessageContext) -> Option<&SoapMessage> {
    context
        .response()
        .and_then(|response| response.as_any().downcast_ref())
}
