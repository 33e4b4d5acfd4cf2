//! Crate-level test doubles and behaviour tests.

use std::any::Any;
use std::sync::{Arc, Mutex};

use crate::chain::EndpointInvocationChain;
use crate::context::MessageContext;
use crate::endpoint::{Endpoint, PayloadEndpoint};
use crate::error::EndpointError;
use crate::interceptor::EndpointInterceptor;
use crate::mapping::EndpointMapping;
use crate::message::{FaultAwareMessage, MessageFactory, Payload, WebServiceMessage};
use crate::qname::QName;
use crate::resolver::EndpointExceptionResolver;
use crate::soap::{SoapEndpointInterceptor, SoapHeaderElement};


/// Minimal non-SOAP message; fault aware so the generic fault path can be
/// exercised.
#[derive(Debug, Clone, Default)]
pub(crate) struct PlainMessage {
    payload: Option<Payload>,
    fault: Option<String>,
}

impl PlainMessage {
    pub(crate) fn with_payload(payload: Payload) -> Self {
        Self {
            payload: Some(payload),
            fault: None,
        }
    }

    pub(crate) fn set_fault(&mut self, reason: impl Into<String>) {
        self.fault = Some(reason.into());
    }
}

impl WebServiceMessage for PlainMessage {
    fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    fn set_payload(&mut self, payload: Payload) {
        self.payload = Some(payload);
    }

    fn as_fault_aware(&self) -> Option<&dyn FaultAwareMessage> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl FaultAwareMessage for PlainMessage {
    fn has_fault(&self) -> bool {
        self.fault.is_some()
    }

    fn fault_reason(&self) -> Option<&str> {
        self.fault.as_deref()
    }
}

pub(crate) struct PlainMessageFactory;

impl MessageFactory for PlainMessageFactory {
    fn create_response(&self, _request: &dyn WebServiceMessage) -> Box<dyn WebServiceMessage> {
        Box::new(PlainMessage::default())
    }
}

pub(crate) fn ping() -> Payload {
    Payload::new(QName::new("urn:test", "Ping"), "<Ping/>")
}

pub(crate) fn plain_context() -> MessageContext {
    MessageContext::new(
        PlainMessage::with_payload(ping()),
        Arc::new(PlainMessageFactory),
    )
}

/// Shared, ordered record of hook invocations.
#[derive(Debug, Clone, Default)]
pub(crate) struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub(crate) fn record(&self, entry: impl Into<String>) {
        self.0.lock().expect("journal lock").push(entry.into());
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.lock().expect("journal lock").clone()
    }
}

/// What a recording hook answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reply {
    Resume,
    Stop,
    Fail,
}

impl Reply {
    fn answer(self, label: &str, phase: &str) -> Result<bool, EndpointError> {
        match self {
            Self::Resume => Ok(true),
            Self::Stop => Ok(false),
            Self::Fail => Err(EndpointError::interceptor_failed(
                label,
                format!("{phase} refused"),
            )),
        }
    }
}

/// Interceptor that journals `"<label>.<phase>"` for every hook call.
pub(crate) struct RecordingInterceptor {
    label: String,
    journal: Journal,
    request: Reply,
    response: Reply,
    fault: Reply,
    understood: Option<Vec<QName>>,
}

impl RecordingInterceptor {
    pub(crate) fn new(label: &str, journal: &Journal) -> Self {
        Self {
            label: label.to_owned(),
            journal: journal.clone(),
            request: Reply::Resume,
            response: Reply::Resume,
            fault: Reply::Resume,
            understood: None,
        }
    }

    pub(crate) fn on_request(mut self, reply: Reply) -> Self {
        self.request = reply;
        self
    }

    pub(crate) fn on_response(mut self, reply: Reply) -> Self {
        self.response = reply;
        self
    }

    pub(crate) fn on_fault(mut self, reply: Reply) -> Self {
        self.fault = reply;
        self
    }

    /// Makes the interceptor SOAP capable, understanding `names`.
    pub(crate) fn understanding(mut self, names: &[QName]) -> Self {
        self.understood = Some(names.to_vec());
        self
    }

    pub(crate) fn shared(self) -> Arc<dyn EndpointInterceptor> {
        Arc::new(self)
    }

    fn hook(&self, phase: &str, reply: Reply) -> Result<bool, EndpointError> {
        self.journal.record(format!("{}.{phase}", self.label));
        reply.answer(&self.label, phase)
    }
}

impl EndpointInterceptor for RecordingInterceptor {
    fn handle_request(
        &self,
        _context: &mut MessageContext,
        _endpoint: &Endpoint,
    ) -> Result<bool, EndpointError> {
        self.hook("request", self.request)
    }

    fn handle_response(
        &self,
        _context: &mut MessageContext,
        _endpoint: &Endpoint,
    ) -> Result<bool, EndpointError> {
        self.hook("response", self.response)
    }

    fn handle_fault(
        &self,
        _context: &mut MessageContext,
        _endpoint: &Endpoint,
    ) -> Result<bool, EndpointError> {
        self.hook("fault", self.fault)
    }

    fn name(&self) -> &str {
        &self.label
    }

    fn as_soap(&self) -> Option<&dyn SoapEndpointInterceptor> {
        self.understood.as_ref().map(|_| self as &dyn SoapEndpointInterceptor)
    }
}

impl SoapEndpointInterceptor for RecordingInterceptor {
    fn understands(&self, header_element: &SoapHeaderElement) -> bool {
        self.understood
            .as_ref()
            .is_some_and(|names| names.contains(header_element.name()))
    }
}

/// Payload endpoint that journals its invocation.
pub(crate) struct RecordingEndpoint {
    journal: Journal,
    failure: Option<EndpointError>,
}

impl RecordingEndpoint {
    pub(crate) fn echo(journal: &Journal) -> Endpoint {
        Endpoint::payload(
            "echo",
            Self {
                journal: journal.clone(),
                failure: None,
            },
        )
    }

    pub(crate) fn failing(journal: &Journal, failure: EndpointError) -> Endpoint {
        Endpoint::payload(
            "failing",
            Self {
                journal: journal.clone(),
                failure: Some(failure),
            },
        )
    }
}

impl PayloadEndpoint for RecordingEndpoint {
    fn invoke(&self, request: Option<&Payload>) -> Result<Option<Payload>, EndpointError> {
        self.journal.record("endpoint");
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(request.cloned()),
        }
    }
}

/// Mapping that returns a clone of a fixed chain.
pub(crate) struct FixedMapping(pub(crate) Option<EndpointInvocationChain>);

impl EndpointMapping for FixedMapping {
    fn get_endpoint(
        &self,
        _context: &MessageContext,
    ) -> Result<Option<EndpointInvocationChain>, EndpointError> {
        Ok(self.0.clone())
    }
}

/// Resolver that journals every offer and optionally resolves it by writing
/// a fault into a [`PlainMessage`] response.
pub(crate) struct RecordingResolver {
    label: String,
    journal: Journal,
    resolves: bool,
}

impl RecordingResolver {
    pub(crate) fn new(label: &str, journal: &Journal, resolves: bool) -> Self {
        Self {
            label: label.to_owned(),
            journal: journal.clone(),
            resolves,
        }
    }
}

impl EndpointExceptionResolver for RecordingResolver {
    fn resolve_exception(
        &self,
        context: &mut MessageContext,
        endpoint: Option<&Endpoint>,
        error: &EndpointError,
    ) -> bool {
        self.journal.record(format!(
            "{}.resolve({})",
            self.label,
            endpoint.map_or("-", Endpoint::name)
        ));
        if !self.resolves {
            return false;
        }
        if let Some(response) = context.response_as_mut::<PlainMessage>() {
            response.set_fault(error.to_string());
        }
        true
    }
}
