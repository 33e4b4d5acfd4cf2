//! SOAP envelopes as dispatcher messages.

use std::any::Any;

use crate::message::{FaultAwareMessage, MessageFactory, Payload, WebServiceMessage};
use crate::soap::body::SoapBody;
use crate::soap::header::SoapHeader;
use crate::soap::version::SoapVersion;

/// A SOAP envelope: optional header, body, and the `SOAPAction` it arrived
/// with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapMessage {
    version: SoapVersion,
    soap_action: Option<String>,
    header: Option<SoapHeader>,
    body: SoapBody,
}

impl SoapMessage {
    /// Creates an envelope with an empty body and no header.
    #[must_use]
    pub const fn new(version: SoapVersion) -> Self {
        Self {
            version,
            soap_action: None,
            header: None,
            body: SoapBody::new(version),
        }
    }

    /// Adds an empty header section.
    #[must_use]
    pub fn with_header(mut self) -> Self {
        self.header = Some(SoapHeader::new(self.version));
        self
    }

    /// Sets the body payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.body.set_payload(payload);
        self
    }

    /// Records the `SOAPAction` the envelope was received with.
    #[must_use]
    pub fn with_soap_action(mut self, soap_action: impl Into<String>) -> Self {
        self.soap_action = Some(soap_action.into());
        self
    }

    /// SOAP version of the envelope.
    #[must_use]
    pub const fn version(&self) -> SoapVersion {
        self.version
    }

    /// `SOAPAction` value without surrounding quotes; `None` when absent or
    /// empty.
    #[must_use]
    pub fn soap_action(&self) -> Option<&str> {
        self.soap_action
            .as_deref()
            .map(|action| action.trim_matches('"'))
            .filter(|action| !action.is_empty())
    }

    /// Header section, if present.
    #[must_use]
    pub const fn header(&self) -> Option<&SoapHeader> {
        self.header.as_ref()
    }

    /// Header section, created on demand.
    pub fn header_mut(&mut self) -> &mut SoapHeader {
        let version = self.version;
        self.header.get_or_insert_with(|| SoapHeader::new(version))
    }

    /// Body section.
    #[must_use]
    pub const fn body(&self) -> &SoapBody {
        &self.body
    }

    /// Mutable body section.
    pub const fn body_mut(&mut self) -> &mut SoapBody {
        &mut self.body
    }
}

impl WebServiceMessage for SoapMessage {
    fn payload(&self) -> Option<&Payload> {
        self.body.payload()
    }

    fn set_payload(&mut self, payload: Payload) {
        self.body.set_payload(payload);
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

impl FaultAwareMessage for SoapMessage {
    fn has_fault(&self) -> bool {
        self.body.has_fault()
    }

    fn fault_reason(&self) -> Option<&str> {
        self.body.fault().map(|fault| fault.reason())
    }
}

/// Creates SOAP responses matching the request's version.
///
/// Responses always carry an empty header so `NotUnderstood` blocks can be
/// appended. Non-SOAP requests get a response in the factory's default
/// version.
#[derive(Debug, Clone, Copy)]
pub struct SoapMessageFactory {
    default_version: SoapVersion,
}

impl SoapMessageFactory {
    /// Creates a factory falling back to `default_version`.
    #[must_use]
    pub const fn new(default_version: SoapVersion) -> Self {
        Self { default_version }
    }
}

impl Default for SoapMessageFactory {
    fn default() -> Self {
        Self::new(SoapVersion::V11)
    }
}

impl MessageFactory for SoapMessageFactory {
    fn create_response(&self, request: &dyn WebServiceMessage) -> Box<dyn WebServiceMessage> {
        let version = request
            .as_any()
            .downcast_ref::<SoapMessage>()
            .map_or(self.default_version, SoapMessage::version);
        Box::new(SoapMessage::new(version).with_header())
    }
}
