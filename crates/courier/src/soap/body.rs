//! SOAP bodies.

use courier_config::Locale;

use crate::message::Payload;
use crate::qname::QName;
use crate::soap::fault::SoapFault;
use crate::soap::version::SoapVersion;

/// The body of a SOAP envelope: either a payload or a fault, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapBody {
    version: SoapVersion,
    payload: Option<Payload>,
    fault: Option<SoapFault>,
}

impl SoapBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn new(version: SoapVersion) -> Self {
        Self {
            version,
            payload: None,
            fault: None,
        }
    }

    /// SOAP version of the enclosing envelope.
    #[must_use]
    pub const fn version(&self) -> SoapVersion {
        self.version
    }

    /// Payload, unless the body is empty or holds a fault.
    #[must_use]
    pub const fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Replaces the body content with `payload`.
    pub fn set_payload(&mut self, payload: Payload) {
        self.fault = None;
        self.payload = Some(payload);
    }

    /// Returns `true` when the body holds a fault.
    #[must_use]
    pub const fn has_fault(&self) -> bool {
        self.fault.is_some()
    }

    /// The fault, if any.
    #[must_use]
    pub const fn fault(&self) -> Option<&SoapFault> {
        self.fault.as_ref()
    }

    /// Adds a `MustUnderstand` fault, replacing any content.
    pub fn add_must_understand_fault(
        &mut self,
        reason: impl Into<String>,
        locale: Option<Locale>,
    ) -> &mut SoapFault {
        let code = self.version.must_understand_fault_name();
        self.add_fault(code, reason, locale)
    }

    /// Adds a `Client` (1.1) or `Sender` (1.2) fault, replacing any content.
    pub fn add_client_or_sender_fault(
        &mut self,
        reason: impl Into<String>,
        locale: Option<Locale>,
    ) -> &mut SoapFault {
        let code = self.version.client_or_sender_fault_name();
        self.add_fault(code, reason, locale)
    }

    /// Adds a `Server` (1.1) or `Receiver` (1.2) fault, replacing any content.
    pub fn add_server_or_receiver_fault(
        &mut self,
        reason: impl Into<String>,
        locale: Option<Locale>,
    ) -> &mut SoapFault {
        let code = self.version.server_or_receiver_fault_name();
        self.add_fault(code, reason, locale)
    }

    /// Adds a fault with an arbitrary code, replacing any content.
    pub fn add_fault(
        &mut self,
        code: QName,
        reason: impl Into<String>,
        locale: Option<Locale>,
    ) -> &mut SoapFault {
        self.payload = None;
        self.fault.insert(SoapFault::new(code, reason, locale))
    }
}
