//! SOAP 1.1 and 1.2 protocol constants.

use std::fmt;

use crate::qname::QName;

const SOAP_11_ENVELOPE_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const SOAP_11_NEXT_ACTOR: &str = "http://schemas.xmlsoap.org/soap/actor/next";
const SOAP_12_ENVELOPE_NAMESPACE: &str = "http://www.w3.org/2003/05/soap-envelope";
const SOAP_12_NEXT_ROLE: &str = "http://www.w3.org/2003/05/soap-envelope/role/next";
const SOAP_12_NONE_ROLE: &str = "http://www.w3.org/2003/05/soap-envelope/role/none";
const SOAP_12_ULTIMATE_RECEIVER_ROLE: &str =
    "http://www.w3.org/2003/05/soap-envelope/role/ultimateReceiver";

/// The SOAP protocol version of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoapVersion {
    /// SOAP 1.1, where header targets are called actors.
    V11,
    /// SOAP 1.2, where header targets are called roles.
    V12,
}

impl SoapVersion {
    /// Envelope namespace URI.
    #[must_use]
    pub const fn envelope_namespace_uri(self) -> &'static str {
        match self {
            Self::V11 => SOAP_11_ENVELOPE_NAMESPACE,
            Self::V12 => SOAP_12_ENVELOPE_NAMESPACE,
        }
    }

    /// Actor or role URI naming the next SOAP node.
    #[must_use]
    pub const fn next_actor_or_role_uri(self) -> &'static str {
        match self {
            Self::V11 => SOAP_11_NEXT_ACTOR,
            Self::V12 => SOAP_12_NEXT_ROLE,
        }
    }

    /// Role URI that no node assumes. SOAP 1.1 has no such actor, so the
    /// value is empty there.
    #[must_use]
    pub const fn none_actor_or_role_uri(self) -> &'static str {
        match self {
            Self::V11 => "",
            Self::V12 => SOAP_12_NONE_ROLE,
        }
    }

    /// Actor or role of header elements that name no target. SOAP 1.1 uses
    /// the empty string.
    #[must_use]
    pub const fn ultimate_receiver_role_uri(self) -> &'static str {
        match self {
            Self::V11 => "",
            Self::V12 => SOAP_12_ULTIMATE_RECEIVER_ROLE,
        }
    }

    /// MIME content type of the envelope.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::V11 => "text/xml",
            Self::V12 => "application/soap+xml",
        }
    }

    /// Fault code blaming the requester: `Client` or `Sender`.
    #[must_use]
    pub fn client_or_sender_fault_name(self) -> QName {
        self.envelope_name(match self {
            Self::V11 => "Client",
            Self::V12 => "Sender",
        })
    }

    /// Fault code blaming the service: `Server` or `Receiver`.
    #[must_use]
    pub fn server_or_receiver_fault_name(self) -> QName {
        self.envelope_name(match self {
            Self::V11 => "Server",
            Self::V12 => "Receiver",
        })
    }

    /// Fault code for unprocessed mandatory headers.
    #[must_use]
    pub fn must_understand_fault_name(self) -> QName {
        self.envelope_name("MustUnderstand")
    }

    /// Fault code for an unexpected envelope namespace.
    #[must_use]
    pub fn version_mismatch_fault_name(self) -> QName {
        self.envelope_name("VersionMismatch")
    }

    /// Name of the `NotUnderstood` header block. Only meaningful for 1.2.
    #[must_use]
    pub fn not_understood_name(self) -> QName {
        self.envelope_name("NotUnderstood")
    }

    fn envelope_name(self, local_part: &str) -> QName {
        QName::with_prefix(self.envelope_namespace_uri(), local_part, "soapenv")
    }
}

impl fmt::Display for SoapVersion {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::V11 => "SOAP 1.1",
            Self::V12 => "SOAP 1.2",
        })
    }
}
