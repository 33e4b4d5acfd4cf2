//! Exception resolvers producing SOAP faults.
//!
//! [`SimpleSoapExceptionResolver`] turns every error into a server (1.1) or
//! receiver (1.2) fault. [`SoapFaultMappingExceptionResolver`] looks up a
//! [`SoapFaultDefinition`] by [`EndpointError::kind`], so applications can
//! map their own error kinds to client faults or custom codes.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use courier_config::{Locale, LocaleParseError};
use thiserror::Error;
use tracing::debug;

use crate::context::MessageContext;
use crate::endpoint::Endpoint;
use crate::error::EndpointError;
use crate::qname::{QName, QNameParseError};
use crate::resolver::EndpointExceptionResolver;
use crate::soap::body::SoapBody;
use crate::soap::dispatcher::SOAP_TARGET;
use crate::soap::fault::SoapFault;
use crate::soap::message::SoapMessage;

/// Resolves every error to a server or receiver fault carrying the error
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleSoapExceptionResolver {
    locale: Locale,
}

impl SimpleSoapExceptionResolver {
    /// Creates a resolver whose fault reasons are tagged with `locale`.
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl Default for SimpleSoapExceptionResolver {
    fn default() -> Self {
        Self::new(Locale::ENGLISH)
    }
}

impl EndpointExceptionResolver for SimpleSoapExceptionResolver {
    fn resolve_exception(
        &self,
        context: &mut MessageContext,
        endpoint: Option<&Endpoint>,
        error: &EndpointError,
    ) -> bool {
        let Some(response) = context.response_as_mut::<SoapMessage>() else {
            return false;
        };
        response
            .body_mut()
            .add_server_or_receiver_fault(error.to_string(), Some(self.locale.clone()));
        debug!(
            target: SOAP_TARGET,
            endpoint = endpoint.map(Endpoint::name),
            kind = error.kind(),
            "resolved error to server fault"
        );
        true
    }
}

/// Fault code of a [`SoapFaultDefinition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaultCode {
    /// `Client` in SOAP 1.1, `Sender` in SOAP 1.2.
    ClientOrSender,
    /// `Server` in SOAP 1.1, `Receiver` in SOAP 1.2.
    ServerOrReceiver,
    /// Any other qualified code.
    Custom(QName),
}

impl FromStr for FaultCode {
    type Err = FaultDefinitionParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let code = input.trim();
        if code.eq_ignore_ascii_case("CLIENT") || code.eq_ignore_ascii_case("SENDER") {
            return Ok(Self::ClientOrSender);
        }
        if code.eq_ignore_ascii_case("SERVER") || code.eq_ignore_ascii_case("RECEIVER") {
            return Ok(Self::ServerOrReceiver);
        }
        if code.starts_with('{') {
            return Ok(Self::Custom(code.parse()?));
        }
        Err(FaultDefinitionParseError::UnknownCode(code.to_owned()))
    }
}

impl fmt::Display for FaultCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientOrSender => formatter.write_str("CLIENT"),
            Self::ServerOrReceiver => formatter.write_str("SERVER"),
            Self::Custom(name) => write!(formatter, "{name}"),
        }
    }
}

/// Errors produced while parsing a [`SoapFaultDefinition`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FaultDefinitionParseError {
    /// The text has no reason after the code.
    #[error("fault definition '{0}' needs a code and a reason")]
    MissingReason(String),
    /// The text has more than three comma-separated parts.
    #[error("fault definition '{0}' has too many parts; expected 'CODE, reason[, locale]'")]
    TooManyParts(String),
    /// The code is neither a known keyword nor a qualified name.
    #[error("unknown fault code '{0}'; expected CLIENT, SENDER, SERVER, RECEIVER or {{ns}}local")]
    UnknownCode(String),
    /// A custom code is not valid Clark notation.
    #[error(transparent)]
    InvalidCode(#[from] QNameParseError),
    /// The locale is not a valid language tag.
    #[error(transparent)]
    InvalidLocale(#[from] LocaleParseError),
}

/// A fault to produce for a class of errors: code, reason and reason locale.
///
/// The textual form is `CODE, reason[, locale]`, for example
/// `SENDER, Order rejected, en`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFaultDefinition {
    code: FaultCode,
    reason: String,
    locale: Locale,
}

impl SoapFaultDefinition {
    /// Creates a definition.
    #[must_use]
    pub fn new(code: FaultCode, reason: impl Into<String>, locale: Locale) -> Self {
        Self {
            code,
            reason: reason.into(),
            locale,
        }
    }

    /// Fault code.
    #[must_use]
    pub const fn code(&self) -> &FaultCode {
        &self.code
    }

    /// Fault reason. Empty means "use the error message".
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Locale of the reason.
    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    fn apply<'a>(&self, body: &'a mut SoapBody, error: &EndpointError) -> &'a mut SoapFault {
        let reason = if self.reason.is_empty() {
            error.to_string()
        } else {
            self.reason.clone()
        };
        let locale = Some(self.locale.clone());
        match &self.code {
            FaultCode::ClientOrSender => body.add_client_or_sender_fault(reason, locale),
            FaultCode::ServerOrReceiver => body.add_server_or_receiver_fault(reason, locale),
            FaultCode::Custom(code) => body.add_fault(code.clone(), reason, locale),
        }
    }
}

impl FromStr for SoapFaultDefinition {
    type Err = FaultDefinitionParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = input.split(',').map(str::trim).collect();
        let (code, reason, locale) = match parts.as_slice() {
            [code, reason] => (*code, *reason, None),
            [code, reason, locale] => (*code, *reason, Some(*locale)),
            [_] => return Err(FaultDefinitionParseError::MissingReason(input.to_owned())),
            _ => return Err(FaultDefinitionParseError::TooManyParts(input.to_owned())),
        };
        let parsed_locale = match locale {
            Some(tag) => tag.parse()?,
            None => Locale::ENGLISH,
        };
        Ok(Self::new(code.parse()?, reason, parsed_locale))
    }
}

impl fmt::Display for SoapFaultDefinition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}, {}, {}", self.code, self.reason, self.locale)
    }
}

/// Maps error kinds to SOAP faults.
#[derive(Debug, Clone, Default)]
pub struct SoapFaultMappingExceptionResolver {
    mappings: HashMap<String, SoapFaultDefinition>,
    default_fault: Option<SoapFaultDefinition>,
    mapped_endpoints: Option<BTreeSet<String>>,
}

impl SoapFaultMappingExceptionResolver {
    /// Creates a resolver without mappings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps errors whose [`EndpointError::kind`] is `kind` to `fault`.
    #[must_use]
    pub fn with_mapping(mut self, kind: impl Into<String>, fault: SoapFaultDefinition) -> Self {
        self.mappings.insert(kind.into(), fault);
        self
    }

    /// Fault used for errors without a specific mapping.
    #[must_use]
    pub fn with_default_fault(mut self, fault: SoapFaultDefinition) -> Self {
        self.default_fault = Some(fault);
        self
    }

    /// Restricts the resolver to errors raised by the named endpoints.
    /// Errors raised before an endpoint was resolved are then declined.
    #[must_use]
    pub fn with_mapped_endpoints<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mapped_endpoints = Some(names.into_iter().map(Into::into).collect());
        self
    }

    fn applies_to(&self, endpoint: Option<&Endpoint>) -> bool {
        self.mapped_endpoints.as_ref().is_none_or(|names| {
            endpoint.is_some_and(|candidate| names.contains(candidate.name()))
        })
    }
}

impl EndpointExceptionResolver for SoapFaultMappingExceptionResolver {
    fn resolve_exception(
        &self,
        context: &mut MessageContext,
        endpoint: Option<&Endpoint>,
        error: &EndpointError,
    ) -> bool {
        if !self.applies_to(endpoint) {
            return false;
        }
        let Some(definition) = self
            .mappings
            .get(error.kind())
            .or(self.default_fault.as_ref())
        else {
            return false;
        };
        let Some(response) = context.response_as_mut::<SoapMessage>() else {
            return false;
        };
        let fault = definition.apply(response.body_mut(), error);
        debug!(
            target: SOAP_TARGET,
            kind = error.kind(),
            code = %fault.code(),
            "mapped error to SOAP fault"
        );
        true
    }
}
