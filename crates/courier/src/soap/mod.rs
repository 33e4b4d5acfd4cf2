//! SOAP 1.1 and 1.2 support.
//!
//! [`SoapMessage`] plugs SOAP envelopes into the generic dispatcher, and
//! [`SoapProtocolHooks`] adds mustUnderstand processing and fault-aware
//! unwinding on top of it. Faults are modelled per body, so adding one
//! replaces any payload.

mod body;
mod dispatcher;
mod fault;
mod header;
mod interceptor;
mod mapping;
mod message;
mod resolver;
mod version;

pub use self::body::SoapBody;
pub use self::dispatcher::{SoapMessageDispatcher, SoapProtocolHooks};
pub use self::fault::SoapFault;
pub use self::header::{SoapHeader, SoapHeaderElement, SoapHeaderError};
pub use self::interceptor::{SoapEndpointInterceptor, SoapEnvelopeLoggingInterceptor};
pub use self::mapping::SoapActionEndpointMapping;
pub use self::message::{SoapMessage, SoapMessageFactory};
pub use self::resolver::{
    FaultCode, FaultDefinitionParseError, SimpleSoapExceptionResolver, SoapFaultDefinition,
    SoapFaultMappingExceptionResolver,
};
pub use self::version::SoapVersion;
