//! Message dispatching for SOAP web services.
//!
//! A [`MessageDispatcher`] takes a request wrapped in a [`MessageContext`],
//! asks its [`EndpointMapping`]s for an [`EndpointInvocationChain`], runs the
//! chain's [`EndpointInterceptor`]s around the endpoint, and invokes the
//! endpoint through the first [`EndpointAdapter`] that supports it. Errors
//! are handed to [`EndpointExceptionResolver`]s, which usually turn them into
//! faults.
//!
//! The [`soap`] module layers SOAP 1.1 and 1.2 on top: envelopes, header
//! blocks, faults, `SOAPAction` mapping and mustUnderstand processing. A SOAP
//! dispatcher is built from [`courier_config::Config`]:
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use courier::soap::{SoapMessage, SoapMessageDispatcher, SoapMessageFactory, SoapVersion};
//! use courier::{
//!     Endpoint, EndpointError, MessageContext, Payload, PayloadEndpoint,
//!     PayloadRootQNameEndpointMapping, QName,
//! };
//! use courier_config::Config;
//!
//! struct Echo;
//!
//! impl PayloadEndpoint for Echo {
//!     fn invoke(&self, request: Option<&Payload>) -> Result<Option<Payload>, EndpointError> {
//!         Ok(request.cloned())
//!     }
//! }
//!
//! # fn main() -> Result<(), EndpointError> {
//! let ping = QName::new("urn:example", "Ping");
//! let mapping = PayloadRootQNameEndpointMapping::new()
//!     .with_endpoint(ping.clone(), Endpoint::payload("echo", Echo))?;
//! let dispatcher = SoapMessageDispatcher::soap_builder(&Config::default())
//!     .mapping(mapping)
//!     .build();
//!
//! let request = SoapMessage::new(SoapVersion::V12).with_payload(Payload::new(ping, "<Ping/>"));
//! let mut context = MessageContext::new(request, Arc::new(SoapMessageFactory::default()));
//! assert!(dispatcher.receive(&mut context).is_dispatched());
//! # Ok(())
//! # }
//! ```

mod adapter;
mod chain;
mod context;
mod dispatcher;
mod endpoint;
mod error;
mod interceptor;
mod mapping;
mod message;
mod qname;
mod resolver;
pub mod soap;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use self::adapter::{
    EndpointAdapter, MessageEndpointAdapter, PayloadEndpointAdapter, default_adapters,
};
pub use self::chain::{EndpointInvocationChain, SoapRoles};
pub use self::context::MessageContext;
pub use self::dispatcher::{
    DispatchHooks, DispatchOutcome, MessageDispatcher, MessageDispatcherBuilder, NoProtocolHooks,
};
pub use self::endpoint::{Endpoint, MessageEndpoint, PayloadEndpoint};
pub use self::error::{DispatchError, EndpointError};
pub use self::interceptor::{EndpointInterceptor, PayloadLoggingInterceptor};
pub use self::mapping::{EndpointMapping, MappingSupport, PayloadRootQNameEndpointMapping};
pub use self::message::{FaultAwareMessage, MessageFactory, Payload, WebServiceMessage};
pub use self::qname::{QName, QNameParseError};
pub use self::resolver::EndpointExceptionResolver;
