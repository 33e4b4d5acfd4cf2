use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::endpoint::{MessageEndpoint, PayloadEndpoint};
use crate::message::Payload;
use crate::qname::QName;
use crate::tests::{PlainMessage, PlainMessageFactory};

struct Echo;

impl PayloadEndpoint for Echo {
    fn invoke(&self, request: Option<&Payload>) -> Result<Option<Payload>, EndpointError> {
        Ok(request.cloned())
    }
}

struct Stamp;

impl MessageEndpoint for Stamp {
    fn invoke(&self, context: &mut MessageContext) -> Result<(), EndpointError> {
        context.set_property("stamped", "yes");
        Ok(())
    }
}

#[fixture]
fn context() -> MessageContext {
    let request = PlainMessage::with_payload(Payload::new(QName::new("urn:t", "Ping"), "<Ping/>"));
    MessageContext::new(request, Arc::new(PlainMessageFactory))
}

#[test]
fn adapters_only_support_their_own_shape() {
    let message = Endpoint::message("stamp", Stamp);
    let payload = Endpoint::payload("echo", Echo);
    let opaque = Endpoint::new("opaque", "not an endpoint");

    assert!(MessageEndpointAdapter.supports(&message));
    assert!(!MessageEndpointAdapter.supports(&payload));
    assert!(PayloadEndpointAdapter.supports(&payload));
    assert!(!PayloadEndpointAdapter.supports(&message));
    assert!(default_adapters().iter().all(|adapter| !adapter.supports(&opaque)));
}

#[rstest]
fn payload_adapter_writes_returned_payload(mut context: MessageContext) {
    PayloadEndpointAdapter
        .invoke(&mut context, &Endpoint::payload("echo", Echo))
        .expect("invoke echo");

    let response = context.response().expect("response created");
    assert_eq!(
        response.payload().map(|p| p.root().local_part()),
        Some("Ping")
    );
}

#[rstest]
fn message_adapter_hands_over_the_context(mut context: MessageContext) {
    MessageEndpointAdapter
        .invoke(&mut context, &Endpoint::message("stamp", Stamp))
        .expect("invoke stamp");

    assert_eq!(context.property("stamped"), Some("yes"));
    assert!(!context.has_response());
}

#[rstest]
fn invoking_an_unsupported_endpoint_fails(mut context: MessageContext) {
    let error = PayloadEndpointAdapter
        .invoke(&mut context, &Endpoint::message("stamp", Stamp))
        .expect_err("shape mismatch");

    assert_eq!(error.kind(), "unsupported_endpoint");
}
