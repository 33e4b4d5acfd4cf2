use rstest::{fixture, rstest};

use super::*;
use crate::tests::{PlainMessage, ping, plain_context};

#[fixture]
fn context() -> MessageContext {
    plain_context()
}

#[rstest]
fn response_is_created_once(mut context: MessageContext) {
    assert!(!context.has_response());
    assert!(context.response().is_none());

    context
        .response_as_mut::<PlainMessage>()
        .expect("plain response")
        .set_fault("first access");

    assert!(context.has_response());
    let reason = context
        .response_mut()
        .as_fault_aware()
        .and_then(|message| message.fault_reason().map(str::to_owned));
    assert_eq!(reason.as_deref(), Some("first access"), "same instance");
}

#[rstest]
fn clearing_the_response_starts_afresh(mut context: MessageContext) {
    context
        .response_as_mut::<PlainMessage>()
        .expect("plain response")
        .set_fault("stale");
    context.clear_response();

    assert!(!context.has_response());
    let fresh = context.response_mut();
    assert!(fresh.as_fault_aware().is_some_and(|message| !message.has_fault()));
}

#[rstest]
fn mismatched_downcast_discards_a_fresh_response(mut context: MessageContext) {
    assert!(context.response_as_mut::<crate::soap::SoapMessage>().is_none());
    assert!(!context.has_response());
}

#[rstest]
fn mismatched_downcast_keeps_an_existing_response(mut context: MessageContext) {
    context
        .response_as_mut::<PlainMessage>()
        .expect("plain response")
        .set_fault("kept");

    assert!(context.response_as_mut::<crate::soap::SoapMessage>().is_none());
    assert!(context.response().is_some_and(|response| {
        response
            .as_fault_aware()
            .is_some_and(|message| message.fault_reason() == Some("kept"))
    }));
}

#[rstest]
fn request_downcasts_to_its_concrete_type(context: MessageContext) {
    assert_eq!(
        context.request_as::<PlainMessage>().and_then(WebServiceMessage::payload),
        Some(&ping())
    );
    assert!(context.request_as::<crate::soap::SoapMessage>().is_none());
}

#[rstest]
fn properties_are_stored_sorted_and_removable(mut context: MessageContext) {
    assert_eq!(context.set_property("trace-id", "abc"), None);
    assert_eq!(context.set_property("tenant", "acme"), None);
    assert_eq!(context.set_property("trace-id", "def"), Some(String::from("abc")));

    assert_eq!(context.property("trace-id"), Some("def"));
    assert_eq!(context.property_names().collect::<Vec<_>>(), ["tenant", "trace-id"]);
    assert_eq!(context.remove_property("tenant"), Some(String::from("acme")));
    assert_eq!(context.property("tenant"), None);
}

#[rstest]
fn debug_output_lists_properties(mut context: MessageContext) {
    context.set_property("tenant", "acme");
    let rendered = format!("{context:?}");
    assert!(rendered.contains("tenant"), "{rendered}");
}
