//! Unit tests for the generic dispatch algorithm.

use mockall::mock;
use rstest::{fixture, rstest};

use super::*;
use crate::error::DispatchError;
use crate::interceptor::EndpointInterceptor;
use crate::tests::{
    FixedMapping, Journal, PlainMessage, RecordingEndpoint, RecordingInterceptor,
    RecordingResolver, Reply, plain_context,
};

mock! {
    Mapping {}
    impl EndpointMapping for Mapping {
        fn get_endpoint(
            &self,
            context: &MessageContext,
        ) -> Result<Option<EndpointInvocationChain>, EndpointError>;
    }
}

mock! {
    Adapter {}
    impl EndpointAdapter for Adapter {
        fn supports(&self, endpoint: &Endpoint) -> bool;
        fn invoke(
            &self,
            context: &mut MessageContext,
            endpoint: &Endpoint,
        ) -> Result<(), EndpointError>;
    }
}

#[fixture]
fn journal() -> Journal {
    Journal::default()
}

fn chain(endpoint: Endpoint, interceptors: Vec<Arc<dyn EndpointInterceptor>>) -> EndpointInvocationChain {
    EndpointInvocationChain::new(endpoint).with_interceptors(interceptors)
}

fn three_interceptors(journal: &Journal) -> Vec<Arc<dyn EndpointInterceptor>> {
    ["I0", "I1", "I2"]
        .into_iter()
        .map(|label| RecordingInterceptor::new(label, journal).shared())
        .collect()
}

fn dispatcher_for(chain: EndpointInvocationChain) -> MessageDispatcherBuilder {
    MessageDispatcher::builder().mapping(FixedMapping(Some(chain)))
}

#[rstest]
fn response_hooks_run_in_reverse_entry_order(journal: Journal) {
    let dispatcher = dispatcher_for(chain(
        RecordingEndpoint::echo(&journal),
        three_interceptors(&journal),
    ))
    .build();
    let mut context = plain_context();

    let outcome = dispatcher.dispatch(&mut context);

    assert!(outcome.is_dispatched());
    assert_eq!(
        journal.entries(),
        [
            "I0.request",
            "I1.request",
            "I2.request",
            "endpoint",
            "I2.response",
            "I1.response",
            "I0.response",
        ]
    );
    assert!(context.has_response());
}

#[rstest]
fn stopping_request_hook_unwinds_from_the_stopping_interceptor(journal: Journal) {
    let interceptors = vec![
        RecordingInterceptor::new("I0", &journal).shared(),
        RecordingInterceptor::new("I1", &journal)
            .on_request(Reply::Stop)
            .shared(),
        RecordingInterceptor::new("I2", &journal).shared(),
    ];
    let dispatcher = dispatcher_for(chain(RecordingEndpoint::echo(&journal), interceptors)).build();
    let mut context = plain_context();
    context.response_mut();

    let outcome = dispatcher.dispatch(&mut context);

    assert!(outcome.is_dispatched());
    assert_eq!(
        journal.entries(),
        ["I0.request", "I1.request", "I1.response", "I0.response"]
    );
}

#[rstest]
fn response_phase_needs_a_response(journal: Journal) {
    let interceptors = vec![
        RecordingInterceptor::new("I0", &journal).shared(),
        RecordingInterceptor::new("I1", &journal)
            .on_request(Reply::Stop)
            .shared(),
    ];
    let dispatcher = dispatcher_for(chain(RecordingEndpoint::echo(&journal), interceptors)).build();
    let mut context = plain_context();

    dispatcher.dispatch(&mut context);

    assert_eq!(journal.entries(), ["I0.request", "I1.request"]);
    assert!(!context.has_response());
}

#[rstest]
fn stopping_response_hook_skips_earlier_interceptors(journal: Journal) {
    let interceptors = vec![
        RecordingInterceptor::new("I0", &journal).shared(),
        RecordingInterceptor::new("I1", &journal)
            .on_response(Reply::Stop)
            .shared(),
        RecordingInterceptor::new("I2", &journal).shared(),
    ];
    let dispatcher = dispatcher_for(chain(RecordingEndpoint::echo(&journal), interceptors)).build();

    dispatcher.dispatch(&mut plain_context());

    assert_eq!(
        journal.entries(),
        [
            "I0.request",
            "I1.request",
            "I2.request",
            "endpoint",
            "I2.response",
            "I1.response",
        ]
    );
}

#[rstest]
fn missing_endpoint_runs_no_hooks_or_resolvers(journal: Journal) {
    let mut mapping = MockMapping::new();
    mapping.expect_get_endpoint().times(1).returning(|_| Ok(None));
    let dispatcher = MessageDispatcher::builder()
        .mapping(mapping)
        .resolver(RecordingResolver::new("R", &journal, true))
        .build();
    let mut context = plain_context();

    let outcome = dispatcher.receive(&mut context);

    assert!(journal.entries().is_empty());
    assert!(!context.has_response());
    match outcome.into_result() {
        Err(DispatchError::NoEndpointFound { request }) => {
            assert_eq!(request, "{urn:test}Ping");
        }
        other => panic!("expected NoEndpointFound, got {other:?}"),
    }
}

#[rstest]
fn first_matching_mapping_wins(journal: Journal) {
    let mut miss = MockMapping::new();
    miss.expect_get_endpoint().times(1).returning(|_| Ok(None));
    let mut hit = MockMapping::new();
    let resolved = chain(RecordingEndpoint::echo(&journal), Vec::new());
    hit.expect_get_endpoint()
        .times(1)
        .return_once(move |_| Ok(Some(resolved)));
    let mut unused = MockMapping::new();
    unused.expect_get_endpoint().never();

    let dispatcher = MessageDispatcher::builder()
        .mapping(miss)
        .mapping(hit)
        .mapping(unused)
        .build();

    assert!(dispatcher.dispatch(&mut plain_context()).is_dispatched());
    assert_eq!(journal.entries(), ["endpoint"]);
}

#[rstest]
fn first_supporting_adapter_is_invoked(journal: Journal) {
    let mut declining = MockAdapter::new();
    declining.expect_supports().times(1).return_const(false);
    declining.expect_invoke().never();
    let mut accepting = MockAdapter::new();
    accepting.expect_supports().times(1).return_const(true);
    accepting.expect_invoke().times(1).returning(|_, _| Ok(()));
    let mut trailing = MockAdapter::new();
    trailing.expect_supports().never();

    let dispatcher = dispatcher_for(chain(Endpoint::new("opaque", ()), Vec::new()))
        .adapter(declining)
        .adapter(accepting)
        .adapter(trailing)
        .resolver(RecordingResolver::new("R", &journal, true))
        .build();

    assert!(dispatcher.dispatch(&mut plain_context()).is_dispatched());
    assert!(journal.entries().is_empty());
}

#[rstest]
fn unsupported_endpoint_is_offered_to_resolvers(journal: Journal) {
    let interceptors = vec![RecordingInterceptor::new("I0", &journal).shared()];
    let dispatcher = dispatcher_for(chain(Endpoint::new("opaque", ()), interceptors))
        .resolver(RecordingResolver::new("R", &journal, true))
        .build();
    let mut context = plain_context();

    assert!(dispatcher.dispatch(&mut context).is_dispatched());

    assert_eq!(journal.entries(), ["I0.request", "R.resolve(opaque)", "I0.fault"]);
    let reason = context
        .response_mut()
        .as_fault_aware()
        .and_then(|response| response.fault_reason().map(str::to_owned));
    assert!(
        reason.as_deref().is_some_and(|text| text.contains("no adapter for endpoint 'opaque'")),
        "unexpected fault reason {reason:?}"
    );
}

#[rstest]
fn unresolved_unsupported_endpoint_fails_after_unwinding(journal: Journal) {
    let interceptors = vec![RecordingInterceptor::new("I0", &journal).shared()];
    let dispatcher = dispatcher_for(chain(Endpoint::new("opaque", ()), interceptors)).build();
    let mut context = plain_context();
    context.response_mut();

    let outcome = dispatcher.dispatch(&mut context);

    assert!(matches!(
        outcome,
        DispatchOutcome::Failed(DispatchError::Endpoint(EndpointError::NoAdapter { ref endpoint }))
            if endpoint == "opaque"
    ));
    assert_eq!(journal.entries(), ["I0.request", "I0.response"]);
}

#[rstest]
fn resolved_endpoint_error_unwinds_with_fault_hooks(journal: Journal) {
    let endpoint = RecordingEndpoint::failing(
        &journal,
        EndpointError::application("order_not_found", "no such order"),
    );
    let dispatcher = dispatcher_for(chain(endpoint, three_interceptors(&journal)))
        .resolver(RecordingResolver::new("R", &journal, true))
        .build();
    let mut context = plain_context();

    let outcome = dispatcher.dispatch(&mut context);

    assert!(outcome.is_dispatched());
    assert_eq!(
        journal.entries(),
        [
            "I0.request",
            "I1.request",
            "I2.request",
            "endpoint",
            "R.resolve(failing)",
            "I2.fault",
            "I1.fault",
            "I0.fault",
        ]
    );
    let fault = context
        .response()
        .and_then(|response| response.as_fault_aware())
        .and_then(|message| message.fault_reason());
    assert_eq!(fault, Some("no such order"));
}

#[rstest]
fn unresolved_error_propagates_after_unwinding(journal: Journal) {
    let endpoint =
        RecordingEndpoint::failing(&journal, EndpointError::invalid_request("malformed order"));
    let interceptors = vec![
        RecordingInterceptor::new("I0", &journal).shared(),
        RecordingInterceptor::new("I1", &journal).shared(),
    ];
    let dispatcher = dispatcher_for(chain(endpoint, interceptors))
        .resolver(RecordingResolver::new("R1", &journal, false))
        .resolver(RecordingResolver::new("R2", &journal, false))
        .build();
    let mut context = plain_context();
    context.response_mut();

    let outcome = dispatcher.dispatch(&mut context);

    assert_eq!(
        journal.entries(),
        [
            "I0.request",
            "I1.request",
            "endpoint",
            "R1.resolve(failing)",
            "R2.resolve(failing)",
            "I1.response",
            "I0.response",
        ]
    );
    match outcome {
        DispatchOutcome::Failed(DispatchError::Endpoint(error)) => {
            assert_eq!(error.kind(), "invalid_request");
        }
        other => panic!("expected unresolved endpoint error, got {other:?}"),
    }
}

#[rstest]
fn first_resolving_resolver_stops_the_search(journal: Journal) {
    let endpoint = RecordingEndpoint::failing(&journal, EndpointError::invalid_request("bad"));
    let dispatcher = dispatcher_for(chain(endpoint, Vec::new()))
        .resolver(RecordingResolver::new("R1", &journal, false))
        .resolver(RecordingResolver::new("R2", &journal, true))
        .resolver(RecordingResolver::new("R3", &journal, true))
        .build();

    assert!(dispatcher.dispatch(&mut plain_context()).is_dispatched());
    assert_eq!(
        journal.entries(),
        ["endpoint", "R1.resolve(failing)", "R2.resolve(failing)"]
    );
}

#[rstest]
fn failing_request_hook_is_unwound_with_the_others(journal: Journal) {
    let interceptors = vec![
        RecordingInterceptor::new("I0", &journal).shared(),
        RecordingInterceptor::new("I1", &journal)
            .on_request(Reply::Fail)
            .shared(),
        RecordingInterceptor::new("I2", &journal).shared(),
    ];
    let dispatcher = dispatcher_for(chain(RecordingEndpoint::echo(&journal), interceptors))
        .resolver(RecordingResolver::new("R", &journal, true))
        .build();

    assert!(dispatcher.dispatch(&mut plain_context()).is_dispatched());
    assert_eq!(
        journal.entries(),
        [
            "I0.request",
            "I1.request",
            "R.resolve(echo)",
            "I1.fault",
            "I0.fault"
        ]
    );
}

#[rstest]
fn mapping_errors_reach_resolvers_without_an_endpoint(journal: Journal) {
    let mut mapping = MockMapping::new();
    mapping
        .expect_get_endpoint()
        .returning(|_| Err(EndpointError::mapping_failed("registry offline")));
    let dispatcher = MessageDispatcher::builder()
        .mapping(mapping)
        .resolver(RecordingResolver::new("R", &journal, false))
        .build();

    let outcome = dispatcher.dispatch(&mut plain_context());

    assert_eq!(journal.entries(), ["R.resolve(-)"]);
    assert!(matches!(
        outcome,
        DispatchOutcome::Failed(DispatchError::Endpoint(EndpointError::MappingFailed { .. }))
    ));
}

struct Veto;

impl DispatchHooks for Veto {
    fn handle_request(
        &self,
        _chain: &EndpointInvocationChain,
        context: &mut MessageContext,
    ) -> Result<bool, EndpointError> {
        context.response_mut();
        Ok(false)
    }
}

#[rstest]
fn vetoing_protocol_check_skips_interceptors_and_endpoint(journal: Journal) {
    let dispatcher = dispatcher_for(chain(
        RecordingEndpoint::echo(&journal),
        three_interceptors(&journal),
    ))
    .hooks(Veto)
    .build();
    let mut context = plain_context();

    let outcome = dispatcher.dispatch(&mut context);

    assert!(outcome.is_dispatched());
    assert!(journal.entries().is_empty());
    assert!(context.has_response());
}

struct FaultBlind;

impl DispatchHooks for FaultBlind {
    fn handles_faults(&self, interceptor: &dyn EndpointInterceptor) -> bool {
        interceptor.name() != "I1"
    }
}

#[rstest]
fn interceptors_excluded_from_faults_are_skipped_not_stopping(journal: Journal) {
    let endpoint = RecordingEndpoint::failing(&journal, EndpointError::invalid_request("bad"));
    let dispatcher = dispatcher_for(chain(endpoint, three_interceptors(&journal)))
        .resolver(RecordingResolver::new("R", &journal, true))
        .hooks(FaultBlind)
        .build();
    let mut context = plain_context();

    dispatcher.dispatch(&mut context);

    let entries = journal.entries();
    assert!(entries.ends_with(&["I2.fault".to_owned(), "I0.fault".to_owned()]));
    assert!(!entries.iter().any(|entry| entry == "I1.fault"));
}

#[rstest]
fn failing_response_hook_after_resolution_is_reported(journal: Journal) {
    let interceptors = vec![
        RecordingInterceptor::new("I0", &journal)
            .on_fault(Reply::Fail)
            .shared(),
    ];
    let endpoint = RecordingEndpoint::failing(&journal, EndpointError::invalid_request("bad"));
    let dispatcher = dispatcher_for(chain(endpoint, interceptors))
        .resolver(RecordingResolver::new("R", &journal, true))
        .build();

    let outcome = dispatcher.dispatch(&mut plain_context());

    match outcome {
        DispatchOutcome::Failed(DispatchError::Endpoint(error)) => {
            assert_eq!(error.kind(), "interceptor_failed");
        }
        other => panic!("expected response-phase failure, got {other:?}"),
    }
}

#[test]
fn default_build_installs_built_in_adapters_and_no_resolvers() {
    let dispatcher = MessageDispatcherBuilder::default().build();
    let rendered = format!("{dispatcher:?}");
    assert!(rendered.contains("adapters: 2"), "{rendered}");
    assert!(rendered.contains("resolvers: 0"), "{rendered}");
    assert!(rendered.contains("NoProtocolHooks"), "{rendered}");
}

#[test]
fn plain_messages_expose_faults_to_the_default_hooks() {
    let mut context = plain_context();
    assert!(!NoProtocolHooks.response_has_fault(&context));

    if let Some(response) = context.response_as_mut::<PlainMessage>() {
        response.set_fault("boom");
    }
    assert!(NoProtocolHooks.response_has_fault(&context));
}
