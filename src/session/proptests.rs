//! Property-based tests for the diagnosis session
//!
//! Drives arbitrary sequences of submissions and service outcomes and checks
//! that the thread only grows and the analyzing flag never sticks.

use super::*;
use crate::history::InMemoryHistory;
use crate::prediction::{PredictResponse, Prediction, TransportError};
use crate::testing::{MockAuth, MockTransport};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_prediction() -> impl Strategy<Value = Prediction> {
    // Includes out-of-range confidences, which are passed through
    ("[A-Z][a-z]{2,10}", -0.5f64..1.5).prop_map(|(disease, confidence)| Prediction::new(disease, confidence))
}

fn arb_transport_result() -> impl Strategy<Value = Result<PredictResponse, TransportError>> {
    prop_oneof![
        prop::collection::vec(arb_prediction(), 1..6)
            .prop_map(|p| Ok(PredictResponse::with_predictions(p))),
        Just(Ok(PredictResponse::with_predictions(vec![]))),
        Just(Ok(PredictResponse::default())),
        ("[a-zA-Z ]{1,30}", prop::option::of(prop::collection::vec(arb_prediction(), 0..4)))
            .prop_map(|(error, predictions)| Ok(PredictResponse {
                error: Some(error),
                predictions,
            })),
        "[a-z ]{0,20}".prop_map(|m| Err(TransportError::network(m))),
        (400u16..600).prop_map(|code| Err(TransportError::status(code, "HTTP error"))),
    ]
}

/// One user action: blank text or a symptom list with its service result
#[derive(Debug, Clone)]
enum Step {
    Blank(String),
    Submit(String, Result<PredictResponse, TransportError>),
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        1 => "[ \t,;]{0,5}".prop_map(Step::Blank),
        4 => ("[a-zA-Z]{1,8}(, ?[a-zA-Z]{1,8}){0,3}", arb_transport_result())
            .prop_map(|(text, result)| Step::Submit(text, result)),
    ]
}

fn run_steps(steps: &[Step]) -> Result<(), TestCaseError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    rt.block_on(async {
        let transport = Arc::new(MockTransport::new());
        let history = Arc::new(InMemoryHistory::new());
        let session = DiagnosisSession::new(
            transport.clone(),
            Arc::new(MockAuth::logged_in()),
            history.clone(),
        );
        transport.observe(session.handle());

        let mut previous = session.snapshot().messages().to_vec();
        let mut successes = 0;
        let mut calls = 0;

        for step in steps {
            match step {
                Step::Blank(text) => {
                    prop_assert_eq!(session.submit(text).await, Err(SubmitError::EmptyInput));
                    let state = session.snapshot();
                    prop_assert_eq!(state.messages(), previous.as_slice());
                }
                Step::Submit(text, result) => {
                    let expected = classify(result.clone());
                    match result.clone() {
                        Ok(response) => transport.queue_response(response),
                        Err(error) => transport.queue_error(error),
                    }

                    let outcome = session.submit(text).await;
                    prop_assert_eq!(outcome.as_ref(), Ok(&expected));
                    calls += 1;
                    if expected.is_success() {
                        successes += 1;
                    }

                    let observed = transport.observed_states();
                    let during = &observed[calls - 1];
                    prop_assert!(during.is_analyzing());
                    prop_assert_eq!(during.messages().len(), previous.len() + 1);

                    let state = session.snapshot();
                    let messages = state.messages();
                    prop_assert_eq!(messages.len(), previous.len() + 2);
                    // Existing turns are untouched
                    prop_assert_eq!(&messages[..previous.len()], previous.as_slice());
                    prop_assert_eq!(messages[previous.len()].role(), Role::User);
                    prop_assert!(messages[previous.len()].predictions().is_none());
                    prop_assert_eq!(&messages[previous.len() + 1], &expected.to_message());
                    previous = messages.to_vec();
                }
            }
            prop_assert!(!session.is_analyzing());
        }

        prop_assert_eq!(history.len(), successes);
        prop_assert_eq!(transport.recorded_requests().len(), calls);
        Ok(())
    })
}

proptest! {
    #[test]
    fn thread_is_append_only_and_flag_never_sticks(steps in prop::collection::vec(arb_step(), 0..12)) {
        run_steps(&steps)?;
    }

    #[test]
    fn user_turns_never_carry_predictions(result in arb_transport_result()) {
        let outcome = classify(result);
        let reply = outcome.to_message();
        prop_assert_eq!(reply.role(), Role::Assistant);
        prop_assert_eq!(reply.predictions().is_some(), outcome.is_success());
    }

    #[test]
    fn success_keeps_every_prediction_in_order(predictions in prop::collection::vec(arb_prediction(), 1..8)) {
        let outcome = classify(Ok(PredictResponse::with_predictions(predictions.clone())));
        let reply = outcome.to_message();
        prop_assert_eq!(reply.predictions(), Some(predictions.as_slice()));

        let view = reply.prediction_view().unwrap();
        prop_assert_eq!(view.primary, &predictions[0]);
        prop_assert_eq!(view.others.len(), (predictions.len() - 1).min(2));
    }
}
