//! Classification of prediction results
//!
//! Pure: given the same transport result it always produces the same
//! outcome, and it never touches session state.

use super::message::{Message, ANALYSIS_SUMMARY, CONNECTIVITY_APOLOGY, RETRY_PROMPT};
use crate::prediction::{PredictResponse, Prediction, TransportError};

/// Terminal branch of one submission
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    /// The service flagged a problem itself (e.g. unrecognized symptoms)
    ServerError { message: String },
    /// No error, but no candidates either
    EmptyResult,
    /// One or more ranked candidates
    Success { predictions: Vec<Prediction> },
    /// Network, status, timeout or decode failure
    TransportFailure { error: TransportError },
}

/// Map a transport result onto exactly one outcome.
///
/// A non-empty `error` field wins over any `predictions` sent alongside it.
/// An empty string is treated as no error.
pub fn classify(result: Result<PredictResponse, TransportError>) -> PredictionOutcome {
    match result {
        Err(error) => PredictionOutcome::TransportFailure { error },
        Ok(PredictResponse {
            error: Some(message),
            ..
        }) if !message.is_empty() => PredictionOutcome::ServerError { message },
        Ok(PredictResponse { predictions, .. }) => match predictions {
            Some(predictions) if !predictions.is_empty() => {
                PredictionOutcome::Success { predictions }
            }
            _ => PredictionOutcome::EmptyResult,
        },
    }
}

impl PredictionOutcome {
    /// The assistant turn that reports this outcome
    pub fn to_message(&self) -> Message {
        match self {
            Self::ServerError { message } => Message::assistant(message.clone()),
            Self::EmptyResult => Message::assistant(RETRY_PROMPT),
            Self::Success { predictions } => {
                Message::assistant_with_predictions(ANALYSIS_SUMMARY, predictions.clone())
            }
            Self::TransportFailure { .. } => Message::assistant(CONNECTIVITY_APOLOGY),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ServerError { .. } => "server_error",
            Self::EmptyResult => "empty_result",
            Self::Success { .. } => "success",
            Self::TransportFailure { .. } => "transport_failure",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
