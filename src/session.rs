//! Diagnosis session
//!
//! Drives one symptom submission through the prediction service and records
//! the result in the message thread and, on success, in the history.
//!
//! Per submission:
//!
//! ```text
//! Idle --submit--> Sent --response--> ServerError | EmptyResult | Success | TransportFailure --> Idle
//! ```
//!
//! Every branch ends with exactly one assistant message and the analyzing
//! flag lowered. There is no internal retry.

mod message;
mod outcome;
mod state;

#[cfg(test)]
mod proptests;

pub use message::{
    Message, MessageView, PredictionView, RankedPrediction, Role, ANALYSIS_SUMMARY,
    CONNECTIVITY_APOLOGY, GREETING, RETRY_PROMPT,
};
pub use outcome::{classify, PredictionOutcome};
pub use state::{SessionHandle, SessionState};

use crate::history::{DiagnosisEntry, HistorySink};
use crate::prediction::{PredictRequest, PredictionTransport};
use crate::symptoms::normalize;
use state::AnalyzingGuard;
use std::sync::Arc;
use thiserror::Error;

/// Reasons a submission is refused before anything is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("empty input")]
    EmptyInput,
    #[error("Please login to use the diagnosis feature.")]
    AuthRequired,
    #[error("A diagnosis is already in progress")]
    Busy,
}

/// Login state as seen by the session
///
/// The session only reads the flag; logging in happens elsewhere.
pub trait AuthGate: Send + Sync {
    fn is_authenticated(&self) -> bool;

    /// Ask the surrounding application to show the login entry point
    fn redirect_to_login(&self);
}

pub struct DiagnosisSession {
    state: SessionHandle,
    transport: Arc<dyn PredictionTransport>,
    auth: Arc<dyn AuthGate>,
    history: Arc<dyn HistorySink>,
}

impl DiagnosisSession {
    pub fn new(
        transport: Arc<dyn PredictionTransport>,
        auth: Arc<dyn AuthGate>,
        history: Arc<dyn HistorySink>,
    ) -> Self {
        Self {
            state: SessionHandle::default(),
            transport,
            auth,
            history,
        }
    }

    /// Shared handle for observers that outlive a borrow of the session
    pub fn handle(&self) -> SessionHandle {
        self.state.clone()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.snapshot()
    }

    pub fn is_analyzing(&self) -> bool {
        self.state.is_analyzing()
    }

    /// Update the input box.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Busy`] while a submission is in flight; the input is
    /// left as it was.
    pub fn set_pending_input(&self, text: impl Into<String>) -> Result<(), SubmitError> {
        self.state.set_pending_input(text.into())
    }

    /// Submit whatever is in the input box
    ///
    /// # Errors
    ///
    /// Same as [`DiagnosisSession::submit`].
    pub async fn submit_pending(&self) -> Result<PredictionOutcome, SubmitError> {
        let text = self.state.snapshot().pending_input().to_string();
        self.submit(&text).await
    }

    /// Run one request/response cycle.
    ///
    /// All four network outcomes are absorbed into an assistant message and
    /// returned as `Ok`; only refusals that happen before the user turn is
    /// appended are errors.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::EmptyInput`] if `raw_text` is blank. Nothing changes.
    /// - [`SubmitError::AuthRequired`] if not logged in. A login redirect is
    ///   requested and nothing else changes.
    /// - [`SubmitError::Busy`] if another submission is in flight.
    pub async fn submit(&self, raw_text: &str) -> Result<PredictionOutcome, SubmitError> {
        if raw_text.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }

        if !self.auth.is_authenticated() {
            tracing::info!("Diagnosis requested while logged out, redirecting to login");
            self.auth.redirect_to_login();
            return Err(SubmitError::AuthRequired);
        }

        let guard = AnalyzingGuard::acquire(&self.state, Message::user(raw_text))?;

        let request = PredictRequest::new(normalize(raw_text));
        let outcome = classify(self.transport.predict(&request).await);

        match &outcome {
            PredictionOutcome::Success { predictions } => {
                // Recorded before the flag drops so a finished session
                // always has its history entry
                self.history
                    .append(DiagnosisEntry::new(request.symptoms, predictions.clone()));
            }
            PredictionOutcome::TransportFailure { error } => {
                tracing::warn!(
                    endpoint = %self.transport.endpoint(),
                    kind = %error.kind,
                    error = %error.message,
                    "Could not reach the prediction service"
                );
            }
            PredictionOutcome::ServerError { message } => {
                tracing::info!(error = %message, "Prediction service rejected the symptoms");
            }
            PredictionOutcome::EmptyResult => {
                tracing::info!("Prediction service returned no candidates");
            }
        }

        guard.finish(outcome.to_message());
        Ok(outcome)
    }
}
