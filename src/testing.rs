//! Mock implementations for testing
//!
//! These mocks let sessions and the API run without a prediction service.

use crate::prediction::{PredictRequest, PredictResponse, PredictionTransport, TransportError};
use crate::session::{AuthGate, SessionHandle, SessionState};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// ============================================================================
// Mock Transport
// ============================================================================

/// Transport that returns queued results and records every request
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<PredictResponse, TransportError>>>,
    requests: Mutex<Vec<PredictRequest>>,
    observer: Mutex<Option<SessionHandle>>,
    observed: Mutex<Vec<SessionState>>,
    /// When set, each call waits for [`MockTransport::release`]
    gate: Option<Notify>,
    /// Notified when a request arrives (for test synchronization)
    pub request_started: Arc<Notify>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            observer: Mutex::new(None),
            observed: Mutex::new(Vec::new()),
            gate: None,
            request_started: Arc::new(Notify::new()),
        }
    }

    /// Transport that holds every call until released
    pub fn gated() -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::new()
        }
    }

    pub fn queue_response(&self, response: PredictResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn queue_error(&self, error: TransportError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Let one held call complete
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Snapshot this session's state whenever a request arrives
    pub fn observe(&self, handle: SessionHandle) {
        *self.observer.lock().unwrap() = Some(handle);
    }

    pub fn recorded_requests(&self) -> Vec<PredictRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Session states seen mid-call, one per request
    pub fn observed_states(&self) -> Vec<SessionState> {
        self.observed.lock().unwrap().clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PredictionTransport for MockTransport {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        let snapshot = self.observer.lock().unwrap().as_ref().map(SessionHandle::snapshot);
        if let Some(state) = snapshot {
            self.observed.lock().unwrap().push(state);
        }
        self.request_started.notify_one();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::network("No mock response queued")))
    }

    fn endpoint(&self) -> &str {
        "mock://predict"
    }
}

// ============================================================================
// Mock Auth
// ============================================================================

/// Fixed login flag that counts redirect requests
pub struct MockAuth {
    authenticated: AtomicBool,
    redirects: AtomicUsize,
}

impl MockAuth {
    pub fn logged_in() -> Self {
        Self {
            authenticated: AtomicBool::new(true),
            redirects: AtomicUsize::new(0),
        }
    }

    pub fn logged_out() -> Self {
        Self {
            authenticated: AtomicBool::new(false),
            redirects: AtomicUsize::new(0),
        }
    }

    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl AuthGate for MockAuth {
    fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_queue() {
        let mock = MockTransport::new();
        mock.queue_response(PredictResponse::server_error("nope"));

        let request = PredictRequest::new(vec!["fever".into()]);
        let response = mock.predict(&request).await.unwrap();
        assert_eq!(response.error.as_deref(), Some("nope"));

        // Nothing left queued
        assert!(mock.predict(&request).await.is_err());
        assert_eq!(mock.recorded_requests().len(), 2);
        assert!(mock.observed_states().is_empty());
    }

    #[test]
    fn test_mock_auth_counts_redirects() {
        let auth = MockAuth::logged_out();
        assert!(!auth.is_authenticated());
        auth.redirect_to_login();
        auth.redirect_to_login();
        assert_eq!(auth.redirects(), 2);
        assert!(MockAuth::logged_in().is_authenticated());
    }
}
