//! API request and response types

use crate::account::UserProfile;
use crate::app_state::Page;
use crate::session::{MessageView, SessionState};
use serde::{Deserialize, Serialize};

/// Request to update the not-yet-submitted input
#[derive(Debug, Deserialize)]
pub struct InputRequest {
    pub text: String,
}

/// Request to submit symptoms
///
/// Without `text`, the session's pending input is submitted.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Result of a submission that reached the prediction service
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub outcome: &'static str,
    pub message: MessageView,
}

/// Chat thread as the diagnosis page renders it
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub messages: Vec<MessageView>,
    pub pending_input: String,
    pub is_analyzing: bool,
    pub page: Page,
}

impl SessionResponse {
    pub fn new(state: &SessionState, page: Page) -> Self {
        Self {
            messages: state.messages().iter().map(|m| m.to_view()).collect(),
            pending_input: state.pending_input().to_string(),
            is_analyzing: state.is_analyzing(),
            page,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PageRequest {
    pub page: Page,
}

/// Login flag and current page
#[derive(Debug, Serialize)]
pub struct AppStateResponse {
    pub page: Page,
    pub logged_in: bool,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub profile: UserProfile,
    pub page: Page,
}

/// Acknowledgement of a contact or feedback message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Page>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            redirect: None,
        }
    }

    pub fn with_redirect(mut self, page: Page) -> Self {
        self.redirect = Some(page);
        self
    }
}
