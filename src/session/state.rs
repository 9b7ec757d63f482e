//! Session state and the analyzing guard

use super::message::{Message, GREETING};
use super::SubmitError;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Transient state of one diagnosis page visit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    messages: Vec<Message>,
    pending_input: String,
    is_analyzing: bool,
}

impl SessionState {
    /// Fresh state seeded with the assistant greeting
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(GREETING)],
            pending_input: String::new(),
            is_analyzing: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn is_analyzing(&self) -> bool {
        self.is_analyzing
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to a session's state
///
/// Locks are never held across an await point.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<SessionState>>,
}

impl SessionHandle {
    pub fn snapshot(&self) -> SessionState {
        self.read().clone()
    }

    pub fn is_analyzing(&self) -> bool {
        self.read().is_analyzing
    }

    /// Replace the not-yet-submitted input. Refused while analyzing.
    pub(crate) fn set_pending_input(&self, text: String) -> Result<(), SubmitError> {
        let mut state = self.write();
        if state.is_analyzing {
            return Err(SubmitError::Busy);
        }
        state.pending_input = text;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds `is_analyzing` true for the lifetime of one submission.
///
/// Acquiring appends the user turn and raises the flag; [`finish`] appends
/// the reply and lowers it in the same critical section. If the guard is
/// dropped without finishing, the flag is still lowered.
///
/// [`finish`]: AnalyzingGuard::finish
#[derive(Debug)]
pub(crate) struct AnalyzingGuard {
    handle: SessionHandle,
    armed: bool,
}

impl AnalyzingGuard {
    pub(crate) fn acquire(handle: &SessionHandle, user_turn: Message) -> Result<Self, SubmitError> {
        let mut state = handle.write();
        if state.is_analyzing {
            return Err(SubmitError::Busy);
        }
        state.messages.push(user_turn);
        state.pending_input.clear();
        state.is_analyzing = true;
        drop(state);

        Ok(Self {
            handle: handle.clone(),
            armed: true,
        })
    }

    pub(crate) fn finish(mut self, reply: Message) {
        let mut state = self.handle.write();
        state.messages.push(reply);
        state.is_analyzing = false;
        self.armed = false;
    }
}

impl Drop for AnalyzingGuard {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("Submission dropped before its reply was recorded");
            self.handle.write().is_analyzing = false;
        }
    }
}
