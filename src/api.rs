//! HTTP API for the diagnosis front end

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::*;

use crate::account::{LoginForm, SignupForm, UserProfile, ValidationError};
use crate::app_state::{AppState, Page};
use crate::prediction::PredictionTransport;
use crate::session::DiagnosisSession;
use std::sync::{Arc, PoisonError, RwLock};

/// Application state shared across handlers
///
/// One diagnosis session per process. Entering the diagnosis page from
/// another page replaces it with a fresh thread.
#[derive(Clone)]
pub struct ApiState {
    pub app: Arc<AppState>,
    transport: Arc<dyn PredictionTransport>,
    session: Arc<RwLock<Arc<DiagnosisSession>>>,
}

impl ApiState {
    pub fn new(app: Arc<AppState>, transport: Arc<dyn PredictionTransport>) -> Self {
        let session = Self::build_session(&app, &transport);
        Self {
            app,
            transport,
            session: Arc::new(RwLock::new(session)),
        }
    }

    /// The active diagnosis session
    pub fn session(&self) -> Arc<DiagnosisSession> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Discard the current thread and start over with the greeting.
    ///
    /// A submission still in flight on the old session finishes against it.
    pub fn reset_session(&self) -> Arc<DiagnosisSession> {
        let fresh = Self::build_session(&self.app, &self.transport);
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = fresh.clone();
        fresh
    }

    /// Show `page`, starting a fresh diagnosis thread when the diagnosis
    /// page is entered from elsewhere
    pub fn navigate(&self, page: Page) {
        let previous = self.app.navigate(page);
        self.page_changed(previous);
    }

    /// # Errors
    ///
    /// The first signup rule that fails.
    pub fn signup(&self, form: &SignupForm) -> Result<UserProfile, ValidationError> {
        let previous = self.app.page();
        let profile = self.app.signup(form)?;
        self.page_changed(previous);
        Ok(profile)
    }

    /// # Errors
    ///
    /// The first login rule that fails.
    pub fn login(&self, form: &LoginForm) -> Result<(), ValidationError> {
        let previous = self.app.page();
        self.app.login(form)?;
        self.page_changed(previous);
        Ok(())
    }

    fn page_changed(&self, previous: Page) {
        if previous != Page::Diagnose && self.app.page() == Page::Diagnose {
            self.reset_session();
        }
    }

    fn build_session(
        app: &Arc<AppState>,
        transport: &Arc<dyn PredictionTransport>,
    ) -> Arc<DiagnosisSession> {
        Arc::new(DiagnosisSession::new(
            transport.clone(),
            app.clone(),
            app.clone(),
        ))
    }
}
