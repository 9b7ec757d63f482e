//! Application state container
//!
//! Holds what the surrounding application shares between pages: the login
//! flag, the current user's profile, the current page and the diagnosis
//! history. All mutation goes through the methods here.

use crate::account::{LoginForm, SignupForm, UserProfile, ValidationError};
use crate::history::{DiagnosisEntry, HistorySink, InMemoryHistory};
use crate::session::AuthGate;
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Page the front end should be showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    About,
    Diagnose,
    Login,
    Signup,
    Reports,
    Profile,
    Feedback,
}

#[derive(Debug, Default)]
struct Shared {
    page: Page,
    logged_in: bool,
    profile: Option<UserProfile>,
}

#[derive(Debug, Default)]
pub struct AppState {
    shared: RwLock<Shared>,
    history: InMemoryHistory,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.read().page
    }

    /// Switch pages, returning the one that was showing
    pub fn navigate(&self, page: Page) -> Page {
        let mut shared = self.write();
        if shared.page != page {
            tracing::debug!(from = ?shared.page, to = ?page, "Navigating");
        }
        std::mem::replace(&mut shared.page, page)
    }

    pub fn is_logged_in(&self) -> bool {
        self.read().logged_in
    }

    pub fn set_logged_in(&self, logged_in: bool) {
        self.write().logged_in = logged_in;
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.read().profile.clone()
    }

    pub fn set_profile(&self, profile: Option<UserProfile>) {
        self.write().profile = profile;
    }

    pub fn append_history(&self, entry: DiagnosisEntry) {
        self.history.append(entry);
    }

    /// History entries, oldest first
    pub fn history(&self) -> Vec<DiagnosisEntry> {
        self.history.list()
    }

    /// Create an account from the signup form and log in.
    ///
    /// # Errors
    ///
    /// The first form rule that fails. State is left unchanged.
    pub fn signup(&self, form: &SignupForm) -> Result<UserProfile, ValidationError> {
        let profile = form.validate()?;
        {
            let mut shared = self.write();
            shared.profile = Some(profile.clone());
            shared.logged_in = true;
            shared.page = Page::Diagnose;
        }
        tracing::info!(email = %profile.email, "Account created");
        Ok(profile)
    }

    /// Log in. The credentials are only checked for shape.
    ///
    /// # Errors
    ///
    /// The first form rule that fails. State is left unchanged.
    pub fn login(&self, form: &LoginForm) -> Result<(), ValidationError> {
        form.validate()?;
        {
            let mut shared = self.write();
            shared.logged_in = true;
            shared.page = Page::Diagnose;
        }
        tracing::info!(email = %form.email, "Logged in");
        Ok(())
    }

    /// Log out and drop the profile. History is kept.
    pub fn logout(&self) {
        let mut shared = self.write();
        shared.logged_in = false;
        shared.profile = None;
        shared.page = Page::Home;
        drop(shared);
        tracing::info!("Logged out");
    }

    fn read(&self) -> RwLockReadGuard<'_, Shared> {
        self.shared.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Shared> {
        self.shared.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AuthGate for AppState {
    fn is_authenticated(&self) -> bool {
        self.is_logged_in()
    }

    fn redirect_to_login(&self) {
        self.navigate(Page::Login);
    }
}

impl HistorySink for AppState {
    fn append(&self, entry: DiagnosisEntry) {
        self.append_history(entry);
    }

    fn list(&self) -> Vec<DiagnosisEntry> {
        self.history()
    }
}
