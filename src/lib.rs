//! `MediBot` - conversational symptom checker
//!
//! Turns free-text symptom descriptions into a dialogue with a remote
//! prediction service and keeps a per-user diagnosis history in memory.

pub mod account;
pub mod api;
pub mod app_state;
pub mod history;
pub mod prediction;
pub mod session;
pub mod symptoms;

#[cfg(test)]
pub mod testing;
