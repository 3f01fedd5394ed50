//! Session command handlers.
//!
//! Each sub-module groups related commands by domain. This layer holds the
//! policy the store deliberately does not: credential checks, uniqueness
//! and limit enforcement, VIP and admin gates. A command locks the shared
//! state for its whole duration, so multi-record changes commit together.

pub mod admin;
pub mod auth;
pub mod friends;
pub mod groups;
pub mod messaging;
pub mod profile;

use std::sync::MutexGuard;

use crate::error::CommandError;
use crate::state::{AppState, SharedState};

pub(crate) fn lock(state: &SharedState) -> Result<MutexGuard<'_, AppState>, CommandError> {
    state.lock().map_err(|_| CommandError::LockPoisoned)
}
