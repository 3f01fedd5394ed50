//! Admin panel operations. Every command here requires an admin session.
//!
//! The panel also reveals stored PINs and passwords; both are plain fields
//! on [`nattstad_shared::UserProfile`], so there is nothing to decrypt --
//! reading them is plain field access by design of the product.

use uuid::Uuid;

use crate::commands::lock;
use crate::error::CommandError;
use crate::state::{AppState, SharedState};

/// The three toggleable account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Verified,
    Vip,
}

fn require_admin(guard: &AppState) -> Result<(), CommandError> {
    let me = guard.current_user().ok_or(CommandError::NotLoggedIn)?;
    if !me.is_admin {
        return Err(CommandError::AdminRequired);
    }
    Ok(())
}

/// Flip maintenance mode. While active, only admins can log in.
pub fn toggle_maintenance(state: &SharedState) -> Result<bool, CommandError> {
    let mut guard = lock(state)?;
    require_admin(&guard)?;
    let enabled = !guard.flags().maintenance_mode;
    guard.set_maintenance(enabled);
    tracing::info!(enabled, "maintenance mode toggled");
    Ok(enabled)
}

/// Replace the pending broadcast notification shown to every user.
pub fn broadcast(state: &SharedState, text: &str) -> Result<(), CommandError> {
    let mut guard = lock(state)?;
    require_admin(&guard)?;
    if text.trim().is_empty() {
        return Err(CommandError::EmptyMessage);
    }
    guard.notify(text.to_string());
    tracing::info!("broadcast notification sent");
    Ok(())
}

/// Grant or revoke a role on any account. An admin editing their own
/// account sees the change reflected in the session immediately through
/// the reconciliation rule.
pub fn set_role(
    state: &SharedState,
    user_id: Uuid,
    role: Role,
    value: bool,
) -> Result<(), CommandError> {
    let mut guard = lock(state)?;
    require_admin(&guard)?;
    if guard.find_user(user_id).is_none() {
        return Err(CommandError::UserNotFound);
    }

    guard.update_users(|users| {
        if let Some(u) = users.iter_mut().find(|u| u.id == user_id) {
            match role {
                Role::Admin => u.is_admin = value,
                Role::Verified => u.is_verified = value,
                Role::Vip => u.is_vip = value,
            }
        }
    });
    Ok(())
}
