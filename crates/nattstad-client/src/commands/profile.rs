//! Self-service profile edits: identity fields, cosmetics, presence mode,
//! the block list and the VIP upgrade.

use chrono::{Datelike, Utc};

use nattstad_shared::{Gender, ProfileAnimation, UserProfile, UserStatus};

use crate::commands::lock;
use crate::error::CommandError;
use crate::state::SharedState;

/// Payload of the profile edit form. Callers prefill every field from the
/// current profile, the way the edit screen does, so all fields are plain
/// values.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub display_name: String,
    pub username: String,
    pub city: String,
    pub gender: Gender,
    pub age: u32,
    pub birth_month: u32,
    pub birth_day: u32,
    /// `None` clears the glow.
    pub username_glow: Option<String>,
}

/// Apply a profile edit. Changing city is VIP-gated; changing username
/// re-checks uniqueness against everyone else. The date of birth is
/// reassembled from age, month and day exactly like at registration.
pub fn update_profile(
    state: &SharedState,
    update: ProfileUpdate,
) -> Result<UserProfile, CommandError> {
    let mut guard = lock(state)?;
    let me = guard.current_user().cloned().ok_or(CommandError::NotLoggedIn)?;

    if update.city != me.city && !me.is_vip {
        return Err(CommandError::VipRequiredForCityChange);
    }
    if update.username.to_lowercase() != me.username.to_lowercase() {
        let taken = guard
            .users()
            .iter()
            .any(|u| u.username.to_lowercase() == update.username.to_lowercase() && u.id != me.id);
        if taken {
            return Err(CommandError::UsernameTaken);
        }
    }

    let birth_year = Utc::now().year() - update.age as i32;
    let dob = format!("{birth_year}-{:02}-{:02}", update.birth_month, update.birth_day);

    guard.update_users(|users| {
        if let Some(u) = users.iter_mut().find(|u| u.id == me.id) {
            u.display_name = update.display_name.clone();
            u.username = update.username.clone();
            u.city = update.city.clone();
            u.gender = update.gender;
            u.dob = dob.clone();
            u.username_glow = update.username_glow.clone();
        }
    });
    guard.notify("Profil uppdaterad! ✨");

    Ok(guard.current_user().cloned().unwrap_or(me))
}

/// Swap the profile image reference.
pub fn set_profile_image(state: &SharedState, image: &str) -> Result<(), CommandError> {
    let mut guard = lock(state)?;
    let me = guard.current_user().cloned().ok_or(CommandError::NotLoggedIn)?;
    guard.update_users(|users| {
        if let Some(u) = users.iter_mut().find(|u| u.id == me.id) {
            u.profile_image = image.to_string();
        }
    });
    guard.notify("Profilbild uppdaterad! 📸");
    Ok(())
}

/// Pick a cosmetic animation, or `None` to turn it off.
pub fn set_profile_animation(
    state: &SharedState,
    animation: Option<ProfileAnimation>,
) -> Result<(), CommandError> {
    let mut guard = lock(state)?;
    let me = guard.current_user().cloned().ok_or(CommandError::NotLoggedIn)?;
    guard.update_users(|users| {
        if let Some(u) = users.iter_mut().find(|u| u.id == me.id) {
            u.profile_animation = animation;
        }
    });
    guard.notify("Profil-effekt uppdaterad! ✨");
    Ok(())
}

/// Flip do-not-disturb. Any non-dnd status becomes dnd, dnd becomes active.
pub fn toggle_dnd(state: &SharedState) -> Result<UserStatus, CommandError> {
    let mut guard = lock(state)?;
    let me = guard.current_user().cloned().ok_or(CommandError::NotLoggedIn)?;
    let next = if me.status == UserStatus::Dnd {
        UserStatus::Active
    } else {
        UserStatus::Dnd
    };
    guard.update_users(|users| {
        if let Some(u) = users.iter_mut().find(|u| u.id == me.id) {
            u.status = next;
        }
    });
    Ok(next)
}

/// Block an account by username. Stored lowercase with set semantics.
pub fn block_user(state: &SharedState, username: &str) -> Result<(), CommandError> {
    let target = username.trim().to_lowercase();
    if target.is_empty() {
        return Err(CommandError::UsernameRequired);
    }

    let mut guard = lock(state)?;
    let me = guard.current_user().cloned().ok_or(CommandError::NotLoggedIn)?;
    if target == me.username.to_lowercase() {
        return Err(CommandError::CannotBlockSelf);
    }
    if guard.find_user_by_username(&target).is_none() {
        return Err(CommandError::UserNotFound);
    }

    guard.update_users(|users| {
        if let Some(u) = users.iter_mut().find(|u| u.id == me.id) {
            if !u.blocked_users.contains(&target) {
                u.blocked_users.push(target.clone());
            }
        }
    });
    guard.notify(format!("Användare @{target} blockerad."));
    Ok(())
}

/// Remove a username from the block list.
pub fn unblock_user(state: &SharedState, username: &str) -> Result<(), CommandError> {
    let target = username.trim().to_lowercase();
    let mut guard = lock(state)?;
    let me = guard.current_user().cloned().ok_or(CommandError::NotLoggedIn)?;
    guard.update_users(|users| {
        if let Some(u) = users.iter_mut().find(|u| u.id == me.id) {
            u.blocked_users.retain(|b| *b != target);
        }
    });
    guard.notify(format!("Användare @{target} avblockerad."));
    Ok(())
}

/// Activate VIP for the session user. Already-VIP accounts are a no-op.
pub fn upgrade_to_vip(state: &SharedState) -> Result<(), CommandError> {
    let mut guard = lock(state)?;
    let me = guard.current_user().cloned().ok_or(CommandError::NotLoggedIn)?;
    if me.is_vip {
        return Ok(());
    }
    guard.update_users(|users| {
        if let Some(u) = users.iter_mut().find(|u| u.id == me.id) {
            u.is_vip = true;
        }
    });
    guard.notify("VÄLKOMMEN TILL NATTSTAD VIP! 👑");
    tracing::info!(user = %me.username, "vip activated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{sample_user, shared_with_session};

    fn update_for(user: &UserProfile) -> ProfileUpdate {
        ProfileUpdate {
            display_name: user.display_name.clone(),
            username: user.username.clone(),
            city: user.city.clone(),
            gender: user.gender,
            age: 30,
            birth_month: 5,
            birth_day: 15,
            username_glow: None,
        }
    }

    #[test]
    fn city_change_is_vip_gated() {
        let user = sample_user("ada");
        let state = shared_with_session(&user);

        let mut update = update_for(&user);
        update.city = "Malmö".into();
        assert_eq!(
            update_profile(&state, update.clone()).unwrap_err(),
            CommandError::VipRequiredForCityChange
        );

        state.lock().unwrap().update_users(|users| {
            if let Some(u) = users.iter_mut().find(|u| u.id == user.id) {
                u.is_vip = true;
            }
        });
        let updated = update_profile(&state, update).unwrap();
        assert_eq!(updated.city, "Malmö");
    }

    #[test]
    fn username_change_rechecks_uniqueness() {
        let user = sample_user("ada");
        let state = shared_with_session(&user);

        let mut update = update_for(&user);
        update.username = "ADMIN".into(); // seeded account
        assert_eq!(
            update_profile(&state, update).unwrap_err(),
            CommandError::UsernameTaken
        );

        // changing only the case of your own name is fine
        let mut update = update_for(&user);
        update.username = "ADA".into();
        let updated = update_profile(&state, update).unwrap();
        assert_eq!(updated.username, "ADA");
    }

    #[test]
    fn the_session_copy_reflects_the_edit_immediately() {
        let user = sample_user("ada");
        let state = shared_with_session(&user);

        let mut update = update_for(&user);
        update.display_name = "Ada av Natten".into();
        update.username_glow = Some("#ec4899".into());
        update_profile(&state, update).unwrap();

        let guard = state.lock().unwrap();
        let session = guard.current_user().unwrap();
        assert_eq!(session.display_name, "Ada av Natten");
        assert_eq!(session.username_glow.as_deref(), Some("#ec4899"));
        let year = Utc::now().year() - 30;
        assert_eq!(session.dob, format!("{year}-05-15"));
    }

    #[test]
    fn dnd_toggles_back_and_forth() {
        let user = sample_user("ada");
        let state = shared_with_session(&user);

        assert_eq!(toggle_dnd(&state).unwrap(), UserStatus::Dnd);
        assert_eq!(toggle_dnd(&state).unwrap(), UserStatus::Active);
    }

    #[test]
    fn block_rules() {
        let user = sample_user("ada");
        let state = shared_with_session(&user);

        assert_eq!(
            block_user(&state, "  ").unwrap_err(),
            CommandError::UsernameRequired
        );
        assert_eq!(
            block_user(&state, "Ada").unwrap_err(),
            CommandError::CannotBlockSelf
        );
        assert_eq!(
            block_user(&state, "ingen-sådan").unwrap_err(),
            CommandError::UserNotFound
        );

        block_user(&state, "Serdar").unwrap();
        block_user(&state, "serdar").unwrap(); // set semantics
        {
            let guard = state.lock().unwrap();
            assert_eq!(
                guard.current_user().unwrap().blocked_users,
                vec!["serdar".to_string()]
            );
        }

        unblock_user(&state, "SERDAR").unwrap();
        assert!(state
            .lock()
            .unwrap()
            .current_user()
            .unwrap()
            .blocked_users
            .is_empty());
    }

    #[test]
    fn vip_upgrade_sets_the_flag_and_welcomes() {
        let user = sample_user("ada");
        let state = shared_with_session(&user);

        upgrade_to_vip(&state).unwrap();
        {
            let guard = state.lock().unwrap();
            assert!(guard.current_user().unwrap().is_vip);
            assert_eq!(
                guard.flags().global_notification.as_deref(),
                Some("VÄLKOMMEN TILL NATTSTAD VIP! 👑")
            );
        }

        // idempotent, and no second welcome
        state.lock().unwrap().clear_notification();
        upgrade_to_vip(&state).unwrap();
        assert!(state.lock().unwrap().flags().global_notification.is_none());
    }

    #[test]
    fn cosmetics_are_applied_to_the_master_list() {
        let user = sample_user("ada");
        let state = shared_with_session(&user);

        set_profile_image(&state, "data:image/png;base64,AAAA").unwrap();
        set_profile_animation(&state, Some(ProfileAnimation::Glow)).unwrap();

        let guard = state.lock().unwrap();
        let live = guard.find_user(user.id).unwrap();
        assert_eq!(live.profile_image, "data:image/png;base64,AAAA");
        assert_eq!(live.profile_animation, Some(ProfileAnimation::Glow));
    }
}
