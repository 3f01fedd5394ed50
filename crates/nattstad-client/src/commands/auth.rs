//! Login, registration, password reset and logout.

use chrono::{Datelike, Utc};
use uuid::Uuid;

use nattstad_shared::constants::{BOT_ID, MAX_AGE, MIN_AGE};
use nattstad_shared::validate;
use nattstad_shared::{Gender, UserProfile, UserStatus};

use crate::commands::lock;
use crate::error::CommandError;
use crate::state::SharedState;

/// Payload of the two-step registration form.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub display_name: String,
    pub password: String,
    pub gender: Gender,
    pub city: String,
    pub pin: String,
    pub age: Option<u32>,
    pub birth_month: Option<u32>,
    pub birth_day: Option<u32>,
    pub accepted_terms: bool,
}

/// Authenticate against the master list. Username matching is
/// case-insensitive, the password must match exactly, and maintenance mode
/// rejects everyone but admins. On success the user is marked online and
/// becomes the session user.
pub fn login(
    state: &SharedState,
    username: &str,
    password: &str,
) -> Result<UserProfile, CommandError> {
    let mut guard = lock(state)?;

    let needle = username.to_lowercase();
    let user = guard
        .users()
        .iter()
        .find(|u| u.username.to_lowercase() == needle && u.password == password)
        .cloned()
        .ok_or(CommandError::BadCredentials)?;

    if guard.flags().maintenance_mode && !user.is_admin {
        return Err(CommandError::MaintenanceMode);
    }

    guard.update_users(|users| {
        if let Some(u) = users.iter_mut().find(|u| u.id == user.id) {
            u.is_online = true;
        }
    });
    let live = guard.find_user(user.id).cloned().unwrap_or(user);
    guard.set_current_user(Some(live.clone()));

    tracing::info!(user = %live.username, "logged in");
    Ok(live)
}

/// Create an account. Validation runs in the order the registration form
/// checks it; the first failure wins. The new account auto-friends the bot
/// and becomes the session user.
pub fn register(state: &SharedState, form: NewAccount) -> Result<UserProfile, CommandError> {
    let mut guard = lock(state)?;

    // step 1: identity
    if form.username.trim().is_empty() {
        return Err(CommandError::UsernameRequired);
    }
    if form.display_name.trim().is_empty() {
        return Err(CommandError::DisplayNameRequired);
    }
    if guard.find_user_by_username(&form.username).is_some() {
        return Err(CommandError::UsernameTaken);
    }

    // step 2: credentials and birth data
    if form.password.is_empty() {
        return Err(CommandError::PasswordRequired);
    }
    let (Some(age), Some(month), Some(day)) = (form.age, form.birth_month, form.birth_day) else {
        return Err(CommandError::BirthDataMissing);
    };
    if age < MIN_AGE {
        return Err(CommandError::UnderAge);
    }
    if age > MAX_AGE {
        return Err(CommandError::InvalidAge);
    }
    if !validate::is_valid_pin(&form.pin) {
        return Err(CommandError::PinRequired);
    }
    if !validate::password_meets_policy(&form.password) {
        return Err(CommandError::WeakPassword);
    }
    if validate::is_simple_pin(&form.pin) {
        return Err(CommandError::SimplePin);
    }
    if !form.accepted_terms {
        return Err(CommandError::TermsNotAccepted);
    }

    let birth_year = Utc::now().year() - age as i32;
    let dob = format!("{birth_year}-{month:02}-{day:02}");

    let user = UserProfile {
        id: Uuid::new_v4(),
        username: form.username.clone(),
        display_name: form.display_name,
        password: form.password,
        dob,
        gender: form.gender,
        city: form.city,
        pin: form.pin,
        is_admin: false,
        is_verified: false,
        is_vip: false,
        is_online: true,
        profile_image: format!("https://picsum.photos/seed/{}/200", form.username),
        status: UserStatus::Active,
        blocked_users: vec![],
        // every new account starts with the bot as a friend
        friends: vec![BOT_ID],
        pending_requests: vec![],
        push_enabled: true,
        last_active: None,
        profile_animation: None,
        username_glow: None,
    };

    guard.update_users(|users| users.push(user.clone()));
    guard.set_current_user(Some(user.clone()));

    tracing::info!(user = %user.username, "account registered");
    Ok(user)
}

/// First step of the forgot-password flow: the username/PIN pair must match
/// an account.
pub fn verify_reset_pin(state: &SharedState, username: &str, pin: &str) -> Result<(), CommandError> {
    let guard = lock(state)?;
    let matches = guard
        .find_user_by_username(username)
        .map(|u| u.pin == pin)
        .unwrap_or(false);
    if matches {
        Ok(())
    } else {
        Err(CommandError::PinMismatch)
    }
}

/// Second step: store a new password for the account. Same policy as
/// registration.
pub fn reset_password(
    state: &SharedState,
    username: &str,
    new_password: &str,
) -> Result<(), CommandError> {
    if new_password.is_empty() {
        return Err(CommandError::PasswordRequired);
    }
    if !validate::password_meets_policy(new_password) {
        return Err(CommandError::WeakPassword);
    }

    let mut guard = lock(state)?;
    let needle = username.to_lowercase();
    guard.update_users(|users| {
        if let Some(u) = users.iter_mut().find(|u| u.username.to_lowercase() == needle) {
            u.password = new_password.to_string();
        }
    });
    Ok(())
}

/// End the session: offline in the master list, session pointer cleared.
pub fn logout(state: &SharedState) -> Result<(), CommandError> {
    lock(state)?.logout();
    Ok(())
}
