//! Helpers shared by the unit tests in this crate.

use chrono::Utc;
use uuid::Uuid;

use nattstad_shared::{Gender, Message, MessageType, UserProfile, UserStatus};

use crate::state::{AppState, SharedState};

pub(crate) fn sample_user(name: &str) -> UserProfile {
    UserProfile {
        id: Uuid::new_v4(),
        username: name.to_string(),
        display_name: name.to_string(),
        password: "Test!pass".into(),
        dob: "1995-05-15".into(),
        gender: Gender::Kvinna,
        city: "Stockholm".into(),
        pin: "918273".into(),
        is_admin: false,
        is_verified: false,
        is_vip: false,
        is_online: true,
        profile_image: format!("https://picsum.photos/seed/{name}/200"),
        status: UserStatus::Active,
        blocked_users: vec![],
        friends: vec![],
        pending_requests: vec![],
        push_enabled: true,
        last_active: None,
        profile_animation: None,
        username_glow: None,
    }
}

pub(crate) fn message(sender: Uuid, recipient: Uuid, content: &str) -> Message {
    Message {
        id: Uuid::new_v4(),
        sender_id: sender,
        recipient_id: recipient,
        content: content.into(),
        kind: MessageType::Text,
        timestamp: Utc::now(),
        is_read: false,
        is_delivered: true,
        liked: None,
        read_at: None,
    }
}

/// An in-memory shared state with `user` pushed to the master list and
/// logged in.
pub(crate) fn shared_with_session(user: &UserProfile) -> SharedState {
    let mut state = AppState::in_memory();
    state.update_users(|users| users.push(user.clone()));
    state.set_current_user(Some(user.clone()));
    state.into_shared()
}
