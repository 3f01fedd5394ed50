//! Domain model structs for the Nattstad state core.
//!
//! These are the four persisted shapes (users, messages, groups, app flags)
//! plus their enums. All structs serialize with camelCase keys -- the blob
//! layout in local storage is part of the external interface and must stay
//! stable across sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// Profile gender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Man,
    Kvinna,
}

/// Presence status. `Dnd` hides the user from discovery and online counts
/// even while the connection flag is set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Dnd,
    Offline,
}

/// Cosmetic profile animation (VIP customization).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileAnimation {
    Pulse,
    Glow,
    BorderFlow,
}

/// A registered account and social-graph node.
///
/// `id` is immutable and unique. `friends` and `pending_requests` carry set
/// semantics: no duplicates, and a user is never both a friend and a pending
/// requester of the same account. Username uniqueness (case-insensitive) is
/// enforced at registration and profile-edit time, not here.
///
/// Password and PIN are stored in plaintext. This is a prototype, not a
/// credential store; the admin panel reveals both fields verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub password: String,
    /// Date of birth as `YYYY-MM-DD`. Age is derived from the year component
    /// only, so this stays a plain string rather than a calendar date.
    pub dob: String,
    pub gender: Gender,
    pub city: String,
    /// 6-digit recovery PIN.
    pub pin: String,
    pub is_admin: bool,
    pub is_verified: bool,
    pub is_vip: bool,
    pub is_online: bool,
    /// Reference to the profile image (URL or data URI).
    pub profile_image: String,
    pub status: UserStatus,
    /// Blocked usernames, stored lowercase.
    pub blocked_users: Vec<String>,
    /// Ids of confirmed friends.
    pub friends: Vec<Uuid>,
    /// Ids of users who sent this account a friend request.
    pub pending_requests: Vec<Uuid>,
    pub push_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_animation: Option<ProfileAnimation>,
    /// Hex color for the username glow effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_glow: Option<String>,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// What a message carries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Voice,
    Image,
    Location,
    Nudge,
    Gif,
}

/// A directed communication unit between two user ids.
///
/// Sender, recipient, type and content are immutable once created; only the
/// read and liked flags mutate afterwards. Ordering is by `timestamp`, with
/// ties resolved by insertion order in the message collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    /// Always a user id. Group conversations are modeled via group
    /// membership, not message fan-out.
    pub recipient_id: Uuid,
    /// Text, or a media reference for image/gif/location payloads.
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
    pub is_delivered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Group chat
// ---------------------------------------------------------------------------

/// A named group. The owner is always a member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupChat {
    pub id: Uuid,
    pub name: String,
    pub members: Vec<Uuid>,
    pub owner_id: Uuid,
}

// ---------------------------------------------------------------------------
// App-wide flags
// ---------------------------------------------------------------------------

/// Process-wide flags: the maintenance gate and the single pending
/// broadcast notification.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppFlags {
    pub maintenance_mode: bool,
    #[serde(default)]
    pub global_notification: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BOT_ID;

    #[test]
    fn message_serializes_with_camel_case_keys() {
        let msg = Message {
            id: Uuid::nil(),
            sender_id: Uuid::nil(),
            recipient_id: BOT_ID,
            content: "hej".into(),
            kind: MessageType::Text,
            timestamp: Utc::now(),
            is_read: false,
            is_delivered: true,
            liked: None,
            read_at: None,
        };

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"senderId\""));
        assert!(json.contains("\"recipientId\""));
        assert!(json.contains("\"type\":\"text\""));
        assert!(json.contains("\"isDelivered\":true"));
        // liked is omitted until first toggled; readAt serializes as null.
        assert!(!json.contains("\"liked\""));
        assert!(json.contains("\"readAt\":null"));
    }

    #[test]
    fn user_round_trips_through_json() {
        let user = UserProfile {
            id: Uuid::nil(),
            username: "ada".into(),
            display_name: "Ada".into(),
            password: "Lovelace!".into(),
            dob: "1995-12-10".into(),
            gender: Gender::Kvinna,
            city: "Stockholm".into(),
            pin: "918273".into(),
            is_admin: false,
            is_verified: true,
            is_vip: false,
            is_online: true,
            profile_image: "https://picsum.photos/seed/ada/200".into(),
            status: UserStatus::Active,
            blocked_users: vec!["eve".into()],
            friends: vec![BOT_ID],
            pending_requests: vec![],
            push_enabled: true,
            last_active: None,
            profile_animation: Some(ProfileAnimation::BorderFlow),
            username_glow: Some("#f59e0b".into()),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"status\":\"active\""));
        assert!(json.contains("\"profileAnimation\":\"border-flow\""));

        let back: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
