//! The fixed first-run dataset.
//!
//! When no users blob exists yet, the mirror hydrates from these three
//! accounts: two administrators and the bot. Credentials are plaintext by
//! design of the product; the admin panel displays them verbatim.

use nattstad_shared::constants::BOT_ID;
use nattstad_shared::{Gender, UserProfile, UserStatus};
use uuid::{uuid, Uuid};

/// Id of the seeded system administrator.
pub const ADMIN_ID: Uuid = uuid!("00000000-0000-4000-8000-0000000000a1");

/// Id of the second seeded administrator account.
pub const SERDAR_ID: Uuid = uuid!("00000000-0000-4000-8000-0000000000a2");

/// The accounts present on a fresh install.
pub fn seed_users() -> Vec<UserProfile> {
    vec![
        UserProfile {
            id: ADMIN_ID,
            username: "admin".into(),
            display_name: "System Admin".into(),
            password: "123123".into(),
            dob: "1990-01-01".into(),
            gender: Gender::Man,
            city: "Stockholm".into(),
            pin: "984251".into(),
            is_admin: true,
            is_verified: true,
            is_vip: true,
            is_online: false,
            profile_image: "https://picsum.photos/seed/admin/200".into(),
            status: UserStatus::Active,
            blocked_users: vec![],
            friends: vec![],
            pending_requests: vec![],
            push_enabled: true,
            last_active: None,
            profile_animation: None,
            username_glow: None,
        },
        UserProfile {
            id: SERDAR_ID,
            username: "Serdar".into(),
            display_name: "Serdar".into(),
            password: "Serdar123!!".into(),
            dob: "1995-05-15".into(),
            gender: Gender::Man,
            city: "Stockholm".into(),
            pin: "112233".into(),
            is_admin: true,
            is_verified: true,
            is_vip: true,
            is_online: false,
            profile_image: "https://picsum.photos/seed/serdar/200".into(),
            status: UserStatus::Active,
            blocked_users: vec![],
            friends: vec![],
            pending_requests: vec![],
            push_enabled: true,
            last_active: None,
            profile_animation: None,
            username_glow: None,
        },
        UserProfile {
            id: BOT_ID,
            username: "NattBot".into(),
            display_name: "NattBot 🤖".into(),
            password: "bot-no-pass".into(),
            dob: "2005-01-01".into(),
            gender: Gender::Man,
            city: "CyberCity".into(),
            pin: "000000".into(),
            is_admin: false,
            is_verified: true,
            is_vip: true,
            is_online: true,
            profile_image: "https://api.dicebear.com/7.x/bottts/svg?seed=NattBot".into(),
            status: UserStatus::Active,
            blocked_users: vec![],
            friends: vec![],
            pending_requests: vec![],
            push_enabled: true,
            last_active: None,
            profile_animation: None,
            username_glow: Some("#f59e0b".into()),
        },
    ]
}
