//! Derived view computations.
//!
//! Pure reads over the raw collections. The store maintains no indices or
//! caches, so every screen-level list -- chat partners, unread badges,
//! online counts, friend lists -- is recomputed from scratch here.

use chrono::{Datelike, Utc};
use uuid::Uuid;

use nattstad_shared::constants::BOT_ID;
use nattstad_shared::{Message, UserProfile, UserStatus};

/// Relationship between the viewer and another profile. Exactly one state
/// holds for any pair at any time; it is derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendState {
    None,
    /// They asked to be my friend.
    Incoming,
    /// I asked to be theirs.
    Outgoing,
    Friend,
}

pub fn friend_state(me: &UserProfile, target: &UserProfile) -> FriendState {
    if me.friends.contains(&target.id) {
        FriendState::Friend
    } else if me.pending_requests.contains(&target.id) {
        FriendState::Incoming
    } else if target.pending_requests.contains(&me.id) {
        FriendState::Outgoing
    } else {
        FriendState::None
    }
}

/// Distinct counterpart ids across all messages involving `me`, in order of
/// first appearance.
pub fn chat_partners(me: Uuid, messages: &[Message]) -> Vec<Uuid> {
    let mut partners = Vec::new();
    for m in messages {
        let partner = if m.sender_id == me {
            m.recipient_id
        } else if m.recipient_id == me {
            m.sender_id
        } else {
            continue;
        };
        if !partners.contains(&partner) {
            partners.push(partner);
        }
    }
    partners
}

/// Both directions of one conversation, oldest first. The sort is stable,
/// so equal timestamps keep their insertion order.
pub fn conversation<'a>(me: Uuid, partner: Uuid, messages: &'a [Message]) -> Vec<&'a Message> {
    let mut msgs: Vec<&Message> = messages
        .iter()
        .filter(|m| {
            (m.sender_id == me && m.recipient_id == partner)
                || (m.sender_id == partner && m.recipient_id == me)
        })
        .collect();
    msgs.sort_by_key(|m| m.timestamp);
    msgs
}

/// Messages from `partner` to `me` still unread.
pub fn unread_count(me: Uuid, partner: Uuid, messages: &[Message]) -> usize {
    messages
        .iter()
        .filter(|m| m.sender_id == partner && m.recipient_id == me && !m.is_read)
        .count()
}

/// The newest message of one conversation.
pub fn last_message<'a>(me: Uuid, partner: Uuid, messages: &'a [Message]) -> Option<&'a Message> {
    conversation(me, partner, messages).pop()
}

/// A user is visibly online when connected and not in do-not-disturb.
pub fn is_visibly_online(user: &UserProfile) -> bool {
    user.is_online && user.status != UserStatus::Dnd
}

/// Everyone visibly online except the viewer.
pub fn online_count(users: &[UserProfile], me: Uuid) -> usize {
    users
        .iter()
        .filter(|u| u.id != me && is_visibly_online(u))
        .count()
}

pub fn online_count_in_city(users: &[UserProfile], me: Uuid, city: &str) -> usize {
    users
        .iter()
        .filter(|u| u.id != me && is_visibly_online(u) && u.city == city)
        .count()
}

/// The discovery listing for one city: its visibly-online users, with the
/// bot always present regardless of which city it claims to live in.
pub fn discovery_listing<'a>(
    users: &'a [UserProfile],
    me: Uuid,
    city: &str,
) -> Vec<&'a UserProfile> {
    users
        .iter()
        .filter(|u| {
            if u.id == me || !is_visibly_online(u) {
                return false;
            }
            u.id == BOT_ID || u.city == city
        })
        .collect()
}

/// Case-insensitive substring search over usernames and display names,
/// excluding the viewer. A blank query matches nothing.
pub fn search_users<'a>(users: &'a [UserProfile], me: Uuid, query: &str) -> Vec<&'a UserProfile> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }
    users
        .iter()
        .filter(|u| {
            u.id != me
                && (u.username.to_lowercase().contains(&q)
                    || u.display_name.to_lowercase().contains(&q))
        })
        .collect()
}

/// Sort orders for the friend list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Name,
    Online,
    Recent,
}

fn compare(mode: SortMode, a: &UserProfile, b: &UserProfile) -> std::cmp::Ordering {
    match mode {
        SortMode::Name => a
            .display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase()),
        SortMode::Online => b
            .is_online
            .cmp(&a.is_online)
            .then_with(|| compare(SortMode::Name, a, b)),
        SortMode::Recent => b.last_active.cmp(&a.last_active),
    }
}

/// The viewer's friends, sorted.
pub fn friends_of<'a>(
    users: &'a [UserProfile],
    me: &UserProfile,
    mode: SortMode,
) -> Vec<&'a UserProfile> {
    let mut list: Vec<&UserProfile> = users
        .iter()
        .filter(|u| me.friends.contains(&u.id))
        .collect();
    list.sort_by(|a, b| compare(mode, a, b));
    list
}

/// The viewer's friends currently online, sorted.
pub fn online_friends<'a>(
    users: &'a [UserProfile],
    me: &UserProfile,
    mode: SortMode,
) -> Vec<&'a UserProfile> {
    let mut list: Vec<&UserProfile> = users
        .iter()
        .filter(|u| me.friends.contains(&u.id) && u.is_online)
        .collect();
    list.sort_by(|a, b| compare(mode, a, b));
    list
}

/// Profiles that have asked to be the viewer's friend.
pub fn pending_requesters<'a>(
    users: &'a [UserProfile],
    me: &UserProfile,
) -> Vec<&'a UserProfile> {
    users
        .iter()
        .filter(|u| me.pending_requests.contains(&u.id))
        .collect()
}

/// Age counted from the birth year alone. Month and day are ignored, so
/// everyone born in the same calendar year shares an age all year long.
/// An unparsable date yields 0.
pub fn age_in_year(dob: &str, year: i32) -> i32 {
    let birth_year = dob
        .split('-')
        .next()
        .and_then(|y| y.parse::<i32>().ok())
        .unwrap_or(year);
    year - birth_year
}

/// Age as of the current calendar year.
pub fn age(dob: &str) -> i32 {
    age_in_year(dob, Utc::now().year())
}
