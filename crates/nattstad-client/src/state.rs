//! The shared state container.
//!
//! [`AppState`] owns the four collections, the typing map and the mirror
//! handle. Screens and tasks reach it as `Arc<Mutex<AppState>>`; every
//! mutation funnels through a method here, and every mutation ends the same
//! way: the cached current user is reconciled against the master list, then
//! all five blobs are mirrored to storage.
//!
//! The container holds no policy. Operations are synchronous, in-memory and
//! cannot fail -- duplicate usernames, VIP gating and the like are enforced
//! by the command layer before anything lands here.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use nattstad_shared::{AppFlags, GroupChat, Message, UserProfile};
use nattstad_store::{Mirror, Result as StoreResult, StateSnapshot};

/// How the state is shared between screens, commands and timer tasks.
pub type SharedState = Arc<Mutex<AppState>>;

/// Central application state.
pub struct AppState {
    data: StateSnapshot,
    /// Who each sender is typing to. At most one target per sender; a
    /// cleared indicator is simply absent. Not persisted.
    typing: HashMap<Uuid, Uuid>,
    mirror: Mirror,
}

impl AppState {
    /// Wrap an already-hydrated snapshot.
    pub fn new(mirror: Mirror, snapshot: StateSnapshot) -> Self {
        Self {
            data: snapshot,
            typing: HashMap::new(),
            mirror,
        }
    }

    /// Hydrate from the mirror (seed accounts on first run).
    pub fn open(mirror: Mirror) -> StoreResult<Self> {
        let snapshot = mirror.load()?;
        Ok(Self::new(mirror, snapshot))
    }

    /// A fully in-memory state with the seed accounts. Used by tests and
    /// ephemeral sessions.
    pub fn in_memory() -> Self {
        Self::new(Mirror::in_memory(), StateSnapshot::seeded())
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(Mutex::new(self))
    }

    // -- reads ------------------------------------------------------------

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.data.current_user.as_ref()
    }

    pub fn users(&self) -> &[UserProfile] {
        &self.data.users
    }

    pub fn messages(&self) -> &[Message] {
        &self.data.messages
    }

    pub fn groups(&self) -> &[GroupChat] {
        &self.data.groups
    }

    pub fn flags(&self) -> &AppFlags {
        &self.data.flags
    }

    pub fn find_user(&self, id: Uuid) -> Option<&UserProfile> {
        self.data.users.iter().find(|u| u.id == id)
    }

    /// Case-insensitive username lookup.
    pub fn find_user_by_username(&self, username: &str) -> Option<&UserProfile> {
        let needle = username.to_lowercase();
        self.data
            .users
            .iter()
            .find(|u| u.username.to_lowercase() == needle)
    }

    /// Who `sender_id` is currently typing to, if anyone.
    pub fn typing_target(&self, sender_id: Uuid) -> Option<Uuid> {
        self.typing.get(&sender_id).copied()
    }

    // -- message operations ----------------------------------------------

    /// Append unconditionally; sender and recipient are not validated.
    pub fn add_message(&mut self, message: Message) {
        self.data.messages.push(message);
        self.after_change();
    }

    /// Remove exactly one message by id; absent ids are a no-op.
    pub fn delete_message(&mut self, id: Uuid) -> bool {
        let before = self.data.messages.len();
        self.data.messages.retain(|m| m.id != id);
        let removed = self.data.messages.len() < before;
        if removed {
            self.after_change();
        }
        removed
    }

    /// Remove every message between the current user and `partner_id`, in
    /// both directions. Irreversible; any confirmation is a UI concern.
    pub fn delete_chat(&mut self, partner_id: Uuid) -> usize {
        let Some(me) = self.data.current_user.as_ref().map(|u| u.id) else {
            return 0;
        };
        let before = self.data.messages.len();
        self.data.messages.retain(|m| {
            !((m.sender_id == me && m.recipient_id == partner_id)
                || (m.sender_id == partner_id && m.recipient_id == me))
        });
        let removed = before - self.data.messages.len();
        if removed > 0 {
            self.after_change();
        }
        removed
    }

    /// Mark everything `partner_id` sent the current user as read, stamping
    /// the read time on the transition only. Idempotent.
    pub fn mark_as_read(&mut self, partner_id: Uuid) {
        let Some(me) = self.data.current_user.as_ref().map(|u| u.id) else {
            return;
        };
        let now = Utc::now();
        let mut changed = false;
        for m in &mut self.data.messages {
            if m.sender_id == partner_id && m.recipient_id == me && !m.is_read {
                m.is_read = true;
                m.read_at = Some(now);
                changed = true;
            }
        }
        if changed {
            self.after_change();
        }
    }

    /// Flip the liked flag on exactly one message.
    pub fn toggle_like(&mut self, id: Uuid) {
        let mut changed = false;
        for m in &mut self.data.messages {
            if m.id == id {
                m.liked = Some(!m.liked.unwrap_or(false));
                changed = true;
                break;
            }
        }
        if changed {
            self.after_change();
        }
    }

    // -- group operations -------------------------------------------------

    /// Append without membership validation.
    pub fn add_group(&mut self, group: GroupChat) {
        self.data.groups.push(group);
        self.after_change();
    }

    pub fn delete_group(&mut self, id: Uuid) -> bool {
        let before = self.data.groups.len();
        self.data.groups.retain(|g| g.id != id);
        let removed = self.data.groups.len() < before;
        if removed {
            self.after_change();
        }
        removed
    }

    // -- typing -----------------------------------------------------------

    /// Record or clear the single outstanding typing target for a sender.
    /// Overwrites any prior value. The typing map is never persisted.
    pub fn set_typing(&mut self, sender_id: Uuid, recipient: Option<Uuid>) {
        match recipient {
            Some(recipient_id) => {
                self.typing.insert(sender_id, recipient_id);
            }
            None => {
                self.typing.remove(&sender_id);
            }
        }
    }

    // -- session and master list -------------------------------------------

    pub fn set_current_user(&mut self, user: Option<UserProfile>) {
        self.data.current_user = user;
        self.after_change();
    }

    /// Run one pass over the master user list. Multi-record changes (mutual
    /// friendship, removals) go through a single call so they commit
    /// together.
    pub fn update_users<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Vec<UserProfile>),
    {
        f(&mut self.data.users);
        self.after_change();
    }

    /// Mark the current user offline in the master list, then drop the
    /// session pointer.
    pub fn logout(&mut self) {
        if let Some(me) = self.data.current_user.as_ref().map(|u| u.id) {
            if let Some(u) = self.data.users.iter_mut().find(|u| u.id == me) {
                u.is_online = false;
            }
            tracing::info!(user = %me, "logged out");
        }
        self.data.current_user = None;
        self.after_change();
    }

    // -- app flags ----------------------------------------------------------

    /// Replace the single pending broadcast notification.
    pub fn notify(&mut self, text: impl Into<String>) {
        self.data.flags.global_notification = Some(text.into());
        self.after_change();
    }

    /// Called by the presentation layer when the notification's display
    /// timeout elapses.
    pub fn clear_notification(&mut self) {
        self.data.flags.global_notification = None;
        self.after_change();
    }

    pub fn set_maintenance(&mut self, enabled: bool) {
        self.data.flags.maintenance_mode = enabled;
        self.after_change();
    }

    // -- internals ----------------------------------------------------------

    /// Runs after every mutation: reconcile the session copy, then mirror.
    fn after_change(&mut self) {
        self.reconcile_current_user();
        if let Err(e) = self.mirror.save(&self.data) {
            tracing::warn!(error = %e, "state mirror write failed");
        }
    }

    /// Replace the cached current user with the master-list entry of the
    /// same id iff the two differ by value. Replacement, not merge: the
    /// session always reflects the latest committed state without feeding
    /// anything back into the master list.
    fn reconcile_current_user(&mut self) {
        let Some(current) = self.data.current_user.as_ref() else {
            return;
        };
        if let Some(live) = self.data.users.iter().find(|u| u.id == current.id) {
            if live != current {
                self.data.current_user = Some(live.clone());
            }
        }
    }
}
