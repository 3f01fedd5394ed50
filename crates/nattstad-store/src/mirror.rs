//! The persistence mirror.
//!
//! [`Mirror::save`] serializes the whole snapshot under five fixed keys on
//! every call -- no diffing, no partial writes, no versioning. A failed key
//! does not stop the remaining keys from being written; the first error is
//! reported after all five were attempted. [`Mirror::load`] tolerates absent
//! keys (first run) but a present blob that fails to deserialize is an
//! error: there is no migration path between schema shapes.

use nattstad_shared::{AppFlags, GroupChat, Message, UserProfile};

use crate::error::Result;
use crate::seed;
use crate::storage::{FileStorage, MemoryStorage, Storage};

/// Storage key of the authenticated user blob (a user object or `null`).
pub const KEY_CURRENT_USER: &str = "nattstad_user";
/// Storage key of the full user collection.
pub const KEY_USERS: &str = "nattstad_users";
/// Storage key of the full message collection.
pub const KEY_MESSAGES: &str = "nattstad_messages";
/// Storage key of the full group collection.
pub const KEY_GROUPS: &str = "nattstad_groups";
/// Storage key of the app-wide flags blob.
pub const KEY_APP_STATE: &str = "nattstad_app_state";

/// Everything the mirror persists, in one value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    pub current_user: Option<UserProfile>,
    pub users: Vec<UserProfile>,
    pub messages: Vec<Message>,
    pub groups: Vec<GroupChat>,
    pub flags: AppFlags,
}

impl StateSnapshot {
    /// The first-run snapshot: seed accounts, nothing else.
    pub fn seeded() -> Self {
        Self {
            users: seed::seed_users(),
            ..Self::default()
        }
    }
}

/// Serializes snapshots to a [`Storage`] backend and hydrates them back.
pub struct Mirror {
    storage: Box<dyn Storage>,
}

impl Mirror {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self { storage }
    }

    /// A mirror over the platform data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Box::new(FileStorage::new()?)))
    }

    /// A mirror that never touches disk.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::default()))
    }

    /// Hydrate a snapshot. Absent keys fall back: no user logged in, seed
    /// accounts, empty messages and groups, default flags.
    pub fn load(&self) -> Result<StateSnapshot> {
        let current_user = match self.storage.get(KEY_CURRENT_USER)? {
            Some(blob) => serde_json::from_str(&blob)?,
            None => None,
        };
        let users = match self.storage.get(KEY_USERS)? {
            Some(blob) => serde_json::from_str(&blob)?,
            None => seed::seed_users(),
        };
        let messages = match self.storage.get(KEY_MESSAGES)? {
            Some(blob) => serde_json::from_str(&blob)?,
            None => Vec::new(),
        };
        let groups = match self.storage.get(KEY_GROUPS)? {
            Some(blob) => serde_json::from_str(&blob)?,
            None => Vec::new(),
        };
        let flags = match self.storage.get(KEY_APP_STATE)? {
            Some(blob) => serde_json::from_str(&blob)?,
            None => AppFlags::default(),
        };

        Ok(StateSnapshot {
            current_user,
            users,
            messages,
            groups,
            flags,
        })
    }

    /// Write all five blobs unconditionally. Keeps going past a failed key
    /// and returns the first error afterwards.
    pub fn save(&mut self, snapshot: &StateSnapshot) -> Result<()> {
        let blobs = [
            (KEY_CURRENT_USER, serde_json::to_string(&snapshot.current_user)),
            (KEY_USERS, serde_json::to_string(&snapshot.users)),
            (KEY_MESSAGES, serde_json::to_string(&snapshot.messages)),
            (KEY_GROUPS, serde_json::to_string(&snapshot.groups)),
            (KEY_APP_STATE, serde_json::to_string(&snapshot.flags)),
        ];

        let mut outcome = Ok(());
        for (key, blob) in blobs {
            let result = match blob {
                Ok(json) => self.storage.set(key, &json),
                Err(e) => Err(e.into()),
            };
            if let Err(e) = result {
                tracing::warn!(key, error = %e, "failed to mirror blob");
                if outcome.is_ok() {
                    outcome = Err(e);
                }
            }
        }
        outcome
    }
}
