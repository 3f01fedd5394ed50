//! Presence heartbeat and typing debounce.
//!
//! Together with the bot reply delay in [`crate::bot`], these are the only
//! asynchronous operations in the system: independent, uncoordinated timers
//! whose lifetime is tied to a guard value. Dropping the guard aborts the
//! task; nothing else coordinates them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use nattstad_shared::constants::{PRESENCE_INTERVAL, TYPING_CLEAR_DELAY};

use crate::state::SharedState;

/// Refreshes the logged-in user's online flag and last-active timestamp,
/// immediately and then on every interval tick, for as long as this guard
/// is alive.
pub struct PresenceHeartbeat {
    task: JoinHandle<()>,
}

impl PresenceHeartbeat {
    pub fn spawn(state: SharedState) -> Self {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(PRESENCE_INTERVAL);
            loop {
                ticker.tick().await;
                let Ok(mut guard) = state.lock() else {
                    return;
                };
                let Some(id) = guard.current_user().map(|u| u.id) else {
                    continue;
                };
                guard.update_users(|users| {
                    if let Some(u) = users.iter_mut().find(|u| u.id == id) {
                        u.is_online = true;
                        u.last_active = Some(Utc::now());
                    }
                });
            }
        });
        Self { task }
    }
}

impl Drop for PresenceHeartbeat {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// One debounce timer per typing sender. Every keystroke re-arms the clear
/// timer; emptying the input clears the indicator at once.
pub struct TypingMonitor {
    state: SharedState,
    timers: Mutex<HashMap<Uuid, JoinHandle<()>>>,
}

impl TypingMonitor {
    pub fn new(state: SharedState) -> Arc<Self> {
        Arc::new(Self {
            state,
            timers: Mutex::new(HashMap::new()),
        })
    }

    /// `sender_id` typed something addressed at `recipient_id`.
    pub fn keystroke(self: &Arc<Self>, sender_id: Uuid, recipient_id: Uuid) {
        if let Ok(mut guard) = self.state.lock() {
            guard.set_typing(sender_id, Some(recipient_id));
        }

        let monitor = Arc::clone(self);
        let task = tokio::spawn(async move {
            tokio::time::sleep(TYPING_CLEAR_DELAY).await;
            if let Ok(mut guard) = monitor.state.lock() {
                guard.set_typing(sender_id, None);
            }
            if let Ok(mut timers) = monitor.timers.lock() {
                timers.remove(&sender_id);
            }
        });

        if let Ok(mut timers) = self.timers.lock() {
            if let Some(previous) = timers.insert(sender_id, task) {
                previous.abort();
            }
        }
    }

    /// The input was emptied (or a message was sent): clear right away.
    pub fn cleared(&self, sender_id: Uuid) {
        if let Ok(mut timers) = self.timers.lock() {
            if let Some(task) = timers.remove(&sender_id) {
                task.abort();
            }
        }
        if let Ok(mut guard) = self.state.lock() {
            guard.set_typing(sender_id, None);
        }
    }
}

impl Drop for TypingMonitor {
    fn drop(&mut self) {
        if let Ok(mut timers) = self.timers.lock() {
            for (_, task) in timers.drain() {
                task.abort();
            }
        }
    }
}
