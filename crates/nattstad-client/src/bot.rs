//! The NattBot auto-responder.
//!
//! Sending any message to the bot id schedules exactly one reply after a
//! fixed delay. While the delay runs, the bot's typing indicator points at
//! the sender. A newer trigger replaces a pending one. The pending reply is
//! the only cancellable operation in the system: it dies with its
//! triggering message or with the responder itself.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use rand::Rng;
use tokio::task::JoinHandle;
use uuid::Uuid;

use nattstad_shared::constants::{
    BOT_HEART_REPLY, BOT_ID, BOT_IMAGE_REPLY, BOT_LOCATION_REPLY, BOT_REPLY_DELAY, BOT_RESPONSES,
    HEART_GLYPH,
};
use nattstad_shared::{Message, MessageType};

use crate::state::SharedState;

struct PendingReply {
    trigger_id: Uuid,
    task: JoinHandle<()>,
}

/// Simulated conversational partner behind the fixed bot identity.
pub struct BotResponder {
    state: SharedState,
    pending: Mutex<Option<PendingReply>>,
}

impl BotResponder {
    pub fn new(state: SharedState) -> Arc<Self> {
        Arc::new(Self {
            state,
            pending: Mutex::new(None),
        })
    }

    /// Look at a freshly appended message and schedule a reply when it was
    /// sent by the authenticated user to the bot. Any other message is
    /// ignored.
    pub fn observe(self: &Arc<Self>, message: &Message) {
        if message.recipient_id != BOT_ID {
            return;
        }
        {
            let Ok(mut guard) = self.state.lock() else {
                return;
            };
            match guard.current_user() {
                Some(user) if user.id == message.sender_id => {}
                _ => return,
            }
            guard.set_typing(BOT_ID, Some(message.sender_id));
        }

        let responder = Arc::clone(self);
        let trigger = message.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(BOT_REPLY_DELAY).await;
            responder.deliver(&trigger);
        });

        let Ok(mut pending) = self.pending.lock() else {
            task.abort();
            return;
        };
        if let Some(previous) = pending.replace(PendingReply {
            trigger_id: message.id,
            task,
        }) {
            previous.task.abort();
        }
    }

    /// Abort the pending reply if its triggering message no longer exists
    /// in the collection. Called after single-message and whole-chat
    /// deletions.
    pub fn cancel_if_trigger_removed(&self) {
        let Ok(mut pending) = self.pending.lock() else {
            return;
        };
        let Some(reply) = pending.as_ref() else {
            return;
        };
        let trigger_alive = match self.state.lock() {
            Ok(guard) => guard.messages().iter().any(|m| m.id == reply.trigger_id),
            Err(_) => return,
        };
        if !trigger_alive {
            if let Some(reply) = pending.take() {
                reply.task.abort();
            }
            if let Ok(mut guard) = self.state.lock() {
                guard.set_typing(BOT_ID, None);
            }
            tracing::debug!("pending bot reply cancelled, trigger deleted");
        }
    }

    fn deliver(&self, trigger: &Message) {
        let content = compose_reply(trigger);
        {
            let Ok(mut guard) = self.state.lock() else {
                return;
            };
            let reply = Message {
                id: Uuid::new_v4(),
                sender_id: BOT_ID,
                recipient_id: trigger.sender_id,
                content,
                kind: MessageType::Text,
                timestamp: Utc::now(),
                is_read: false,
                is_delivered: true,
                liked: None,
                read_at: None,
            };
            guard.add_message(reply);
            guard.set_typing(BOT_ID, None);
        }
        if let Ok(mut pending) = self.pending.lock() {
            *pending = None;
        }
    }
}

impl Drop for BotResponder {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(reply) = pending.take() {
                reply.task.abort();
            }
        }
    }
}

/// Pick the reply content for a trigger. Location and image triggers and
/// the bare heart glyph get canned answers; anything else draws uniformly
/// from the default phrase list.
fn compose_reply(trigger: &Message) -> String {
    match trigger.kind {
        MessageType::Location => return BOT_LOCATION_REPLY.to_string(),
        MessageType::Image => return BOT_IMAGE_REPLY.to_string(),
        _ => {}
    }
    if trigger.content == HEART_GLYPH {
        return BOT_HEART_REPLY.to_string();
    }
    let index = rand::thread_rng().gen_range(0..BOT_RESPONSES.len());
    BOT_RESPONSES[index].to_string()
}
