//! Sending and curating direct messages.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use nattstad_shared::constants::NUDGE_CONTENT;
use nattstad_shared::{Message, MessageType};

use crate::bot::BotResponder;
use crate::commands::lock;
use crate::error::CommandError;
use crate::state::SharedState;

/// Compose and append a message from the session user. Delivery is
/// immediate -- there is no wire -- and the sender's typing indicator is
/// cleared. The bot responder gets to look at every appended message.
pub fn send_message(
    state: &SharedState,
    bot: &Arc<BotResponder>,
    recipient_id: Uuid,
    kind: MessageType,
    content: impl Into<String>,
) -> Result<Message, CommandError> {
    let content = content.into();
    if kind == MessageType::Text && content.trim().is_empty() {
        return Err(CommandError::EmptyMessage);
    }

    let message = {
        let mut guard = lock(state)?;
        let sender_id = guard
            .current_user()
            .map(|u| u.id)
            .ok_or(CommandError::NotLoggedIn)?;

        let message = Message {
            id: Uuid::new_v4(),
            sender_id,
            recipient_id,
            content,
            kind,
            timestamp: Utc::now(),
            is_read: false,
            is_delivered: true,
            liked: None,
            read_at: None,
        };
        guard.add_message(message.clone());
        guard.set_typing(sender_id, None);
        message
    };

    bot.observe(&message);
    Ok(message)
}

/// Send the canned attention-getting nudge.
pub fn send_nudge(
    state: &SharedState,
    bot: &Arc<BotResponder>,
    recipient_id: Uuid,
) -> Result<Message, CommandError> {
    send_message(state, bot, recipient_id, MessageType::Nudge, NUDGE_CONTENT)
}

/// Delete one message. If it was about to be answered by the bot, the
/// pending reply dies with it.
pub fn delete_message(
    state: &SharedState,
    bot: &Arc<BotResponder>,
    id: Uuid,
) -> Result<bool, CommandError> {
    let removed = lock(state)?.delete_message(id);
    bot.cancel_if_trigger_removed();
    Ok(removed)
}

/// Delete the whole conversation with `partner_id`, both directions.
pub fn delete_chat(
    state: &SharedState,
    bot: &Arc<BotResponder>,
    partner_id: Uuid,
) -> Result<usize, CommandError> {
    let removed = lock(state)?.delete_chat(partner_id);
    bot.cancel_if_trigger_removed();
    Ok(removed)
}
