//! Delivery of a prepared order once the preparation time has elapsed

use anyhow::Result;
use tracing::{error, info};

use crate::dialogue::{clear_state, OrderDialogue};
use crate::order::ready_message;

use super::Replier;

/// Send the "ready" notification for the chat's order, then clear it
///
/// Returns `false` when there was no order left to deliver. The order is only
/// cleared if it is still the one that was announced, so a new order placed
/// while the notification was being sent survives.
pub async fn try_deliver<R: Replier>(replier: &R, dialogue: &OrderDialogue) -> Result<bool> {
    let chat_id = dialogue.chat_id();
    let state = dialogue.get().await?.unwrap_or_default();

    // The order may have been cleared while it was being prepared
    let Some(message) = ready_message(&state) else {
        info!(chat_id = %chat_id, "Order cleared before delivery, nothing to send");
        return Ok(false);
    };

    replier.send_reply(chat_id, message).await?;

    if dialogue.get().await?.as_ref() == Some(&state) {
        clear_state(dialogue).await?;
    } else {
        info!(chat_id = %chat_id, "Order changed during delivery, keeping it");
    }
    info!(chat_id = %chat_id, "Order delivered");
    Ok(true)
}

/// Notify the chat that its order is ready and clear the order
///
/// Runs as a detached continuation, so failures are logged here.
pub async fn deliver_order<R: Replier>(replier: R, dialogue: OrderDialogue) {
    if let Err(e) = try_deliver(&replier, &dialogue).await {
        error!(chat_id = %dialogue.chat_id(), error = %e, "Failed to deliver order");
    }
}
