//! Message Handler module for processing order messages

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{debug, error, info};

use crate::config::BotConfig;
use crate::dialogue::{load_state, store_state, OrderDialogue};
use crate::order::{handle_response, ReplyKind};
use crate::scheduler::DeliveryScheduler;

use super::delivery::deliver_order;
use super::{HandlerResult, Replier};

/// Run one order turn for the chat of `dialogue`
///
/// A confirmation is answered right away and the "ready" notification is
/// left to the scheduler; a cancellation drops any pending delivery.
pub async fn process_order_text<R: Replier>(
    replier: &R,
    text: &str,
    dialogue: &OrderDialogue,
    scheduler: &DeliveryScheduler,
    config: &BotConfig,
) -> Result<ReplyKind> {
    let chat_id = dialogue.chat_id();
    debug!(chat_id = %chat_id, message_length = text.len(), "Received text message from user");

    let mut state = load_state(dialogue).await?;
    let response = handle_response(text, &mut state, &config.menu, config.prep_time);
    debug!(chat_id = %chat_id, reply = ?response.kind, "Order state updated");

    if state.is_ready_to_order {
        state.is_ready_to_order = false;
        store_state(dialogue, state).await?;
        replier.send_reply(chat_id, response.text).await?;

        scheduler.schedule(
            chat_id,
            config.prep_time,
            deliver_order(replier.clone(), dialogue.clone()),
        );
        info!(
            chat_id = %chat_id,
            prep_secs = config.prep_time.as_secs(),
            "Order confirmed, preparing"
        );
        return Ok(response.kind);
    }

    if response.kind == ReplyKind::Cancelled && scheduler.cancel(chat_id) {
        info!(chat_id = %chat_id, "Pending delivery cancelled by user");
    }

    store_state(dialogue, state).await?;
    replier.send_reply(chat_id, response.text).await?;
    Ok(response.kind)
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: OrderDialogue,
    scheduler: DeliveryScheduler,
    config: Arc<BotConfig>,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    if let Err(e) = process_order_text(&bot, text, &dialogue, &scheduler, &config).await {
        error!(chat_id = %msg.chat.id, text = %text, error = %e, "Update caused error");
    }
    Ok(())
}
