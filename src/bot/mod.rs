//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `commands`: The `/start` and `/help` commands
//! - `message_handler`: Handles free-text order messages
//! - `delivery`: Sends the "order ready" notification after preparation

pub mod commands;
pub mod delivery;
pub mod message_handler;

use std::future::Future;

use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{Me, MessageEntity, MessageEntityKind};

use crate::order::OrderState;

pub use commands::{command_handler, parse_command, Command};
pub use delivery::{deliver_order, try_deliver};
pub use message_handler::{message_handler, process_order_text};

pub type HandlerResult = anyhow::Result<()>;

/// Outbound side of a conversation
///
/// The order flow only ever sends plain text back to the chat it came from.
pub trait Replier: Clone + Send + Sync + 'static {
    fn send_reply(
        &self,
        chat_id: ChatId,
        text: String,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

impl Replier for Bot {
    fn send_reply(
        &self,
        chat_id: ChatId,
        text: String,
    ) -> impl Future<Output = anyhow::Result<()>> + Send {
        let request = self.send_message(chat_id, text);
        async move {
            request.await?;
            Ok(())
        }
    }
}

/// Whether the message opens with a bot command entity
pub fn starts_with_command(entities: Option<&[MessageEntity]>) -> bool {
    entities.is_some_and(|entities| {
        entities
            .iter()
            .any(|entity| entity.offset == 0 && entity.kind == MessageEntityKind::BotCommand)
    })
}

/// Text messages that are not commands go to the order flow
fn is_order_text(msg: Message) -> bool {
    msg.text().is_some() && !starts_with_command(msg.entities())
}

fn extract_command(msg: Message, me: Me) -> Option<Command> {
    if !starts_with_command(msg.entities()) {
        return None;
    }
    parse_command(msg.text()?, me.username())
}

/// Build the dispatcher schema
///
/// Expects `InMemStorage<OrderState>`, `DeliveryScheduler` and
/// `Arc<BotConfig>` among the dispatcher dependencies.
pub fn schema() -> UpdateHandler<anyhow::Error> {
    Update::filter_message()
        .enter_dialogue::<Message, InMemStorage<OrderState>, OrderState>()
        .branch(dptree::filter_map(extract_command).endpoint(command_handler))
        .branch(dptree::filter(is_order_text).endpoint(message_handler))
}
