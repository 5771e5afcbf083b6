//! Command handling for `/start` and `/help`

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{error, info};

use crate::config::BotConfig;
use crate::dialogue::{clear_state, OrderDialogue};
use crate::localization::t;
use crate::menu::Menu;
use crate::scheduler::DeliveryScheduler;

use super::{HandlerResult, Replier};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "start a new order and show the menu.")]
    Start,
    #[command(description = "show how to order.")]
    Help,
}

/// Parse the leading command of `text`
///
/// Command names and the bot mention are matched case-insensitively and
/// anything after the command word is ignored, so "/START now" is a start.
pub fn parse_command(text: &str, bot_username: &str) -> Option<Command> {
    let head = text.split_whitespace().next()?;
    Command::parse(&head.to_lowercase(), &bot_username.to_lowercase()).ok()
}

/// Greeting followed by the numbered menu
pub fn welcome_message(menu: &Menu) -> String {
    format!("{}\n{}", t("welcome"), menu.render())
}

pub fn help_message() -> String {
    t("help")
}

/// Run a command for the chat of `dialogue`
pub async fn run_command<R: Replier>(
    replier: &R,
    cmd: Command,
    dialogue: &OrderDialogue,
    scheduler: &DeliveryScheduler,
    config: &BotConfig,
) -> Result<()> {
    let chat_id = dialogue.chat_id();
    match cmd {
        Command::Start => {
            if scheduler.cancel(chat_id) {
                info!(chat_id = %chat_id, "Pending delivery dropped by /start");
            }
            clear_state(dialogue).await?;
            replier
                .send_reply(chat_id, welcome_message(&config.menu))
                .await?;
        }
        Command::Help => {
            replier.send_reply(chat_id, help_message()).await?;
        }
    }
    Ok(())
}

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: OrderDialogue,
    scheduler: DeliveryScheduler,
    config: Arc<BotConfig>,
) -> HandlerResult {
    if let Err(e) = run_command(&bot, cmd.clone(), &dialogue, &scheduler, &config).await {
        error!(chat_id = %msg.chat.id, command = ?cmd, error = %e, "Update caused error");
    }
    Ok(())
}
