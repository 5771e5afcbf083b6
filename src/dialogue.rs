//! Order dialogue module for holding per-chat order state.

use anyhow::Result;
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage, InMemStorageError};

use crate::order::OrderState;

/// In-memory storage of every chat's order state
pub type OrderStorage = InMemStorage<OrderState>;

/// Type alias for our order dialogue
pub type OrderDialogue = Dialogue<OrderState, OrderStorage>;

/// Current state of the chat, created empty on first use
pub async fn load_state(dialogue: &OrderDialogue) -> Result<OrderState> {
    Ok(dialogue.get_or_default().await?)
}

/// Persist `state`, dropping the entry entirely once the order is cleared
pub async fn store_state(dialogue: &OrderDialogue, state: OrderState) -> Result<()> {
    if state.is_empty() {
        clear_state(dialogue).await
    } else {
        dialogue.update(state).await?;
        Ok(())
    }
}

/// Forget the chat's order; clearing a chat with no order is a no-op
pub async fn clear_state(dialogue: &OrderDialogue) -> Result<()> {
    match dialogue.exit().await {
        Err(InMemStorageError::DialogueNotFound) => Ok(()),
        other => Ok(other?),
    }
}
