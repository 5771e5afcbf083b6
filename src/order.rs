//! # Order Module
//!
//! Per-conversation order state and the response function driving the
//! ordering conversation: pick a food, give a quantity, confirm or cancel.

use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::localization::{t, t_args};
use crate::menu::Menu;

/// Keyword confirming an order
pub const AFFIRMATIVE_KEYWORD: &str = "yes";
/// Keyword cancelling an order
pub const NEGATIVE_KEYWORD: &str = "no";

lazy_static! {
    static ref QUANTITY_REGEX: Regex =
        Regex::new(r"[0-9]+").expect("Quantity pattern should be valid");
}

/// State of one user's order
///
/// `Default` is the cleared state. A non-zero quantity is only ever set
/// once a food has been selected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderState {
    pub food_selected: Option<String>,
    pub quantity_selected: u32,
    pub is_ready_to_order: bool,
}

impl OrderState {
    /// Reset to the unselected state
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Food and quantity of a complete order, if there is one
    pub fn order(&self) -> Option<(&str, u32)> {
        match self.food_selected.as_deref() {
            Some(food) if self.quantity_selected > 0 => Some((food, self.quantity_selected)),
            _ => None,
        }
    }
}

/// Which branch of the conversation produced a reply
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyKind {
    Confirmed,
    Cancelled,
    FoodSelected,
    QuantitySelected,
    NotUnderstood,
}

/// Reply to send back, with the branch that produced it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub kind: ReplyKind,
    pub text: String,
}

impl Response {
    fn new(kind: ReplyKind, text: String) -> Self {
        Self { kind, text }
    }
}

/// Extract the first run of digits in `text` as a quantity
///
/// Returns `None` when there is no digit or the run does not fit in a `u32`.
pub fn extract_quantity(text: &str) -> Option<u32> {
    QUANTITY_REGEX
        .find(text)
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Process one user message against the current order state
///
/// Checks run in a fixed order and the first one that applies wins:
/// confirmation, cancellation, food selection, quantity selection, and
/// finally the "not understood" fallback. `state` is updated in place.
pub fn handle_response(
    text: &str,
    state: &mut OrderState,
    menu: &Menu,
    prep_time: Duration,
) -> Response {
    let lowered = text.to_lowercase();

    if lowered.contains(AFFIRMATIVE_KEYWORD) && state.quantity_selected > 0 {
        state.is_ready_to_order = true;
        return Response::new(ReplyKind::Confirmed, t("order-confirmed"));
    }

    if lowered.contains(NEGATIVE_KEYWORD) {
        state.clear();
        return Response::new(ReplyKind::Cancelled, t("order-cancelled"));
    }

    match state.food_selected.clone() {
        None => {
            if let Some(item) = menu.find_in(text) {
                state.food_selected = Some(item.label.clone());
                return Response::new(ReplyKind::FoodSelected, t("ask-quantity"));
            }
        }
        Some(food) if state.quantity_selected == 0 => {
            if let Some(quantity) = extract_quantity(text) {
                state.quantity_selected = quantity;
                let text = t_args(
                    "order-summary",
                    &[
                        ("quantity", &quantity.to_string()),
                        ("food", &food),
                        ("prep_time", &prep_time.as_secs().to_string()),
                    ],
                );
                return Response::new(ReplyKind::QuantitySelected, text);
            }
        }
        Some(_) => {}
    }

    Response::new(ReplyKind::NotUnderstood, t("not-understood"))
}

/// Notification for a completed order, or `None` if the order was cleared
pub fn ready_message(state: &OrderState) -> Option<String> {
    state.order().map(|(food, quantity)| {
        t_args(
            "order-ready",
            &[("quantity", &quantity.to_string()), ("food", food)],
        )
    })
}
