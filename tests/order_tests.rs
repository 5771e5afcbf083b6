//! # Order Flow Tests
//!
//! Walks the ordering conversation through `handle_response`: food
//! selection, quantity, confirmation, cancellation and the fallback reply.

use std::time::Duration;

use food_stall::menu::Menu;
use food_stall::order::{handle_response, ready_message, OrderState, ReplyKind};

const PREP: Duration = Duration::from_secs(10);

fn burger_state() -> OrderState {
    OrderState {
        food_selected: Some("Burger".to_string()),
        ..Default::default()
    }
}

fn full_order() -> OrderState {
    OrderState {
        food_selected: Some("Burger".to_string()),
        quantity_selected: 3,
        is_ready_to_order: false,
    }
}

#[test]
fn test_food_selection_from_sentence() {
    let menu = Menu::default();
    let mut state = OrderState::default();

    let response = handle_response("I'd like a Burger please", &mut state, &menu, PREP);

    assert_eq!(response.kind, ReplyKind::FoodSelected);
    assert_eq!(response.text, "How much quantity?");
    assert_eq!(state.food_selected.as_deref(), Some("Burger"));
    assert_eq!(state.quantity_selected, 0);
}

#[test]
fn test_food_selection_uses_menu_order() {
    let menu = Menu::default();
    let mut state = OrderState::default();

    // Pizza is listed before Brownie
    handle_response("brownie and pizza", &mut state, &menu, PREP);
    assert_eq!(state.food_selected.as_deref(), Some("Pizza"));
}

#[test]
fn test_food_already_selected_is_kept() {
    let menu = Menu::default();
    let mut state = burger_state();

    let response = handle_response("actually pizza", &mut state, &menu, PREP);

    assert_eq!(response.kind, ReplyKind::NotUnderstood);
    assert_eq!(state.food_selected.as_deref(), Some("Burger"));
}

#[test]
fn test_quantity_summary() {
    let menu = Menu::default();
    let mut state = burger_state();

    let response = handle_response("3 please", &mut state, &menu, PREP);

    assert_eq!(response.kind, ReplyKind::QuantitySelected);
    assert_eq!(state.quantity_selected, 3);
    assert_eq!(
        response.text,
        "You've ordered 3 Burger(s). Are you ready to order? Your order will be ready in 10 seconds."
    );
}

#[test]
fn test_quantity_summary_uses_prep_time() {
    let menu = Menu::default();
    let mut state = burger_state();

    let response = handle_response("2", &mut state, &menu, Duration::from_secs(45));
    assert!(response.text.ends_with("ready in 45 seconds."));
}

#[test]
fn test_quantity_takes_first_digit_run() {
    let menu = Menu::default();
    let mut state = burger_state();

    handle_response("12 or maybe 4", &mut state, &menu, PREP);
    assert_eq!(state.quantity_selected, 12);
}

#[test]
fn test_quantity_without_digits_falls_back() {
    let menu = Menu::default();
    let mut state = burger_state();

    let response = handle_response("three", &mut state, &menu, PREP);

    assert_eq!(response.kind, ReplyKind::NotUnderstood);
    assert_eq!(state, burger_state());
}

#[test]
fn test_quantity_only_reads_ascii_digits() {
    let menu = Menu::default();

    // Arabic-Indic and fullwidth digits are not quantities
    for text in ["\u{0663} please", "\u{FF13}"] {
        let mut state = burger_state();
        let response = handle_response(text, &mut state, &menu, PREP);
        assert_eq!(response.kind, ReplyKind::NotUnderstood);
        assert_eq!(state, burger_state());
    }

    // The first ASCII run is used even if other digits come first
    let mut state = burger_state();
    handle_response("\u{0663} or 2", &mut state, &menu, PREP);
    assert_eq!(state.quantity_selected, 2);
}

#[test]
fn test_confirmation() {
    let menu = Menu::default();
    let mut state = full_order();

    let response = handle_response("YES!", &mut state, &menu, PREP);

    assert_eq!(response.kind, ReplyKind::Confirmed);
    assert_eq!(response.text, "Order confirmed! Preparing your food...");
    assert!(state.is_ready_to_order);
    assert_eq!(state.quantity_selected, 3);
}

#[test]
fn test_confirmation_wins_over_cancellation() {
    let menu = Menu::default();
    let mut state = full_order();

    // Contains both keywords; confirmation is checked first
    let response = handle_response("yes, no doubt", &mut state, &menu, PREP);
    assert_eq!(response.kind, ReplyKind::Confirmed);
}

#[test]
fn test_cancellation_clears_any_state() {
    let menu = Menu::default();
    let states = [
        OrderState::default(),
        burger_state(),
        full_order(),
        OrderState {
            is_ready_to_order: true,
            ..full_order()
        },
    ];

    for mut state in states {
        let response = handle_response("no thanks", &mut state, &menu, PREP);
        assert_eq!(response.kind, ReplyKind::Cancelled);
        assert_eq!(response.text, "Order cancelled! Use /start to start a new order.");
        assert!(state.is_empty());
    }
}

#[test]
fn test_cancellation_is_case_insensitive_substring() {
    let menu = Menu::default();
    let mut state = burger_state();

    let response = handle_response("NOPE", &mut state, &menu, PREP);
    assert_eq!(response.kind, ReplyKind::Cancelled);
}

#[test]
fn test_unknown_text_on_fresh_state() {
    let menu = Menu::default();
    let mut state = OrderState::default();

    let response = handle_response("asdf", &mut state, &menu, PREP);

    assert_eq!(response.kind, ReplyKind::NotUnderstood);
    assert_eq!(response.text, "I do not understand what you wrote...");
    assert!(state.is_empty());
}

#[test]
fn test_non_mutating_input_is_idempotent() {
    let menu = Menu::default();
    let mut state = full_order();

    let first = handle_response("hmm", &mut state, &menu, PREP);
    let after_first = state.clone();
    let second = handle_response("hmm", &mut state, &menu, PREP);

    assert_eq!(first, second);
    assert_eq!(state, after_first);
    assert_eq!(state, full_order());
}

#[test]
fn test_full_conversation() {
    let menu = Menu::default();
    let mut state = OrderState::default();

    let steps = [
        ("hello", ReplyKind::NotUnderstood),
        ("one ice cream", ReplyKind::FoodSelected),
        ("2 scoops", ReplyKind::QuantitySelected),
        ("yes", ReplyKind::Confirmed),
    ];
    for (text, expected) in steps {
        assert_eq!(handle_response(text, &mut state, &menu, PREP).kind, expected);
    }

    assert_eq!(state.food_selected.as_deref(), Some("Ice cream"));
    assert_eq!(state.quantity_selected, 2);
    assert!(state.is_ready_to_order);
}

#[test]
fn test_ready_message() {
    assert_eq!(
        ready_message(&full_order()).as_deref(),
        Some("Your order of 3 Burger(s) is ready! Would you like to order anything else?")
    );
    assert!(ready_message(&burger_state()).is_none());
    assert!(ready_message(&OrderState::default()).is_none());
}
