//! # Food Stall Bot
//!
//! A Telegram bot that takes food orders: the user picks an item from the
//! menu, gives a quantity, confirms, and is told when the order is ready.

pub mod bot;
pub mod config;
pub mod dialogue;
pub mod localization;
pub mod menu;
pub mod order;
pub mod scheduler;
