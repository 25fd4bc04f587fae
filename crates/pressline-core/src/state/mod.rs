//! Order lifecycle rules.
//!
//! This module holds the transition table that decides which role may move
//! an order from one status to the next. The order store enforces it and the
//! dashboards read it to decide which action button a role is offered.

pub mod order;

pub use order::{available_action, is_permitted, is_terminal, next_status, Action};
