//! Chat transport contracts and the Telegram Bot API adapter.
//!
//! # Responsibility
//! - Deliver inbound text messages and send text replies.
//! - Hide the wire protocol of the chat service from the reply logic.
//!
//! # Invariants
//! - Updates are returned in delivery order.
//! - Credentials never appear in errors or log lines.

pub mod telegram;
