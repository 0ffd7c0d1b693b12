//! Domain data passed between registry, normalizer and chat layers.
//!
//! # Responsibility
//! - Define the raw registry row and its formatted counterpart.
//! - Classify inbound chat text into the message shapes the bot answers.
//!
//! # Invariants
//! - Records are immutable values built once per query.

pub mod inbound;
pub mod record;
