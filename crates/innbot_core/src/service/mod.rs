//! Use-case services.
//!
//! # Responsibility
//! - Turn one inbound text into one reply, calling the registry and the
//!   normalizer for identifiers.
//! - Drive the poll/reply loop over a chat transport.
//!
//! # Invariants
//! - Queries are processed one at a time, in delivery order.
//! - Every inbound text message gets exactly one reply.

pub mod bot;
pub mod reply_service;
