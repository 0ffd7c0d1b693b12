//! Registry record normalization.
//!
//! # Responsibility
//! - Turn raw upper-cased registry fields into display strings.
//! - Keep every formatter a pure function of its input.
//!
//! # Invariants
//! - Formatters share no state; calling one twice with the same input
//!   yields identical output.
//! - Shape failures are returned, never replaced by a default string.

pub mod address;
mod casing;
pub mod name;
pub mod normalizer;
pub mod numbers;

pub use casing::title_case;
