//! Registry lookup contracts and the HTTP client for the public registry.
//!
//! # Responsibility
//! - Resolve one taxpayer identifier to one raw registry row.
//! - Keep the session/token handshake inside the registry boundary.
//!
//! # Invariants
//! - Only the first matching row is used; further matches are ignored.
//! - Each lookup is attempted exactly once; there are no retries.

pub mod egrul_client;
