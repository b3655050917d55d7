//! Registry layer abstractions and the in-memory implementation.
//!
//! # Responsibility
//! - Define the account registry contract used by service orchestration.
//! - Keep storage details behind the repository trait.
//!
//! # Invariants
//! - The registry never holds two accounts with the same number.
//! - Lookup misses are reported as `None`, not as errors.

pub mod account_repo;
