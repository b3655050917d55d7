//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validators and the registry into account operations.
//! - Keep the console layer decoupled from storage details.

pub mod account_service;
