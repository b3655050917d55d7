//! Core domain logic for the teller banking console.
//! This crate is the single source of truth for account invariants.

pub mod clock;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validate;

pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging};
pub use model::account::{
    Account, AccountNumber, Gender, ACCOUNT_NUMBER_MAX, ACCOUNT_NUMBER_MIN,
};
pub use repo::account_repo::{
    AccountRepository, InMemoryAccountRepository, RepoError, RepoResult,
};
pub use service::account_service::{
    AccountService, DefaultAccountService, OpenAccountRequest, ServiceError, ServiceResult,
};
pub use validate::ValidationError;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
