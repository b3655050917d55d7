//! Account use-case service.
//!
//! # Responsibility
//! - Provide open/view/deposit/withdraw entry points for console callers.
//! - Allocate unique account numbers and delegate storage to the registry.
//!
//! # Invariants
//! - Every stored record passed its field validators at open time.
//! - A failed operation leaves the registry untouched.
//! - Balances never go negative.

use crate::clock::{Clock, SystemClock};
use crate::model::account::{Account, AccountNumber, ACCOUNT_NUMBER_MAX, ACCOUNT_NUMBER_MIN};
use crate::repo::account_repo::{AccountRepository, InMemoryAccountRepository, RepoError};
use crate::validate::{self, ValidationError};
use log::{info, warn};
use rand::rngs::ThreadRng;
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service wired with the production clock and RNG.
pub type DefaultAccountService = AccountService<InMemoryAccountRepository, SystemClock, ThreadRng>;

/// Operation-level failure. Every variant is recoverable and user-correctable;
/// none aborts the process.
#[derive(Debug)]
pub enum ServiceError {
    Validation(ValidationError),
    NotFound(AccountNumber),
    /// Non-positive (or non-finite) monetary amount.
    InvalidAmount(f64),
    InsufficientFunds {
        balance: f64,
        requested: f64,
    },
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(number) => write!(f, "account not found: {number}"),
            Self::InvalidAmount(amount) => {
                write!(f, "invalid amount {amount}: must be greater than 0")
            }
            Self::InsufficientFunds { balance, requested } => write!(
                f,
                "insufficient balance: requested {requested:.2}, available {balance:.2}"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NotFound(_) | Self::InvalidAmount(_) | Self::InsufficientFunds { .. } => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Raw input collected by the console driver for account creation.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAccountRequest {
    pub holder_name: String,
    /// `DD-MM-YYYY` string as typed by the user.
    pub date_of_birth: String,
    /// Single-letter gender code, any case.
    pub gender: char,
    pub initial_deposit: f64,
}

/// Use-case service over a registry, a calendar-date source and an RNG.
///
/// The clock and RNG are injectable so tests can pin the age boundary and
/// make number allocation deterministic.
pub struct AccountService<R: AccountRepository, C: Clock, N: Rng> {
    repo: R,
    clock: C,
    rng: N,
}

impl<R: AccountRepository> AccountService<R, SystemClock, ThreadRng> {
    /// Creates a service using the system clock and the thread-local RNG.
    pub fn new(repo: R) -> Self {
        Self::with_parts(repo, SystemClock, rand::rng())
    }
}

impl<R: AccountRepository, C: Clock, N: Rng> AccountService<R, C, N> {
    pub fn with_parts(repo: R, clock: C, rng: N) -> Self {
        Self { repo, clock, rng }
    }

    /// Read access to the backing registry, for callers that only inspect.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Validates every field, assigns a fresh unique number and stores the
    /// record. Returns a snapshot of the stored account.
    pub fn open_account(&mut self, request: &OpenAccountRequest) -> ServiceResult<Account> {
        validate::validate_holder_name(&request.holder_name)?;
        validate::validate_date_of_birth(&request.date_of_birth, self.clock.today())?;
        let gender = validate::parse_gender(request.gender)?;
        ensure_positive_amount(request.initial_deposit)?;

        let number = self.allocate_number();
        let account = Account::new(
            number,
            request.holder_name.clone(),
            gender,
            request.date_of_birth.clone(),
            request.initial_deposit,
        );
        self.repo.insert(account.clone())?;

        info!(
            "event=account_opened module=service status=ok number={number} balance={:.2}",
            account.balance
        );
        Ok(account)
    }

    /// Read-only snapshot of one account.
    pub fn account_details(&self, number: AccountNumber) -> ServiceResult<Account> {
        self.repo
            .find(number)
            .cloned()
            .ok_or(ServiceError::NotFound(number))
    }

    /// Adds `amount` to the account balance and returns the new balance.
    pub fn deposit(&mut self, number: AccountNumber, amount: f64) -> ServiceResult<f64> {
        ensure_positive_amount(amount)?;
        let account = self
            .repo
            .find_mut(number)
            .ok_or(ServiceError::NotFound(number))?;

        let balance = account.credit(amount);
        info!(
            "event=deposit module=service status=ok number={number} amount={amount:.2} balance={balance:.2}"
        );
        Ok(balance)
    }

    /// Subtracts `amount` from the account balance and returns the new
    /// balance. Fails with `InsufficientFunds` (balance untouched) when
    /// `amount` exceeds it; withdrawing the exact balance succeeds.
    pub fn withdraw(&mut self, number: AccountNumber, amount: f64) -> ServiceResult<f64> {
        ensure_positive_amount(amount)?;
        let account = self
            .repo
            .find_mut(number)
            .ok_or(ServiceError::NotFound(number))?;

        match account.debit(amount) {
            Some(balance) => {
                info!(
                    "event=withdraw module=service status=ok number={number} amount={amount:.2} balance={balance:.2}"
                );
                Ok(balance)
            }
            None => {
                warn!(
                    "event=withdraw module=service status=rejected reason=insufficient_funds number={number} amount={amount:.2}"
                );
                Err(ServiceError::InsufficientFunds {
                    balance: account.balance,
                    requested: amount,
                })
            }
        }
    }

    // Rejection sampling over the 6-digit range; terminates with probability 1
    // while fewer than 900,000 accounts exist.
    fn allocate_number(&mut self) -> AccountNumber {
        loop {
            let candidate = self.rng.random_range(ACCOUNT_NUMBER_MIN..=ACCOUNT_NUMBER_MAX);
            if !self.repo.contains(candidate) {
                return candidate;
            }
        }
    }
}

fn ensure_positive_amount(amount: f64) -> ServiceResult<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ServiceError::InvalidAmount(amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::ensure_positive_amount;
    use crate::service::account_service::ServiceError;

    #[test]
    fn positive_amount_guard_rejects_edge_inputs() {
        assert!(ensure_positive_amount(0.01).is_ok());
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                ensure_positive_amount(bad),
                Err(ServiceError::InvalidAmount(_))
            ));
        }
    }
}
