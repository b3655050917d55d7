//! Bank account domain model.
//!
//! # Responsibility
//! - Define the canonical account record and its identity range.
//! - Provide balance arithmetic helpers with the no-overdraft rule.
//!
//! # Invariants
//! - `number` is stable and never reused for another account.
//! - `balance` never goes negative; `debit` refuses instead of clamping.
//! - Personal fields are validated before an `Account` is constructed and
//!   are never edited afterwards.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable 6-digit identifier for an account.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type AccountNumber = u32;

/// Lowest assignable account number (inclusive).
pub const ACCOUNT_NUMBER_MIN: AccountNumber = 100_000;
/// Highest assignable account number (inclusive).
pub const ACCOUNT_NUMBER_MAX: AccountNumber = 999_999;

/// Recorded gender of an account holder.
///
/// Parsed case-insensitively from single-letter console input and rendered
/// back as uppercase `M`/`F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Parses `m`/`M`/`f`/`F`; any other character is not a gender code.
    pub fn from_char(value: char) -> Option<Self> {
        match value.to_ascii_uppercase() {
            'M' => Some(Self::Male),
            'F' => Some(Self::Female),
            _ => None,
        }
    }

    /// Uppercase single-letter code used for display and serialization.
    pub fn as_char(&self) -> char {
        match self {
            Self::Male => 'M',
            Self::Female => 'F',
        }
    }

    /// Salutation used by the console greeting.
    pub fn honorific(&self) -> &'static str {
        match self {
            Self::Male => "Mr.",
            Self::Female => "Ms.",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Canonical account record.
///
/// Constructed only by the account service after every field has passed its
/// validator; afterwards only `balance` changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique 6-digit number in `[ACCOUNT_NUMBER_MIN, ACCOUNT_NUMBER_MAX]`.
    pub number: AccountNumber,
    /// Validated holder name (letters and single interior spaces).
    pub holder_name: String,
    pub gender: Gender,
    /// Validated `DD-MM-YYYY` string, kept in its display form.
    pub date_of_birth: String,
    /// Non-negative monetary amount.
    pub balance: f64,
}

impl Account {
    pub fn new(
        number: AccountNumber,
        holder_name: impl Into<String>,
        gender: Gender,
        date_of_birth: impl Into<String>,
        balance: f64,
    ) -> Self {
        Self {
            number,
            holder_name: holder_name.into(),
            gender,
            date_of_birth: date_of_birth.into(),
            balance,
        }
    }

    /// Adds `amount` to the balance and returns the new balance.
    pub fn credit(&mut self, amount: f64) -> f64 {
        self.balance += amount;
        self.balance
    }

    /// Subtracts `amount` from the balance and returns the new balance.
    ///
    /// Returns `None` without touching the balance when `amount` exceeds it;
    /// withdrawing the exact balance succeeds and leaves zero.
    pub fn debit(&mut self, amount: f64) -> Option<f64> {
        if amount > self.balance {
            return None;
        }
        self.balance -= amount;
        Some(self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::{Account, Gender, ACCOUNT_NUMBER_MAX, ACCOUNT_NUMBER_MIN};

    fn sample_account() -> Account {
        Account::new(123_456, "John Smith", Gender::Male, "15-06-1990", 100.0)
    }

    #[test]
    fn gender_parses_case_insensitively() {
        assert_eq!(Gender::from_char('m'), Some(Gender::Male));
        assert_eq!(Gender::from_char('F'), Some(Gender::Female));
        assert_eq!(Gender::from_char('x'), None);
        assert_eq!(Gender::from_char(' '), None);
    }

    #[test]
    fn gender_renders_uppercase() {
        assert_eq!(Gender::from_char('f').unwrap().to_string(), "F");
        assert_eq!(Gender::Male.honorific(), "Mr.");
        assert_eq!(Gender::Female.honorific(), "Ms.");
    }

    #[test]
    fn credit_increases_balance() {
        let mut account = sample_account();
        assert_eq!(account.credit(50.0), 150.0);
        assert_eq!(account.balance, 150.0);
    }

    #[test]
    fn debit_refuses_overdraft_and_allows_exact_balance() {
        let mut account = sample_account();
        assert_eq!(account.debit(200.0), None);
        assert_eq!(account.balance, 100.0);
        assert_eq!(account.debit(100.0), Some(0.0));
        assert_eq!(account.balance, 0.0);
    }

    #[test]
    fn number_range_is_six_digits() {
        assert_eq!(ACCOUNT_NUMBER_MIN.to_string().len(), 6);
        assert_eq!(ACCOUNT_NUMBER_MAX.to_string().len(), 6);
    }

    #[test]
    fn account_serializes_with_stable_field_names() {
        let value = serde_json::to_value(sample_account()).unwrap();
        assert_eq!(value["number"], 123_456);
        assert_eq!(value["holder_name"], "John Smith");
        assert_eq!(value["gender"], "M");
        assert_eq!(value["date_of_birth"], "15-06-1990");
    }
}
