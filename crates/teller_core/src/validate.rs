//! Field validators for account creation.
//!
//! # Responsibility
//! - Check holder name, date of birth, gender and calendar rules before an
//!   account record is ever constructed.
//! - Map every failure class to a distinct, user-presentable reason.
//!
//! # Invariants
//! - Validators are pure and total: malformed input is a validation failure,
//!   never a panic.
//! - The age rule treats a birthday falling exactly today as already turned.

use crate::model::account::Gender;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Youngest age allowed to hold an account.
pub const MINIMUM_HOLDER_AGE: i32 = 18;
/// Oldest birth year accepted.
pub const MINIMUM_BIRTH_YEAR: i32 = 1900;

static DATE_OF_BIRTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})-(\d{2})-(\d{4})$").expect("valid date-of-birth regex"));

/// One rejection reason per failure class; `Display` text is surfaced to the
/// user verbatim by the console driver.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    YearOutOfRange { year: i32, current_year: i32 },
    MonthOutOfRange { month: u32 },
    DayOutOfRange { day: u32, month: u32 },
    UnderMinimumAge { age: i32 },
    MalformedDate { input: String },
    EmptyName,
    ForbiddenNameCharacter { found: char },
    NameEdgeSpace,
    NameRepeatedSpace,
    UnknownGender { input: char },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearOutOfRange { year, current_year } => write!(
                f,
                "invalid year {year}: must be between {MINIMUM_BIRTH_YEAR} and {current_year}"
            ),
            Self::MonthOutOfRange { month } => {
                write!(f, "invalid month {month}: must be between 1 and 12")
            }
            Self::DayOutOfRange { day, month } => {
                write!(f, "invalid day {day} for month {month}")
            }
            Self::UnderMinimumAge { age } => write!(
                f,
                "account holders must be {MINIMUM_HOLDER_AGE} years or older (age {age})"
            ),
            Self::MalformedDate { input } => {
                write!(f, "invalid date `{input}`: use DD-MM-YYYY")
            }
            Self::EmptyName => write!(f, "name cannot be empty"),
            Self::ForbiddenNameCharacter { found } => {
                write!(f, "name can only contain letters and spaces (found `{found}`)")
            }
            Self::NameEdgeSpace => write!(f, "name cannot start or end with a space"),
            Self::NameRepeatedSpace => write!(f, "name cannot contain consecutive spaces"),
            Self::UnknownGender { input } => {
                write!(f, "invalid gender `{input}`: use M or F")
            }
        }
    }
}

impl Error for ValidationError {}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

// Callers range-check `month` first; the fall-through arm is February.
fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

/// Checks that `day`/`month`/`year` name a real birth date relative to
/// `today`: year within `[MINIMUM_BIRTH_YEAR, today's year]`, month and day
/// on the calendar, and holder at least `MINIMUM_HOLDER_AGE` years old.
pub fn validate_calendar_date(
    day: u32,
    month: u32,
    year: i32,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    let current_year = today.year();
    if year < MINIMUM_BIRTH_YEAR || year > current_year {
        return Err(ValidationError::YearOutOfRange { year, current_year });
    }
    if !(1..=12).contains(&month) {
        return Err(ValidationError::MonthOutOfRange { month });
    }
    if day < 1 || day > days_in_month(month, year) {
        return Err(ValidationError::DayOutOfRange { day, month });
    }

    let mut age = current_year - year;
    // The birthday has not happened yet this year only when month/day are
    // strictly after today's; a birthday today counts as already turned.
    if month > today.month() || (month == today.month() && day > today.day()) {
        age -= 1;
    }
    if age < MINIMUM_HOLDER_AGE {
        return Err(ValidationError::UnderMinimumAge { age });
    }

    Ok(())
}

/// Checks the exact `DD-MM-YYYY` shape, then delegates the numeric parts to
/// [`validate_calendar_date`].
pub fn validate_date_of_birth(input: &str, today: NaiveDate) -> Result<(), ValidationError> {
    let malformed = || ValidationError::MalformedDate {
        input: input.to_string(),
    };
    let captures = DATE_OF_BIRTH_RE.captures(input).ok_or_else(malformed)?;

    let day: u32 = captures[1].parse().map_err(|_| malformed())?;
    let month: u32 = captures[2].parse().map_err(|_| malformed())?;
    let year: i32 = captures[3].parse().map_err(|_| malformed())?;

    validate_calendar_date(day, month, year, today)
}

/// Checks the holder-name rules: non-empty, ASCII letters and spaces only,
/// no leading/trailing space, no two adjacent spaces.
pub fn validate_holder_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if let Some(found) = name.chars().find(|c| !c.is_ascii_alphabetic() && *c != ' ') {
        return Err(ValidationError::ForbiddenNameCharacter { found });
    }
    if name.starts_with(' ') || name.ends_with(' ') {
        return Err(ValidationError::NameEdgeSpace);
    }
    if name.contains("  ") {
        return Err(ValidationError::NameRepeatedSpace);
    }
    Ok(())
}

/// Parses a single-letter gender code, case-insensitively.
pub fn parse_gender(input: char) -> Result<Gender, ValidationError> {
    Gender::from_char(input).ok_or(ValidationError::UnknownGender { input })
}

#[cfg(test)]
mod tests {
    use super::{
        is_leap_year, parse_gender, validate_calendar_date, validate_date_of_birth,
        validate_holder_name, ValidationError,
    };
    use crate::model::account::Gender;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).expect("valid pinned date")
    }

    #[test]
    fn leap_year_follows_gregorian_rule() {
        for year in [1904, 1996, 2000, 2024] {
            assert!(is_leap_year(year), "{year} should be a leap year");
        }
        for year in [1900, 1901, 2023, 2100] {
            assert!(!is_leap_year(year), "{year} should not be a leap year");
        }
    }

    #[test]
    fn calendar_date_rejects_out_of_range_components() {
        assert_eq!(
            validate_calendar_date(1, 1, 1899, today()),
            Err(ValidationError::YearOutOfRange {
                year: 1899,
                current_year: 2026
            })
        );
        assert_eq!(
            validate_calendar_date(1, 1, 2027, today()),
            Err(ValidationError::YearOutOfRange {
                year: 2027,
                current_year: 2026
            })
        );
        assert_eq!(
            validate_calendar_date(1, 13, 1990, today()),
            Err(ValidationError::MonthOutOfRange { month: 13 })
        );
        assert_eq!(
            validate_calendar_date(0, 1, 1990, today()),
            Err(ValidationError::DayOutOfRange { day: 0, month: 1 })
        );
        assert_eq!(
            validate_calendar_date(31, 4, 1990, today()),
            Err(ValidationError::DayOutOfRange { day: 31, month: 4 })
        );
    }

    #[test]
    fn february_day_count_tracks_leap_years() {
        assert!(validate_calendar_date(29, 2, 1996, today()).is_ok());
        assert_eq!(
            validate_calendar_date(29, 2, 1995, today()),
            Err(ValidationError::DayOutOfRange { day: 29, month: 2 })
        );
        // 1900 is divisible by 100 but not 400.
        assert_eq!(
            validate_calendar_date(29, 2, 1900, today()),
            Err(ValidationError::DayOutOfRange { day: 29, month: 2 })
        );
    }

    #[test]
    fn age_boundary_counts_todays_birthday_as_turned() {
        // Exactly 18 today.
        assert!(validate_calendar_date(7, 8, 2008, today()).is_ok());
        // Turns 18 tomorrow.
        assert_eq!(
            validate_calendar_date(8, 8, 2008, today()),
            Err(ValidationError::UnderMinimumAge { age: 17 })
        );
        // Birthday next month.
        assert_eq!(
            validate_calendar_date(1, 9, 2008, today()),
            Err(ValidationError::UnderMinimumAge { age: 17 })
        );
    }

    #[test]
    fn date_of_birth_requires_exact_shape() {
        for input in [
            "",
            "7-8-1990",
            "07/08/1990",
            "1990-08-07",
            "07-08-90",
            "07-08-1990 ",
            "aa-bb-cccc",
        ] {
            assert_eq!(
                validate_date_of_birth(input, today()),
                Err(ValidationError::MalformedDate {
                    input: input.to_string()
                }),
                "`{input}` should be rejected as malformed"
            );
        }
        assert!(validate_date_of_birth("07-08-1990", today()).is_ok());
    }

    #[test]
    fn well_shaped_dates_still_pass_calendar_rules() {
        assert_eq!(
            validate_date_of_birth("32-01-1990", today()),
            Err(ValidationError::DayOutOfRange { day: 32, month: 1 })
        );
        assert_eq!(
            validate_date_of_birth("01-00-1990", today()),
            Err(ValidationError::MonthOutOfRange { month: 0 })
        );
    }

    #[test]
    fn holder_name_rules_give_distinct_reasons() {
        assert!(validate_holder_name("John Smith").is_ok());
        assert!(validate_holder_name("Al").is_ok());
        assert_eq!(validate_holder_name(""), Err(ValidationError::EmptyName));
        assert_eq!(
            validate_holder_name(" John"),
            Err(ValidationError::NameEdgeSpace)
        );
        assert_eq!(
            validate_holder_name("John "),
            Err(ValidationError::NameEdgeSpace)
        );
        assert_eq!(
            validate_holder_name("John  Smith"),
            Err(ValidationError::NameRepeatedSpace)
        );
        assert_eq!(
            validate_holder_name("John3"),
            Err(ValidationError::ForbiddenNameCharacter { found: '3' })
        );
        assert_eq!(
            validate_holder_name("Anne-Marie"),
            Err(ValidationError::ForbiddenNameCharacter { found: '-' })
        );
    }

    #[test]
    fn gender_codes_parse_case_insensitively() {
        assert_eq!(parse_gender('m'), Ok(Gender::Male));
        assert_eq!(parse_gender('F'), Ok(Gender::Female));
        assert_eq!(
            parse_gender('x'),
            Err(ValidationError::UnknownGender { input: 'x' })
        );
    }
}
