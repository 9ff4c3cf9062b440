//! Customer phone number entered in the contacts step.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// Nothing was entered.
    #[error("Phone is required")]
    Empty,
    /// A character other than digits and common separators.
    #[error("Phone may only contain digits, spaces, dashes, parentheses and a leading +")]
    InvalidCharacter(char),
    /// Too few or too many digits.
    #[error("Phone must have between {min} and {max} digits")]
    DigitCount {
        /// Minimum digit count.
        min: usize,
        /// Maximum digit count.
        max: usize,
    },
}

/// A customer phone number, kept as typed (trimmed).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Fewest digits a number may have.
    pub const MIN_DIGITS: usize = 10;
    /// Most digits a number may have (E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `Phone` from form input.
    ///
    /// ```
    /// use web_larek_core::Phone;
    ///
    /// assert!(Phone::parse("+7 (999) 123-45-67").is_ok());
    /// assert!(Phone::parse("12345").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`PhoneError`] if the input is empty, contains other
    /// characters, or has the wrong number of digits.
    pub fn parse(input: &str) -> Result<Self, PhoneError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        let mut digits = 0usize;
        for (i, ch) in s.char_indices() {
            match ch {
                '0'..='9' => digits += 1,
                ' ' | '-' | '(' | ')' => {}
                '+' if i == 0 => {}
                other => return Err(PhoneError::InvalidCharacter(other)),
            }
        }

        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits) {
            return Err(PhoneError::DigitCount {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as typed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Only the digits, without separators.
    #[must_use]
    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
