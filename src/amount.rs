use regex::Regex;
use serde_with::{DeserializeFromStr, SerializeDisplay};

use std::{
    fmt::{Debug, Display},
    str::FromStr,
    sync::LazyLock,
};

use crate::error::Error;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Represents a sales amount, or a running total of sales amounts.
///
/// Totals are capped: any total of [`Amount::CEILING`] or more (11 digits)
/// is rejected by [`Amount::checked_add`].
#[derive(
    Clone, Copy, Default, DeserializeFromStr, SerializeDisplay, Eq, PartialEq, Ord, PartialOrd,
)]
pub struct Amount(u64);

impl Amount {
    /// The smallest total that no longer fits in 10 decimal digits.
    pub const CEILING: u64 = 10_000_000_000;

    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Adds `rhs` to this total.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if the sum reaches [`Amount::CEILING`].
    pub fn checked_add(self, rhs: Self) -> Result<Self, Error> {
        match self.0.checked_add(rhs.0) {
            Some(sum) if sum < Self::CEILING => Ok(Self(sum)),
            _ => Err(Error::Overflow),
        }
    }
}

impl Debug for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a string couldn't be read as an [`Amount`].
#[derive(Debug, PartialEq, Eq)]
pub enum ParseAmountError {
    /// Empty, or contains something other than ASCII digits.
    NotNumeric,
    /// All digits, but far too many of them.
    TooLarge,
}

impl Display for ParseAmountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotNumeric => write!(f, "amount is not a number"),
            Self::TooLarge => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for ParseAmountError {}

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if !DIGITS.is_match(s) {
            return Err(ParseAmountError::NotNumeric);
        }
        s.parse()
            .map(Self)
            .map_err(|_| ParseAmountError::TooLarge)
    }
}
