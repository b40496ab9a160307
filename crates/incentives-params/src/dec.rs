//! Fixed-point decimal with an explicit nil state
//!
//! `Dec` carries 18 fractional digits in an `i128`. The nil state models a
//! value that was never set, which is distinct from zero and must be rejected
//! before any range check runs.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of fractional digits carried by [`Dec`]
pub const PRECISION: u32 = 18;

const PRECISION_MULTIPLIER: i128 = 1_000_000_000_000_000_000;

/// Errors from parsing a decimal string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDecError {
    #[error("decimal string is empty")]
    Empty,

    #[error("invalid character in decimal string: {0:?}")]
    InvalidCharacter(String),

    #[error("too many decimal places: {0} (max 18)")]
    TooManyDecimals(usize),

    #[error("decimal value out of range")]
    Overflow,

    #[error("decimal precision {0} exceeds maximum 18")]
    PrecisionTooLarge(u32),
}

/// Signed decimal fraction with 18 digits of precision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Dec(Option<i128>);

impl Dec {
    /// The unset decimal
    pub const fn nil() -> Self {
        Dec(None)
    }

    pub const fn zero() -> Self {
        Dec(Some(0))
    }

    pub const fn one() -> Self {
        Dec(Some(PRECISION_MULTIPLIER))
    }

    /// Build from raw atomic units (value * 10^18)
    pub const fn from_atomics(atomics: i128) -> Self {
        Dec(Some(atomics))
    }

    /// Build `i * 10^-prec`, e.g. `new_with_prec(5, 2)` is 0.05
    ///
    /// # Panics
    ///
    /// Panics if `prec` exceeds [`PRECISION`]. Use [`Dec::try_new_with_prec`]
    /// for a precision that is not a constant.
    pub fn new_with_prec(i: i64, prec: u32) -> Self {
        match Self::try_new_with_prec(i, prec) {
            Ok(dec) => dec,
            Err(err) => panic!("{}", err),
        }
    }

    /// Build `i * 10^-prec`, rejecting a precision above [`PRECISION`]
    pub fn try_new_with_prec(i: i64, prec: u32) -> Result<Self, ParseDecError> {
        if prec > PRECISION {
            return Err(ParseDecError::PrecisionTooLarge(prec));
        }
        Ok(Dec(Some(i as i128 * 10i128.pow(PRECISION - prec))))
    }

    /// Raw atomic units, or `None` when nil
    pub fn atomics(&self) -> Option<i128> {
        self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_none()
    }

    pub fn is_zero(&self) -> bool {
        self.0 == Some(0)
    }

    /// True for a set value strictly below zero
    pub fn is_negative(&self) -> bool {
        matches!(self.0, Some(v) if v < 0)
    }

    /// Strict greater-than; false if either side is nil
    pub fn gt(&self, other: &Dec) -> bool {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        }
    }

    /// Strict less-than; false if either side is nil
    pub fn lt(&self, other: &Dec) -> bool {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(value) = self.0 else {
            return write!(f, "<nil>");
        };
        let sign = if value < 0 { "-" } else { "" };
        let abs = value.unsigned_abs();
        let multiplier = PRECISION_MULTIPLIER as u128;
        write!(
            f,
            "{}{}.{:0width$}",
            sign,
            abs / multiplier,
            abs % multiplier,
            width = PRECISION as usize
        )
    }
}

impl FromStr for Dec {
    type Err = ParseDecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseDecError::Empty);
        }

        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (unsigned, None),
        };

        if int_part.is_empty() || frac_part == Some("") {
            return Err(ParseDecError::InvalidCharacter(s.to_string()));
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || !frac_part.map_or(true, all_digits) {
            return Err(ParseDecError::InvalidCharacter(s.to_string()));
        }

        let frac_part = frac_part.unwrap_or("");
        if frac_part.len() > PRECISION as usize {
            return Err(ParseDecError::TooManyDecimals(frac_part.len()));
        }

        let int_value: i128 = int_part.parse().map_err(|_| ParseDecError::Overflow)?;
        let frac_value: i128 = if frac_part.is_empty() {
            0
        } else {
            frac_part.parse().map_err(|_| ParseDecError::Overflow)?
        };
        let frac_scale = 10i128.pow(PRECISION - frac_part.len() as u32);

        let atomics = int_value
            .checked_mul(PRECISION_MULTIPLIER)
            .and_then(|v| v.checked_add(frac_value * frac_scale))
            .ok_or(ParseDecError::Overflow)?;

        Ok(Dec(Some(if negative { -atomics } else { atomics })))
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(_) => serializer.serialize_str(&self.to_string()),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => s.parse().map_err(serde::de::Error::custom),
            None => Ok(Dec::nil()),
        }
    }
}
