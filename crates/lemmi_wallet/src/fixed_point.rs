//! # Token Amounts
//!
//! **NO FLOATING POINT IN BALANCE ARITHMETIC**
//!
//! ADA, WINKS and LEMMI are all held as `TokenAmount`: a `u64` carrying six
//! implicit decimals. Floats only appear at the edge, when a balance is
//! copied into a JSON record.
//!
//! # Range
//!
//! - Minimum: 0.000000
//! - Maximum: 18,446,744,073,709.551615

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{WalletError, WalletResult};

/// Number of decimal places.
pub const DECIMAL_PLACES: u32 = 6;

/// The multiplier for 6 decimal places.
const MULTIPLIER: u64 = 10u64.pow(DECIMAL_PLACES);

/// Fixed-point token amount with 6 decimal places.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct TokenAmount(u64);

impl TokenAmount {
    /// Zero value.
    pub const ZERO: Self = Self(0);

    /// One unit (1.000000).
    pub const ONE: Self = Self(MULTIPLIER);

    /// Maximum representable value.
    pub const MAX: Self = Self(u64::MAX);

    /// Creates an amount from a whole number of tokens.
    ///
    /// Saturates at [`TokenAmount::MAX`].
    ///
    /// ```rust
    /// use lemmi_wallet::TokenAmount;
    /// assert_eq!(TokenAmount::from_whole(10).to_string(), "10.000000");
    /// ```
    #[inline]
    #[must_use]
    pub const fn from_whole(whole: u64) -> Self {
        Self(whole.saturating_mul(MULTIPLIER))
    }

    /// Creates an amount from parts.
    ///
    /// # Arguments
    ///
    /// * `whole` - The whole number part
    /// * `decimal` - The decimal part (0-999999)
    #[inline]
    #[must_use]
    pub const fn from_parts(whole: u64, decimal: u32) -> Self {
        Self(whole.saturating_mul(MULTIPLIER).saturating_add(decimal as u64 % MULTIPLIER))
    }

    /// Creates an amount from its raw internal value.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw internal value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns the whole number part.
    #[inline]
    #[must_use]
    pub const fn whole(self) -> u64 {
        self.0 / MULTIPLIER
    }

    /// Returns the decimal part (0-999999).
    #[inline]
    #[must_use]
    pub const fn decimal(self) -> u32 {
        (self.0 % MULTIPLIER) as u32
    }

    /// Checked addition. Returns `None` on overflow.
    #[inline]
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[inline]
    #[must_use]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked multiplication by an integer.
    #[inline]
    #[must_use]
    pub const fn checked_mul_int(self, rhs: u64) -> Option<Self> {
        match self.0.checked_mul(rhs) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked division by an integer.
    #[inline]
    #[must_use]
    pub const fn checked_div_int(self, rhs: u64) -> Option<Self> {
        if rhs == 0 {
            None
        } else {
            Some(Self(self.0 / rhs))
        }
    }

    /// Returns true if this value is zero.
    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Safe addition with error on overflow.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::ArithmeticOverflow` if the addition would overflow.
    #[inline]
    pub fn safe_add(self, rhs: Self) -> WalletResult<Self> {
        self.checked_add(rhs).ok_or(WalletError::ArithmeticOverflow)
    }

    /// Safe subtraction with error on underflow.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::ArithmeticOverflow` if the subtraction would underflow.
    #[inline]
    pub fn safe_sub(self, rhs: Self) -> WalletResult<Self> {
        self.checked_sub(rhs).ok_or(WalletError::ArithmeticOverflow)
    }

    /// Lossy conversion for JSON records.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.whole() as f64 + f64::from(self.decimal()) / MULTIPLIER as f64
    }
}

impl fmt::Debug for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenAmount({}.{:06})", self.whole(), self.decimal())
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}", self.whole(), self.decimal())
    }
}
