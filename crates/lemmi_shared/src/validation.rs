//! # Input Validation
//!
//! Checks applied to client-supplied values before they reach the store.

use thiserror::Error;

use crate::constants::{
    MAX_ADDRESS_LEN, MAX_GAME_NAME_LEN, MAX_REFERRAL_CODE_LEN, MIN_REFERRAL_CODE_LEN,
    REFERRAL_ALPHABET,
};

/// Rejected client input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Wallet address was empty.
    #[error("wallet address is empty")]
    EmptyAddress,

    /// Wallet address exceeded the maximum length.
    #[error("wallet address longer than {max} characters")]
    AddressTooLong {
        /// Allowed length.
        max: usize,
    },

    /// Wallet address contained a character outside `[A-Za-z0-9_]`.
    #[error("wallet address contains invalid character {0:?}")]
    InvalidAddressChar(char),

    /// Game name was empty or too long.
    #[error("invalid game name")]
    InvalidGameName,

    /// Referral code had the wrong length or a character outside the alphabet.
    #[error("invalid referral code")]
    InvalidReferralCode,

    /// A numeric field was NaN or infinite.
    #[error("field {0} must be a finite number")]
    NotFinite(&'static str),
}

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a wallet address (bech32-ish: alphanumerics and `_`).
///
/// # Errors
///
/// Returns the first rule the address breaks.
pub fn wallet_address(address: &str) -> ValidationResult<()> {
    if address.is_empty() {
        return Err(ValidationError::EmptyAddress);
    }
    if address.len() > MAX_ADDRESS_LEN {
        return Err(ValidationError::AddressTooLong {
            max: MAX_ADDRESS_LEN,
        });
    }
    if let Some(bad) = address
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(ValidationError::InvalidAddressChar(bad));
    }
    Ok(())
}

/// Validates a game identifier.
///
/// # Errors
///
/// Returns `InvalidGameName` when empty, blank or too long.
pub fn game_name(game: &str) -> ValidationResult<()> {
    if game.trim().is_empty() || game.len() > MAX_GAME_NAME_LEN {
        return Err(ValidationError::InvalidGameName);
    }
    Ok(())
}

/// Validates the shape of a referral code before it is looked up.
///
/// # Errors
///
/// Returns `InvalidReferralCode` when the length is outside the
/// configurable range or a character is not in the code alphabet.
pub fn referral_code(code: &str) -> ValidationResult<()> {
    let len_ok = (MIN_REFERRAL_CODE_LEN..=MAX_REFERRAL_CODE_LEN).contains(&code.len());
    if len_ok && code.bytes().all(|b| REFERRAL_ALPHABET.contains(&b)) {
        Ok(())
    } else {
        Err(ValidationError::InvalidReferralCode)
    }
}

/// Validates that a float field is finite.
///
/// # Errors
///
/// Returns `NotFinite` naming the field.
pub fn finite(field: &'static str, value: f64) -> ValidationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite(field))
    }
}
