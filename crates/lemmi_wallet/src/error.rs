//! # Wallet Error Types
//!
//! All errors that can occur in the mock wallet.

use thiserror::Error;

use crate::fixed_point::TokenAmount;

/// Errors that can occur in the mock wallet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// No wallet extension is installed.
    #[error("wallet extension not found")]
    ExtensionNotFound,

    /// An operation needed a connected wallet.
    #[error("wallet not connected")]
    NotConnected,

    /// Not enough WINKS for the requested conversion.
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance {
        /// The amount required.
        needed: TokenAmount,
        /// The amount available.
        available: TokenAmount,
    },

    /// Zero, or not a whole number of conversion units.
    #[error("invalid amount: {0}")]
    InvalidAmount(TokenAmount),

    /// Arithmetic overflow in fixed-point calculation.
    #[error("arithmetic overflow in balance calculation")]
    ArithmeticOverflow,
}

impl WalletError {
    /// Text for an alert or toast.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ExtensionNotFound => {
                "Cardano wallet extension not found. Please install a wallet extension to continue."
                    .to_owned()
            }
            Self::NotConnected => "Please connect your wallet first.".to_owned(),
            Self::InsufficientBalance { needed, available } => {
                format!("Insufficient WINKS balance. You need {needed} but only have {available}.")
            }
            Self::InvalidAmount(_) => {
                "Please enter a positive amount of WINKS in steps of 0.001.".to_owned()
            }
            Self::ArithmeticOverflow => "That amount is too large.".to_owned(),
        }
    }
}

/// Result type for wallet operations.
pub type WalletResult<T> = Result<T, WalletError>;
