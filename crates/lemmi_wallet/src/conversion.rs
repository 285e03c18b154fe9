//! WINKS to LEMMI conversion at a fixed rate.
//!
//! `1000 WINKS = 1 LEMMI`. With six decimals on both sides the smallest
//! convertible step is 0.001 WINKS, which buys 0.000001 LEMMI.

use lemmi_shared::WINKS_PER_LEMMI;

use crate::error::{WalletError, WalletResult};
use crate::fixed_point::TokenAmount;

/// Smallest amount of WINKS that converts without remainder.
pub const MIN_CONVERTIBLE_WINKS: TokenAmount = TokenAmount::from_raw(WINKS_PER_LEMMI);

/// LEMMI bought by `winks`.
///
/// # Errors
///
/// `InvalidAmount` for zero or for amounts that are not a whole number of
/// [`MIN_CONVERTIBLE_WINKS`].
pub fn winks_to_lemmi(winks: TokenAmount) -> WalletResult<TokenAmount> {
    if winks.is_zero() || winks.raw() % WINKS_PER_LEMMI != 0 {
        return Err(WalletError::InvalidAmount(winks));
    }
    winks
        .checked_div_int(WINKS_PER_LEMMI)
        .ok_or(WalletError::ArithmeticOverflow)
}

/// WINKS needed to buy `lemmi`.
///
/// # Errors
///
/// `ArithmeticOverflow` if the result does not fit.
pub fn lemmi_to_winks(lemmi: TokenAmount) -> WalletResult<TokenAmount> {
    lemmi
        .checked_mul_int(WINKS_PER_LEMMI)
        .ok_or(WalletError::ArithmeticOverflow)
}
