//! # LEMMI Wallet
//!
//! A mocked Cardano wallet for the runner game.
//!
//! ## Design Principles
//!
//! 1. **Zero floating point** - balances are fixed-point (`u64`, 6 decimals)
//! 2. **No chain access** - addresses and ADA balances are fabricated
//! 3. **All-or-nothing** - a failed conversion leaves every balance as it was
//!
//! ## Example
//!
//! ```rust
//! use lemmi_wallet::{MockExtension, MockWalletAdapter, TokenAmount};
//!
//! let mut wallet = MockWalletAdapter::new();
//! wallet.connect(&MockExtension::new(7)).unwrap();
//! wallet.credit_winks(TokenAmount::from_whole(1500)).unwrap();
//! let conversion = wallet.convert(TokenAmount::from_whole(1000)).unwrap();
//! assert_eq!(conversion.lemmi_received, TokenAmount::ONE);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod adapter;
pub mod conversion;
pub mod error;
pub mod fixed_point;
pub mod provider;

pub use adapter::{Balance, ConnectedWallet, Conversion, MockWalletAdapter};
pub use conversion::{lemmi_to_winks, winks_to_lemmi, MIN_CONVERTIBLE_WINKS};
pub use error::{WalletError, WalletResult};
pub use fixed_point::TokenAmount;
pub use provider::{ExtensionAccount, MockExtension, NoExtension, WalletProvider};
