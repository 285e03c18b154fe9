//! # Mock Wallet Adapter
//!
//! Connection state plus the three balances the game cares about:
//!
//! ```text
//!  NoExtension ──enable()──> ExtensionNotFound
//!
//!  MockExtension ──enable()──> Connected { ADA, WINKS, LEMMI }
//!                                 │   credit_winks(coins)
//!                                 │   convert(winks) : WINKS -> LEMMI
//!                                 └── disconnect()
//! ```
//!
//! WINKS and LEMMI start at zero on every connect; only ADA comes from the
//! extension.

use serde::{Deserialize, Serialize};

use crate::conversion::winks_to_lemmi;
use crate::error::{WalletError, WalletResult};
use crate::fixed_point::TokenAmount;
use crate::provider::WalletProvider;

/// Balances of a connected wallet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// ADA reported by the extension.
    pub ada: TokenAmount,
    /// In-game soft currency.
    pub winks: TokenAmount,
    /// Token bought with WINKS.
    pub lemmi: TokenAmount,
}

/// Result of a successful conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conversion {
    /// WINKS taken.
    pub winks_spent: TokenAmount,
    /// LEMMI given.
    pub lemmi_received: TokenAmount,
    /// Balances afterwards.
    pub balance: Balance,
}

/// A connected account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectedWallet {
    /// Extension that approved the connection.
    pub provider: String,
    /// Account address.
    pub address: String,
    /// Whether the account holds the Gerbil NFT.
    pub has_gerbil_nft: bool,
    /// Current balances.
    pub balance: Balance,
}

/// In-memory wallet adapter.
#[derive(Debug, Default)]
pub struct MockWalletAdapter {
    connected: Option<ConnectedWallet>,
}

impl MockWalletAdapter {
    /// Creates a disconnected adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self { connected: None }
    }

    /// Connects through `provider`, replacing any previous connection.
    ///
    /// # Errors
    ///
    /// Whatever the provider reports, typically `ExtensionNotFound`.
    pub fn connect(&mut self, provider: &dyn WalletProvider) -> WalletResult<&ConnectedWallet> {
        let account = match provider.enable() {
            Ok(account) => account,
            Err(err) => {
                tracing::warn!(provider = provider.name(), %err, "wallet connect failed");
                return Err(err);
            }
        };
        tracing::info!(provider = provider.name(), address = %account.address, "wallet connected");

        let wallet = self.connected.insert(ConnectedWallet {
            provider: provider.name().to_owned(),
            address: account.address,
            has_gerbil_nft: account.has_gerbil_nft,
            balance: Balance {
                ada: account.ada,
                winks: TokenAmount::ZERO,
                lemmi: TokenAmount::ZERO,
            },
        });
        Ok(&*wallet)
    }

    /// Drops the connection. Returns `false` if nothing was connected.
    pub fn disconnect(&mut self) -> bool {
        match self.connected.take() {
            Some(wallet) => {
                tracing::info!(address = %wallet.address, "wallet disconnected");
                true
            }
            None => false,
        }
    }

    /// Whether a wallet is connected.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected.is_some()
    }

    /// The connected account, if any.
    #[must_use]
    pub fn wallet(&self) -> Option<&ConnectedWallet> {
        self.connected.as_ref()
    }

    /// Current balances.
    ///
    /// # Errors
    ///
    /// `NotConnected` without a connection.
    pub fn get_balance(&self) -> WalletResult<Balance> {
        self.connected
            .as_ref()
            .map(|wallet| wallet.balance)
            .ok_or(WalletError::NotConnected)
    }

    /// Adds game earnings to the WINKS balance.
    ///
    /// # Errors
    ///
    /// `NotConnected` without a connection, `ArithmeticOverflow` if the
    /// balance would not fit.
    pub fn credit_winks(&mut self, amount: TokenAmount) -> WalletResult<Balance> {
        let wallet = self.connected.as_mut().ok_or(WalletError::NotConnected)?;
        wallet.balance.winks = wallet.balance.winks.safe_add(amount)?;
        tracing::debug!(%amount, winks = %wallet.balance.winks, "winks credited");
        Ok(wallet.balance)
    }

    /// Converts `winks` into LEMMI at 1000 WINKS = 1 LEMMI.
    ///
    /// Balances are untouched on any error.
    ///
    /// # Errors
    ///
    /// - `NotConnected` without a connection
    /// - `InvalidAmount` for zero or a fraction of the smallest step
    /// - `InsufficientBalance` when the wallet holds fewer WINKS
    /// - `ArithmeticOverflow` if the LEMMI balance would not fit
    pub fn convert(&mut self, winks: TokenAmount) -> WalletResult<Conversion> {
        let wallet = self.connected.as_mut().ok_or(WalletError::NotConnected)?;
        let lemmi = winks_to_lemmi(winks)?;

        if winks > wallet.balance.winks {
            tracing::warn!(needed = %winks, available = %wallet.balance.winks, "conversion refused");
            return Err(WalletError::InsufficientBalance {
                needed: winks,
                available: wallet.balance.winks,
            });
        }

        let new_winks = wallet.balance.winks.safe_sub(winks)?;
        let new_lemmi = wallet.balance.lemmi.safe_add(lemmi)?;
        wallet.balance.winks = new_winks;
        wallet.balance.lemmi = new_lemmi;

        tracing::info!(winks = %winks, lemmi = %lemmi, "converted winks to lemmi");
        Ok(Conversion {
            winks_spent: winks,
            lemmi_received: lemmi,
            balance: wallet.balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MockExtension, NoExtension};

    fn connected() -> MockWalletAdapter {
        let mut adapter = MockWalletAdapter::new();
        adapter.connect(&MockExtension::new(1)).unwrap();
        adapter
    }

    #[test]
    fn test_connect_starts_with_zero_winks() {
        let adapter = connected();
        let balance = adapter.get_balance().unwrap();
        assert_eq!(balance.ada, TokenAmount::from_whole(1_000));
        assert!(balance.winks.is_zero());
        assert!(balance.lemmi.is_zero());
    }

    #[test]
    fn test_no_extension_stays_disconnected() {
        let mut adapter = MockWalletAdapter::new();
        assert_eq!(
            adapter.connect(&NoExtension).map(|_| ()),
            Err(WalletError::ExtensionNotFound)
        );
        assert!(!adapter.is_connected());
    }

    #[test]
    fn test_disconnected_operations_fail() {
        let mut adapter = MockWalletAdapter::new();
        assert_eq!(adapter.get_balance(), Err(WalletError::NotConnected));
        assert_eq!(
            adapter.credit_winks(TokenAmount::ONE),
            Err(WalletError::NotConnected)
        );
        assert_eq!(
            adapter.convert(TokenAmount::from_whole(1000)),
            Err(WalletError::NotConnected)
        );
        assert!(!adapter.disconnect());
    }

    #[test]
    fn test_convert_moves_winks_to_lemmi() {
        let mut adapter = connected();
        adapter.credit_winks(TokenAmount::from_whole(2500)).unwrap();

        let conversion = adapter.convert(TokenAmount::from_whole(2000)).unwrap();
        assert_eq!(conversion.lemmi_received, TokenAmount::from_whole(2));
        assert_eq!(conversion.balance.winks, TokenAmount::from_whole(500));
        assert_eq!(conversion.balance.lemmi, TokenAmount::from_whole(2));
    }

    #[test]
    fn test_insufficient_balance_leaves_balances() {
        let mut adapter = connected();
        adapter.credit_winks(TokenAmount::from_whole(500)).unwrap();

        let err = adapter.convert(TokenAmount::from_whole(1000)).unwrap_err();
        assert_eq!(
            err,
            WalletError::InsufficientBalance {
                needed: TokenAmount::from_whole(1000),
                available: TokenAmount::from_whole(500),
            }
        );
        assert!(err.user_message().contains("Insufficient"));
        assert_eq!(
            adapter.get_balance().unwrap().winks,
            TokenAmount::from_whole(500)
        );
    }

    #[test]
    fn test_disconnect_clears_session() {
        let mut adapter = connected();
        adapter.credit_winks(TokenAmount::from_whole(10)).unwrap();
        assert!(adapter.disconnect());
        adapter.connect(&MockExtension::new(1)).unwrap();
        assert!(adapter.get_balance().unwrap().winks.is_zero());
    }
}
