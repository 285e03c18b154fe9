//! # Wallet Extensions
//!
//! The seam where a browser wallet extension would plug in. Both
//! implementations here are stand-ins: one fabricates an account, the
//! other behaves like a browser without any extension installed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{WalletError, WalletResult};
use crate::fixed_point::TokenAmount;

/// Account data handed over by an extension when the user approves access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionAccount {
    /// Bech32-looking address (alphanumeric and `_` only).
    pub address: String,
    /// ADA held by the account.
    pub ada: TokenAmount,
    /// Whether the account holds the Gerbil NFT.
    pub has_gerbil_nft: bool,
}

/// A wallet browser extension.
pub trait WalletProvider {
    /// Name shown in the connect dialog.
    fn name(&self) -> &str;

    /// Asks the extension for account access.
    ///
    /// # Errors
    ///
    /// `ExtensionNotFound` when no extension answers.
    fn enable(&self) -> WalletResult<ExtensionAccount>;
}

/// Fabricates a testnet-looking account from a seed.
#[derive(Clone, Debug)]
pub struct MockExtension {
    name: String,
    seed: u64,
    ada: TokenAmount,
    has_gerbil_nft: bool,
}

impl MockExtension {
    /// Address prefix of fabricated accounts.
    pub const ADDRESS_PREFIX: &'static str = "addr_test1q";

    /// Characters after the prefix.
    const ADDRESS_BODY_LEN: usize = 50;

    /// Creates an extension holding 1,000 ADA and no NFT.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            name: "Mock Nami".to_owned(),
            seed,
            ada: TokenAmount::from_whole(1_000),
            has_gerbil_nft: false,
        }
    }

    /// Sets the ADA balance.
    #[must_use]
    pub fn with_ada(mut self, ada: TokenAmount) -> Self {
        self.ada = ada;
        self
    }

    /// Gives the account the Gerbil NFT.
    #[must_use]
    pub fn with_gerbil_nft(mut self, has_gerbil_nft: bool) -> Self {
        self.has_gerbil_nft = has_gerbil_nft;
        self
    }

    fn fabricate_address(&self) -> String {
        const BECH32: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut address = String::with_capacity(Self::ADDRESS_PREFIX.len() + Self::ADDRESS_BODY_LEN);
        address.push_str(Self::ADDRESS_PREFIX);
        for _ in 0..Self::ADDRESS_BODY_LEN {
            address.push(char::from(BECH32[rng.gen_range(0..BECH32.len())]));
        }
        address
    }
}

impl WalletProvider for MockExtension {
    fn name(&self) -> &str {
        &self.name
    }

    fn enable(&self) -> WalletResult<ExtensionAccount> {
        Ok(ExtensionAccount {
            address: self.fabricate_address(),
            ada: self.ada,
            has_gerbil_nft: self.has_gerbil_nft,
        })
    }
}

/// A browser with no wallet extension installed.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoExtension;

impl WalletProvider for NoExtension {
    fn name(&self) -> &str {
        "none"
    }

    fn enable(&self) -> WalletResult<ExtensionAccount> {
        Err(WalletError::ExtensionNotFound)
    }
}
