//! Stored records of the backend.
//!
//! Plain data, serialized as camelCase JSON. The store keeps them in
//! memory only; nothing here enforces balances or uniqueness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A (mock) wallet known to the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// Wallet address, the record key
    pub address: String,
    /// ADA balance as reported by the client
    pub balance: f64,
    /// LEMMI token balance
    pub lemmi_balance: f64,
    /// Whether the wallet holds the Gerbil NFT
    pub has_gerbil_nft: bool,
    /// First time the wallet was posted
    pub created_at: DateTime<Utc>,
}

impl Wallet {
    /// Creates an empty wallet record.
    #[must_use]
    pub fn new(address: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            address: address.into(),
            balance: 0.0,
            lemmi_balance: 0.0,
            has_gerbil_nft: false,
            created_at,
        }
    }
}

/// A referral code owned by a wallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    /// Random code handed out to friends
    pub code: String,
    /// Owner of the code
    pub wallet_address: String,
    /// Number of recorded clicks
    pub click_count: u64,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// One finished game, append-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameScore {
    /// Player wallet
    pub wallet_address: String,
    /// Game identifier
    pub game: String,
    /// Final score
    pub score: u64,
    /// Submission time
    pub created_at: DateTime<Utc>,
}

/// Skill reward counters of a wallet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillReward {
    /// Owner wallet
    pub wallet_address: String,
    /// Neural sync skill level
    pub neural_sync: f64,
    /// Efficiency skill level
    pub efficiency: f64,
    /// Rewards accumulated so far
    pub total_rewards: f64,
    /// Last upsert time
    pub updated_at: DateTime<Utc>,
}

/// Feature flags derived from a wallet record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    /// The Gerbil character can be selected
    pub gerbil_character: bool,
    /// WINKS to LEMMI conversion is offered
    pub lemmi_conversion: bool,
    /// Skill rewards screen is unlocked
    pub skill_rewards: bool,
    /// Referral program is available
    pub referrals: bool,
}

impl Features {
    /// Derives the flags for a wallet, or all-off for an unknown wallet.
    #[must_use]
    pub fn for_wallet(wallet: Option<&Wallet>) -> Self {
        match wallet {
            Some(w) => Self {
                gerbil_character: w.has_gerbil_nft,
                lemmi_conversion: w.balance > 0.0,
                skill_rewards: w.lemmi_balance > 0.0,
                referrals: true,
            },
            None => Self::default(),
        }
    }
}
