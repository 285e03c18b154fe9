//! HTTP request/response bodies shared by the backend and its clients.
//!
//! Both sides must agree on these definitions.

use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationResult};

/// Body of `POST /api/wallet/:address`. Absent fields keep their value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertWalletRequest {
    /// New ADA balance
    #[serde(default)]
    pub balance: Option<f64>,
    /// New LEMMI balance
    #[serde(default)]
    pub lemmi_balance: Option<f64>,
    /// New NFT ownership flag
    #[serde(default)]
    pub has_gerbil_nft: Option<bool>,
}

impl UpsertWalletRequest {
    /// Validates the numeric fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFinite` for a NaN or infinite balance.
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(balance) = self.balance {
            validation::finite("balance", balance)?;
        }
        if let Some(lemmi) = self.lemmi_balance {
            validation::finite("lemmiBalance", lemmi)?;
        }
        Ok(())
    }
}

/// Body of `POST /api/referral`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReferralRequest {
    /// Wallet that will own the code
    pub wallet_address: String,
}

impl CreateReferralRequest {
    /// Validates the wallet address.
    ///
    /// # Errors
    ///
    /// Propagates the address rule that failed.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::wallet_address(&self.wallet_address)
    }
}

/// Body of `POST /api/game/score`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    /// Player wallet
    pub wallet_address: String,
    /// Game identifier
    pub game: String,
    /// Final score
    pub score: u64,
}

impl SubmitScoreRequest {
    /// Validates address and game name.
    ///
    /// # Errors
    ///
    /// Propagates the first rule that failed.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::wallet_address(&self.wallet_address)?;
        validation::game_name(&self.game)
    }
}

/// Body of `POST /api/skills/:walletAddress`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertSkillsRequest {
    /// Neural sync skill level
    pub neural_sync: f64,
    /// Efficiency skill level
    pub efficiency: f64,
    /// Rewards accumulated so far
    pub total_rewards: f64,
}

impl UpsertSkillsRequest {
    /// Validates that every number is finite.
    ///
    /// # Errors
    ///
    /// Returns `NotFinite` naming the bad field.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::finite("neuralSync", self.neural_sync)?;
        validation::finite("efficiency", self.efficiency)?;
        validation::finite("totalRewards", self.total_rewards)
    }
}

/// Fixed-string error body returned by every failing handler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Static message
    pub error: String,
}

/// Body of `GET /api/health`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_wallet_partial_body() {
        let req: UpsertWalletRequest = serde_json::from_str(r#"{"hasGerbilNft":true}"#).unwrap();
        assert_eq!(req.has_gerbil_nft, Some(true));
        assert_eq!(req.balance, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_submit_score_rejects_negative() {
        let parsed: Result<SubmitScoreRequest, _> =
            serde_json::from_str(r#"{"walletAddress":"addr1","game":"g","score":-5}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_submit_score_validation() {
        let req = SubmitScoreRequest {
            wallet_address: String::new(),
            game: "lemmi-runner".into(),
            score: 10,
        };
        assert!(req.validate().is_err());
    }
}
