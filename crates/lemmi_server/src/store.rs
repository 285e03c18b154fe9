//! # Record Store
//!
//! Handlers talk to a [`Store`]; [`MemoryStore`] keeps everything in
//! `HashMap`s behind `parking_lot` locks. Every method takes and releases
//! its locks before returning, so no guard ever crosses an `.await`.

use std::collections::HashMap;

use chrono::Utc;
use lemmi_shared::{
    GameScore, Referral, SkillReward, UpsertSkillsRequest, UpsertWalletRequest, Wallet,
    REFERRAL_ALPHABET, REFERRAL_CODE_LEN,
};
use parking_lot::{Mutex, RwLock};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{StoreError, StoreResult};

/// Codes drawn before referral creation gives up.
pub const MAX_CODE_ATTEMPTS: u32 = 32;

/// Repository of backend records.
pub trait Store: Send + Sync {
    /// Wallet by address.
    fn wallet(&self, address: &str) -> Option<Wallet>;

    /// Creates the wallet on first call, then applies the provided fields.
    fn upsert_wallet(&self, address: &str, update: &UpsertWalletRequest) -> Wallet;

    /// Returns the wallet's referral, creating one with a fresh code if needed.
    ///
    /// # Errors
    ///
    /// Fails when no unused code can be drawn.
    fn get_or_create_referral(&self, wallet_address: &str) -> StoreResult<Referral>;

    /// Referral owned by a wallet.
    fn referral_by_wallet(&self, wallet_address: &str) -> Option<Referral>;

    /// Adds one click to a code. `None` for an unknown code.
    fn record_click(&self, code: &str) -> Option<Referral>;

    /// Appends a finished game.
    fn add_score(&self, wallet_address: &str, game: &str, score: u64) -> GameScore;

    /// Scores of a wallet in one game, highest first, ties oldest first.
    fn scores(&self, wallet_address: &str, game: &str) -> Vec<GameScore>;

    /// Skill reward of a wallet.
    fn skill_reward(&self, wallet_address: &str) -> Option<SkillReward>;

    /// Replaces the skill reward of a wallet.
    fn upsert_skills(&self, wallet_address: &str, update: &UpsertSkillsRequest) -> SkillReward;
}

#[derive(Default)]
struct ReferralTable {
    by_code: HashMap<String, Referral>,
    code_by_wallet: HashMap<String, String>,
}

/// In-memory [`Store`]. Everything is lost on restart.
pub struct MemoryStore {
    wallets: RwLock<HashMap<String, Wallet>>,
    referrals: RwLock<ReferralTable>,
    scores: RwLock<Vec<GameScore>>,
    skills: RwLock<HashMap<String, SkillReward>>,
    code_rng: Mutex<ChaCha8Rng>,
    code_len: usize,
}

impl MemoryStore {
    /// Creates an empty store. `seed` fixes the referral code sequence.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            wallets: RwLock::new(HashMap::new()),
            referrals: RwLock::new(ReferralTable::default()),
            scores: RwLock::new(Vec::new()),
            skills: RwLock::new(HashMap::new()),
            code_rng: Mutex::new(rng),
            code_len: REFERRAL_CODE_LEN,
        }
    }

    /// Sets the referral code length.
    #[must_use]
    pub fn with_code_len(mut self, len: usize) -> Self {
        self.code_len = len;
        self
    }

    /// Number of stored scores.
    #[must_use]
    pub fn score_count(&self) -> usize {
        self.scores.read().len()
    }

    fn draw_code(&self) -> String {
        let mut rng = self.code_rng.lock();
        (0..self.code_len)
            .map(|_| char::from(REFERRAL_ALPHABET[rng.gen_range(0..REFERRAL_ALPHABET.len())]))
            .collect()
    }
}

impl Store for MemoryStore {
    fn wallet(&self, address: &str) -> Option<Wallet> {
        self.wallets.read().get(address).cloned()
    }

    fn upsert_wallet(&self, address: &str, update: &UpsertWalletRequest) -> Wallet {
        let now = Utc::now();
        let mut wallets = self.wallets.write();
        let wallet = wallets.entry(address.to_owned()).or_insert_with(|| {
            tracing::info!(%address, "wallet created");
            Wallet::new(address, now)
        });
        if let Some(balance) = update.balance {
            wallet.balance = balance;
        }
        if let Some(lemmi) = update.lemmi_balance {
            wallet.lemmi_balance = lemmi;
        }
        if let Some(nft) = update.has_gerbil_nft {
            wallet.has_gerbil_nft = nft;
        }
        wallet.clone()
    }

    fn get_or_create_referral(&self, wallet_address: &str) -> StoreResult<Referral> {
        let mut table = self.referrals.write();
        if let Some(existing) = table
            .code_by_wallet
            .get(wallet_address)
            .and_then(|code| table.by_code.get(code))
        {
            return Ok(existing.clone());
        }

        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = self.draw_code();
            if table.by_code.contains_key(&code) {
                continue;
            }
            let referral = Referral {
                code: code.clone(),
                wallet_address: wallet_address.to_owned(),
                click_count: 0,
                created_at: Utc::now(),
            };
            table
                .code_by_wallet
                .insert(wallet_address.to_owned(), code.clone());
            table.by_code.insert(code, referral.clone());
            tracing::info!(wallet = %wallet_address, code = %referral.code, "referral created");
            return Ok(referral);
        }

        Err(StoreError::ReferralCodesExhausted {
            attempts: MAX_CODE_ATTEMPTS,
        })
    }

    fn referral_by_wallet(&self, wallet_address: &str) -> Option<Referral> {
        let table = self.referrals.read();
        table
            .code_by_wallet
            .get(wallet_address)
            .and_then(|code| table.by_code.get(code))
            .cloned()
    }

    fn record_click(&self, code: &str) -> Option<Referral> {
        let mut table = self.referrals.write();
        let referral = table.by_code.get_mut(code)?;
        referral.click_count = referral.click_count.saturating_add(1);
        Some(referral.clone())
    }

    fn add_score(&self, wallet_address: &str, game: &str, score: u64) -> GameScore {
        let record = GameScore {
            wallet_address: wallet_address.to_owned(),
            game: game.to_owned(),
            score,
            created_at: Utc::now(),
        };
        self.scores.write().push(record.clone());
        record
    }

    fn scores(&self, wallet_address: &str, game: &str) -> Vec<GameScore> {
        let mut matching: Vec<GameScore> = self
            .scores
            .read()
            .iter()
            .filter(|s| s.wallet_address == wallet_address && s.game == game)
            .cloned()
            .collect();
        // Stable: equal scores keep insertion order.
        matching.sort_by(|a, b| b.score.cmp(&a.score));
        matching
    }

    fn skill_reward(&self, wallet_address: &str) -> Option<SkillReward> {
        self.skills.read().get(wallet_address).cloned()
    }

    fn upsert_skills(&self, wallet_address: &str, update: &UpsertSkillsRequest) -> SkillReward {
        let reward = SkillReward {
            wallet_address: wallet_address.to_owned(),
            neural_sync: update.neural_sync,
            efficiency: update.efficiency,
            total_rewards: update.total_rewards,
            updated_at: Utc::now(),
        };
        self.skills
            .write()
            .insert(wallet_address.to_owned(), reward.clone());
        reward
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_wallet_upsert_keeps_unset_fields() {
        let store = MemoryStore::new(Some(1));
        store.upsert_wallet(
            "addr1",
            &UpsertWalletRequest {
                balance: Some(50.0),
                ..Default::default()
            },
        );
        let wallet = store.upsert_wallet(
            "addr1",
            &UpsertWalletRequest {
                has_gerbil_nft: Some(true),
                ..Default::default()
            },
        );
        assert_eq!(wallet.balance, 50.0);
        assert!(wallet.has_gerbil_nft);
        assert_eq!(wallet.lemmi_balance, 0.0);
    }

    #[test]
    fn test_created_at_is_stable() {
        let store = MemoryStore::new(Some(1));
        let first = store.upsert_wallet("addr1", &UpsertWalletRequest::default());
        let second = store.upsert_wallet(
            "addr1",
            &UpsertWalletRequest {
                balance: Some(1.0),
                ..Default::default()
            },
        );
        assert_eq!(first.created_at, second.created_at);
    }

    #[test]
    fn test_referral_is_created_once_per_wallet() {
        let store = MemoryStore::new(Some(7));
        let a = store.get_or_create_referral("addr1").unwrap();
        let b = store.get_or_create_referral("addr1").unwrap();
        assert_eq!(a.code, b.code);
        assert_eq!(a.code.len(), REFERRAL_CODE_LEN);
        assert!(a.code.bytes().all(|c| REFERRAL_ALPHABET.contains(&c)));
    }

    #[test]
    fn test_referral_codes_are_unique() {
        let store = MemoryStore::new(Some(3)).with_code_len(4);
        let mut codes = std::collections::HashSet::new();
        for i in 0..500 {
            let referral = store.get_or_create_referral(&format!("addr{i}")).unwrap();
            assert!(codes.insert(referral.code));
        }
    }

    #[test]
    fn test_click_unknown_code() {
        let store = MemoryStore::new(Some(1));
        assert!(store.record_click("NOPE00").is_none());
    }

    #[test]
    fn test_concurrent_clicks_all_counted() {
        let store = Arc::new(MemoryStore::new(Some(1)));
        let code = store.get_or_create_referral("addr1").unwrap().code;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let code = code.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        store.record_click(&code);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.referral_by_wallet("addr1").unwrap().click_count, 2000);
    }

    #[test]
    fn test_scores_ordered_high_first_ties_oldest_first() {
        let store = MemoryStore::new(Some(1));
        let first = store.add_score("addr1", "g", 50);
        store.add_score("addr1", "g", 90);
        let third = store.add_score("addr1", "g", 50);
        store.add_score("addr1", "other", 1000);
        store.add_score("addr2", "g", 1000);

        let scores = store.scores("addr1", "g");
        let values: Vec<u64> = scores.iter().map(|s| s.score).collect();
        assert_eq!(values, vec![90, 50, 50]);
        assert_eq!(scores[1], first);
        assert_eq!(scores[2], third);
        assert_eq!(store.score_count(), 5);
    }

    #[test]
    fn test_skills_upsert_replaces() {
        let store = MemoryStore::new(Some(1));
        assert!(store.skill_reward("addr1").is_none());
        let update = UpsertSkillsRequest {
            neural_sync: 1.0,
            efficiency: 2.0,
            total_rewards: 3.0,
        };
        store.upsert_skills("addr1", &update);
        let replaced = store.upsert_skills(
            "addr1",
            &UpsertSkillsRequest {
                total_rewards: 10.0,
                ..update
            },
        );
        assert_eq!(replaced.total_rewards, 10.0);
        assert_eq!(store.skill_reward("addr1").unwrap(), replaced);
    }
}
