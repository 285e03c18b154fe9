//! # LEMMI Shared
//!
//! Common types used by the game, the wallet adapter and the backend.
//!
//! ## RULE
//!
//! This crate must NEVER depend on:
//! - `axum` / `tokio`
//! - any rendering crate
//!
//! If you need HTTP types, put them in `lemmi_server`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod constants;
pub mod math;
pub mod records;
pub mod validation;

pub use api::{
    CreateReferralRequest, ErrorBody, HealthResponse, SubmitScoreRequest, UpsertSkillsRequest,
    UpsertWalletRequest,
};
pub use constants::{
    DEFAULT_BIND, GAME_ID, LANE_COUNT, MAX_ADDRESS_LEN, MAX_GAME_NAME_LEN, MAX_REFERRAL_CODE_LEN,
    MIN_REFERRAL_CODE_LEN, REFERRAL_ALPHABET, REFERRAL_CODE_LEN, WINKS_PER_LEMMI,
};
pub use math::{Vec2, Vec3};
pub use records::{Features, GameScore, Referral, SkillReward, Wallet};
pub use validation::{ValidationError, ValidationResult};
