//! # Game & Economy Constants
//!
//! Values every unit must agree on. Tuning values that are allowed to
//! change per deployment live in the config structs instead.

/// Game identifier used when submitting runner scores.
pub const GAME_ID: &str = "lemmi-runner";

/// Number of lanes on the runner track.
pub const LANE_COUNT: usize = 3;

/// Conversion rate of the mock wallet: this many WINKS buy one LEMMI.
pub const WINKS_PER_LEMMI: u64 = 1000;

/// Length of a generated referral code.
pub const REFERRAL_CODE_LEN: usize = 6;

/// Shortest referral code a deployment may configure.
pub const MIN_REFERRAL_CODE_LEN: usize = 4;

/// Longest referral code a deployment may configure.
pub const MAX_REFERRAL_CODE_LEN: usize = 32;

/// Characters a referral code is drawn from.
pub const REFERRAL_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Longest wallet address the backend accepts.
pub const MAX_ADDRESS_LEN: usize = 128;

/// Longest game name the backend accepts.
pub const MAX_GAME_NAME_LEN: usize = 64;

/// Default HTTP bind address of the backend.
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";
