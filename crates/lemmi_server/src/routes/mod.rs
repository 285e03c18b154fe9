//! HTTP handlers, one module per resource.

pub mod features;
pub mod game;
pub mod health;
pub mod referral;
pub mod skills;
pub mod wallet;
