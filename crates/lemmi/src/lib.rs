//! # LEMMI Runner
//!
//! The main game crate, integrating all units.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          LEMMI RUNNER                            │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐    ┌────────────────┐    ┌─────────────────┐   │
//! │  │ lemmi_wallet │───>│     lemmi      │───>│  lemmi_server   │   │
//! │  │ connect      │    │  session       │    │  MemoryStore    │   │
//! │  │ WINKS/LEMMI  │<───│  autopilot     │    │  (score sink)   │   │
//! │  └──────────────┘    └───────┬────────┘    └─────────────────┘   │
//! │                              │                                   │
//! │                 ┌────────────┴────────────┐                      │
//! │                 v                         v                      │
//! │        ┌────────────────┐       ┌──────────────────┐             │
//! │        │  lemmi_core    │──────>│ lemmi_rendering  │             │
//! │        │  GameLoop      │ view  │  2D canvas / 3D  │             │
//! │        └────────────────┘       └──────────────────┘             │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `autopilot`: rule-based player for headless runs
//! - `session`: select, run, reward and submit in one call

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod autopilot;
pub mod session;

// Re-export the units
pub use lemmi_core as core;
pub use lemmi_rendering as rendering;
pub use lemmi_server as server;
pub use lemmi_shared as shared;
pub use lemmi_wallet as wallet;

pub use autopilot::{Autopilot, AutopilotConfig};
pub use session::{ScoreSink, Session, SessionConfig, SessionError, SessionReport, SessionResult};
