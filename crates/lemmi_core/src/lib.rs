//! # LEMMI Core
//!
//! The endless-runner simulation, free of rendering and I/O.
//!
//! ## Design Principles
//!
//! 1. **Deterministic** - a run is fully described by its seed, its config
//!    and its input script
//! 2. **Fixed step** - the simulation only ever advances by a fixed `dt`
//! 3. **Monotonic progress** - score, speed and distance never go down
//!    within a run
//! 4. **External configuration** - all tuning values come from TOML
//!
//! ## Example
//!
//! ```rust
//! use lemmi_core::{Input, RunnerConfig, RunnerState};
//!
//! let mut runner = RunnerState::new(RunnerConfig::default(), 42);
//! runner.start();
//! runner.apply(Input::MoveLeft);
//! for _ in 0..60 {
//!     runner.step(1.0 / 60.0);
//! }
//! assert!(runner.score() > 0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod character;
pub mod config;
pub mod error;
pub mod events;
pub mod game_loop;
pub mod lane;
pub mod physics;
pub mod runner;
pub mod world;

pub use character::{Character, CharacterSelect, CharacterStats};
pub use config::RunnerConfig;
pub use error::{CoreError, CoreResult};
pub use events::{EventBus, EventReceiver, EventSender, GameEvent};
pub use game_loop::{FrameReport, FrameStats, FrameStatsAccumulator, GameLoop, GameLoopConfig};
pub use lane::Lane;
pub use physics::{Aabb, PlayerBody, Pose};
pub use runner::{Input, Phase, RunSummary, RunnerState, StepOutcome};
pub use world::{ObjectKind, ObstacleKind, Spawner, WorldObject};
