//! # Runner Event System
//!
//! One-way channel from the simulation to whoever presents it (renderer,
//! HUD, sound, session bookkeeping).
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌──────────────┐
//! │ RunnerState │─────>│  EventBus   │─────>│ Presentation │
//! │   (step)    │      │  (bounded)  │      │  / Session   │
//! └─────────────┘      └─────────────┘      └──────────────┘
//! ```
//!
//! Events are notifications only. A full channel drops events; the
//! simulation never depends on delivery.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::lane::Lane;
use crate::world::ObstacleKind;

/// Events emitted by the runner simulation.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// A run left the ready phase.
    RunStarted {
        /// Seed of the run.
        seed: u64,
    },

    /// The player targeted another lane.
    LaneChanged {
        /// Lane left.
        from: Lane,
        /// Lane targeted.
        to: Lane,
    },

    /// The player left the ground.
    Jumped,

    /// The player started sliding.
    SlideStarted,

    /// A coin was picked up.
    CoinCollected {
        /// Id of the coin object.
        coin_id: u64,
        /// Points awarded.
        points: u64,
        /// Score after the pickup.
        score: u64,
    },

    /// An obstacle passed behind the player without a hit.
    ObstacleDodged {
        /// Id of the obstacle object.
        obstacle_id: u64,
        /// Obstacle kind.
        kind: ObstacleKind,
    },

    /// The speed ramp crossed another whole unit.
    SpeedIncreased {
        /// New speed.
        speed: f32,
    },

    /// The run was paused.
    Paused,

    /// The run was resumed.
    Resumed,

    /// The player hit an obstacle.
    GameOver {
        /// Final score of the run.
        final_score: u64,
        /// What ended the run.
        cause: ObstacleKind,
    },
}

/// Event bus between the simulation and its consumers.
///
/// Pre-allocates a bounded channel so a stalled consumer cannot grow
/// memory.
pub struct EventBus {
    sender: Sender<GameEvent>,
    receiver: Receiver<GameEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum events in flight before new ones are dropped.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a connected sender/receiver pair.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

/// Handle for sending events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<GameEvent>,
}

impl EventSender {
    /// Sends an event (non-blocking).
    ///
    /// Returns `false` if the event was dropped.
    #[inline]
    pub fn send(&self, event: GameEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                tracing::trace!(?dropped, "event bus full");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle for receiving events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<GameEvent>,
}

impl EventReceiver {
    /// Receives all pending events (non-blocking).
    #[inline]
    pub fn drain(&self) -> Vec<GameEvent> {
        let mut events = Vec::with_capacity(self.receiver.len());
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }
}
