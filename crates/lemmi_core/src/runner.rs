//! # Runner State Machine
//!
//! One run of the game, advanced once per simulation step.
//!
//! ```text
//!            start()           hit obstacle
//!   Ready ───────────> Running ────────────> GameOver
//!                       │   ^
//!               pause() │   │ resume()
//!                       v   │
//!                      Paused
//! ```
//!
//! Per step (Running only):
//! 1. Ramp speed toward `max_speed`
//! 2. Move the player (lane easing, jump arc, slide timer)
//! 3. Move every object toward the player by `speed * dt`
//! 4. Resolve collisions (swept along Z so large steps cannot tunnel)
//! 5. Despawn objects behind the player
//! 6. Spawn what is due
//!
//! Score is `floor(distance * points_per_unit) + coin points`. Both terms
//! only grow, so the score never decreases within a run.

use std::collections::HashSet;

use lemmi_shared::Vec3;

use crate::character::Character;
use crate::config::RunnerConfig;
use crate::events::{EventSender, GameEvent};
use crate::lane::Lane;
use crate::physics::{Aabb, PlayerBody};
use crate::world::{ObjectKind, ObstacleKind, Spawner, WorldObject, COIN_BASE_Y, COIN_SIZE};

/// Lifecycle phase of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for `start`.
    Ready,
    /// Simulating.
    Running,
    /// Frozen until `resume`.
    Paused,
    /// Ended by an obstacle. Only `reset` leaves this phase.
    GameOver,
}

/// Player commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// Target the lane to the left.
    MoveLeft,
    /// Target the lane to the right.
    MoveRight,
    /// Jump if grounded.
    Jump,
    /// Slide (fast-falls when airborne).
    Slide,
    /// Freeze the run.
    Pause,
    /// Continue a paused run.
    Resume,
}

/// Result of one `step` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not running; nothing changed.
    Idle,
    /// The simulation advanced.
    Advanced,
    /// The step ended the run.
    GameOver {
        /// Final score.
        final_score: u64,
    },
}

/// Totals of a run, for result screens and score submission.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Seed the run was generated from.
    pub seed: u64,
    /// Character that ran.
    pub character: Character,
    /// Final (or current) score.
    pub score: u64,
    /// World units travelled.
    pub distance: f32,
    /// Coins picked up.
    pub coins_collected: u32,
    /// Obstacles that passed behind the player.
    pub obstacles_dodged: u32,
    /// Seconds of running (pauses excluded).
    pub duration_secs: f32,
    /// Speed at the end of the run.
    pub top_speed: f32,
    /// Obstacle that ended the run, if it ended.
    pub cause: Option<ObstacleKind>,
}

/// A single run of the runner game.
pub struct RunnerState {
    config: RunnerConfig,
    character: Character,
    seed: u64,
    phase: Phase,
    player: PlayerBody,
    objects: Vec<WorldObject>,
    spawner: Spawner,
    speed: f32,
    distance: f32,
    coin_points: u64,
    score: u64,
    elapsed: f32,
    coins_collected: u32,
    collected: HashSet<u64>,
    obstacles_dodged: u32,
    cause: Option<ObstacleKind>,
    events: Option<EventSender>,
}

impl RunnerState {
    /// Creates a run in the `Ready` phase.
    ///
    /// The config is assumed valid; see [`RunnerConfig::validate`].
    #[must_use]
    pub fn new(config: RunnerConfig, seed: u64) -> Self {
        let spawner = Spawner::new(seed, &config);
        let speed = config.base_speed;
        Self {
            config,
            character: Character::default(),
            seed,
            phase: Phase::Ready,
            player: PlayerBody::new(),
            objects: Vec::with_capacity(64),
            spawner,
            speed,
            distance: 0.0,
            coin_points: 0,
            score: 0,
            elapsed: 0.0,
            coins_collected: 0,
            collected: HashSet::new(),
            obstacles_dodged: 0,
            cause: None,
            events: None,
        }
    }

    /// Sets the character for this run.
    #[must_use]
    pub fn with_character(mut self, character: Character) -> Self {
        self.character = character;
        self
    }

    /// Routes events of this run to a bus.
    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Discards the run and prepares a fresh one with a new seed.
    ///
    /// Keeps config, character and event routing.
    pub fn reset(&mut self, seed: u64) {
        let config = self.config.clone();
        let character = self.character;
        let events = self.events.take();
        *self = Self::new(config, seed).with_character(character);
        self.events = events;
        tracing::debug!(seed, "run reset");
    }

    /// Moves `Ready` to `Running`. Returns `false` in any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        self.phase = Phase::Running;
        tracing::info!(seed = self.seed, character = ?self.character, "run started");
        self.emit(GameEvent::RunStarted { seed: self.seed });
        true
    }

    /// Applies a player command. Returns `true` if it had an effect.
    pub fn apply(&mut self, input: Input) -> bool {
        match (self.phase, input) {
            (Phase::Running, Input::Pause) => {
                self.phase = Phase::Paused;
                self.emit(GameEvent::Paused);
                true
            }
            (Phase::Paused, Input::Resume) => {
                self.phase = Phase::Running;
                self.emit(GameEvent::Resumed);
                true
            }
            (Phase::Running, Input::MoveLeft | Input::MoveRight) => {
                let from = self.player.lane;
                let changed = if input == Input::MoveLeft {
                    self.player.move_left()
                } else {
                    self.player.move_right()
                };
                if changed {
                    self.emit(GameEvent::LaneChanged {
                        from,
                        to: self.player.lane,
                    });
                }
                changed
            }
            (Phase::Running, Input::Jump) => {
                let velocity = self.config.jump_velocity * self.character.stats().jump_multiplier;
                let jumped = self.player.jump(velocity);
                if jumped {
                    self.emit(GameEvent::Jumped);
                }
                jumped
            }
            (Phase::Running, Input::Slide) => {
                let slid = self.player.slide(self.config.slide_duration);
                if slid {
                    self.emit(GameEvent::SlideStarted);
                }
                slid
            }
            _ => false,
        }
    }

    /// Advances the run by `dt` seconds (clamped to `max_step`).
    pub fn step(&mut self, dt: f32) -> StepOutcome {
        if self.phase != Phase::Running {
            return StepOutcome::Idle;
        }
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.max_step)
        } else {
            0.0
        };
        if dt == 0.0 {
            return StepOutcome::Advanced;
        }
        self.elapsed += dt;

        // 1. Difficulty ramp
        let previous_whole = self.speed.floor();
        self.speed = (self.speed + self.config.speed_ramp * dt).min(self.config.max_speed);
        if self.speed.floor() > previous_whole {
            self.emit(GameEvent::SpeedIncreased { speed: self.speed });
        }

        // 2. Player
        let stats = self.character.stats();
        self.player.update(dt, &self.config, &stats);

        // 3. World
        let travel = self.speed * dt;
        self.distance += travel;
        for object in &mut self.objects {
            object.position.z -= travel;
        }

        // 4-5. Collisions and despawn
        let hit = self.resolve_objects(travel);
        self.score = self.score.max(self.current_score());

        if let Some(kind) = hit {
            self.phase = Phase::GameOver;
            self.cause = Some(kind);
            tracing::info!(
                seed = self.seed,
                score = self.score,
                distance = self.distance,
                coins = self.coins_collected,
                cause = ?kind,
                "game over"
            );
            self.emit(GameEvent::GameOver {
                final_score: self.score,
                cause: kind,
            });
            return StepOutcome::GameOver {
                final_score: self.score,
            };
        }

        // 6. Spawning
        self.spawner
            .update(dt, self.speed, &self.config, &mut self.objects);

        StepOutcome::Advanced
    }

    /// Collects coins, detects the first obstacle hit and despawns objects
    /// that fell behind. Returns the kind of obstacle hit, if any.
    fn resolve_objects(&mut self, travel: f32) -> Option<ObstacleKind> {
        let player_box = self.player.aabb(&self.config);
        let despawn_z = self.config.despawn_distance;
        let mut hit = None;
        let mut i = 0;

        while i < self.objects.len() {
            let object = &self.objects[i];
            let touching = player_box.intersects(&swept_box(object.aabb(), travel));
            let behind = object.position.z + object.size.z / 2.0 < despawn_z;
            let kind = object.kind;

            if touching {
                match kind {
                    ObjectKind::Coin => {
                        let coin = self.objects.remove(i);
                        self.collect_coin(coin.id);
                        continue;
                    }
                    ObjectKind::Obstacle(kind) => {
                        hit = Some(kind);
                        break;
                    }
                }
            }

            if behind {
                let gone = self.objects.remove(i);
                if let ObjectKind::Obstacle(kind) = gone.kind {
                    self.obstacles_dodged += 1;
                    self.emit(GameEvent::ObstacleDodged {
                        obstacle_id: gone.id,
                        kind,
                    });
                }
                continue;
            }

            i += 1;
        }

        hit
    }

    fn collect_coin(&mut self, coin_id: u64) {
        if !self.collected.insert(coin_id) {
            return;
        }
        self.coins_collected += 1;
        self.coin_points += self.config.coin_score;
        self.score = self.score.max(self.current_score());
        self.emit(GameEvent::CoinCollected {
            coin_id,
            points: self.config.coin_score,
            score: self.score,
        });
    }

    fn current_score(&self) -> u64 {
        (self.distance * self.config.points_per_unit).floor() as u64 + self.coin_points
    }

    fn emit(&self, event: GameEvent) {
        if let Some(events) = &self.events {
            events.send(event);
        }
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current score.
    #[inline]
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Current world speed.
    #[inline]
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Distance travelled.
    #[inline]
    #[must_use]
    pub const fn distance(&self) -> f32 {
        self.distance
    }

    /// Seconds of running.
    #[inline]
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Lane the player is in (or moving to).
    #[inline]
    #[must_use]
    pub const fn lane(&self) -> Lane {
        self.player.lane
    }

    /// The player body.
    #[inline]
    #[must_use]
    pub const fn player(&self) -> &PlayerBody {
        &self.player
    }

    /// Objects currently on the track.
    #[inline]
    #[must_use]
    pub fn objects(&self) -> &[WorldObject] {
        &self.objects
    }

    /// Player hitbox.
    #[must_use]
    pub fn player_aabb(&self) -> Aabb {
        self.player.aabb(&self.config)
    }

    /// Coins picked up this run.
    #[inline]
    #[must_use]
    pub const fn coins_collected(&self) -> u32 {
        self.coins_collected
    }

    /// Ids of coins picked up this run.
    #[must_use]
    pub fn collected_coin_ids(&self) -> &HashSet<u64> {
        &self.collected
    }

    /// Character of this run.
    #[inline]
    #[must_use]
    pub const fn character(&self) -> Character {
        self.character
    }

    /// Seed of this run.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Tuning in effect.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Totals of the run so far.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.seed,
            character: self.character,
            score: self.score,
            distance: self.distance,
            coins_collected: self.coins_collected,
            obstacles_dodged: self.obstacles_dodged,
            duration_secs: self.elapsed,
            top_speed: self.speed,
            cause: self.cause,
        }
    }

    /// Places an object on the track. Used by scripted scenarios.
    pub fn insert_object(&mut self, kind: ObjectKind, lane: Lane, z: f32) -> u64 {
        let id = self.spawner.allocate_id();
        let (base_y, size) = match kind {
            ObjectKind::Obstacle(k) => (k.base_y(), k.size()),
            ObjectKind::Coin => (COIN_BASE_Y, Vec3::new(COIN_SIZE, COIN_SIZE, COIN_SIZE)),
        };
        self.objects.push(WorldObject {
            id,
            kind,
            lane,
            position: Vec3::new(lane.x(self.config.lane_spacing), base_y, z),
            size,
        });
        id
    }
}

/// Extends a box along +Z by the distance it just travelled, covering the
/// whole path of the step.
fn swept_box(aabb: Aabb, travel: f32) -> Aabb {
    Aabb::new(
        aabb.min,
        Vec3::new(aabb.max.x, aabb.max.y, aabb.max.z + travel),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBus;

    const DT: f32 = 1.0 / 60.0;

    fn running(seed: u64) -> RunnerState {
        let mut runner = RunnerState::new(RunnerConfig::default(), seed);
        assert!(runner.start());
        runner
    }

    #[test]
    fn test_ready_does_not_advance() {
        let mut runner = RunnerState::new(RunnerConfig::default(), 1);
        assert_eq!(runner.step(DT), StepOutcome::Idle);
        assert!(runner.distance().abs() < f32::EPSILON);
        assert!(!runner.apply(Input::Jump));
    }

    #[test]
    fn test_start_only_once() {
        let mut runner = running(1);
        assert!(!runner.start());
    }

    #[test]
    fn test_wall_ends_run() {
        let mut runner = running(1);
        runner.insert_object(ObjectKind::Obstacle(ObstacleKind::Wall), Lane::Center, 3.0);

        let mut outcome = StepOutcome::Advanced;
        for _ in 0..60 {
            outcome = runner.step(DT);
            if matches!(outcome, StepOutcome::GameOver { .. }) {
                break;
            }
        }
        assert!(matches!(outcome, StepOutcome::GameOver { .. }));
        assert_eq!(runner.phase(), Phase::GameOver);
        assert_eq!(runner.summary().cause, Some(ObstacleKind::Wall));
        assert_eq!(runner.step(DT), StepOutcome::Idle);
    }

    #[test]
    fn test_lane_change_dodges_wall() {
        let mut runner = running(1);
        runner.insert_object(ObjectKind::Obstacle(ObstacleKind::Wall), Lane::Center, 6.0);
        assert!(runner.apply(Input::MoveLeft));

        for _ in 0..90 {
            assert_ne!(runner.phase(), Phase::GameOver);
            runner.step(DT);
        }
        assert_eq!(runner.phase(), Phase::Running);
    }

    #[test]
    fn test_jump_clears_barrier() {
        let mut runner = running(1);
        runner.insert_object(ObjectKind::Obstacle(ObstacleKind::Barrier), Lane::Center, 2.5);
        assert!(runner.apply(Input::Jump));

        for _ in 0..60 {
            runner.step(DT);
        }
        assert_eq!(runner.phase(), Phase::Running);
    }

    #[test]
    fn test_slide_clears_overhead() {
        let mut runner = running(1);
        runner.insert_object(ObjectKind::Obstacle(ObstacleKind::Overhead), Lane::Center, 3.0);
        assert!(runner.apply(Input::Slide));

        for _ in 0..40 {
            runner.step(DT);
        }
        assert_eq!(runner.phase(), Phase::Running);
    }

    #[test]
    fn test_standing_under_overhead_hits() {
        let mut runner = running(1);
        runner.insert_object(ObjectKind::Obstacle(ObstacleKind::Overhead), Lane::Center, 3.0);
        for _ in 0..40 {
            runner.step(DT);
        }
        assert_eq!(runner.phase(), Phase::GameOver);
    }

    #[test]
    fn test_coin_collected_once() {
        let (sender, receiver) = EventBus::create_pair(256);
        let mut runner = RunnerState::new(RunnerConfig::default(), 1).with_events(sender);
        runner.start();
        let coin = runner.insert_object(ObjectKind::Coin, Lane::Center, 2.0);

        for _ in 0..30 {
            runner.step(DT);
        }

        assert_eq!(runner.coins_collected(), 1);
        assert!(runner.collected_coin_ids().contains(&coin));
        let pickups = receiver
            .drain()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::CoinCollected { coin_id, .. } if *coin_id == coin))
            .count();
        assert_eq!(pickups, 1);
        assert!(runner.score() >= RunnerConfig::default().coin_score);
    }

    #[test]
    fn test_large_step_does_not_tunnel() {
        let mut runner = running(1);
        runner.insert_object(ObjectKind::Obstacle(ObstacleKind::Wall), Lane::Center, 1.5);
        runner.step(0.1);
        assert_eq!(runner.phase(), Phase::GameOver);
    }

    #[test]
    fn test_pause_freezes_world() {
        let mut runner = running(3);
        for _ in 0..10 {
            runner.step(DT);
        }
        assert!(runner.apply(Input::Pause));
        let distance = runner.distance();
        assert_eq!(runner.step(DT), StepOutcome::Idle);
        assert!(!runner.apply(Input::MoveLeft));
        assert!((runner.distance() - distance).abs() < f32::EPSILON);
        assert!(runner.apply(Input::Resume));
        runner.step(DT);
        assert!(runner.distance() > distance);
    }

    #[test]
    fn test_speed_caps_at_max() {
        let config = RunnerConfig {
            speed_ramp: 100.0,
            ..RunnerConfig::default()
        };
        let max = config.max_speed;
        let mut runner = RunnerState::new(config, 1);
        runner.start();
        for _ in 0..60 {
            runner.step(DT);
            if runner.phase() != Phase::Running {
                break;
            }
        }
        assert!(runner.speed() <= max);
    }

    #[test]
    fn test_reset_returns_to_ready() {
        let mut runner = running(5).with_character(Character::Winky);
        for _ in 0..30 {
            runner.step(DT);
        }
        runner.reset(6);
        assert_eq!(runner.phase(), Phase::Ready);
        assert_eq!(runner.score(), 0);
        assert_eq!(runner.seed(), 6);
        assert_eq!(runner.character(), Character::Winky);
        assert!(runner.objects().is_empty());
    }
}
