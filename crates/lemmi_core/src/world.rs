//! # Track Objects & Spawning
//!
//! Obstacles and coins live in a flat list owned by the runner. The
//! spawner places new ones at the spawn distance on randomized timers
//! drawn from a seeded ChaCha stream, so a run replays exactly from its
//! seed.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use lemmi_shared::Vec3;

use crate::config::RunnerConfig;
use crate::lane::Lane;
use crate::physics::Aabb;

/// Edge length of a coin's box.
pub const COIN_SIZE: f32 = 0.6;

/// Height of a coin's bottom face.
pub const COIN_BASE_Y: f32 = 0.7;

/// Width of every obstacle (narrower than a lane).
pub const OBSTACLE_WIDTH: f32 = 2.0;

/// Obstacle shapes. Each one is beaten by a different move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Low block. Jump over it.
    Barrier,
    /// Hanging beam. Slide under it.
    Overhead,
    /// Full-height block. Switch lanes.
    Wall,
}

impl ObstacleKind {
    /// Every kind, in spawn-table order.
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::Barrier,
        ObstacleKind::Overhead,
        ObstacleKind::Wall,
    ];

    /// Height of the bottom face.
    #[must_use]
    pub const fn base_y(self) -> f32 {
        match self {
            Self::Barrier | Self::Wall => 0.0,
            Self::Overhead => 1.2,
        }
    }

    /// Box dimensions (width, height, depth).
    #[must_use]
    pub const fn size(self) -> Vec3 {
        match self {
            Self::Barrier => Vec3::new(OBSTACLE_WIDTH, 1.0, 1.0),
            Self::Overhead => Vec3::new(OBSTACLE_WIDTH, 1.8, 1.0),
            Self::Wall => Vec3::new(OBSTACLE_WIDTH, 3.0, 1.5),
        }
    }
}

/// What a track object is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Ends the run on contact.
    Obstacle(ObstacleKind),
    /// Awards points on contact.
    Coin,
}

/// A transient object moving toward the player.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldObject {
    /// Unique id within the run.
    pub id: u64,
    /// Obstacle or coin.
    pub kind: ObjectKind,
    /// Lane it was spawned in.
    pub lane: Lane,
    /// Center of the bottom face.
    pub position: Vec3,
    /// Box dimensions.
    pub size: Vec3,
}

impl WorldObject {
    /// Collision box.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_base(self.position, self.size)
    }

    /// Is this a coin?
    #[inline]
    #[must_use]
    pub const fn is_coin(&self) -> bool {
        matches!(self.kind, ObjectKind::Coin)
    }
}

/// Places obstacles and coin rows ahead of the player.
#[derive(Clone, Debug)]
pub struct Spawner {
    rng: ChaCha8Rng,
    next_id: u64,
    obstacle_timer: f32,
    coin_timer: f32,
}

impl Spawner {
    /// Creates a spawner for a run.
    ///
    /// The first obstacle waits for the longest interval so a run never
    /// opens with an instant hazard.
    #[must_use]
    pub fn new(seed: u64, config: &RunnerConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_id: 0,
            obstacle_timer: config.obstacle_interval_max,
            coin_timer: config.coin_interval_min,
        }
    }

    /// Total objects spawned so far.
    #[must_use]
    pub const fn spawned(&self) -> u64 {
        self.next_id
    }

    /// Advances both timers and spawns whatever is due.
    ///
    /// Intervals shrink in proportion to `base_speed / speed`, keeping the
    /// spacing between objects roughly constant as the world speeds up.
    pub fn update(
        &mut self,
        dt: f32,
        speed: f32,
        config: &RunnerConfig,
        objects: &mut Vec<WorldObject>,
    ) -> u32 {
        let pace = config.base_speed / speed.max(config.base_speed);
        let mut spawned = 0;

        self.obstacle_timer -= dt;
        if self.obstacle_timer <= 0.0 {
            if self.spawn_obstacle(config, objects) {
                spawned += 1;
            }
            let interval = self
                .rng
                .gen_range(config.obstacle_interval_min..=config.obstacle_interval_max);
            self.obstacle_timer = interval * pace;
        }

        self.coin_timer -= dt;
        if self.coin_timer <= 0.0 {
            spawned += self.spawn_coin_row(config, objects);
            let interval = self
                .rng
                .gen_range(config.coin_interval_min..=config.coin_interval_max);
            self.coin_timer = interval * pace;
        }

        spawned
    }

    fn spawn_obstacle(&mut self, config: &RunnerConfig, objects: &mut Vec<WorldObject>) -> bool {
        let kind = ObstacleKind::ALL[self.rng.gen_range(0..ObstacleKind::ALL.len())];
        let depth = kind.size().z;
        let z = config.spawn_distance;
        let Some(lane) = self.pick_clear_lane(objects, z - depth, z + depth) else {
            return false;
        };

        let id = self.allocate_id();
        objects.push(WorldObject {
            id,
            kind: ObjectKind::Obstacle(kind),
            lane,
            position: Vec3::new(lane.x(config.lane_spacing), kind.base_y(), z),
            size: kind.size(),
        });
        true
    }

    fn spawn_coin_row(&mut self, config: &RunnerConfig, objects: &mut Vec<WorldObject>) -> u32 {
        let count = self.rng.gen_range(1..=config.coin_row_max);
        let start = config.spawn_distance;
        let end = start + config.coin_row_spacing * (count - 1) as f32;
        let Some(lane) = self.pick_clear_lane(objects, start - 2.0, end + 2.0) else {
            return 0;
        };

        for i in 0..count {
            let id = self.allocate_id();
            objects.push(WorldObject {
                id,
                kind: ObjectKind::Coin,
                lane,
                position: Vec3::new(
                    lane.x(config.lane_spacing),
                    COIN_BASE_Y,
                    start + config.coin_row_spacing * i as f32,
                ),
                size: Vec3::new(COIN_SIZE, COIN_SIZE, COIN_SIZE),
            });
        }
        count
    }

    /// Random lane with nothing in `[z_min, z_max]`, if any.
    fn pick_clear_lane(&mut self, objects: &[WorldObject], z_min: f32, z_max: f32) -> Option<Lane> {
        let first = self.rng.gen_range(0..Lane::ALL.len());
        (0..Lane::ALL.len())
            .map(|offset| Lane::from_index((first + offset) % Lane::ALL.len()))
            .find(|lane| {
                !objects.iter().any(|o| {
                    o.lane == *lane
                        && o.position.z + o.size.z / 2.0 >= z_min
                        && o.position.z - o.size.z / 2.0 <= z_max
                })
            })
    }

    /// Reserves an object id.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_spawner(seed: u64, frames: usize) -> Vec<WorldObject> {
        let config = RunnerConfig::default();
        let mut spawner = Spawner::new(seed, &config);
        let mut objects = Vec::new();
        for _ in 0..frames {
            spawner.update(1.0 / 60.0, config.base_speed, &config, &mut objects);
            for o in &mut objects {
                o.position.z -= config.base_speed / 60.0;
            }
        }
        objects
    }

    #[test]
    fn test_same_seed_same_objects() {
        assert_eq!(run_spawner(7, 600), run_spawner(7, 600));
    }

    #[test]
    fn test_different_seed_differs() {
        assert_ne!(run_spawner(7, 600), run_spawner(8, 600));
    }

    #[test]
    fn test_no_immediate_obstacle() {
        let config = RunnerConfig::default();
        let mut spawner = Spawner::new(1, &config);
        let mut objects = Vec::new();
        spawner.update(1.0 / 60.0, config.base_speed, &config, &mut objects);
        assert!(objects.iter().all(WorldObject::is_coin));
    }

    #[test]
    fn test_ids_unique_and_objects_on_lanes() {
        let config = RunnerConfig::default();
        let objects = run_spawner(42, 1200);
        assert!(!objects.is_empty());

        let mut ids: Vec<u64> = objects.iter().map(|o| o.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), objects.len());

        for o in &objects {
            assert!((o.position.x - o.lane.x(config.lane_spacing)).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_coins_never_overlap_obstacles_in_lane() {
        for seed in 0..20 {
            let objects = run_spawner(seed, 900);
            for coin in objects.iter().filter(|o| o.is_coin()) {
                for obstacle in objects.iter().filter(|o| !o.is_coin()) {
                    assert!(
                        !coin.aabb().intersects(&obstacle.aabb()),
                        "seed {seed}: coin {} inside obstacle {}",
                        coin.id,
                        obstacle.id
                    );
                }
            }
        }
    }
}
