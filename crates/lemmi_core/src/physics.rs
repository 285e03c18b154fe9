//! # Runner Physics
//!
//! Kinematic player body with lane easing, jump arc and slide timer, plus
//! the axis-aligned boxes used for every collision check.
//!
//! The player stands at depth `z = 0`. World objects move toward it along
//! negative Z.

use lemmi_shared::math::approach;
use lemmi_shared::Vec3;

use crate::character::CharacterStats;
use crate::config::RunnerConfig;
use crate::lane::Lane;

// ============================================================================
// AABB (Axis-Aligned Bounding Box)
// ============================================================================

/// Axis-Aligned Bounding Box for collision detection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the box.
    pub min: Vec3,
    /// Maximum corner of the box.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a new AABB.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates a box standing on `base` (center of its bottom face).
    #[must_use]
    pub fn from_base(base: Vec3, size: Vec3) -> Self {
        let half_w = size.x / 2.0;
        let half_d = size.z / 2.0;
        Self {
            min: Vec3::new(base.x - half_w, base.y, base.z - half_d),
            max: Vec3::new(base.x + half_w, base.y + size.y, base.z + half_d),
        }
    }

    /// Strict overlap test; touching faces do not collide.
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }
}

// ============================================================================
// PLAYER BODY
// ============================================================================

/// What the player's body is doing this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pose {
    /// On the ground, full height.
    Running,
    /// Airborne, full height.
    Jumping,
    /// Reduced hitbox; may also be airborne while fast-falling.
    Sliding,
}

/// Kinematic player controller.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerBody {
    /// Target lane.
    pub lane: Lane,
    /// Lateral position, easing toward the lane center.
    pub x: f32,
    /// Height of the feet above the ground.
    pub y: f32,
    /// Vertical velocity.
    pub vy: f32,
    /// Seconds of slide left.
    pub slide_timer: f32,
}

impl PlayerBody {
    /// Creates a body standing in the center lane.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lane: Lane::Center,
            x: 0.0,
            y: 0.0,
            vy: 0.0,
            slide_timer: 0.0,
        }
    }

    /// Is the body on the ground?
    #[inline]
    #[must_use]
    pub fn grounded(&self) -> bool {
        self.y <= 0.0 && self.vy <= 0.0
    }

    /// Current pose.
    #[must_use]
    pub fn pose(&self) -> Pose {
        if self.slide_timer > 0.0 {
            Pose::Sliding
        } else if self.grounded() {
            Pose::Running
        } else {
            Pose::Jumping
        }
    }

    /// Targets the lane to the left. Returns `true` if the lane changed.
    pub fn move_left(&mut self) -> bool {
        let next = self.lane.left();
        let changed = next != self.lane;
        self.lane = next;
        changed
    }

    /// Targets the lane to the right. Returns `true` if the lane changed.
    pub fn move_right(&mut self) -> bool {
        let next = self.lane.right();
        let changed = next != self.lane;
        self.lane = next;
        changed
    }

    /// Starts a jump when grounded. Cancels an active slide.
    pub fn jump(&mut self, velocity: f32) -> bool {
        if !self.grounded() {
            return false;
        }
        self.vy = velocity;
        self.slide_timer = 0.0;
        true
    }

    /// Starts a slide. In mid-air the body also fast-falls until it lands.
    pub fn slide(&mut self, duration: f32) -> bool {
        if self.slide_timer > 0.0 {
            return false;
        }
        self.slide_timer = duration;
        true
    }

    /// Integrates one step. Returns `true` if the body landed this step.
    pub fn update(&mut self, dt: f32, config: &RunnerConfig, stats: &CharacterStats) -> bool {
        let target_x = self.lane.x(config.lane_spacing);
        let lateral = config.lane_switch_speed * stats.lane_switch_multiplier * dt;
        self.x = approach(self.x, target_x, lateral);

        let mut landed = false;
        if !self.grounded() {
            let gravity = if self.slide_timer > 0.0 {
                config.gravity * config.fast_fall_multiplier
            } else {
                config.gravity
            };
            self.vy -= gravity * dt;
            self.y += self.vy * dt;
            if self.y <= 0.0 {
                self.y = 0.0;
                self.vy = 0.0;
                landed = true;
            }
        }

        self.slide_timer = (self.slide_timer - dt).max(0.0);
        landed
    }

    /// Current hitbox.
    #[must_use]
    pub fn aabb(&self, config: &RunnerConfig) -> Aabb {
        let height = if self.slide_timer > 0.0 {
            config.slide_height
        } else {
            config.player_height
        };
        Aabb::from_base(
            Vec3::new(self.x, self.y, 0.0),
            Vec3::new(config.player_width, height, config.player_depth),
        )
    }
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;

    #[test]
    fn test_aabb_intersection() {
        let a = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Vec3::new(0.5, 0.5, 0.5), Vec3::new(1.5, 1.5, 1.5));
        let c = Aabb::new(Vec3::new(2.0, 2.0, 2.0), Vec3::new(3.0, 3.0, 3.0));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_faces_do_not_collide() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_jump_arc_lands() {
        let config = RunnerConfig::default();
        let stats = Character::Lemmi.stats();
        let mut body = PlayerBody::new();

        assert!(body.jump(config.jump_velocity));
        assert!(!body.jump(config.jump_velocity), "no double jump");

        let mut peak = 0.0f32;
        let mut landed = false;
        for _ in 0..200 {
            landed = body.update(1.0 / 60.0, &config, &stats);
            peak = peak.max(body.y);
            if landed {
                break;
            }
        }
        assert!(landed);
        assert!(peak > 1.5, "peak {peak} too low to clear a barrier");
        assert_eq!(body.pose(), Pose::Running);
    }

    #[test]
    fn test_slide_shrinks_hitbox_then_expires() {
        let config = RunnerConfig::default();
        let stats = Character::Lemmi.stats();
        let mut body = PlayerBody::new();

        assert!(body.slide(config.slide_duration));
        assert_eq!(body.pose(), Pose::Sliding);
        let sliding = body.aabb(&config);
        assert!((sliding.max.y - config.slide_height).abs() < f32::EPSILON);

        for _ in 0..60 {
            body.update(1.0 / 60.0, &config, &stats);
        }
        assert_eq!(body.pose(), Pose::Running);
    }

    #[test]
    fn test_lane_easing_reaches_target() {
        let config = RunnerConfig::default();
        let stats = Character::Lemmi.stats();
        let mut body = PlayerBody::new();

        assert!(body.move_right());
        for _ in 0..60 {
            body.update(1.0 / 60.0, &config, &stats);
        }
        assert!((body.x - Lane::Right.x(config.lane_spacing)).abs() < f32::EPSILON);
        assert!(!body.move_right(), "already at the right edge");
    }
}
