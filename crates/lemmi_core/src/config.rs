//! # Runner Tuning
//!
//! Every gameplay constant lives here so designers can rebalance a run
//! from a TOML file without a rebuild. Missing keys fall back to the
//! defaults below.
//!
//! ```toml
//! base_speed = 14.0
//! max_speed = 40.0
//! speed_ramp = 0.5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Gameplay tuning for a runner session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Distance between lane centers (world units).
    pub lane_spacing: f32,
    /// Lateral speed when switching lanes (units per second).
    pub lane_switch_speed: f32,

    /// World speed at the start of a run (units per second).
    pub base_speed: f32,
    /// Speed cap of the difficulty ramp.
    pub max_speed: f32,
    /// Speed gained per second of running.
    pub speed_ramp: f32,

    /// Downward acceleration while airborne.
    pub gravity: f32,
    /// Initial upward velocity of a jump.
    pub jump_velocity: f32,
    /// Gravity multiplier when sliding in mid-air.
    pub fast_fall_multiplier: f32,
    /// Seconds a slide lasts.
    pub slide_duration: f32,

    /// Player hitbox width.
    pub player_width: f32,
    /// Player hitbox height while running or jumping.
    pub player_height: f32,
    /// Player hitbox height while sliding.
    pub slide_height: f32,
    /// Player hitbox depth.
    pub player_depth: f32,

    /// Shortest gap between obstacle spawns at base speed (seconds).
    pub obstacle_interval_min: f32,
    /// Longest gap between obstacle spawns at base speed (seconds).
    pub obstacle_interval_max: f32,
    /// Shortest gap between coin rows at base speed (seconds).
    pub coin_interval_min: f32,
    /// Longest gap between coin rows at base speed (seconds).
    pub coin_interval_max: f32,
    /// Maximum coins in one spawned row.
    pub coin_row_max: u32,
    /// Distance between coins of a row.
    pub coin_row_spacing: f32,

    /// Depth at which new objects appear.
    pub spawn_distance: f32,
    /// Depth behind the player at which objects are removed.
    pub despawn_distance: f32,

    /// Points awarded per collected coin.
    pub coin_score: u64,
    /// Points awarded per world unit travelled.
    pub points_per_unit: f32,

    /// Largest simulation step accepted by `RunnerState::step`.
    pub max_step: f32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            lane_spacing: 2.5,
            lane_switch_speed: 14.0,

            base_speed: 12.0,
            max_speed: 36.0,
            speed_ramp: 0.35,

            gravity: 40.0,
            jump_velocity: 13.0,
            fast_fall_multiplier: 3.0,
            slide_duration: 0.75,

            player_width: 0.8,
            player_height: 1.8,
            slide_height: 0.9,
            player_depth: 0.8,

            obstacle_interval_min: 0.9,
            obstacle_interval_max: 1.8,
            coin_interval_min: 0.6,
            coin_interval_max: 1.4,
            coin_row_max: 4,
            coin_row_spacing: 2.0,

            spawn_distance: 80.0,
            despawn_distance: -5.0,

            coin_score: 10,
            points_per_unit: 1.0,

            max_step: 0.1,
        }
    }
}

impl RunnerConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on parse failure or broken invariants.
    pub fn from_toml_str(source: &str) -> CoreResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| CoreError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigIo` when the file cannot be read, otherwise see
    /// [`RunnerConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| CoreError::ConfigIo(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Checks the invariants the simulation relies on.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first broken rule.
    pub fn validate(&self) -> CoreResult<()> {
        let floats = [
            ("lane_spacing", self.lane_spacing),
            ("lane_switch_speed", self.lane_switch_speed),
            ("base_speed", self.base_speed),
            ("max_speed", self.max_speed),
            ("speed_ramp", self.speed_ramp),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("fast_fall_multiplier", self.fast_fall_multiplier),
            ("slide_duration", self.slide_duration),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("slide_height", self.slide_height),
            ("player_depth", self.player_depth),
            ("obstacle_interval_min", self.obstacle_interval_min),
            ("obstacle_interval_max", self.obstacle_interval_max),
            ("coin_interval_min", self.coin_interval_min),
            ("coin_interval_max", self.coin_interval_max),
            ("coin_row_spacing", self.coin_row_spacing),
            ("spawn_distance", self.spawn_distance),
            ("despawn_distance", self.despawn_distance),
            ("points_per_unit", self.points_per_unit),
            ("max_step", self.max_step),
        ];
        // NaN slips through every ordering check below.
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(CoreError::InvalidConfig(format!("{name} must be finite")));
            }
        }

        let positive = [
            ("lane_spacing", self.lane_spacing),
            ("lane_switch_speed", self.lane_switch_speed),
            ("base_speed", self.base_speed),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("slide_duration", self.slide_duration),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("slide_height", self.slide_height),
            ("player_depth", self.player_depth),
            ("obstacle_interval_min", self.obstacle_interval_min),
            ("coin_interval_min", self.coin_interval_min),
            ("coin_row_spacing", self.coin_row_spacing),
            ("spawn_distance", self.spawn_distance),
            ("max_step", self.max_step),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(CoreError::InvalidConfig(format!("{name} must be > 0")));
            }
        }
        if self.speed_ramp < 0.0 {
            return Err(CoreError::InvalidConfig("speed_ramp must be >= 0".into()));
        }
        if self.max_speed < self.base_speed {
            return Err(CoreError::InvalidConfig(
                "max_speed must be >= base_speed".into(),
            ));
        }
        if self.obstacle_interval_max < self.obstacle_interval_min
            || self.coin_interval_max < self.coin_interval_min
        {
            return Err(CoreError::InvalidConfig(
                "spawn interval max must be >= min".into(),
            ));
        }
        if self.fast_fall_multiplier < 1.0 {
            return Err(CoreError::InvalidConfig(
                "fast_fall_multiplier must be >= 1".into(),
            ));
        }
        if self.slide_height >= self.player_height {
            return Err(CoreError::InvalidConfig(
                "slide_height must be below player_height".into(),
            ));
        }
        if self.coin_row_max == 0 {
            return Err(CoreError::InvalidConfig("coin_row_max must be >= 1".into()));
        }
        if self.despawn_distance >= 0.0 {
            return Err(CoreError::InvalidConfig(
                "despawn_distance must be behind the player (< 0)".into(),
            ));
        }
        if self.points_per_unit < 0.0 {
            return Err(CoreError::InvalidConfig("points_per_unit must be >= 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RunnerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RunnerConfig::from_toml_str("base_speed = 14.0\nmax_speed = 40.0").unwrap();
        assert!((config.base_speed - 14.0).abs() < f32::EPSILON);
        assert!((config.max_speed - 40.0).abs() < f32::EPSILON);
        assert_eq!(config.coin_score, RunnerConfig::default().coin_score);
    }

    #[test]
    fn test_rejects_inverted_speeds() {
        let err = RunnerConfig::from_toml_str("base_speed = 50.0\nmax_speed = 10.0").unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_non_finite() {
        for key in [
            "obstacle_interval_max",
            "coin_interval_max",
            "max_speed",
            "despawn_distance",
            "fast_fall_multiplier",
        ] {
            for value in ["inf", "-inf", "nan"] {
                let source = format!("{key} = {value}");
                let err = RunnerConfig::from_toml_str(&source).unwrap_err();
                assert!(
                    matches!(&err, CoreError::InvalidConfig(msg) if msg.contains(key)),
                    "{source} gave {err:?}"
                );
            }
        }
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(RunnerConfig::from_toml_str("base_speed = \"fast\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = RunnerConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, CoreError::ConfigIo(_)));
    }
}
