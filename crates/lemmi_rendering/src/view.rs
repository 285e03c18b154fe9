//! Frame View - the only way a renderer sees the run.
//!
//! A snapshot is taken once per rendered frame. Renderers never hold a
//! reference to `RunnerState`, so the simulation can keep stepping while a
//! frame is being drawn.

use lemmi_core::{Character, Lane, ObjectKind, Phase, Pose, RunnerState};
use lemmi_shared::Vec3;

/// The player as drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerView {
    /// Center of the bottom face.
    pub position: Vec3,
    /// Box dimensions (height shrinks while sliding).
    pub size: Vec3,
    /// Running, jumping or sliding.
    pub pose: Pose,
    /// Target lane.
    pub lane: Lane,
}

/// A track object as drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectView {
    /// Object id (stable for the object's lifetime).
    pub id: u64,
    /// Obstacle or coin.
    pub kind: ObjectKind,
    /// Center of the bottom face.
    pub position: Vec3,
    /// Box dimensions.
    pub size: Vec3,
}

/// Immutable snapshot of one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameView {
    /// Lifecycle phase.
    pub phase: Phase,
    /// Current score.
    pub score: u64,
    /// World speed.
    pub speed: f32,
    /// Distance travelled (drives scrolling road markings).
    pub distance: f32,
    /// Seconds of running (drives animations).
    pub elapsed: f32,
    /// Coins picked up.
    pub coins_collected: u32,
    /// Character running.
    pub character: Character,
    /// Body colour of the character (linear RGB).
    pub character_color: [f32; 3],
    /// The player.
    pub player: PlayerView,
    /// Objects on the track, in spawn order.
    pub objects: Vec<ObjectView>,
    /// Distance between lane centers.
    pub lane_spacing: f32,
}

impl FrameView {
    /// Captures the current state of a run.
    #[must_use]
    pub fn capture(runner: &RunnerState) -> Self {
        let body = runner.player();
        let aabb = runner.player_aabb();
        let size = aabb.max - aabb.min;
        let character = runner.character();

        Self {
            phase: runner.phase(),
            score: runner.score(),
            speed: runner.speed(),
            distance: runner.distance(),
            elapsed: runner.elapsed(),
            coins_collected: runner.coins_collected(),
            character,
            character_color: character.stats().color,
            player: PlayerView {
                position: Vec3::new(body.x, body.y, 0.0),
                size,
                pose: body.pose(),
                lane: body.lane,
            },
            objects: runner
                .objects()
                .iter()
                .map(|o| ObjectView {
                    id: o.id,
                    kind: o.kind,
                    position: o.position,
                    size: o.size,
                })
                .collect(),
            lane_spacing: runner.config().lane_spacing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lemmi_core::RunnerConfig;

    #[test]
    fn test_capture_ready_run() {
        let runner = RunnerState::new(RunnerConfig::default(), 1);
        let view = FrameView::capture(&runner);
        assert_eq!(view.phase, Phase::Ready);
        assert_eq!(view.score, 0);
        assert!(view.objects.is_empty());
        assert_eq!(view.player.lane, Lane::Center);
        assert!((view.player.size.y - RunnerConfig::default().player_height).abs() < 1e-5);
    }

    #[test]
    fn test_capture_follows_run() {
        let mut runner = RunnerState::new(RunnerConfig::default(), 2);
        runner.start();
        for _ in 0..240 {
            runner.step(1.0 / 60.0);
        }
        let view = FrameView::capture(&runner);
        assert_eq!(view.objects.len(), runner.objects().len());
        assert_eq!(view.score, runner.score());
    }
}
