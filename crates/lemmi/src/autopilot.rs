//! # Autopilot
//!
//! A rule-based player for headless runs and demos. It reads the live
//! [`RunnerState`] once per frame and answers with at most one input:
//!
//! 1. Obstacle ahead in the current lane: switch to a clear neighbour lane
//! 2. No clear lane: jump a barrier or slide under an overhead once it is
//!    within reaction distance (walls cannot be beaten in-lane)
//! 3. Lane clear: drift toward a neighbour lane with coins in it
//!
//! Deterministic: the same run state always gets the same answer.

use lemmi_core::{Input, Lane, ObjectKind, ObstacleKind, Phase, Pose, RunnerState, WorldObject};

/// Tuning of the bot.
#[derive(Clone, Debug)]
pub struct AutopilotConfig {
    /// Seconds of travel at current speed that count as "ahead".
    pub lookahead_secs: f32,
    /// Extra distance added to the lookahead window.
    pub lookahead_margin: f32,
    /// Seconds before contact at which to jump or slide.
    pub reaction_secs: f32,
    /// Chase coins in neighbour lanes.
    pub collect_coins: bool,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            lookahead_secs: 0.6,
            lookahead_margin: 2.0,
            reaction_secs: 0.3,
            collect_coins: true,
        }
    }
}

/// Rule-based bot.
#[derive(Clone, Debug, Default)]
pub struct Autopilot {
    config: AutopilotConfig,
}

impl Autopilot {
    /// Creates a bot.
    #[must_use]
    pub fn new(config: AutopilotConfig) -> Self {
        Self { config }
    }

    /// Picks the input for this frame, if any.
    #[must_use]
    pub fn decide(&self, runner: &RunnerState) -> Option<Input> {
        if runner.phase() != Phase::Running {
            return None;
        }

        let speed = runner.speed();
        let window = speed * self.config.lookahead_secs + self.config.lookahead_margin;
        let lane = runner.lane();
        let player_half_depth = runner.config().player_depth / 2.0;

        if let Some(threat) = nearest_obstacle(runner.objects(), lane, window) {
            if let Some(escape) = clear_neighbour(runner.objects(), lane, window) {
                return Some(step_toward(lane, escape));
            }

            let gap = threat.position.z - threat.size.z / 2.0 - player_half_depth;
            if gap > speed * self.config.reaction_secs {
                return None;
            }
            let player = runner.player();
            return match threat.kind {
                ObjectKind::Obstacle(ObstacleKind::Barrier) if player.grounded() => Some(Input::Jump),
                ObjectKind::Obstacle(ObstacleKind::Overhead) if player.pose() != Pose::Sliding => {
                    Some(Input::Slide)
                }
                _ => None,
            };
        }

        if self.config.collect_coins && !has_coin(runner.objects(), lane, window) {
            let target = neighbours(lane).into_iter().flatten().find(|&candidate| {
                has_coin(runner.objects(), candidate, window)
                    && nearest_obstacle(runner.objects(), candidate, window).is_none()
            });
            if let Some(target) = target {
                return Some(step_toward(lane, target));
            }
        }

        None
    }
}

fn ahead(object: &WorldObject, lane: Lane, window: f32) -> bool {
    object.lane == lane
        && object.position.z + object.size.z / 2.0 >= 0.0
        && object.position.z - object.size.z / 2.0 <= window
}

fn nearest_obstacle(objects: &[WorldObject], lane: Lane, window: f32) -> Option<&WorldObject> {
    objects
        .iter()
        .filter(|o| !o.is_coin() && ahead(o, lane, window))
        .min_by(|a, b| a.position.z.total_cmp(&b.position.z))
}

fn has_coin(objects: &[WorldObject], lane: Lane, window: f32) -> bool {
    objects.iter().any(|o| o.is_coin() && ahead(o, lane, window))
}

fn neighbours(lane: Lane) -> [Option<Lane>; 2] {
    let left = lane.left();
    let right = lane.right();
    [(left != lane).then_some(left), (right != lane).then_some(right)]
}

fn clear_neighbour(objects: &[WorldObject], lane: Lane, window: f32) -> Option<Lane> {
    neighbours(lane)
        .into_iter()
        .flatten()
        .find(|&candidate| nearest_obstacle(objects, candidate, window).is_none())
}

fn step_toward(from: Lane, to: Lane) -> Input {
    if to.index() < from.index() {
        Input::MoveLeft
    } else {
        Input::MoveRight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lemmi_core::RunnerConfig;

    const DT: f32 = 1.0 / 60.0;

    fn running() -> RunnerState {
        let mut runner = RunnerState::new(RunnerConfig::default(), 1);
        runner.start();
        runner
    }

    fn drive(runner: &mut RunnerState, bot: &Autopilot, steps: usize) {
        for _ in 0..steps {
            if let Some(input) = bot.decide(runner) {
                runner.apply(input);
            }
            runner.step(DT);
        }
    }

    #[test]
    fn test_idle_when_not_running() {
        let runner = RunnerState::new(RunnerConfig::default(), 1);
        assert_eq!(Autopilot::default().decide(&runner), None);
    }

    #[test]
    fn test_steps_around_wall() {
        let mut runner = running();
        runner.insert_object(ObjectKind::Obstacle(ObstacleKind::Wall), Lane::Center, 8.0);
        let bot = Autopilot::default();
        assert_eq!(bot.decide(&runner), Some(Input::MoveLeft));
        drive(&mut runner, &bot, 90);
        assert_eq!(runner.phase(), Phase::Running);
    }

    #[test]
    fn test_jumps_barrier_when_boxed_in() {
        let mut runner = running();
        runner.insert_object(ObjectKind::Obstacle(ObstacleKind::Barrier), Lane::Center, 8.0);
        runner.insert_object(ObjectKind::Obstacle(ObstacleKind::Wall), Lane::Left, 8.0);
        runner.insert_object(ObjectKind::Obstacle(ObstacleKind::Wall), Lane::Right, 8.0);
        let bot = Autopilot::default();
        // Too far to react yet.
        assert_eq!(bot.decide(&runner), None);
        drive(&mut runner, &bot, 90);
        assert_eq!(runner.phase(), Phase::Running);
        assert_eq!(runner.lane(), Lane::Center);
    }

    #[test]
    fn test_slides_under_overhead_when_boxed_in() {
        let mut runner = running();
        runner.insert_object(ObjectKind::Obstacle(ObstacleKind::Overhead), Lane::Center, 8.0);
        runner.insert_object(ObjectKind::Obstacle(ObstacleKind::Wall), Lane::Left, 8.0);
        runner.insert_object(ObjectKind::Obstacle(ObstacleKind::Wall), Lane::Right, 8.0);
        drive(&mut runner, &Autopilot::default(), 90);
        assert_eq!(runner.phase(), Phase::Running);
    }

    #[test]
    fn test_drifts_toward_coins() {
        let mut runner = running();
        runner.insert_object(ObjectKind::Coin, Lane::Right, 6.0);
        assert_eq!(Autopilot::default().decide(&runner), Some(Input::MoveRight));

        let lazy = Autopilot::new(AutopilotConfig {
            collect_coins: false,
            ..AutopilotConfig::default()
        });
        assert_eq!(lazy.decide(&runner), None);
    }

    #[test]
    fn test_outlives_idle_player() {
        let config = RunnerConfig::default();
        let bot = Autopilot::default();
        let mut bot_total = 0.0;
        let mut idle_total = 0.0;

        for seed in 0..16 {
            let mut idle = RunnerState::new(config.clone(), seed);
            idle.start();
            let mut piloted = RunnerState::new(config.clone(), seed);
            piloted.start();

            for _ in 0..(60 * 60) {
                idle.step(DT);
                if let Some(input) = bot.decide(&piloted) {
                    piloted.apply(input);
                }
                piloted.step(DT);
            }
            idle_total += idle.distance();
            bot_total += piloted.distance();
        }

        assert!(bot_total > idle_total);
    }
}
