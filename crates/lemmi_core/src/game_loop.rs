//! # LEMMI Game Loop
//!
//! Turns wall-clock frames into fixed simulation steps.
//!
//! ```text
//! Frame N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. BEGIN FRAME                                                      │
//! │    └─ Measure wall-clock delta (clamped after stalls)               │
//! │                                                                     │
//! │ 2. INPUT                                                            │
//! │    └─ Queued inputs applied to the runner in order                  │
//! │                                                                     │
//! │ 3. SIMULATION                                                       │
//! │    ├─ accumulator += delta                                          │
//! │    ├─ while accumulator >= step: runner.step(step)                  │
//! │    └─ at most `max_steps_per_frame`, the rest is dropped            │
//! │                                                                     │
//! │ 4. RENDER (caller)                                                  │
//! │    └─ Snapshot the runner, interpolate with `alpha`                 │
//! │                                                                     │
//! │ 5. END FRAME                                                        │
//! │    └─ Record timing statistics                                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The simulation only ever sees the fixed step, so a run plays out the
//! same on a 30 Hz laptop and a 144 Hz monitor.

use std::time::{Duration, Instant};

use crate::runner::{Input, RunnerState, StepOutcome};

/// Target frame time for 60 FPS.
pub const TARGET_FRAME_TIME: Duration = Duration::from_micros(16_666);

/// Maximum allowed frame time before warning.
pub const MAX_FRAME_TIME: Duration = Duration::from_millis(33);

/// Longest wall-clock delta accepted in one frame (seconds).
const MAX_FRAME_DELTA: f32 = 0.25;

/// Configuration for the game loop.
#[derive(Clone, Debug)]
pub struct GameLoopConfig {
    /// Simulation step in seconds.
    pub fixed_step: f32,
    /// Steps run per frame before the backlog is dropped.
    pub max_steps_per_frame: u32,
    /// Enable slow-frame logs.
    pub enable_timing_logs: bool,
}

impl Default for GameLoopConfig {
    fn default() -> Self {
        Self {
            fixed_step: 1.0 / 60.0,
            max_steps_per_frame: 5,
            enable_timing_logs: false,
        }
    }
}

/// Frame timing statistics.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameStats {
    /// Total frame time in microseconds.
    pub total_us: u64,
    /// Simulation time in microseconds.
    pub sim_us: u64,
    /// Render time in microseconds (filled in by the caller).
    pub render_us: u64,
    /// Fixed steps run this frame.
    pub steps: u32,
    /// Frame number.
    pub frame: u64,
}

/// What one frame of simulation did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Fixed steps run.
    pub steps: u32,
    /// Whether a step ended the run.
    pub game_over: Option<u64>,
    /// Fraction of a step left in the accumulator, for interpolation.
    pub alpha: f32,
    /// Whether backlog was dropped to stay responsive.
    pub dropped_backlog: bool,
}

/// The main game loop orchestrator.
///
/// Owns the run and the step accumulator.
pub struct GameLoop {
    runner: RunnerState,
    config: GameLoopConfig,
    accumulator: f32,
    pending_inputs: Vec<Input>,
    frame_count: u64,
    stats_accumulator: FrameStatsAccumulator,
}

impl GameLoop {
    /// Creates a new game loop around a run.
    #[must_use]
    pub fn new(runner: RunnerState, config: GameLoopConfig) -> Self {
        Self {
            runner,
            config,
            accumulator: 0.0,
            pending_inputs: Vec::with_capacity(8),
            frame_count: 0,
            stats_accumulator: FrameStatsAccumulator::new(),
        }
    }

    /// Queues an input for the next frame.
    pub fn queue_input(&mut self, input: Input) {
        self.pending_inputs.push(input);
    }

    /// Runs one frame of `delta` seconds.
    ///
    /// Deterministic for a given sequence of deltas and inputs.
    pub fn advance(&mut self, delta: f32) -> FrameReport {
        let started = Instant::now();

        for input in std::mem::take(&mut self.pending_inputs) {
            self.runner.apply(input);
        }

        let delta = if delta.is_finite() {
            delta.clamp(0.0, MAX_FRAME_DELTA)
        } else {
            0.0
        };
        self.accumulator += delta;

        let mut steps = 0;
        let mut game_over = None;
        while self.accumulator >= self.config.fixed_step && steps < self.config.max_steps_per_frame {
            self.accumulator -= self.config.fixed_step;
            match self.runner.step(self.config.fixed_step) {
                StepOutcome::Advanced => steps += 1,
                StepOutcome::GameOver { final_score } => {
                    steps += 1;
                    game_over = Some(final_score);
                    self.accumulator = 0.0;
                    break;
                }
                StepOutcome::Idle => {
                    // Paused or finished: time does not pile up.
                    self.accumulator = 0.0;
                    break;
                }
            }
        }

        let dropped_backlog = self.accumulator >= self.config.fixed_step;
        if dropped_backlog {
            tracing::debug!(
                frame = self.frame_count,
                backlog = self.accumulator,
                "dropping simulation backlog"
            );
            self.accumulator %= self.config.fixed_step;
        }

        let sim_us = started.elapsed().as_micros() as u64;
        self.end_frame(FrameStats {
            total_us: sim_us,
            sim_us,
            render_us: 0,
            steps,
            frame: self.frame_count,
        });

        FrameReport {
            steps,
            game_over,
            alpha: self.accumulator / self.config.fixed_step,
            dropped_backlog,
        }
    }

    /// Records a frame's statistics and moves to the next frame.
    fn end_frame(&mut self, stats: FrameStats) {
        self.frame_count += 1;
        self.stats_accumulator.record(stats);

        if self.config.enable_timing_logs && stats.total_us > MAX_FRAME_TIME.as_micros() as u64 {
            tracing::warn!(
                frame = self.frame_count,
                ms = stats.total_us as f64 / 1000.0,
                "frame exceeded budget"
            );
        }
    }

    /// Adds render time measured by the caller to the last frame.
    pub fn record_render(&mut self, render_us: u64) {
        self.stats_accumulator.render_us_sum += render_us;
    }

    /// Returns the current frame count.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The run being played.
    #[must_use]
    pub fn runner(&self) -> &RunnerState {
        &self.runner
    }

    /// Consumes the loop and returns the run.
    #[must_use]
    pub fn into_runner(self) -> RunnerState {
        self.runner
    }

    /// Returns the accumulated statistics.
    #[must_use]
    pub fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats_accumulator
    }
}

/// Accumulator for frame statistics.
#[derive(Clone, Debug)]
pub struct FrameStatsAccumulator {
    /// Total frames recorded.
    pub frames_recorded: u64,
    /// Sum of total frame times.
    pub total_us_sum: u64,
    /// Sum of simulation times.
    pub sim_us_sum: u64,
    /// Sum of render times.
    pub render_us_sum: u64,
    /// Sum of fixed steps.
    pub steps_sum: u64,
    /// Min frame time.
    pub min_frame_us: u64,
    /// Max frame time.
    pub max_frame_us: u64,
    /// Frames that exceeded budget.
    pub frames_over_budget: u64,
}

impl FrameStatsAccumulator {
    /// Creates a new accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames_recorded: 0,
            total_us_sum: 0,
            sim_us_sum: 0,
            render_us_sum: 0,
            steps_sum: 0,
            min_frame_us: u64::MAX,
            max_frame_us: 0,
            frames_over_budget: 0,
        }
    }

    /// Records a frame's statistics.
    pub fn record(&mut self, stats: FrameStats) {
        self.frames_recorded += 1;
        self.total_us_sum += stats.total_us;
        self.sim_us_sum += stats.sim_us;
        self.render_us_sum += stats.render_us;
        self.steps_sum += u64::from(stats.steps);
        self.min_frame_us = self.min_frame_us.min(stats.total_us);
        self.max_frame_us = self.max_frame_us.max(stats.total_us);

        if stats.total_us > TARGET_FRAME_TIME.as_micros() as u64 {
            self.frames_over_budget += 1;
        }
    }

    /// Returns average frame time in milliseconds.
    #[must_use]
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        (self.total_us_sum as f64 / self.frames_recorded as f64) / 1000.0
    }

    /// Returns average FPS.
    #[must_use]
    pub fn avg_fps(&self) -> f64 {
        let avg_ms = self.avg_frame_ms();
        if avg_ms <= 0.0 {
            return 0.0;
        }
        1000.0 / avg_ms
    }

    /// Returns average fixed steps per frame.
    #[must_use]
    pub fn avg_steps(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.steps_sum as f64 / self.frames_recorded as f64
    }

    /// Returns the fraction of frames over budget.
    #[must_use]
    pub fn over_budget_ratio(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.frames_over_budget as f64 / self.frames_recorded as f64
    }

    /// Logs a summary of the statistics.
    pub fn log_summary(&self) {
        tracing::info!(
            frames = self.frames_recorded,
            avg_ms = self.avg_frame_ms(),
            min_ms = self.min_frame_us as f64 / 1000.0,
            max_ms = self.max_frame_us as f64 / 1000.0,
            avg_steps = self.avg_steps(),
            over_budget_pct = self.over_budget_ratio() * 100.0,
            "frame statistics"
        );
    }
}

impl Default for FrameStatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunnerConfig;
    use crate::runner::Phase;

    fn started_loop() -> GameLoop {
        let mut runner = RunnerState::new(RunnerConfig::default(), 11);
        runner.start();
        GameLoop::new(runner, GameLoopConfig::default())
    }

    #[test]
    fn test_game_loop_creation() {
        let game_loop = started_loop();
        assert_eq!(game_loop.frame_count(), 0);
    }

    #[test]
    fn test_fixed_steps_from_delta() {
        let mut game_loop = started_loop();

        let report = game_loop.advance(1.0 / 30.0 + 0.001);
        assert_eq!(report.steps, 2);
        assert!(report.alpha > 0.0 && report.alpha < 1.0);

        let report = game_loop.advance(0.001);
        assert_eq!(report.steps, 0);
        assert_eq!(game_loop.frame_count(), 2);
    }

    #[test]
    fn test_catch_up_is_bounded() {
        let mut game_loop = started_loop();
        let report = game_loop.advance(0.2);
        assert_eq!(report.steps, 5);
        assert!(report.dropped_backlog);
        assert!(report.alpha < 1.0);
    }

    #[test]
    fn test_queued_inputs_apply_before_steps() {
        let mut game_loop = started_loop();
        game_loop.queue_input(Input::Pause);
        let report = game_loop.advance(0.1);
        assert_eq!(report.steps, 0);
        assert_eq!(game_loop.runner().phase(), Phase::Paused);
        assert!(game_loop.runner().distance().abs() < f32::EPSILON);
    }

    #[test]
    fn test_same_deltas_same_run() {
        let mut a = started_loop();
        let mut b = started_loop();
        for i in 0..300 {
            let delta = if i % 3 == 0 { 0.03 } else { 0.012 };
            a.advance(delta);
            b.advance(delta);
        }
        assert_eq!(a.runner().score(), b.runner().score());
        assert_eq!(a.runner().objects(), b.runner().objects());
    }

    #[test]
    fn test_stats_accumulator() {
        let mut acc = FrameStatsAccumulator::new();

        for i in 0..100 {
            acc.record(FrameStats {
                total_us: 10_000 + (i * 100),
                sim_us: 5000,
                render_us: 2000,
                steps: 1,
                frame: i,
            });
        }

        assert_eq!(acc.frames_recorded, 100);
        assert!(acc.avg_fps() > 50.0);
        assert!(acc.avg_fps() < 100.0);
        assert!((acc.avg_steps() - 1.0).abs() < f64::EPSILON);
    }
}
