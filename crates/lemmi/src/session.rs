//! # Play Session
//!
//! One full round trip of the game:
//!
//! ```text
//! connected wallet ──> CharacterSelect ──> GameLoop + Autopilot ──> GameOver
//!                                                │ (events)
//!                                                v
//!              ScoreSink <── submit ── WINKS credit ──> optional LEMMI conversion
//! ```
//!
//! Everything runs on the caller's thread with a fixed frame delta, so a
//! session is reproducible from its seed.

use std::time::Instant;

use lemmi_core::{
    Character, CharacterSelect, CoreError, EventBus, GameEvent, GameLoop, GameLoopConfig,
    RunSummary, RunnerConfig, RunnerState,
};
use lemmi_rendering::{FrameView, RenderStats, Renderer};
use lemmi_server::{MemoryStore, Store};
use lemmi_shared::{GameScore, GAME_ID};
use lemmi_wallet::{
    Balance, Conversion, MockWalletAdapter, TokenAmount, WalletError, MIN_CONVERTIBLE_WINKS,
};
use thiserror::Error;

use crate::autopilot::Autopilot;

/// Event channel size. Large enough for a frame's worth of pickups.
const EVENT_CAPACITY: usize = 1024;

/// Errors that abort a session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Character or config problem.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Wallet refused an operation.
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

/// Result type for sessions.
pub type SessionResult<T> = Result<T, SessionError>;

/// Where finished runs are recorded.
pub trait ScoreSink {
    /// Records a final score.
    fn submit_score(&self, wallet_address: &str, game: &str, score: u64) -> GameScore;
}

impl ScoreSink for MemoryStore {
    fn submit_score(&self, wallet_address: &str, game: &str, score: u64) -> GameScore {
        self.add_score(wallet_address, game, score)
    }
}

/// Parameters of one session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Gameplay tuning.
    pub runner: RunnerConfig,
    /// Loop timing.
    pub game_loop: GameLoopConfig,
    /// Seed of the run.
    pub seed: u64,
    /// Character to confirm on the selection screen.
    pub character: Character,
    /// Simulated seconds per frame.
    pub frame_delta: f32,
    /// Stop a run that has not ended after this many seconds.
    pub max_duration_secs: f32,
    /// Whole WINKS credited per collected coin.
    pub winks_per_coin: u64,
    /// Convert the WINKS balance to LEMMI after the run.
    pub convert: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            runner: RunnerConfig::default(),
            game_loop: GameLoopConfig::default(),
            seed: 0,
            character: Character::default(),
            frame_delta: 1.0 / 60.0,
            max_duration_secs: 120.0,
            winks_per_coin: 10,
            convert: false,
        }
    }
}

/// What a session produced.
#[derive(Clone, Debug)]
pub struct SessionReport {
    /// Totals of the run.
    pub summary: RunSummary,
    /// `true` if an obstacle ended the run, `false` if the time cap did.
    pub crashed: bool,
    /// Frames simulated.
    pub frames: u64,
    /// Coin pickups seen on the event bus.
    pub coin_events: u32,
    /// WINKS credited for the run.
    pub winks_earned: TokenAmount,
    /// Conversion performed after the run, if any.
    pub conversion: Option<Conversion>,
    /// Wallet balances at the end.
    pub balance: Balance,
    /// The stored score record.
    pub submitted: GameScore,
    /// Totals over every rendered frame.
    pub render: RenderStats,
}

/// Runs sessions against a wallet and a score sink.
pub struct Session {
    config: SessionConfig,
    autopilot: Autopilot,
    renderer: Option<Box<dyn Renderer>>,
}

impl Session {
    /// Creates a session with the default autopilot and no renderer.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            autopilot: Autopilot::default(),
            renderer: None,
        }
    }

    /// Replaces the bot.
    #[must_use]
    pub fn with_autopilot(mut self, autopilot: Autopilot) -> Self {
        self.autopilot = autopilot;
        self
    }

    /// Renders every frame with `renderer`.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Plays one run and settles it.
    ///
    /// # Errors
    ///
    /// - `Wallet(NotConnected)` without a connected wallet
    /// - `Core(CharacterLocked)` when the wallet cannot use the character
    /// - `Wallet(..)` if crediting or converting fails
    pub fn play(
        &mut self,
        wallet: &mut MockWalletAdapter,
        sink: &dyn ScoreSink,
    ) -> SessionResult<SessionReport> {
        let account = wallet.wallet().ok_or(WalletError::NotConnected)?;
        let address = account.address.clone();

        let mut select = CharacterSelect::new(account.has_gerbil_nft);
        select.highlight(self.config.character);
        let character = select.confirm()?;

        let (sender, receiver) = EventBus::create_pair(EVENT_CAPACITY);
        let mut runner = RunnerState::new(self.config.runner.clone(), self.config.seed)
            .with_character(character)
            .with_events(sender);
        runner.start();

        tracing::info!(
            seed = self.config.seed,
            ?character,
            address = %address,
            "session started"
        );

        let mut game_loop = GameLoop::new(runner, self.config.game_loop.clone());
        let mut render = RenderStats::default();
        let mut coin_events = 0u32;
        let mut crashed = false;

        // A frame can run zero steps, so the cap is on frames as well.
        let max_frames = frame_budget(self.config.max_duration_secs, self.config.frame_delta);
        for _ in 0..max_frames {
            if game_loop.runner().elapsed() >= self.config.max_duration_secs {
                break;
            }
            if let Some(input) = self.autopilot.decide(game_loop.runner()) {
                game_loop.queue_input(input);
            }
            let report = game_loop.advance(self.config.frame_delta);

            if let Some(renderer) = self.renderer.as_mut() {
                let started = Instant::now();
                let stats = renderer.render(&FrameView::capture(game_loop.runner()));
                game_loop.record_render(started.elapsed().as_micros() as u64);
                render.accumulate(&stats);
            }

            // Drain every frame so the bounded bus never fills.
            coin_events += receiver
                .drain()
                .iter()
                .filter(|event| matches!(event, GameEvent::CoinCollected { .. }))
                .count() as u32;

            if report.game_over.is_some() {
                crashed = true;
                break;
            }
        }

        game_loop.stats().log_summary();
        let frames = game_loop.frame_count();
        let summary = game_loop.into_runner().summary();

        let winks_earned = TokenAmount::from_whole(self.config.winks_per_coin)
            .checked_mul_int(u64::from(coin_events))
            .ok_or(WalletError::ArithmeticOverflow)?;
        let mut balance = wallet.credit_winks(winks_earned)?;

        let conversion = if self.config.convert {
            let convertible = convertible_amount(balance.winks);
            if convertible.is_zero() {
                None
            } else {
                let conversion = wallet.convert(convertible)?;
                balance = conversion.balance;
                Some(conversion)
            }
        } else {
            None
        };

        let submitted = sink.submit_score(&address, GAME_ID, summary.score);
        tracing::info!(
            score = summary.score,
            coins = summary.coins_collected,
            winks = %winks_earned,
            crashed,
            "session finished"
        );

        Ok(SessionReport {
            summary,
            crashed,
            frames,
            coin_events,
            winks_earned,
            conversion,
            balance,
            submitted,
            render,
        })
    }
}

/// Frames needed to simulate `secs` at `frame_delta`, with headroom.
fn frame_budget(secs: f32, frame_delta: f32) -> u64 {
    if !(secs.is_finite() && frame_delta.is_finite()) || frame_delta <= 0.0 || secs <= 0.0 {
        return 0;
    }
    (secs / frame_delta).ceil() as u64 * 2 + 1
}

/// Largest amount of `winks` the converter accepts.
fn convertible_amount(winks: TokenAmount) -> TokenAmount {
    let step = MIN_CONVERTIBLE_WINKS.raw();
    TokenAmount::from_raw(winks.raw() - winks.raw() % step)
}
