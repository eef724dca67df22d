//! The microgame lifecycle contract.
//!
//! Every variant implements [`Microgame`]; the orchestrator drives each
//! instance through a [`MicrogameRunner`], which owns the shared countdown,
//! the active flag, and the single resolution path. The runner is the only
//! component that ever declares an instance finished.
//!
//! ## Resolution is exactly-once
//!
//! Variant code reports an outcome through [`GameContext::finish`], which
//! is first-write-wins: collision, threshold, and timeout triggers may all
//! fire in one frame, and only the first recorded outcome survives. Once
//! the runner resolves, its `active` flag drops and every further tick is a
//! no-op, so a stale trigger can never reach a discarded instance.
//!
//! ## Time
//!
//! The engine is tick-driven: the host pumps one frame per [`FRAME_MS`].
//! The countdown decrements once per accumulated second; reaching zero
//! asks the variant for its timeout polarity via [`Microgame::on_timeout`]
//! (loss by default, inverted by the survival variant).

use crate::core::{PlayerInput, SessionRng};
use crate::games::GameKind;
use crate::surface::Surface;

/// Fixed frame duration the host pumps.
pub const FRAME_MS: u64 = 16;

/// Countdown budget every instance starts with.
pub const TIME_BUDGET_SECS: u32 = 15;

const SECOND_MS: u64 = 1000;

/// Terminal result of a microgame instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Loss,
}

/// Per-call context handed to every lifecycle operation.
///
/// Borrows the instance's forked RNG and the render surface, and exposes
/// the resolution slot through [`GameContext::finish`].
pub struct GameContext<'a> {
    /// Session level the instance was started at.
    pub level: u32,
    /// Milliseconds since the instance started.
    pub elapsed_ms: u64,
    /// Duration of the current frame.
    pub frame_ms: u64,
    /// The instance's own deterministic stream.
    pub rng: &'a mut SessionRng,
    /// The display region.
    pub surface: &'a mut dyn Surface,
    pending: &'a mut Option<Outcome>,
}

impl<'a> GameContext<'a> {
    /// Assemble a context over a resolution slot.
    pub fn new(
        level: u32,
        elapsed_ms: u64,
        frame_ms: u64,
        rng: &'a mut SessionRng,
        surface: &'a mut dyn Surface,
        pending: &'a mut Option<Outcome>,
    ) -> Self {
        Self { level, elapsed_ms, frame_ms, rng, surface, pending }
    }

    /// Record the instance's outcome. First write wins; later calls are
    /// no-ops.
    pub fn finish(&mut self, outcome: Outcome) {
        if self.pending.is_none() {
            *self.pending = Some(outcome);
        }
    }

    /// Whether an outcome has already been recorded this instance.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.pending.is_some()
    }
}

/// Operations every microgame variant implements.
///
/// The orchestrator depends only on this trait; variant identity matters
/// only at selection time.
pub trait Microgame {
    /// Which variant this is (selection key, logging).
    fn kind(&self) -> GameKind;

    /// Populate the region with the variant's UI and initial entities.
    fn setup(&mut self, ctx: &mut GameContext<'_>);

    /// Advance one frame of variant simulation. Only called while the
    /// instance is active.
    fn update(&mut self, ctx: &mut GameContext<'_>);

    /// Consume one decoded input event. Variants ignore events they do not
    /// understand.
    fn input(&mut self, _ctx: &mut GameContext<'_>, _event: &PlayerInput) {}

    /// Polarity of the countdown reaching zero. Loss unless the variant
    /// says otherwise.
    fn on_timeout(&self) -> Outcome {
        Outcome::Loss
    }

    /// Release variant-owned resources. Every listener taken in `setup`
    /// must be removed here.
    fn cleanup(&mut self, _surface: &mut dyn Surface) {}
}

/// Drives one microgame instance from start to resolution.
pub struct MicrogameRunner {
    game: Box<dyn Microgame>,
    level: u32,
    rng: SessionRng,
    active: bool,
    time_left: u32,
    countdown_acc_ms: u64,
    elapsed_ms: u64,
    pending: Option<Outcome>,
    resolved: Option<Outcome>,
}

impl MicrogameRunner {
    /// Start an instance: mark it active, run its setup, start the
    /// countdown. Called exactly once per instance.
    pub fn start(
        game: Box<dyn Microgame>,
        level: u32,
        rng: SessionRng,
        surface: &mut dyn Surface,
    ) -> Self {
        let mut runner = Self {
            game,
            level,
            rng,
            active: true,
            time_left: TIME_BUDGET_SECS,
            countdown_acc_ms: 0,
            elapsed_ms: 0,
            pending: None,
            resolved: None,
        };

        surface.set_timer(runner.time_left);
        let MicrogameRunner { game, level, rng, pending, elapsed_ms, .. } = &mut runner;
        let mut ctx = GameContext::new(*level, *elapsed_ms, FRAME_MS, rng, surface, pending);
        game.setup(&mut ctx);

        runner
    }

    /// Advance one frame: inputs, then simulation, then the countdown.
    ///
    /// Returns the outcome on the frame the instance resolves, `None`
    /// otherwise. A resolved runner ignores all further ticks.
    pub fn tick(&mut self, surface: &mut dyn Surface, inputs: &[PlayerInput]) -> Option<Outcome> {
        if !self.active {
            return None;
        }
        self.elapsed_ms += FRAME_MS;

        {
            let MicrogameRunner { game, level, rng, pending, elapsed_ms, .. } = self;
            let mut ctx = GameContext::new(*level, *elapsed_ms, FRAME_MS, rng, surface, pending);
            for event in inputs {
                if ctx.is_finished() {
                    break;
                }
                game.input(&mut ctx, event);
            }
            if !ctx.is_finished() {
                game.update(&mut ctx);
            }
        }

        if self.pending.is_none() {
            self.countdown_acc_ms += FRAME_MS;
            while self.countdown_acc_ms >= SECOND_MS && self.pending.is_none() {
                self.countdown_acc_ms -= SECOND_MS;
                self.time_left -= 1;
                surface.set_timer(self.time_left);
                if self.time_left == 0 {
                    self.pending = Some(self.game.on_timeout());
                }
            }
        }

        if let Some(outcome) = self.pending.take() {
            self.resolve(outcome, surface);
            return Some(outcome);
        }
        None
    }

    fn resolve(&mut self, outcome: Outcome, surface: &mut dyn Surface) {
        self.active = false;
        self.game.cleanup(surface);
        self.resolved = Some(outcome);
        log::info!("{} resolved: {:?}", self.game.kind(), outcome);
    }

    /// Whether the instance is still running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Seconds remaining on the countdown.
    #[must_use]
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Milliseconds since the instance started.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// The variant being run.
    #[must_use]
    pub fn kind(&self) -> GameKind {
        self.game.kind()
    }

    /// The terminal outcome, once resolved.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.resolved
    }
}
