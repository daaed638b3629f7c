use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Coarse phase of a session, decides whether taps are accepted.
///
/// Valid transitions:
/// - Idle -> Previewing
/// - any -> Previewing (restart)
/// - Previewing -> Playing
/// - Playing -> LevelComplete
/// - LevelComplete -> Interstitial
/// - LevelComplete -> Previewing
/// - Interstitial -> Previewing
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level 1 is laid out but the game has not started
    #[default]
    Idle,
    /// Next level is announced, tiles face-down
    Interstitial,
    /// Whole grid shown face-up for memorizing
    Previewing,
    Playing,
    /// Grid cleared, waiting to move on
    LevelComplete,
}

impl GamePhase {
    pub const fn accepts_taps(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Whether hosts should render the grid face-up regardless of tile state.
    pub const fn shows_all_faces(self) -> bool {
        matches!(self, Self::Previewing)
    }
}

/// Delayed work a session hands to its scheduler.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FollowUp {
    EndInterstitial,
    EndPreview,
    ResolveMismatch { first: usize, second: usize },
    ShowLevelComplete,
    AdvanceLevel,
}

/// Owns the game state and walks it through its phases.
///
/// Every method, and every follow-up run by [`Session::run_due`], must be called from the same context; nothing here
/// is meant to be shared across threads. Hosts re-read [`Session::state`] and [`Session::phase`] after each call.
#[derive(Debug)]
pub struct Session<S = TimerQueue<FollowUp>> {
    engine: RulesEngine,
    timings: Timings,
    scheduler: S,
    state: GameState,
    phase: GamePhase,
    /// Turns a mismatched pair back down
    mismatch_timer: Option<TimerHandle>,
    /// Preview, interstitial, end-wait or level-complete, only one at a time
    phase_timer: Option<TimerHandle>,
}

impl<S: Scheduler<FollowUp>> Session<S> {
    /// Session in [`GamePhase::Idle`] with level 1 already laid out.
    pub fn new(mut engine: RulesEngine, timings: Timings, scheduler: S) -> Result<Self> {
        let state = engine.new_level(1)?;
        Ok(Self {
            engine,
            timings,
            scheduler,
            state,
            phase: GamePhase::Idle,
            mismatch_timer: None,
            phase_timer: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn engine(&self) -> &RulesEngine {
        &self.engine
    }

    /// Side of the current level's square grid.
    pub fn grid_side(&self) -> Side {
        self.engine.side(self.state.level)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Whether a timed follow-up is still waiting to run.
    pub fn has_pending_follow_up(&self) -> bool {
        [&self.mismatch_timer, &self.phase_timer]
            .into_iter()
            .flatten()
            .any(TimerHandle::is_pending)
    }

    pub fn start_game(&mut self) -> Result<()> {
        log::debug!("Starting new game");
        self.start_level(1, false)
    }

    pub fn restart_level(&mut self) -> Result<()> {
        log::debug!("Restarting level {}", self.state.level);
        self.start_level(self.state.level, false)
    }

    pub fn on_tile_tap(&mut self, index: usize) -> FlipResult {
        if !self.phase.accepts_taps() {
            log::trace!("Tap on {} ignored during {:?}", index, self.phase);
            return FlipResult::Ignored;
        }

        let outcome = self.engine.flip(index, &mut self.state);
        match outcome {
            FlipResult::Ignored | FlipResult::FirstRevealed | FlipResult::MatchFound => {}
            FlipResult::MismatchFound { first, second } => self.handle_mismatch(first, second),
            FlipResult::LevelComplete => self.handle_level_complete(),
        }
        outcome
    }

    /// Run every follow-up that is due, in order. Returns how many ran.
    pub fn run_due(&mut self) -> Result<usize> {
        let mut ran = 0;
        while let Some(follow_up) = self.scheduler.poll_due() {
            self.fire(follow_up)?;
            ran += 1;
        }
        Ok(ran)
    }

    fn fire(&mut self, follow_up: FollowUp) -> Result<()> {
        use FollowUp::*;

        log::trace!("Running {:?} during {:?}", follow_up, self.phase);
        match follow_up {
            EndInterstitial => {
                self.phase_timer = None;
                self.begin_preview();
            }
            EndPreview => {
                self.phase_timer = None;
                self.state.set_all_face_up(false);
                self.state.busy = false;
                self.set_phase(GamePhase::Playing);
            }
            ResolveMismatch { first, second } => {
                self.mismatch_timer = None;
                self.state.hide(first);
                self.state.hide(second);
                self.state.busy = false;
            }
            ShowLevelComplete => {
                self.set_phase(GamePhase::LevelComplete);
                self.schedule_phase(self.timings.level_complete(), AdvanceLevel);
            }
            AdvanceLevel => {
                self.phase_timer = None;
                self.start_level(self.state.level.saturating_add(1), true)?;
            }
        }
        Ok(())
    }

    fn handle_mismatch(&mut self, first: usize, second: usize) {
        self.state.busy = true;
        self.state.shake(first);
        self.state.shake(second);

        if let Some(stale) = self.mismatch_timer.take() {
            stale.cancel();
        }
        self.mismatch_timer = Some(self.scheduler.schedule(
            self.timings.mismatch(),
            FollowUp::ResolveMismatch { first, second },
        ));
    }

    fn handle_level_complete(&mut self) {
        log::debug!(
            "Level {} cleared in {} moves",
            self.state.level,
            self.state.moves
        );
        self.state.busy = true;
        self.schedule_phase(self.timings.end_wait(), FollowUp::ShowLevelComplete);
    }

    fn start_level(&mut self, level: Level, announce: bool) -> Result<()> {
        self.cancel_timers();

        self.state = self.engine.new_level(level)?;
        self.state.busy = true;

        if announce && self.timings.interstitial() > Duration::ZERO {
            self.state.set_all_face_up(false);
            self.set_phase(GamePhase::Interstitial);
            self.schedule_phase(self.timings.interstitial(), FollowUp::EndInterstitial);
        } else {
            self.begin_preview();
        }
        Ok(())
    }

    fn begin_preview(&mut self) {
        self.state.set_all_face_up(true);
        self.state.busy = true;
        self.set_phase(GamePhase::Previewing);
        self.schedule_phase(self.timings.preview(), FollowUp::EndPreview);
    }

    fn schedule_phase(&mut self, delay: Duration, follow_up: FollowUp) {
        if let Some(stale) = self.phase_timer.take() {
            stale.cancel();
        }
        self.phase_timer = Some(self.scheduler.schedule(delay, follow_up));
    }

    fn cancel_timers(&mut self) {
        for timer in [self.mismatch_timer.take(), self.phase_timer.take()]
            .into_iter()
            .flatten()
        {
            if timer.is_pending() {
                log::trace!("Cancelling pending timer");
            }
            timer.cancel();
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::debug!("Phase {:?} -> {:?} on level {}", self.phase, phase, self.state.level);
        }
        self.phase = phase;
    }
}

impl Session<TimerQueue<FollowUp>> {
    /// Session with emoji content and a manually driven timer queue.
    pub fn with_config(config: &SessionConfig, seed: u64) -> Result<Self> {
        let engine = RulesEngine::new(EmojiProvider, SeededEntropy::new(seed), config.schedule());
        Self::new(engine, config.timings, TimerQueue::new())
    }

    /// Move the session clock forward and run whatever became due.
    pub fn advance(&mut self, elapsed: Duration) -> Result<usize> {
        self.scheduler.advance(elapsed);
        self.run_due()
    }
}
