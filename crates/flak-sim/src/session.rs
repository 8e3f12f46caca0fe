//! Session state: the single owned record of the current run.
//!
//! A fresh value is constructed on every mode start; nothing carries over.
//! Elapsed time is always derived from `start_time` and the clock reading
//! passed in, the stored copy is only a cache for reporting.

use std::time::Duration;

use log::warn;

use flak_core::enums::{GameMode, ResultRank, SessionPhase};

use crate::difficulty;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    mode: GameMode,
    phase: SessionPhase,
    score: u32,
    enemies_destroyed: u32,
    targets_hit: u32,
    start_time: Duration,
    elapsed: Duration,
    rank: Option<ResultRank>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::idle()
    }
}

impl SessionState {
    /// No session running.
    pub fn idle() -> Self {
        Self {
            mode: GameMode::Idle,
            phase: SessionPhase::Idle,
            score: 0,
            enemies_destroyed: 0,
            targets_hit: 0,
            start_time: Duration::ZERO,
            elapsed: Duration::ZERO,
            rank: None,
        }
    }

    /// A fresh session in `mode`, started at `now`.
    pub fn start(mode: GameMode, now: Duration) -> Self {
        Self {
            mode,
            phase: SessionPhase::Playing,
            start_time: now,
            ..Self::idle()
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn enemies_destroyed(&self) -> u32 {
        self.enemies_destroyed
    }

    pub fn targets_hit(&self) -> u32 {
        self.targets_hit
    }

    pub fn start_time(&self) -> Duration {
        self.start_time
    }

    /// Last elapsed value computed by [`SessionState::update_elapsed`].
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn rank(&self) -> Option<ResultRank> {
        self.rank
    }

    /// Recompute elapsed time from the clock. A reading earlier than the
    /// start time (clock skew) clamps to zero.
    pub fn update_elapsed(&mut self, now: Duration) -> Duration {
        self.elapsed = match now.checked_sub(self.start_time) {
            Some(elapsed) => elapsed,
            None => {
                warn!(
                    "clock reading {:?} precedes session start {:?}; clamping elapsed to zero",
                    now, self.start_time
                );
                Duration::ZERO
            }
        };
        self.elapsed
    }

    /// `clamp(elapsed / total, 0, 1)` at the cached elapsed time.
    pub fn progress(&self, total: Duration) -> f64 {
        difficulty::progress(self.elapsed, total)
    }

    /// Time left in a timed session, never negative. Zero outside timed modes.
    pub fn time_remaining(&self, total: Duration) -> Duration {
        if !self.mode.is_timed() {
            return Duration::ZERO;
        }
        total.saturating_sub(self.elapsed)
    }

    pub(crate) fn record_enemy_kill(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.enemies_destroyed = self.enemies_destroyed.saturating_add(1);
    }

    pub(crate) fn record_target_hit(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.targets_hit = self.targets_hit.saturating_add(1);
    }

    /// Move Playing → Ended if the timer has run out.
    /// Returns `true` only on the tick the transition happens.
    pub(crate) fn end_if_expired(&mut self, total: Duration) -> bool {
        if !self.is_running() || !self.mode.is_timed() || self.elapsed < total {
            return false;
        }
        self.phase = SessionPhase::Ended;
        self.rank = Some(ResultRank::from_destroyed(self.enemies_destroyed));
        true
    }
}
