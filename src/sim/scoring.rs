//! Scores, pause flags and serve sequencing
//!
//! A point schedules a serve after a real-time delay. Each scheduled serve
//! carries a generation number; resetting or scheduling again bumps the
//! generation so a stale serve can never fire.

use serde::Serialize;

use super::state::Side;
use crate::consts::SERVE_DELAY_MS;

/// A serve waiting for its delay to run out
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PendingServe {
    pub generation: u64,
    /// Side the ball will be served toward (the side that lost the point)
    pub toward: Side,
    pub remaining_ms: f32,
}

/// Why the simulation is not advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PauseReason {
    UserToggle,
    ServeDelay,
    /// The player paused while a serve was pending
    UserToggleDuringServe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Playing,
    Paused(PauseReason),
}

/// Match state: scores, pause flag and the pending serve
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchState {
    pub left_score: u32,
    pub right_score: u32,
    pub user_paused: bool,
    pub pending_serve: Option<PendingServe>,
    pub serve_generation: u64,
}

impl MatchState {
    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_score,
            Side::Right => self.right_score,
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.user_paused, self.pending_serve.is_some()) {
            (false, false) => Phase::Playing,
            (true, false) => Phase::Paused(PauseReason::UserToggle),
            (false, true) => Phase::Paused(PauseReason::ServeDelay),
            (true, true) => Phase::Paused(PauseReason::UserToggleDuringServe),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.phase() != Phase::Playing
    }

    /// Flip the user pause flag; returns the new value
    pub fn toggle_pause(&mut self) -> bool {
        self.user_paused = !self.user_paused;
        self.user_paused
    }

    /// Credit `scorer` and schedule a serve toward the side that lost
    pub fn award_point(&mut self, scorer: Side) -> PendingServe {
        match scorer {
            Side::Left => self.left_score = self.left_score.saturating_add(1),
            Side::Right => self.right_score = self.right_score.saturating_add(1),
        }
        self.serve_generation += 1;
        let serve = PendingServe {
            generation: self.serve_generation,
            toward: scorer.opposite(),
            remaining_ms: SERVE_DELAY_MS,
        };
        self.pending_serve = Some(serve);
        serve
    }

    /// Drop any pending serve and invalidate its generation
    pub fn cancel_serve(&mut self) {
        self.serve_generation += 1;
        self.pending_serve = None;
    }

    /// Zero the scores and cancel any pending serve (user pause is kept)
    pub fn reset(&mut self) {
        self.left_score = 0;
        self.right_score = 0;
        self.cancel_serve();
    }

    /// Count the pending serve down; returns its generation once due
    pub fn advance_serve_timer(&mut self, elapsed_ms: f32) -> Option<u64> {
        let serve = self.pending_serve.as_mut()?;
        serve.remaining_ms = (serve.remaining_ms - elapsed_ms.max(0.0)).max(0.0);
        (serve.remaining_ms == 0.0).then_some(serve.generation)
    }

    /// Complete the serve for `generation`. Stale generations are ignored.
    pub fn complete_serve(&mut self, generation: u64) -> Option<Side> {
        match self.pending_serve {
            Some(serve) if serve.generation == generation => {
                self.pending_serve = None;
                Some(serve.toward)
            }
            _ => None,
        }
    }
}
