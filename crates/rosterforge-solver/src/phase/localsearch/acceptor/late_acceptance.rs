//! Late acceptance acceptor.

use std::fmt::Debug;

use rosterforge_core::RosterScore;

use super::Acceptor;

/// Default length of the score history.
pub const DEFAULT_LATE_ACCEPTANCE_SIZE: usize = 400;

/// Late acceptance acceptor - accepts moves that improve on a historical score.
///
/// Keeps a circular buffer of step scores and accepts a move that is
/// better than the last step or at least as good as the score recorded
/// `late_acceptance_size` steps ago.
///
/// # Example
///
/// ```
/// use rosterforge_core::RosterScore;
/// use rosterforge_solver::{Acceptor, LateAcceptanceAcceptor};
///
/// let mut acceptor = LateAcceptanceAcceptor::new(3);
/// acceptor.phase_started(&RosterScore::of(0, -4, 0));
/// // Worse than the last step, but not worse than 3 steps ago.
/// assert!(acceptor.is_accepted(&RosterScore::of(0, -2, 0), &RosterScore::of(0, -3, 0)));
/// ```
#[derive(Clone)]
pub struct LateAcceptanceAcceptor {
    late_acceptance_size: usize,
    score_history: Vec<Option<RosterScore>>,
    current_index: usize,
}

impl Debug for LateAcceptanceAcceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LateAcceptanceAcceptor")
            .field("late_acceptance_size", &self.late_acceptance_size)
            .field("current_index", &self.current_index)
            .finish()
    }
}

impl LateAcceptanceAcceptor {
    /// Creates a late acceptance acceptor; a size of 0 is raised to 1.
    pub fn new(late_acceptance_size: usize) -> Self {
        let late_acceptance_size = late_acceptance_size.max(1);
        Self {
            late_acceptance_size,
            score_history: vec![None; late_acceptance_size],
            current_index: 0,
        }
    }

    pub fn late_acceptance_size(&self) -> usize {
        self.late_acceptance_size
    }
}

impl Default for LateAcceptanceAcceptor {
    fn default() -> Self {
        Self::new(DEFAULT_LATE_ACCEPTANCE_SIZE)
    }
}

impl Acceptor for LateAcceptanceAcceptor {
    fn is_accepted(&self, last_step_score: &RosterScore, move_score: &RosterScore) -> bool {
        if move_score > last_step_score {
            return true;
        }
        match &self.score_history[self.current_index] {
            Some(late_score) => move_score >= late_score,
            None => true,
        }
    }

    fn phase_started(&mut self, initial_score: &RosterScore) {
        self.score_history.fill(Some(*initial_score));
        self.current_index = 0;
    }

    fn step_ended(&mut self, step_score: &RosterScore) {
        self.score_history[self.current_index] = Some(*step_score);
        self.current_index = (self.current_index + 1) % self.late_acceptance_size;
    }
}
