//! Score-based termination.

use rosterforge_core::RosterScore;

use super::{Termination, TerminationContext};

/// Terminates when the best score reaches or exceeds a target.
///
/// # Example
///
/// ```
/// use rosterforge_core::RosterScore;
/// use rosterforge_solver::BestScoreTermination;
///
/// // Stop at a feasible, perfectly balanced roster.
/// let term = BestScoreTermination::new(RosterScore::ZERO);
/// assert_eq!(term.target(), RosterScore::ZERO);
/// ```
#[derive(Debug, Clone)]
pub struct BestScoreTermination {
    target_score: RosterScore,
}

impl BestScoreTermination {
    pub fn new(target_score: RosterScore) -> Self {
        Self { target_score }
    }

    pub fn target(&self) -> RosterScore {
        self.target_score
    }
}

impl Termination for BestScoreTermination {
    fn is_terminated<C: TerminationContext + ?Sized>(&self, ctx: &C) -> bool {
        ctx.best_score()
            .is_some_and(|score| score >= self.target_score)
    }
}
