//! Hill climbing acceptor.

use rosterforge_core::RosterScore;

use super::Acceptor;

/// Hill climbing acceptor - accepts only improving moves.
///
/// Gets stuck on the first plateau, which on a roster usually means a
/// spread the partial weeks cannot reduce further.
///
/// # Example
///
/// ```
/// use rosterforge_core::RosterScore;
/// use rosterforge_solver::{Acceptor, HillClimbingAcceptor};
///
/// let acceptor = HillClimbingAcceptor::new();
/// assert!(acceptor.is_accepted(&RosterScore::of(0, -2, 0), &RosterScore::of(0, -1, -8)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HillClimbingAcceptor;

impl HillClimbingAcceptor {
    pub fn new() -> Self {
        Self
    }
}

impl Acceptor for HillClimbingAcceptor {
    fn is_accepted(&self, last_step_score: &RosterScore, move_score: &RosterScore) -> bool {
        move_score > last_step_score
    }
}
