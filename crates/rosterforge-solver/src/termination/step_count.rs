//! Step count termination.

use super::{Termination, TerminationContext};

/// Terminates after a step count.
///
/// # Example
///
/// ```
/// use rosterforge_solver::StepCountTermination;
///
/// // Terminate after 1000 steps
/// let term = StepCountTermination::new(1000);
/// ```
#[derive(Debug, Clone)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for StepCountTermination {
    fn is_terminated<C: TerminationContext + ?Sized>(&self, ctx: &C) -> bool {
        ctx.step_count() >= self.limit
    }
}
