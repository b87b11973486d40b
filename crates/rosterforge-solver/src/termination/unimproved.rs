//! Termination conditions based on lack of improvement.
//!
//! The scopes track when the best score last improved, so both
//! terminations here are stateless.

use std::time::Duration;

use super::{Termination, TerminationContext};

/// Terminates if no improvement occurs for a number of steps.
///
/// # Example
///
/// ```
/// use rosterforge_solver::UnimprovedStepCountTermination;
///
/// // Terminate after 100 steps without improvement
/// let term = UnimprovedStepCountTermination::new(100);
/// ```
#[derive(Debug, Clone)]
pub struct UnimprovedStepCountTermination {
    limit: u64,
}

impl UnimprovedStepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for UnimprovedStepCountTermination {
    fn is_terminated<C: TerminationContext + ?Sized>(&self, ctx: &C) -> bool {
        ctx.steps_since_improvement() >= self.limit
    }
}

/// Terminates if no improvement occurs for a duration.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use rosterforge_solver::UnimprovedTimeTermination;
///
/// // Terminate after 5 seconds without improvement
/// let term = UnimprovedTimeTermination::new(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct UnimprovedTimeTermination {
    limit: Duration,
}

impl UnimprovedTimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

impl Termination for UnimprovedTimeTermination {
    fn is_terminated<C: TerminationContext + ?Sized>(&self, ctx: &C) -> bool {
        ctx.time_since_improvement() >= self.limit
    }
}
