//! External termination.

use super::{Termination, TerminationContext};

/// Terminates when an external caller requested it.
///
/// The flag itself lives in the solver scope; see
/// [`RosterSolver::terminate_early`](crate::RosterSolver::terminate_early).
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalTermination;

impl Termination for ExternalTermination {
    fn is_terminated<C: TerminationContext + ?Sized>(&self, ctx: &C) -> bool {
        ctx.is_terminate_early()
    }
}
