//! Scope hierarchy for solving.
//!
//! - [`SolverScope`]: the working roster, best roster, RNG and counters of one solve
//! - [`PhaseScope`]: one phase inside the solve, borrowing the solver scope

mod phase;
mod solver;

pub use phase::PhaseScope;
pub use solver::SolverScope;
