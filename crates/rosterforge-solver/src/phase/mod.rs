//! Solver phases.
//!
//! Phases run in sequence on one solver scope:
//! - [`ConstructionHeuristicPhase`](construction::ConstructionHeuristicPhase): places a feasible pattern in every (employee, week)
//! - [`BranchAndBoundPhase`](exhaustive::BranchAndBoundPhase): searches per-employee work totals for minimum spread
//! - [`LocalSearchPhase`](localsearch::LocalSearchPhase): improves balance with pattern moves

pub mod construction;
pub mod exhaustive;
pub mod localsearch;

use std::fmt::Debug;

use crate::scope::SolverScope;

/// A phase of the solving process.
///
/// A phase modifies the working schedule in the solver scope and updates
/// the best roster when it finds an improvement.
pub trait Phase: Send + Debug {
    /// Executes this phase as the `phase_index`-th phase of the solve.
    fn solve(&mut self, solver_scope: &mut SolverScope, phase_index: usize);

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}

impl Phase for Box<dyn Phase> {
    fn solve(&mut self, solver_scope: &mut SolverScope, phase_index: usize) {
        (**self).solve(solver_scope, phase_index)
    }

    fn phase_type_name(&self) -> &'static str {
        (**self).phase_type_name()
    }
}
