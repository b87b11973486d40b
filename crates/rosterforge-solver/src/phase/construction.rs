//! Construction heuristic phase.
//!
//! Walks every (employee, week) whose states are not already a catalog
//! pattern and places one. Since every catalog pattern satisfies the hard
//! constraints, the constructed roster is feasible.

use std::sync::Arc;

use rand::Rng;
use tracing::trace;

use rosterforge_config::ConstructionHeuristicType;

use crate::phase::Phase;
use crate::scope::{PhaseScope, SolverScope};

/// Construction heuristic phase.
///
/// Runs to completion regardless of termination: a partially placed
/// roster would break the weekly rest quota.
#[derive(Debug, Clone)]
pub struct ConstructionHeuristicPhase {
    heuristic: ConstructionHeuristicType,
}

impl ConstructionHeuristicPhase {
    pub fn new(heuristic: ConstructionHeuristicType) -> Self {
        Self { heuristic }
    }

    pub fn first_fit() -> Self {
        Self::new(ConstructionHeuristicType::FirstFit)
    }

    pub fn random_fit() -> Self {
        Self::new(ConstructionHeuristicType::RandomFit)
    }

    pub fn heuristic(&self) -> ConstructionHeuristicType {
        self.heuristic
    }
}

impl Default for ConstructionHeuristicPhase {
    fn default() -> Self {
        Self::new(ConstructionHeuristicType::default())
    }
}

impl Phase for ConstructionHeuristicPhase {
    fn solve(&mut self, solver_scope: &mut SolverScope, phase_index: usize) {
        let catalog = Arc::clone(solver_scope.catalog());
        let mut phase_scope = PhaseScope::start(solver_scope, phase_index, self.phase_type_name());

        for employee in 0..catalog.employee_count() {
            for week in 0..catalog.week_count() {
                let current = phase_scope.director().week_states(employee, week);
                if catalog.position(employee, week, current).is_some() {
                    continue;
                }

                let patterns = catalog.patterns(employee, week);
                let index = match self.heuristic {
                    ConstructionHeuristicType::FirstFit => 0,
                    ConstructionHeuristicType::RandomFit => {
                        phase_scope.solver_scope_mut().rng().random_range(0..patterns.len())
                    }
                };
                phase_scope
                    .director_mut()
                    .set_week(employee, week, &patterns[index].states());

                let step = phase_scope.increment_step_count();
                trace!(event = "step", step, entity = employee, week, pattern = index);
            }
        }

        phase_scope.update_best_solution();
        phase_scope.end();
    }

    fn phase_type_name(&self) -> &'static str {
        "ConstructionHeuristic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_abc_model, create_rotating_model, create_scope};
    use rosterforge_core::ShiftState;

    #[test]
    fn test_construction_is_feasible() {
        let mut scope = create_scope(create_abc_model(), 42);
        scope.start_solving();
        ConstructionHeuristicPhase::random_fit().solve(&mut scope, 0);

        assert_eq!(scope.director().hard_violations(), 0);
        let best = scope.best_score().unwrap();
        assert!(best.is_feasible());
        // 5 weeks, one step per (employee, week).
        assert_eq!(scope.total_step_count(), 15);
    }

    #[test]
    fn test_first_fit_is_deterministic() {
        let model = create_rotating_model(4, 2026, 2);
        let mut a = create_scope(model.clone(), 1);
        let mut b = create_scope(model, 2);
        ConstructionHeuristicPhase::first_fit().solve(&mut a, 0);
        ConstructionHeuristicPhase::first_fit().solve(&mut b, 0);
        assert_eq!(a.working_schedule(), b.working_schedule());
        // Rotating employees take the first working shift of their domain.
        assert_eq!(a.working_schedule().get(0, 6), ShiftState::Day);
    }

    #[test]
    fn test_keeps_weeks_already_placed() {
        let mut scope = create_scope(create_abc_model(), 3);
        let mut week = [ShiftState::Night; 7];
        week[2] = ShiftState::Rest;
        week[3] = ShiftState::Rest;
        scope.director_mut().set_week(1, 0, &week);

        ConstructionHeuristicPhase::random_fit().solve(&mut scope, 0);
        assert_eq!(scope.director().week_states(1, 0), &week);
        assert_eq!(scope.total_step_count(), 14);
    }
}
