//! Local search phase implementation.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, trace};

use crate::phase::localsearch::{Acceptor, LocalSearchForager, RosterMove, RosterMoveSelector};
use crate::phase::Phase;
use crate::scope::{PhaseScope, SolverScope};
use crate::termination::{ConfiguredTermination, Termination};

/// Local search phase that improves a constructed roster.
///
/// Each step:
/// 1. Generates candidate moves from the selector
/// 2. Scores each move by doing and undoing it on the director
/// 3. Filters through the tabu list (best-score aspiration) and the acceptor
/// 4. Applies the forager's pick, or ends the phase if nothing was accepted
///
/// # Type Parameters
/// * `A` - The acceptor type
/// * `F` - The forager type
#[derive(Debug)]
pub struct LocalSearchPhase<A, F> {
    selector: RosterMoveSelector,
    acceptor: A,
    forager: F,
    termination: Option<ConfiguredTermination>,
}

impl<A, F> LocalSearchPhase<A, F>
where
    A: Acceptor,
    F: LocalSearchForager<RosterMove>,
{
    pub fn new(selector: RosterMoveSelector, acceptor: A, forager: F) -> Self {
        Self {
            selector,
            acceptor,
            forager,
            termination: None,
        }
    }

    /// Adds a phase-level termination on top of the solver's.
    pub fn with_termination(mut self, termination: ConfiguredTermination) -> Self {
        self.termination = Some(termination);
        self
    }

    pub fn acceptor(&self) -> &A {
        &self.acceptor
    }
}

impl<A, F> Phase for LocalSearchPhase<A, F>
where
    A: Acceptor,
    F: LocalSearchForager<RosterMove>,
{
    fn solve(&mut self, solver_scope: &mut SolverScope, phase_index: usize) {
        let catalog = Arc::clone(solver_scope.catalog());
        let mut phase_scope = PhaseScope::start(solver_scope, phase_index, self.phase_type_name());

        let mut last_step_score = phase_scope.calculate_score();
        self.acceptor.phase_started(&last_step_score);

        let mut last_progress_time = Instant::now();
        let mut last_progress_moves = 0u64;

        loop {
            if phase_scope.solver_scope().should_terminate()
                || self.termination.is_terminated(&phase_scope)
            {
                break;
            }

            let best_score = phase_scope.best_score();
            self.acceptor.step_started();
            self.forager.step_started(best_score, last_step_score);

            let moves = {
                let (director, rng) = phase_scope.solver_scope_mut().director_with_rng();
                self.selector.moves(director, &catalog, rng)
            };

            for m in moves {
                if !m.is_doable(phase_scope.director()) {
                    continue;
                }

                let undo = m.do_move(phase_scope.director_mut());
                let move_score = phase_scope.calculate_score();
                RosterMove::undo(phase_scope.director_mut(), undo);

                let tabu = m
                    .employees()
                    .iter()
                    .any(|e| self.acceptor.is_employee_tabu(*e));
                let aspirated = best_score.map_or(true, |best| move_score > best);
                let accepted =
                    (!tabu || aspirated) && self.acceptor.is_accepted(&last_step_score, &move_score);
                phase_scope.record_move(accepted);

                if accepted {
                    self.forager.add_move(m, move_score);
                    if self.forager.is_quit_early() {
                        break;
                    }
                }
            }

            let now = Instant::now();
            if now.duration_since(last_progress_time).as_secs() >= 1 {
                let moves_evaluated = phase_scope.moves_evaluated();
                let elapsed_secs = now.duration_since(last_progress_time).as_secs_f64();
                debug!(
                    event = "progress",
                    steps = phase_scope.step_count(),
                    speed = ((moves_evaluated - last_progress_moves) as f64 / elapsed_secs) as u64,
                    score = %last_step_score,
                );
                last_progress_time = now;
                last_progress_moves = moves_evaluated;
            }

            let Some((picked, step_score)) = self.forager.pick_move() else {
                break;
            };
            picked.do_move(phase_scope.director_mut());
            for employee in picked.employees() {
                self.acceptor.record_moved_employee(employee);
            }
            self.acceptor.step_ended(&step_score);
            last_step_score = step_score;

            let step = phase_scope.increment_step_count();
            trace!(
                event = "step",
                step,
                employees = ?picked.employees().as_slice(),
                score = %step_score,
                accepted = true,
            );
            phase_scope.update_best_solution();
        }

        self.acceptor.phase_ended();
        phase_scope.end();
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }
}

#[cfg(test)]
mod tests {
    use rosterforge_config::TerminationConfig;
    use rosterforge_core::RosterScore;

    use super::*;
    use crate::phase::construction::ConstructionHeuristicPhase;
    use crate::phase::localsearch::{
        AcceptedCountForager, EntityTabuAcceptor, HillClimbingAcceptor, LateAcceptanceAcceptor,
    };
    use crate::termination::{phase_termination, solver_termination};
    use crate::test_utils::{create_abc_model, create_rotating_model, create_scope};

    fn constructed_scope(scope: SolverScope) -> SolverScope {
        let config = TerminationConfig {
            step_count_limit: Some(5_000),
            ..TerminationConfig::default()
        };
        let mut scope = scope.with_termination(solver_termination(&config, RosterScore::ZERO));
        scope.start_solving();
        ConstructionHeuristicPhase::random_fit().solve(&mut scope, 0);
        scope
    }

    #[test]
    fn test_hill_climbing_reaches_zero() {
        let mut scope = constructed_scope(create_scope(create_abc_model(), 21));
        let mut phase = LocalSearchPhase::new(
            RosterMoveSelector::default(),
            HillClimbingAcceptor::new(),
            AcceptedCountForager::new(4),
        );
        phase.solve(&mut scope, 1);
        assert_eq!(scope.best_score(), Some(RosterScore::ZERO));
        assert_eq!(scope.director().hard_violations(), 0);
    }

    #[test]
    fn test_late_acceptance_reaches_zero() {
        let mut scope = constructed_scope(create_scope(create_rotating_model(9, 2026, 3), 5));
        let mut phase = LocalSearchPhase::new(
            RosterMoveSelector::new(64),
            LateAcceptanceAcceptor::default(),
            AcceptedCountForager::new(4),
        );
        phase.solve(&mut scope, 1);
        assert_eq!(scope.best_score(), Some(RosterScore::ZERO));
    }

    #[test]
    fn test_tabu_search_reaches_zero() {
        let mut scope = constructed_scope(create_scope(create_rotating_model(6, 2026, 1), 8));
        let mut phase = LocalSearchPhase::new(
            RosterMoveSelector::new(64),
            EntityTabuAcceptor::new(2),
            AcceptedCountForager::new(64),
        );
        phase.solve(&mut scope, 1);
        assert_eq!(scope.best_score(), Some(RosterScore::ZERO));
    }

    #[test]
    fn test_phase_termination_bounds_steps() {
        let mut scope = create_scope(create_rotating_model(4, 2026, 2), 2);
        scope.start_solving();
        ConstructionHeuristicPhase::first_fit().solve(&mut scope, 0);
        let before = scope.total_step_count();

        // February 2026 has only full weeks: every move is neutral.
        let config = TerminationConfig {
            step_count_limit: Some(10),
            ..TerminationConfig::default()
        };
        let mut phase = LocalSearchPhase::new(
            RosterMoveSelector::new(8),
            LateAcceptanceAcceptor::new(5),
            AcceptedCountForager::new(1),
        )
        .with_termination(phase_termination(&config));
        phase.solve(&mut scope, 1);

        assert_eq!(scope.total_step_count() - before, 10);
        assert_eq!(scope.director().hard_violations(), 0);
        assert_eq!(scope.statistics().phase_statistics[1].step_count, 10);
    }
}
