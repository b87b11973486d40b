//! Solver implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use rosterforge_config::SolverConfig;
use rosterforge_core::{ConstraintKind, Result, Roster, RosterError, RosterScore};
use rosterforge_scoring::{RosterModel, Schedule, ScoreDirector};

use crate::builder::PhaseBuilder;
use crate::event::{PhaseLifecycleListener, SolverEventListener, SolverEventSupport};
use crate::pattern::PatternCatalog;
use crate::scope::SolverScope;
use crate::statistics::SolverStatistics;
use crate::termination::solver_termination;

/// Why a solve stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Every phase ran to its natural end.
    Completed,
    /// The best score reached the target.
    BestScoreReached,
    /// A time or step limit fired before the target was reached.
    BudgetExhausted,
    /// [`RosterSolver::terminate_early`] was called.
    Cancelled,
}

/// Informational outcome attached to a successful solve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverWarning {
    /// The budget ran out before the target score; the roster is the best
    /// feasible one found.
    #[error("Solver budget exhausted after {elapsed:?}: best score {best_score}, target {target}")]
    BudgetExhausted {
        best_score: RosterScore,
        target: RosterScore,
        elapsed: Duration,
    },
}

/// Result of a successful solve.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub schedule: Schedule,
    pub score: RosterScore,
    pub reason: TerminationReason,
    pub warning: Option<SolverWarning>,
    pub statistics: SolverStatistics,
}

impl SolveOutcome {
    /// Builds the roster grid for `model`.
    pub fn to_roster(&self, model: &RosterModel, hours_per_shift: u32) -> Roster {
        model.to_roster(&self.schedule, hours_per_shift)
    }

    /// Spread of total worked days, read from the score.
    pub fn spread(&self) -> u32 {
        self.score.spread()
    }
}

/// The roster solver.
///
/// Runs the configured phases over one [`RosterModel`]. Construction
/// always runs first, so every successful solve returns a feasible
/// schedule; later phases improve balance until a termination fires.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rosterforge_config::{RestPolicyConfig, SolverConfig};
/// use rosterforge_core::{Affinity, EmployeeProfile, RosterMonth, Workforce};
/// use rosterforge_scoring::RosterModel;
/// use rosterforge_solver::RosterSolver;
///
/// let workforce = Workforce::new(vec![
///     EmployeeProfile::new("A", "Ana", Affinity::FixedDay),
///     EmployeeProfile::new("B", "Ben", Affinity::FixedNight),
/// ])
/// .unwrap();
/// let month = RosterMonth::new(2026, 2).unwrap();
/// let model = Arc::new(RosterModel::new(month, workforce, RestPolicyConfig::default()));
///
/// let config = SolverConfig::new().with_random_seed(7).with_termination_seconds(5);
/// let outcome = RosterSolver::new(config).solve(model).unwrap();
/// assert!(outcome.score.is_feasible());
/// assert_eq!(outcome.spread(), 0);
/// ```
#[derive(Debug)]
pub struct RosterSolver {
    config: SolverConfig,
    events: SolverEventSupport,
    terminate_early_flag: Arc<AtomicBool>,
    solving: Arc<AtomicBool>,
}

impl RosterSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            events: SolverEventSupport::new(),
            terminate_early_flag: Arc::new(AtomicBool::new(false)),
            solving: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn SolverEventListener>) -> Self {
        self.events.add_solver_listener(listener);
        self
    }

    pub fn with_phase_listener(mut self, listener: Arc<dyn PhaseLifecycleListener>) -> Self {
        self.events.add_phase_listener(listener);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Requests early termination of the running solve.
    ///
    /// This method is thread-safe and can be called from another thread.
    /// Returns false if no solve is running.
    pub fn terminate_early(&self) -> bool {
        if self.solving.load(Ordering::SeqCst) {
            self.terminate_early_flag.store(true, Ordering::SeqCst);
            true
        } else {
            false
        }
    }

    /// Shared cancel flag, for callers that cancel without holding the solver.
    pub fn termination_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.terminate_early_flag)
    }

    /// Returns true if the solver is currently solving.
    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    /// Solves `model`.
    ///
    /// Fails only with [`RosterError::InfeasibleRoster`], when some
    /// (employee, week) admits no pattern. Budget exhaustion is reported
    /// through [`SolveOutcome::warning`].
    pub fn solve(&self, model: Arc<RosterModel>) -> Result<SolveOutcome> {
        let target = self.target_score();
        info!(
            event = "solve_start",
            month = %model.month(),
            employees = model.employee_count(),
            days = model.day_count(),
            weeks = model.weeks().len(),
            target = %target,
        );

        let catalog = Arc::new(PatternCatalog::build(&model)?);
        let director = ScoreDirector::new(Arc::clone(&model));
        let scope = match self.config.random_seed {
            Some(seed) => SolverScope::with_seed(director, catalog, seed),
            None => SolverScope::new(director, catalog),
        };
        let mut scope = scope
            .with_events(self.events.clone())
            .with_termination(solver_termination(&self.config.termination, target));

        self.terminate_early_flag.store(false, Ordering::SeqCst);
        self.solving.store(true, Ordering::SeqCst);
        scope.set_terminate_early_flag(Arc::clone(&self.terminate_early_flag));
        scope.start_solving();

        // Phase 0 is always construction and ignores termination.
        let mut phases = PhaseBuilder::build_phases(&self.config);
        for (index, phase) in phases.iter_mut().enumerate() {
            if index > 0 && scope.should_terminate() {
                break;
            }
            phase.solve(&mut scope, index);
        }

        let reason = Self::termination_reason(&scope, target);
        let elapsed = scope.elapsed();
        let cancelled = reason == TerminationReason::Cancelled;
        let (schedule, score, statistics) = scope.finish();
        self.solving.store(false, Ordering::SeqCst);
        self.events.fire_solving_ended(&score, cancelled);

        info!(
            event = "solve_end",
            duration_ms = elapsed.as_millis() as u64,
            steps = statistics.total_step_count,
            score_calculations = statistics.score_calculation_count,
            reason = ?reason,
            score = %score,
        );

        if !score.is_feasible() {
            return Err(Self::infeasibility(&model, &schedule));
        }

        let warning = (reason == TerminationReason::BudgetExhausted).then(|| {
            let warning = SolverWarning::BudgetExhausted {
                best_score: score,
                target,
                elapsed,
            };
            warn!(event = "budget_exhausted", "{}", warning);
            warning
        });

        Ok(SolveOutcome {
            schedule,
            score,
            reason,
            warning,
            statistics,
        })
    }

    /// Configured best score target, or perfect balance.
    fn target_score(&self) -> RosterScore {
        match self.config.termination.best_score() {
            Ok(Some(score)) => score,
            Ok(None) => RosterScore::ZERO,
            Err(e) => {
                warn!(
                    event = "invalid_best_score_limit",
                    error = %e,
                    "falling back to {}",
                    RosterScore::ZERO
                );
                RosterScore::ZERO
            }
        }
    }

    fn termination_reason(scope: &SolverScope, target: RosterScore) -> TerminationReason {
        if scope.is_terminate_early() {
            TerminationReason::Cancelled
        } else if scope.best_score().is_some_and(|best| best >= target) {
            TerminationReason::BestScoreReached
        } else if scope.should_terminate() {
            TerminationReason::BudgetExhausted
        } else {
            TerminationReason::Completed
        }
    }

    /// First hard violation of `schedule`, as an error.
    fn infeasibility(model: &RosterModel, schedule: &Schedule) -> RosterError {
        let explanation = model.explain(schedule);
        let violation = ConstraintKind::ALL
            .into_iter()
            .filter(|kind| kind.is_hard())
            .find_map(|kind| {
                let analysis = explanation.analysis(kind)?;
                let m = analysis.matches.first()?;
                Some((kind, m))
            });
        match violation {
            Some((kind, m)) => RosterError::InfeasibleRoster {
                employee: m
                    .employee
                    .clone()
                    .unwrap_or_else(|| model.profile(0).id.clone()),
                week: m.week.unwrap_or(0),
                constraint: kind,
                reason: m.description.clone(),
            },
            None => RosterError::InfeasibleRoster {
                employee: model.profile(0).id.clone(),
                week: 0,
                constraint: ConstraintKind::WeeklyRest,
                reason: "schedule scored infeasible without a recorded violation".to_string(),
            },
        }
    }
}

impl Default for RosterSolver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use rosterforge_config::{
        ConstructionHeuristicConfig, ConstructionHeuristicType, LocalSearchConfig, PhaseConfig,
        RestPolicyConfig, TerminationConfig,
    };
    use rosterforge_test::assert_roster_invariants;

    use super::*;
    use crate::event::CountingEventListener;
    use crate::test_utils::{abc_workforce, create_abc_model, create_rotating_model, month};

    fn seeded(seed: u64) -> SolverConfig {
        SolverConfig::new()
            .with_random_seed(seed)
            .with_termination_seconds(10)
    }

    #[test]
    fn test_solve_balances_abc_month() {
        let model = create_abc_model();
        let outcome = RosterSolver::new(seeded(3)).solve(Arc::clone(&model)).unwrap();

        assert_eq!(outcome.score, RosterScore::ZERO);
        assert_eq!(outcome.reason, TerminationReason::BestScoreReached);
        assert!(outcome.warning.is_none());
        assert_roster_invariants(&outcome.to_roster(&model, 9), 2);
    }

    #[test]
    fn test_rotating_workforce_reaches_zero_spread() {
        let model = create_rotating_model(12, 2026, 1);
        let outcome = RosterSolver::new(seeded(11)).solve(Arc::clone(&model)).unwrap();
        assert_eq!(outcome.spread(), 0);
        assert!(outcome.statistics.phase_count() >= 1);
    }

    #[test]
    fn test_unreachable_target_reports_budget_exhausted() {
        let termination = TerminationConfig {
            step_count_limit: Some(3),
            best_score_limit: Some("0hard/1medium/0soft".to_string()),
            ..TerminationConfig::default()
        };
        let config = SolverConfig::new()
            .with_random_seed(1)
            .with_termination(termination);
        let outcome = RosterSolver::new(config).solve(create_abc_model()).unwrap();

        assert_eq!(outcome.reason, TerminationReason::BudgetExhausted);
        assert!(outcome.score.is_feasible());
        assert!(matches!(
            outcome.warning,
            Some(SolverWarning::BudgetExhausted { target, .. }) if target == RosterScore::of(0, 1, 0)
        ));
        // Only construction ran: the step limit fired during it.
        assert_eq!(outcome.statistics.phase_count(), 1);
    }

    #[test]
    fn test_invalid_target_falls_back_to_zero() {
        let termination = TerminationConfig {
            seconds_spent_limit: Some(10),
            best_score_limit: Some("balanced please".to_string()),
            ..TerminationConfig::default()
        };
        let config = SolverConfig::new()
            .with_random_seed(4)
            .with_termination(termination);
        let outcome = RosterSolver::new(config).solve(create_abc_model()).unwrap();
        assert_eq!(outcome.score, RosterScore::ZERO);
        assert_eq!(outcome.reason, TerminationReason::BestScoreReached);
    }

    #[test]
    fn test_unsatisfiable_quota_is_infeasible() {
        let rest = RestPolicyConfig {
            weekly_rest_days: 8,
            ..RestPolicyConfig::default()
        };
        let model = Arc::new(RosterModel::new(month(2026, 2), abc_workforce(), rest));
        let err = RosterSolver::default().solve(model).unwrap_err();
        match err {
            RosterError::InfeasibleRoster {
                employee,
                week,
                constraint,
                ..
            } => {
                assert_eq!(employee.as_str(), "A");
                assert_eq!(week, 0);
                assert_eq!(constraint, ConstraintKind::WeeklyRest);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_listeners_observe_solve() {
        let counter = Arc::new(CountingEventListener::new());
        let solver = RosterSolver::new(seeded(5))
            .with_listener(counter.clone())
            .with_phase_listener(counter.clone());
        solver.solve(create_abc_model()).unwrap();

        assert_eq!(counter.solving_started_count(), 1);
        assert_eq!(counter.solving_ended_count(), 1);
        assert!(counter.best_solution_count() >= 1);
        assert_eq!(counter.phase_started_count(), counter.phase_ended_count());
        assert!(!solver.is_solving());
    }

    #[test]
    fn test_terminate_early_requires_running_solve() {
        let solver = RosterSolver::default();
        assert!(!solver.terminate_early());
        assert!(!solver.termination_flag().load(Ordering::SeqCst));
    }

    /// Raises the cancel flag on the first best roster.
    #[derive(Debug)]
    struct CancelOnFirstBest {
        flag: Arc<AtomicBool>,
        seen: AtomicUsize,
    }

    impl SolverEventListener for CancelOnFirstBest {
        fn on_best_solution_changed(&self, _schedule: &Schedule, _score: &RosterScore) {
            self.seen.fetch_add(1, Ordering::SeqCst);
            self.flag.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_cancel_keeps_constructed_roster() {
        let config = seeded(9)
            .with_phase(PhaseConfig::ConstructionHeuristic(
                ConstructionHeuristicConfig {
                    construction_heuristic_type: ConstructionHeuristicType::FirstFit,
                },
            ))
            .with_phase(PhaseConfig::LocalSearch(LocalSearchConfig::default()));
        let solver = RosterSolver::new(config);
        let listener = Arc::new(CancelOnFirstBest {
            flag: solver.termination_flag(),
            seen: AtomicUsize::new(0),
        });
        let solver = solver.with_listener(listener.clone());

        let model = create_rotating_model(3, 2026, 3);
        let outcome = solver.solve(Arc::clone(&model)).unwrap();

        assert_eq!(outcome.reason, TerminationReason::Cancelled);
        assert_eq!(listener.seen.load(Ordering::SeqCst), 1);
        assert_eq!(outcome.statistics.phase_count(), 1);
        assert!(outcome.score.is_feasible());
        assert_roster_invariants(&outcome.to_roster(&model, 9), 2);
    }
}
