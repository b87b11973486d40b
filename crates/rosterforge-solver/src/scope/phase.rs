//! Phase-level scope.

use std::time::{Duration, Instant};

use tracing::info;

use rosterforge_core::RosterScore;
use rosterforge_scoring::ScoreDirector;

use super::SolverScope;
use crate::statistics::PhaseStatistics;
use crate::termination::TerminationContext;

/// Scope for a single phase of solving.
///
/// Created by [`PhaseScope::start`], which logs `phase_start` and notifies
/// phase listeners; consumed by [`PhaseScope::end`], which does the same
/// for `phase_end` and records the phase statistics.
pub struct PhaseScope<'a> {
    solver_scope: &'a mut SolverScope,
    stats: PhaseStatistics,
    phase_type: &'static str,
    step_count: u64,
    start_time: Instant,
    last_improvement_step: u64,
    last_improvement_time: Instant,
}

impl<'a> PhaseScope<'a> {
    pub fn start(solver_scope: &'a mut SolverScope, phase_index: usize, phase_type: &'static str) -> Self {
        info!(event = "phase_start", phase = phase_type, phase_index);
        solver_scope.events().fire_phase_started(phase_index, phase_type);

        let mut stats = PhaseStatistics::new(phase_index, phase_type);
        stats.starting_score = solver_scope.best_score();
        let now = Instant::now();
        Self {
            solver_scope,
            stats,
            phase_type,
            step_count: 0,
            start_time: now,
            last_improvement_step: 0,
            last_improvement_time: now,
        }
    }

    pub fn phase_index(&self) -> usize {
        self.stats.phase_index
    }

    pub fn phase_type(&self) -> &'static str {
        self.phase_type
    }

    pub fn starting_score(&self) -> Option<RosterScore> {
        self.stats.starting_score
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Increments both the phase and the solver step counts.
    pub fn increment_step_count(&mut self) -> u64 {
        self.step_count += 1;
        self.solver_scope.increment_step_count();
        self.step_count
    }

    pub fn record_move(&mut self, accepted: bool) {
        self.stats.record_move(accepted);
    }

    pub fn moves_evaluated(&self) -> u64 {
        self.stats.moves_evaluated
    }

    pub fn solver_scope(&self) -> &SolverScope {
        self.solver_scope
    }

    pub fn solver_scope_mut(&mut self) -> &mut SolverScope {
        self.solver_scope
    }

    pub fn director(&self) -> &ScoreDirector {
        self.solver_scope.director()
    }

    pub fn director_mut(&mut self) -> &mut ScoreDirector {
        self.solver_scope.director_mut()
    }

    pub fn calculate_score(&mut self) -> RosterScore {
        self.solver_scope.calculate_score()
    }

    pub fn best_score(&self) -> Option<RosterScore> {
        self.solver_scope.best_score()
    }

    /// Updates the solver's best roster; returns true on improvement.
    pub fn update_best_solution(&mut self) -> bool {
        let improved = self.solver_scope.update_best_solution();
        if improved {
            self.last_improvement_step = self.step_count;
            self.last_improvement_time = Instant::now();
        }
        improved
    }

    /// Ends the phase: logs `phase_end` and records its statistics.
    pub fn end(mut self) {
        let duration = self.elapsed();
        self.stats.duration = duration;
        self.stats.step_count = self.step_count;
        self.stats.ending_score = self.solver_scope.best_score();

        let score = self
            .stats
            .ending_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".to_string());
        info!(
            event = "phase_end",
            phase = self.phase_type,
            phase_index = self.stats.phase_index,
            duration_ms = duration.as_millis() as u64,
            steps = self.step_count,
            speed = self.stats.steps_per_second(),
            score = %score,
        );

        let phase_index = self.stats.phase_index;
        self.solver_scope
            .events()
            .fire_phase_ended(phase_index, self.phase_type);
        self.solver_scope.statistics_mut().record_phase(self.stats);
    }
}

impl TerminationContext for PhaseScope<'_> {
    fn elapsed(&self) -> Duration {
        PhaseScope::elapsed(self)
    }

    fn step_count(&self) -> u64 {
        self.step_count
    }

    fn best_score(&self) -> Option<RosterScore> {
        self.solver_scope.best_score()
    }

    fn steps_since_improvement(&self) -> u64 {
        self.step_count - self.last_improvement_step
    }

    fn time_since_improvement(&self) -> Duration {
        self.last_improvement_time.elapsed()
    }

    fn is_terminate_early(&self) -> bool {
        self.solver_scope.is_terminate_early()
    }
}
