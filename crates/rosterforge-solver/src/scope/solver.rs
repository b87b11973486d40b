//! Solver-level scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use rosterforge_core::RosterScore;
use rosterforge_scoring::{RosterModel, Schedule, ScoreDirector};

use crate::event::SolverEventSupport;
use crate::pattern::PatternCatalog;
use crate::statistics::{ScoreImprovement, SolverStatistics};
use crate::termination::{ConfiguredTermination, Termination, TerminationContext};

/// Top-level scope for the entire solving process.
///
/// Owns the score director, so the working schedule lives here; phases
/// borrow the scope mutably for their whole run.
pub struct SolverScope {
    director: ScoreDirector,
    catalog: Arc<PatternCatalog>,
    best_schedule: Option<Schedule>,
    best_score: Option<RosterScore>,
    rng: StdRng,
    start_time: Option<Instant>,
    total_step_count: u64,
    last_improvement_step: u64,
    last_improvement_time: Option<Instant>,
    statistics: SolverStatistics,
    events: SolverEventSupport,
    terminate_early_flag: Option<Arc<AtomicBool>>,
    termination: Option<ConfiguredTermination>,
}

impl SolverScope {
    pub fn new(director: ScoreDirector, catalog: Arc<PatternCatalog>) -> Self {
        Self::with_rng(director, catalog, StdRng::from_os_rng())
    }

    pub fn with_seed(director: ScoreDirector, catalog: Arc<PatternCatalog>, seed: u64) -> Self {
        Self::with_rng(director, catalog, StdRng::seed_from_u64(seed))
    }

    fn with_rng(director: ScoreDirector, catalog: Arc<PatternCatalog>, rng: StdRng) -> Self {
        Self {
            director,
            catalog,
            best_schedule: None,
            best_score: None,
            rng,
            start_time: None,
            total_step_count: 0,
            last_improvement_step: 0,
            last_improvement_time: None,
            statistics: SolverStatistics::new(),
            events: SolverEventSupport::new(),
            terminate_early_flag: None,
            termination: None,
        }
    }

    pub fn with_events(mut self, events: SolverEventSupport) -> Self {
        self.events = events;
        self
    }

    /// Sets the solver-level termination checked by [`should_terminate`](Self::should_terminate).
    pub fn with_termination(mut self, termination: ConfiguredTermination) -> Self {
        self.termination = Some(termination);
        self
    }

    pub fn set_terminate_early_flag(&mut self, flag: Arc<AtomicBool>) {
        self.terminate_early_flag = Some(flag);
    }

    pub fn start_solving(&mut self) {
        let now = Instant::now();
        self.start_time = Some(now);
        self.last_improvement_time = Some(now);
        self.total_step_count = 0;
        self.last_improvement_step = 0;
        self.events.fire_solving_started(self.director.model());
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn director(&self) -> &ScoreDirector {
        &self.director
    }

    pub fn director_mut(&mut self) -> &mut ScoreDirector {
        &mut self.director
    }

    pub fn model(&self) -> &Arc<RosterModel> {
        self.director.model()
    }

    pub fn catalog(&self) -> &Arc<PatternCatalog> {
        &self.catalog
    }

    pub fn working_schedule(&self) -> &Schedule {
        self.director.schedule()
    }

    /// Score of the working schedule.
    pub fn calculate_score(&mut self) -> RosterScore {
        self.director.score()
    }

    pub fn best_schedule(&self) -> Option<&Schedule> {
        self.best_schedule.as_ref()
    }

    pub fn best_score(&self) -> Option<RosterScore> {
        self.best_score
    }

    /// Promotes the working schedule to best if it scores strictly higher.
    ///
    /// Returns true on improvement.
    pub fn update_best_solution(&mut self) -> bool {
        let current = self.director.score();
        if self.best_score.is_some_and(|best| current <= best) {
            return false;
        }

        let schedule = self.director.schedule().clone();
        self.events.fire_best_solution_changed(&schedule, &current);
        self.best_schedule = Some(schedule);
        self.best_score = Some(current);
        self.last_improvement_step = self.total_step_count;
        self.last_improvement_time = Some(Instant::now());
        self.statistics.record_improvement(ScoreImprovement {
            time_offset: self.elapsed(),
            step_count: self.total_step_count,
            score: current,
        });
        debug!(event = "new_best", step = self.total_step_count, score = %current);
        true
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// The director for reading alongside the RNG, for move generation.
    pub fn director_with_rng(&mut self) -> (&ScoreDirector, &mut StdRng) {
        (&self.director, &mut self.rng)
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    pub fn statistics_mut(&mut self) -> &mut SolverStatistics {
        &mut self.statistics
    }

    pub fn events(&self) -> &SolverEventSupport {
        &self.events
    }

    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// True once any solver-level termination fires.
    pub fn should_terminate(&self) -> bool {
        self.termination.is_terminated(self)
    }

    /// Finalizes statistics and returns the best roster with its score.
    ///
    /// Falls back to the working schedule if no phase recorded a best.
    pub fn finish(mut self) -> (Schedule, RosterScore, SolverStatistics) {
        self.statistics.total_duration = self.elapsed();
        self.statistics.total_step_count = self.total_step_count;
        self.statistics.score_calculation_count = self.director.calculation_count();

        match (self.best_schedule, self.best_score) {
            (Some(schedule), Some(score)) => (schedule, score, self.statistics),
            _ => {
                let score = self.director.score();
                (self.director.into_schedule(), score, self.statistics)
            }
        }
    }
}

impl TerminationContext for SolverScope {
    fn elapsed(&self) -> Duration {
        SolverScope::elapsed(self)
    }

    fn step_count(&self) -> u64 {
        self.total_step_count
    }

    fn best_score(&self) -> Option<RosterScore> {
        self.best_score
    }

    fn steps_since_improvement(&self) -> u64 {
        self.total_step_count - self.last_improvement_step
    }

    fn time_since_improvement(&self) -> Duration {
        self.last_improvement_time
            .map_or(Duration::ZERO, |t| t.elapsed())
    }

    fn is_terminate_early(&self) -> bool {
        SolverScope::is_terminate_early(self)
    }
}

impl std::fmt::Debug for SolverScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverScope")
            .field("best_score", &self.best_score)
            .field("total_step_count", &self.total_step_count)
            .field("events", &self.events)
            .finish()
    }
}
