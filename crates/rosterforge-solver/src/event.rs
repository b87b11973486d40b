//! Event system for solver monitoring.
//!
//! Listeners registered on a [`RosterSolver`](crate::RosterSolver) are
//! called synchronously, in registration order, from the solving thread.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use rosterforge_core::RosterScore;
//! use rosterforge_scoring::Schedule;
//! use rosterforge_solver::event::{SolverEventListener, SolverEventSupport};
//!
//! #[derive(Debug)]
//! struct PrintBest;
//! impl SolverEventListener for PrintBest {
//!     fn on_best_solution_changed(&self, _schedule: &Schedule, score: &RosterScore) {
//!         println!("new best: {score}");
//!     }
//! }
//!
//! let mut support = SolverEventSupport::new();
//! support.add_solver_listener(Arc::new(PrintBest));
//! assert_eq!(support.solver_listener_count(), 1);
//! ```

use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rosterforge_core::RosterScore;
use rosterforge_scoring::{RosterModel, Schedule};
use tracing::info;

/// Listener for solver-level events.
pub trait SolverEventListener: Send + Sync + Debug {
    /// Called when a new best roster is found.
    fn on_best_solution_changed(&self, schedule: &Schedule, score: &RosterScore);

    /// Called when solving starts.
    fn on_solving_started(&self, _model: &RosterModel) {}

    /// Called when solving ends.
    fn on_solving_ended(&self, _score: &RosterScore, _is_terminated_early: bool) {}
}

/// Listener for phase lifecycle events.
pub trait PhaseLifecycleListener: Send + Sync + Debug {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase_index` - The index of the phase (0-based)
    /// * `phase_type` - The type name of the phase
    fn on_phase_started(&self, phase_index: usize, phase_type: &str);

    /// Called when a phase ends.
    fn on_phase_ended(&self, phase_index: usize, phase_type: &str);
}

/// Central event broadcaster for solver events.
#[derive(Clone, Default)]
pub struct SolverEventSupport {
    solver_listeners: Vec<Arc<dyn SolverEventListener>>,
    phase_listeners: Vec<Arc<dyn PhaseLifecycleListener>>,
}

impl SolverEventSupport {
    pub fn new() -> Self {
        Self::default()
    }

    // === Listener Registration ===

    pub fn add_solver_listener(&mut self, listener: Arc<dyn SolverEventListener>) {
        self.solver_listeners.push(listener);
    }

    pub fn add_phase_listener(&mut self, listener: Arc<dyn PhaseLifecycleListener>) {
        self.phase_listeners.push(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.solver_listeners.clear();
        self.phase_listeners.clear();
    }

    // === Event Firing ===

    pub fn fire_best_solution_changed(&self, schedule: &Schedule, score: &RosterScore) {
        for listener in &self.solver_listeners {
            listener.on_best_solution_changed(schedule, score);
        }
    }

    pub fn fire_solving_started(&self, model: &RosterModel) {
        for listener in &self.solver_listeners {
            listener.on_solving_started(model);
        }
    }

    pub fn fire_solving_ended(&self, score: &RosterScore, is_terminated_early: bool) {
        for listener in &self.solver_listeners {
            listener.on_solving_ended(score, is_terminated_early);
        }
    }

    pub fn fire_phase_started(&self, phase_index: usize, phase_type: &str) {
        for listener in &self.phase_listeners {
            listener.on_phase_started(phase_index, phase_type);
        }
    }

    pub fn fire_phase_ended(&self, phase_index: usize, phase_type: &str) {
        for listener in &self.phase_listeners {
            listener.on_phase_ended(phase_index, phase_type);
        }
    }

    // === Query Methods ===

    pub fn solver_listener_count(&self) -> usize {
        self.solver_listeners.len()
    }

    pub fn phase_listener_count(&self) -> usize {
        self.phase_listeners.len()
    }

    pub fn has_listeners(&self) -> bool {
        !self.solver_listeners.is_empty() || !self.phase_listeners.is_empty()
    }
}

impl Debug for SolverEventSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverEventSupport")
            .field("solver_listeners", &self.solver_listeners.len())
            .field("phase_listeners", &self.phase_listeners.len())
            .finish()
    }
}

/// Forwards events to `tracing` at info level.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventListener {
    prefix: String,
}

impl LoggingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a logging listener that tags every event with `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl SolverEventListener for LoggingEventListener {
    fn on_best_solution_changed(&self, _schedule: &Schedule, score: &RosterScore) {
        info!(event = "best_changed", prefix = %self.prefix, score = %score);
    }

    fn on_solving_started(&self, model: &RosterModel) {
        info!(
            event = "solving_started",
            prefix = %self.prefix,
            month = %model.month(),
            employees = model.employee_count(),
        );
    }

    fn on_solving_ended(&self, score: &RosterScore, is_terminated_early: bool) {
        info!(
            event = "solving_ended",
            prefix = %self.prefix,
            score = %score,
            terminated_early = is_terminated_early,
        );
    }
}

impl PhaseLifecycleListener for LoggingEventListener {
    fn on_phase_started(&self, phase_index: usize, phase_type: &str) {
        info!(event = "phase_started", prefix = %self.prefix, phase_index, phase = phase_type);
    }

    fn on_phase_ended(&self, phase_index: usize, phase_type: &str) {
        info!(event = "phase_ended", prefix = %self.prefix, phase_index, phase = phase_type);
    }
}

/// A counting listener that tracks event occurrences.
///
/// Useful for testing.
#[derive(Debug, Default)]
pub struct CountingEventListener {
    best_solution_count: AtomicUsize,
    solving_started_count: AtomicUsize,
    solving_ended_count: AtomicUsize,
    phase_started_count: AtomicUsize,
    phase_ended_count: AtomicUsize,
}

impl CountingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best_solution_count(&self) -> usize {
        self.best_solution_count.load(Ordering::SeqCst)
    }

    pub fn solving_started_count(&self) -> usize {
        self.solving_started_count.load(Ordering::SeqCst)
    }

    pub fn solving_ended_count(&self) -> usize {
        self.solving_ended_count.load(Ordering::SeqCst)
    }

    pub fn phase_started_count(&self) -> usize {
        self.phase_started_count.load(Ordering::SeqCst)
    }

    pub fn phase_ended_count(&self) -> usize {
        self.phase_ended_count.load(Ordering::SeqCst)
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        for counter in [
            &self.best_solution_count,
            &self.solving_started_count,
            &self.solving_ended_count,
            &self.phase_started_count,
            &self.phase_ended_count,
        ] {
            counter.store(0, Ordering::SeqCst);
        }
    }
}

impl SolverEventListener for CountingEventListener {
    fn on_best_solution_changed(&self, _schedule: &Schedule, _score: &RosterScore) {
        self.best_solution_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_started(&self, _model: &RosterModel) {
        self.solving_started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_ended(&self, _score: &RosterScore, _is_terminated_early: bool) {
        self.solving_ended_count.fetch_add(1, Ordering::SeqCst);
    }
}

impl PhaseLifecycleListener for CountingEventListener {
    fn on_phase_started(&self, _phase_index: usize, _phase_type: &str) {
        self.phase_started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_phase_ended(&self, _phase_index: usize, _phase_type: &str) {
        self.phase_ended_count.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_listener_receives_events() {
        let counter = Arc::new(CountingEventListener::new());
        let mut support = SolverEventSupport::new();
        support.add_solver_listener(counter.clone());
        support.add_phase_listener(counter.clone());
        assert!(support.has_listeners());

        let schedule = Schedule::new(1, 7);
        support.fire_phase_started(0, "ConstructionHeuristic");
        support.fire_best_solution_changed(&schedule, &RosterScore::ZERO);
        support.fire_best_solution_changed(&schedule, &RosterScore::ZERO);
        support.fire_phase_ended(0, "ConstructionHeuristic");
        support.fire_solving_ended(&RosterScore::ZERO, false);

        assert_eq!(counter.phase_started_count(), 1);
        assert_eq!(counter.best_solution_count(), 2);
        assert_eq!(counter.phase_ended_count(), 1);
        assert_eq!(counter.solving_ended_count(), 1);
        assert_eq!(counter.solving_started_count(), 0);

        counter.reset();
        assert_eq!(counter.best_solution_count(), 0);
    }

    #[test]
    fn test_clear_listeners() {
        let mut support = SolverEventSupport::new();
        support.add_phase_listener(Arc::new(LoggingEventListener::with_prefix("test")));
        assert_eq!(support.phase_listener_count(), 1);
        support.clear_listeners();
        assert!(!support.has_listeners());
    }
}
