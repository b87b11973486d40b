//! Solver statistics.
//!
//! Move counts, step counts, timing and score progression of one solve.
//! A solve is single-threaded, so the solver scope records into these
//! structs directly.

use std::time::Duration;

use rosterforge_core::RosterScore;

/// Statistics for a single solver phase.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseStatistics {
    /// Index of this phase (0-based).
    pub phase_index: usize,
    /// Type name of the phase (e.g., "ConstructionHeuristic", "LocalSearch").
    pub phase_type: String,
    /// Time spent in this phase.
    pub duration: Duration,
    /// Number of steps taken in this phase.
    pub step_count: u64,
    /// Number of moves evaluated.
    pub moves_evaluated: u64,
    /// Number of moves accepted.
    pub moves_accepted: u64,
    /// Best score at the start of the phase.
    pub starting_score: Option<RosterScore>,
    /// Best score at the end of the phase.
    pub ending_score: Option<RosterScore>,
}

impl PhaseStatistics {
    /// Creates empty phase statistics.
    pub fn new(phase_index: usize, phase_type: impl Into<String>) -> Self {
        Self {
            phase_index,
            phase_type: phase_type.into(),
            duration: Duration::ZERO,
            step_count: 0,
            moves_evaluated: 0,
            moves_accepted: 0,
            starting_score: None,
            ending_score: None,
        }
    }

    /// Records a move evaluation and whether it was accepted.
    pub fn record_move(&mut self, accepted: bool) {
        self.moves_evaluated += 1;
        if accepted {
            self.moves_accepted += 1;
        }
    }

    /// Returns the acceptance rate (accepted / evaluated).
    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }

    /// Steps per second over the phase.
    pub fn steps_per_second(&self) -> u64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            (self.step_count as f64 / secs) as u64
        } else {
            0
        }
    }
}

/// Record of a score improvement event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreImprovement {
    /// Time since solving started when improvement occurred.
    pub time_offset: Duration,
    /// Step number when improvement occurred.
    pub step_count: u64,
    /// The new (improved) score.
    pub score: RosterScore,
}

/// Complete statistics for a solver run.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use rosterforge_core::RosterScore;
/// use rosterforge_solver::{ScoreImprovement, SolverStatistics};
///
/// let mut stats = SolverStatistics::new();
/// stats.record_improvement(ScoreImprovement {
///     time_offset: Duration::from_millis(5),
///     step_count: 12,
///     score: RosterScore::of(0, -1, -6),
/// });
/// assert_eq!(stats.improvement_count(), 1);
/// assert_eq!(stats.best_score(), Some(&RosterScore::of(0, -1, -6)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverStatistics {
    /// Total time spent solving.
    pub total_duration: Duration,
    /// Total steps taken across all phases.
    pub total_step_count: u64,
    /// Total moves evaluated across all phases.
    pub total_moves_evaluated: u64,
    /// Total moves accepted across all phases.
    pub total_moves_accepted: u64,
    /// Number of score calculations performed.
    pub score_calculation_count: u64,
    /// Statistics for each phase.
    pub phase_statistics: Vec<PhaseStatistics>,
    /// History of score improvements.
    pub score_history: Vec<ScoreImprovement>,
}

impl SolverStatistics {
    /// Creates empty solver statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a finished phase and folds its counters into the totals.
    pub fn record_phase(&mut self, phase: PhaseStatistics) {
        self.total_moves_evaluated += phase.moves_evaluated;
        self.total_moves_accepted += phase.moves_accepted;
        self.phase_statistics.push(phase);
    }

    pub fn record_improvement(&mut self, improvement: ScoreImprovement) {
        self.score_history.push(improvement);
    }

    /// Returns the overall acceptance rate.
    pub fn acceptance_rate(&self) -> f64 {
        if self.total_moves_evaluated == 0 {
            0.0
        } else {
            self.total_moves_accepted as f64 / self.total_moves_evaluated as f64
        }
    }

    /// Returns the number of phases.
    pub fn phase_count(&self) -> usize {
        self.phase_statistics.len()
    }

    /// Returns the best score achieved (last in history, or None).
    pub fn best_score(&self) -> Option<&RosterScore> {
        self.score_history.last().map(|s| &s.score)
    }

    /// Returns the number of score improvements recorded.
    pub fn improvement_count(&self) -> usize {
        self.score_history.len()
    }
}
