//! RosterForge - monthly shift roster generation in Rust
//!
//! Classifies employees from their shift history, generates a month roster
//! that meets the weekly rest quota while balancing workload, and
//! recommends substitutes for absences.
//!
//! # Example
//!
//! ```rust
//! use rosterforge::prelude::*;
//!
//! let score = RosterScore::of(0, -1, -4);
//! assert!(score.is_feasible());
//! assert_eq!(score.to_string(), "0hard/-1medium/-4soft");
//! ```

mod batch;
mod generate;
mod replacement;

#[cfg(feature = "console")]
pub mod console;

pub use batch::{generate_batch, RosterRequest};
pub use generate::{generate_for_workforce, generate_roster, GeneratedRoster};
pub use replacement::{Replacement, ReplacementCandidate, ReplacementRecommender};

// Domain types
pub use rosterforge_core::{
    classify_affinity, Affinity, ConstraintKind, EmployeeHistory, EmployeeId, EmployeeProfile,
    Result, Roster, RosterError, RosterGridRow, RosterMonth, RosterRow, RosterScore, ShiftState,
    Week, Workforce, DEFAULT_HOURS_PER_SHIFT,
};

// Configuration
pub use rosterforge_config::{
    AcceptorConfig, ConfigError, ConstructionHeuristicConfig, ConstructionHeuristicType,
    ExhaustiveSearchConfig, LocalSearchConfig, PartialWeekPolicy, PhaseConfig, RestPolicyConfig,
    RosterConfig, SolverConfig, TerminationConfig,
};

// Constraint analysis
pub use rosterforge_scoring::{ConstraintAnalysis, ConstraintMatch, RosterModel, ScoreExplanation};

// Solver
pub use rosterforge_solver::{
    RosterSolver, SolveOutcome, SolverEventListener, SolverStatistics, SolverWarning,
    TerminationReason,
};

pub mod prelude {
    pub use super::{
        generate_roster, Affinity, EmployeeHistory, GeneratedRoster, ReplacementRecommender,
        Roster, RosterConfig, RosterError, RosterScore, ShiftState,
    };
}
