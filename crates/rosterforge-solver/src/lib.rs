//! RosterForge solver engine.
//!
//! This crate searches the space defined by a [`RosterModel`]:
//! - Pattern catalog: affinity-reduced, rest-quota-respecting week patterns
//! - Phases: construction, branch-and-bound over work totals, local search
//! - Termination conditions, scopes and statistics
//! - Event listeners for monitoring best-roster changes
//!
//! [`RosterModel`]: rosterforge_scoring::RosterModel

pub mod builder;
pub mod event;
pub mod pattern;
pub mod phase;
pub mod scope;
pub mod solver;
pub mod statistics;
pub mod termination;

#[cfg(test)]
mod test_utils;

pub use builder::{AcceptorBuilder, PhaseBuilder};
pub use event::{
    CountingEventListener, LoggingEventListener, PhaseLifecycleListener, SolverEventListener,
    SolverEventSupport,
};
pub use pattern::{PatternCatalog, WeekPattern};
pub use phase::{
    construction::ConstructionHeuristicPhase,
    exhaustive::BranchAndBoundPhase,
    localsearch::{
        AcceptedCountForager, Acceptor, ChangePatternMove, EntityTabuAcceptor,
        HillClimbingAcceptor, LateAcceptanceAcceptor, LocalSearchForager, LocalSearchPhase,
        RosterMove, RosterMoveSelector, SwapPatternMove,
    },
    Phase,
};
pub use scope::{PhaseScope, SolverScope};
pub use solver::{RosterSolver, SolveOutcome, SolverWarning, TerminationReason};
pub use statistics::{PhaseStatistics, ScoreImprovement, SolverStatistics};
pub use termination::{
    BestScoreTermination, ConfiguredTermination, ExternalTermination, OrTermination,
    StepCountTermination, Termination, TerminationContext, TimeTermination,
    UnimprovedStepCountTermination, UnimprovedTimeTermination,
};
