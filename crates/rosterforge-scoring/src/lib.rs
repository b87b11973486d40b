//! Roster constraint model and incremental scoring for RosterForge.
//!
//! This crate defines the scheduling problem for one month independently of
//! how it is solved:
//! - Per-employee shift domains after affinity reduction (`ShiftDomain`)
//! - The decision grid `x[e,d]` (`Schedule`)
//! - Hard week-scoped constraints and the workload balance objective
//! - An incremental `ScoreDirector` that rescans only the changed week
//! - Score explanation for debugging input data

pub mod analysis;
pub mod constraint;
pub mod director;
pub mod domain;
pub mod model;
pub mod schedule;

pub use analysis::{ConstraintAnalysis, ConstraintMatch, ScoreExplanation};
pub use constraint::{
    AffinityConstraint, ShiftLockConstraint, WeekConstraint, WeekContext, WeeklyRestConstraint,
    WorkloadBalance,
};
pub use director::{ScoreDirector, WeekStates};
pub use domain::ShiftDomain;
pub use model::RosterModel;
pub use schedule::Schedule;
