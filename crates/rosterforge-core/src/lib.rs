//! RosterForge Core - Core types for monthly shift rostering
//!
//! This crate provides the fundamental abstractions for RosterForge:
//! - Shift states and shift affinity classification
//! - Employee profiles and the immutable workforce set
//! - Calendar partitioning into Sunday-to-Saturday weeks
//! - The finalized roster and its per-employee aggregates
//! - Score type and constraint identification
//! - Error types shared by every crate in the workspace

pub mod calendar;
pub mod constraint;
pub mod domain;
pub mod error;
pub mod score;

pub use calendar::{RosterMonth, Week};
pub use constraint::{ConstraintKind, ConstraintRef};
pub use domain::{
    classify_affinity, Affinity, DayAssignment, EmployeeHistory, EmployeeId, EmployeeProfile,
    Roster, RosterGridRow, RosterRow, ShiftState, Workforce, DEFAULT_HOURS_PER_SHIFT,
    MAX_HOURS_PER_SHIFT,
};
pub use error::{Result, RosterError};
pub use score::{RosterScore, ScoreLevel, ScoreParseError};
