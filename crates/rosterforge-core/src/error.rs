//! Error types for RosterForge

use chrono::NaiveDate;
use thiserror::Error;

use crate::calendar::RosterMonth;
use crate::constraint::ConstraintKind;
use crate::domain::{EmployeeId, ShiftState};

/// Main error type for RosterForge operations.
///
/// Every variant names the constraint class or the query that produced it,
/// so a failure points at the input data rather than at the algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// No day pattern satisfies the hard constraints for one (employee, week).
    #[error(
        "Infeasible roster: employee {employee} has no valid pattern in week {week} \
         ({constraint} constraint): {reason}"
    )]
    InfeasibleRoster {
        employee: EmployeeId,
        week: usize,
        constraint: ConstraintKind,
        reason: String,
    },

    /// Replacement requested for an employee who is resting on the date.
    #[error("Invalid absence: employee {employee} is resting on {date}, nothing to replace")]
    InvalidAbsenceState {
        employee: EmployeeId,
        date: NaiveDate,
    },

    /// Every resting employee on the date is affinity-incompatible.
    #[error("No replacement found for employee {employee} ({shift} shift) on {date}")]
    NoReplacementFound {
        employee: EmployeeId,
        date: NaiveDate,
        shift: ShiftState,
    },

    /// The employee is not part of the roster.
    #[error("Unknown employee: {0}")]
    UnknownEmployee(EmployeeId),

    /// The date does not belong to the roster month.
    #[error("Date {date} is outside roster month {month}")]
    DateOutOfRoster { date: NaiveDate, month: RosterMonth },

    /// Year/month pair does not name a calendar month.
    #[error("Invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    /// Two employees share one identifier.
    #[error("Duplicate employee id: {0}")]
    DuplicateEmployee(EmployeeId),
}

/// Result type alias for RosterForge operations
pub type Result<T> = std::result::Result<T, RosterError>;
