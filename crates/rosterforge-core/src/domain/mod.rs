//! Domain model: shift states, affinities, employees and the finalized roster.

mod affinity;
mod employee;
mod roster;
mod shift;


pub use affinity::{classify_affinity, Affinity};
pub use employee::{EmployeeHistory, EmployeeId, EmployeeProfile, Workforce};
pub use roster::{DayAssignment, Roster, RosterGridRow, RosterRow};
pub use shift::ShiftState;

/// Hours credited per worked shift unless configured otherwise.
pub const DEFAULT_HOURS_PER_SHIFT: u32 = 9;

/// Upper bound on a configured shift length.
pub const MAX_HOURS_PER_SHIFT: u32 = 24;
