//! Roster constraints.
//!
//! Every hard constraint is scoped to one employee and one week, so a
//! change to one week only needs that week rescanned. The workload balance
//! objective is global and tracked incrementally from per-employee totals.

mod affinity;
mod balance;
mod shift_lock;
mod weekly_rest;

#[cfg(test)]
mod tests;

use std::fmt::Debug;

use rosterforge_core::{ConstraintKind, ConstraintRef, EmployeeProfile, ShiftState, Week};

pub use affinity::AffinityConstraint;
pub use balance::WorkloadBalance;
pub use shift_lock::ShiftLockConstraint;
pub use weekly_rest::WeeklyRestConstraint;

/// The states of one employee during one week, with the week's rest bounds.
#[derive(Debug, Clone, Copy)]
pub struct WeekContext<'a> {
    pub profile: &'a EmployeeProfile,
    pub week: &'a Week,
    pub states: &'a [ShiftState],
    /// Inclusive bounds on the rest-day count of this week.
    pub rest_bounds: (usize, usize),
}

impl WeekContext<'_> {
    pub fn count(&self, state: ShiftState) -> usize {
        self.states.iter().filter(|s| **s == state).count()
    }

    pub fn rest_count(&self) -> usize {
        self.count(ShiftState::Rest)
    }
}

/// A hard constraint evaluated per (employee, week).
pub trait WeekConstraint: Send + Sync + Debug {
    fn kind(&self) -> ConstraintKind;

    /// Number of violations in this week; zero when satisfied.
    fn violations(&self, ctx: &WeekContext<'_>) -> u32;

    /// Human-readable reason for a violated week.
    fn justify(&self, ctx: &WeekContext<'_>) -> String;

    fn constraint_ref(&self) -> ConstraintRef {
        ConstraintRef::of_kind(self.kind())
    }
}

/// The hard constraints of the roster model.
pub fn hard_constraints() -> Vec<Box<dyn WeekConstraint>> {
    vec![
        Box::new(AffinityConstraint),
        Box::new(WeeklyRestConstraint),
        Box::new(ShiftLockConstraint),
    ]
}
