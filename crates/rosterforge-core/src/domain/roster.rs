//! The finalized monthly roster.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::{Affinity, EmployeeId, EmployeeProfile, ShiftState, Workforce};
use crate::calendar::RosterMonth;
use crate::error::{Result, RosterError};

/// State of one employee on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayAssignment {
    pub date: NaiveDate,
    pub state: ShiftState,
}

/// One employee's assignments for the whole month plus derived counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    profile: EmployeeProfile,
    assignments: Vec<DayAssignment>,
    day_shifts: u32,
    night_shifts: u32,
}

impl RosterRow {
    fn new(profile: EmployeeProfile, assignments: Vec<DayAssignment>) -> Self {
        let count = |state| assignments.iter().filter(|a| a.state == state).count() as u32;
        let day_shifts = count(ShiftState::Day);
        let night_shifts = count(ShiftState::Night);
        Self {
            profile,
            assignments,
            day_shifts,
            night_shifts,
        }
    }

    pub fn profile(&self) -> &EmployeeProfile {
        &self.profile
    }

    pub fn employee_id(&self) -> &EmployeeId {
        &self.profile.id
    }

    pub fn affinity(&self) -> Affinity {
        self.profile.affinity()
    }

    /// Assignments ordered by date, one per calendar day.
    pub fn assignments(&self) -> &[DayAssignment] {
        &self.assignments
    }

    /// State on the given 0-based day index.
    pub fn state_on(&self, day: usize) -> Option<ShiftState> {
        self.assignments.get(day).map(|a| a.state)
    }

    pub fn states(&self) -> impl Iterator<Item = ShiftState> + '_ {
        self.assignments.iter().map(|a| a.state)
    }

    pub fn total_day_shifts(&self) -> u32 {
        self.day_shifts
    }

    pub fn total_night_shifts(&self) -> u32 {
        self.night_shifts
    }

    /// Number of worked days (day plus night shifts).
    pub fn total_work_units(&self) -> u32 {
        self.day_shifts + self.night_shifts
    }

    pub fn rest_days(&self) -> u32 {
        self.assignments.len() as u32 - self.total_work_units()
    }
}

/// Row of the downstream grid: metadata, one state per date, and summary counters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RosterGridRow {
    pub id: String,
    pub name: String,
    pub department: String,
    pub status: String,
    pub affinity: Affinity,
    pub states: Vec<ShiftState>,
    pub total_shifts: u32,
    pub work_hours: u32,
}

/// The complete output of one generation run.
///
/// Every employee of the workforce has exactly one assignment per calendar
/// day of the month. A roster is immutable once built; queries never
/// mutate it.
#[derive(Debug, Clone)]
pub struct Roster {
    month: RosterMonth,
    rows: Vec<RosterRow>,
    index: HashMap<EmployeeId, usize>,
    hours_per_shift: u32,
}

impl Roster {
    /// Builds a roster by asking `state` for every (employee, day) pair.
    ///
    /// Totality is structural: the closure is called exactly once for each
    /// employee index and each day index of the month. Rest quota and
    /// affinity are not checked here; rosters reach callers through the
    /// solver, which rejects hard violations before building. Public only
    /// for the scoring crate and test fixtures.
    #[doc(hidden)]
    pub fn build<F>(month: RosterMonth, workforce: &Workforce, hours_per_shift: u32, mut state: F) -> Self
    where
        F: FnMut(usize, usize) -> ShiftState,
    {
        let dates = month.dates();
        let mut rows = Vec::with_capacity(workforce.len());
        let mut index = HashMap::with_capacity(workforce.len());

        for (e, profile) in workforce.iter().enumerate() {
            let assignments = dates
                .iter()
                .enumerate()
                .map(|(d, &date)| DayAssignment {
                    date,
                    state: state(e, d),
                })
                .collect();
            index.insert(profile.id.clone(), e);
            rows.push(RosterRow::new(profile.clone(), assignments));
        }

        Self {
            month,
            rows,
            index,
            hours_per_shift,
        }
    }

    pub fn month(&self) -> RosterMonth {
        self.month
    }

    pub fn hours_per_shift(&self) -> u32 {
        self.hours_per_shift
    }

    pub fn rows(&self) -> &[RosterRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.month.dates()
    }

    /// Looks up one employee's row.
    pub fn row(&self, employee: &str) -> Result<&RosterRow> {
        self.index
            .get(employee)
            .map(|&i| &self.rows[i])
            .ok_or_else(|| RosterError::UnknownEmployee(EmployeeId::new(employee)))
    }

    fn day_index(&self, date: NaiveDate) -> Result<usize> {
        self.month
            .day_index_of(date)
            .ok_or(RosterError::DateOutOfRoster {
                date,
                month: self.month,
            })
    }

    /// State of an employee on a date.
    pub fn state_of(&self, employee: &str, date: NaiveDate) -> Result<ShiftState> {
        let row = self.row(employee)?;
        let day = self.day_index(date)?;
        Ok(row.assignments[day].state)
    }

    /// Rows of every employee working on `date`, paired with their shift.
    pub fn working_on(&self, date: NaiveDate) -> Result<Vec<(&RosterRow, ShiftState)>> {
        let day = self.day_index(date)?;
        Ok(self
            .rows
            .iter()
            .filter_map(|row| {
                let state = row.assignments[day].state;
                state.is_working().then_some((row, state))
            })
            .collect())
    }

    /// Rows of every employee resting on `date`.
    pub fn resting_on(&self, date: NaiveDate) -> Result<Vec<&RosterRow>> {
        let day = self.day_index(date)?;
        Ok(self
            .rows
            .iter()
            .filter(|row| row.assignments[day].state == ShiftState::Rest)
            .collect())
    }

    /// Worked hours for one row, saturating at `u32::MAX`.
    pub fn work_hours(&self, row: &RosterRow) -> u32 {
        row.total_work_units().saturating_mul(self.hours_per_shift)
    }

    /// Difference between the largest and smallest total worked days.
    pub fn spread(&self) -> u32 {
        let totals = self.rows.iter().map(RosterRow::total_work_units);
        match (totals.clone().max(), totals.min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        }
    }

    /// Flattens the roster into grid rows for presentation.
    pub fn grid(&self) -> Vec<RosterGridRow> {
        self.rows
            .iter()
            .map(|row| {
                let p = row.profile();
                RosterGridRow {
                    id: p.id.to_string(),
                    name: p.name.clone(),
                    department: p.department.clone(),
                    status: p.status.clone(),
                    affinity: p.affinity(),
                    states: row.states().collect(),
                    total_shifts: row.total_work_units(),
                    work_hours: self.work_hours(row),
                }
            })
            .collect()
    }
}
