//! The decision grid `x[e,d]`.

use std::ops::Range;

use rosterforge_core::ShiftState;

/// One state per (employee, day), stored row-major by employee.
///
/// A fresh schedule has every cell at `Rest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    employee_count: usize,
    day_count: usize,
    cells: Vec<ShiftState>,
}

impl Schedule {
    pub fn new(employee_count: usize, day_count: usize) -> Self {
        Self {
            employee_count,
            day_count,
            cells: vec![ShiftState::Rest; employee_count * day_count],
        }
    }

    /// Builds a schedule from per-employee rows. Returns `None` for ragged input.
    pub fn from_rows(rows: Vec<Vec<ShiftState>>) -> Option<Self> {
        let day_count = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != day_count) {
            return None;
        }
        Some(Self {
            employee_count: rows.len(),
            day_count,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn employee_count(&self) -> usize {
        self.employee_count
    }

    pub fn day_count(&self) -> usize {
        self.day_count
    }

    #[inline]
    pub fn get(&self, employee: usize, day: usize) -> ShiftState {
        self.cells[employee * self.day_count + day]
    }

    #[inline]
    pub fn set(&mut self, employee: usize, day: usize, state: ShiftState) {
        self.cells[employee * self.day_count + day] = state;
    }

    /// All days of one employee.
    pub fn row(&self, employee: usize) -> &[ShiftState] {
        let start = employee * self.day_count;
        &self.cells[start..start + self.day_count]
    }

    /// A contiguous run of days of one employee.
    pub fn days(&self, employee: usize, days: Range<usize>) -> &[ShiftState] {
        let base = employee * self.day_count;
        &self.cells[base + days.start..base + days.end]
    }

    pub fn days_mut(&mut self, employee: usize, days: Range<usize>) -> &mut [ShiftState] {
        let base = employee * self.day_count;
        &mut self.cells[base + days.start..base + days.end]
    }

    /// Number of worked days of one employee.
    pub fn work_total(&self, employee: usize) -> u32 {
        self.row(employee).iter().filter(|s| s.is_working()).count() as u32
    }

    pub fn work_totals(&self) -> Vec<u32> {
        (0..self.employee_count).map(|e| self.work_total(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_rest() {
        let s = Schedule::new(2, 5);
        assert_eq!(s.work_totals(), vec![0, 0]);
        assert_eq!(s.row(1).len(), 5);
    }

    #[test]
    fn test_set_and_slices() {
        let mut s = Schedule::new(2, 7);
        s.set(1, 3, ShiftState::Day);
        s.days_mut(1, 5..7).fill(ShiftState::Night);
        assert_eq!(s.get(1, 3), ShiftState::Day);
        assert_eq!(s.get(0, 3), ShiftState::Rest);
        assert_eq!(s.days(1, 4..7), &[ShiftState::Rest, ShiftState::Night, ShiftState::Night]);
        assert_eq!(s.work_total(1), 3);
    }

    #[test]
    fn test_from_rows() {
        use ShiftState::*;
        let s = Schedule::from_rows(vec![vec![Day, Rest], vec![Night, Night]]).unwrap();
        assert_eq!(s.employee_count(), 2);
        assert_eq!(s.get(1, 1), Night);
        assert!(Schedule::from_rows(vec![vec![Day], vec![]]).is_none());
    }
}
