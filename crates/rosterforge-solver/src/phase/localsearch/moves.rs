//! Moves over week patterns.
//!
//! A move replaces whole (employee, week) blocks with catalog patterns, so
//! every move keeps a feasible roster feasible. Undo restores the recorded
//! previous states through the same director call.

use std::fmt::Debug;

use smallvec::{smallvec, SmallVec};

use rosterforge_scoring::{ScoreDirector, WeekStates};

use crate::pattern::WeekPattern;

/// Previous states of the blocks a move changed, in application order.
pub type MoveUndo = SmallVec<[(usize, usize, WeekStates); 2]>;

/// Replaces one employee's week with a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangePatternMove {
    pub employee: usize,
    pub week: usize,
    pub pattern: WeekPattern,
}

impl ChangePatternMove {
    pub fn new(employee: usize, week: usize, pattern: WeekPattern) -> Self {
        Self {
            employee,
            week,
            pattern,
        }
    }

    pub fn is_doable(&self, director: &ScoreDirector) -> bool {
        !self
            .pattern
            .matches(director.week_states(self.employee, self.week))
    }
}

/// Moves working days between two employees inside one week.
///
/// Both sides are applied together: `left.0` takes pattern `left.1` and
/// `right.0` takes pattern `right.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapPatternMove {
    pub week: usize,
    pub left: (usize, WeekPattern),
    pub right: (usize, WeekPattern),
}

impl SwapPatternMove {
    pub fn new(week: usize, left: (usize, WeekPattern), right: (usize, WeekPattern)) -> Self {
        Self { week, left, right }
    }

    pub fn is_doable(&self, director: &ScoreDirector) -> bool {
        self.left.0 != self.right.0
            && (!self.left.1.matches(director.week_states(self.left.0, self.week))
                || !self.right.1.matches(director.week_states(self.right.0, self.week)))
    }
}

/// A local search move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterMove {
    Change(ChangePatternMove),
    Swap(SwapPatternMove),
}

impl RosterMove {
    /// Returns false if the move would leave the schedule unchanged.
    pub fn is_doable(&self, director: &ScoreDirector) -> bool {
        match self {
            RosterMove::Change(m) => m.is_doable(director),
            RosterMove::Swap(m) => m.is_doable(director),
        }
    }

    /// Applies the move and returns what [`undo`](Self::undo) needs.
    pub fn do_move(&self, director: &mut ScoreDirector) -> MoveUndo {
        match self {
            RosterMove::Change(m) => {
                let previous = director.set_week(m.employee, m.week, &m.pattern.states());
                smallvec![(m.employee, m.week, previous)]
            }
            RosterMove::Swap(m) => {
                let left = director.set_week(m.left.0, m.week, &m.left.1.states());
                let right = director.set_week(m.right.0, m.week, &m.right.1.states());
                smallvec![(m.left.0, m.week, left), (m.right.0, m.week, right)]
            }
        }
    }

    /// Restores the states recorded by [`do_move`](Self::do_move).
    pub fn undo(director: &mut ScoreDirector, undo: MoveUndo) {
        for (employee, week, states) in undo.into_iter().rev() {
            director.set_week(employee, week, &states);
        }
    }

    /// Employees whose schedule this move changes.
    pub fn employees(&self) -> SmallVec<[usize; 2]> {
        match self {
            RosterMove::Change(m) => smallvec![m.employee],
            RosterMove::Swap(m) => smallvec![m.left.0, m.right.0],
        }
    }
}

impl From<ChangePatternMove> for RosterMove {
    fn from(m: ChangePatternMove) -> Self {
        RosterMove::Change(m)
    }
}

impl From<SwapPatternMove> for RosterMove {
    fn from(m: SwapPatternMove) -> Self {
        RosterMove::Swap(m)
    }
}
