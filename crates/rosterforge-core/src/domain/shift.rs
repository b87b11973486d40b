//! Daily shift states.

use std::fmt;

/// The state an employee is assigned on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShiftState {
    /// Weekly off.
    #[default]
    Rest,
    /// Day shift.
    Day,
    /// Night shift.
    Night,
}

impl ShiftState {
    /// All states in domain order.
    pub const ALL: [ShiftState; 3] = [ShiftState::Rest, ShiftState::Day, ShiftState::Night];

    /// The two working states.
    pub const WORKING: [ShiftState; 2] = [ShiftState::Day, ShiftState::Night];

    /// Returns true for `Day` and `Night`.
    #[inline]
    pub fn is_working(self) -> bool {
        !matches!(self, ShiftState::Rest)
    }

    /// Bit used by domain bitsets.
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            ShiftState::Rest => 0b001,
            ShiftState::Day => 0b010,
            ShiftState::Night => 0b100,
        }
    }

    /// Normalizes a raw history label. Only `DAY` and `NIGHT` are recognized,
    /// case-insensitively; every other label means "not a working shift".
    pub fn from_history_label(label: &str) -> Option<ShiftState> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("day") {
            Some(ShiftState::Day)
        } else if label.eq_ignore_ascii_case("night") {
            Some(ShiftState::Night)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftState::Rest => "Rest",
            ShiftState::Day => "Day",
            ShiftState::Night => "Night",
        }
    }
}

impl fmt::Display for ShiftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
