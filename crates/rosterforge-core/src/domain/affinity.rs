//! Shift affinity classification.

use std::fmt;

use super::ShiftState;

/// An employee's historical shift-pattern category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Affinity {
    /// Only ever worked day shifts.
    FixedDay,
    /// Only ever worked night shifts.
    FixedNight,
    /// Worked both, or has no working history.
    Rotating,
}

impl Affinity {
    /// Returns true if an employee of this affinity may hold `state`.
    ///
    /// Rest is always permitted.
    #[inline]
    pub fn permits(self, state: ShiftState) -> bool {
        !matches!(
            (self, state),
            (Affinity::FixedDay, ShiftState::Night) | (Affinity::FixedNight, ShiftState::Day)
        )
    }

    /// Working states this affinity may be assigned.
    pub fn working_states(self) -> &'static [ShiftState] {
        match self {
            Affinity::FixedDay => &[ShiftState::Day],
            Affinity::FixedNight => &[ShiftState::Night],
            Affinity::Rotating => &ShiftState::WORKING,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Affinity::FixedDay => "FixedDay",
            Affinity::FixedNight => "FixedNight",
            Affinity::Rotating => "Rotating",
        }
    }
}

impl fmt::Display for Affinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies an employee from historical day/night shift counts.
///
/// Total over all count pairs: only-day history is `FixedDay`, only-night
/// history is `FixedNight`, and everything else (mixed or empty) is
/// `Rotating`.
///
/// # Example
///
/// ```
/// use rosterforge_core::{classify_affinity, Affinity};
///
/// assert_eq!(classify_affinity(12, 0), Affinity::FixedDay);
/// assert_eq!(classify_affinity(0, 4), Affinity::FixedNight);
/// assert_eq!(classify_affinity(3, 9), Affinity::Rotating);
/// assert_eq!(classify_affinity(0, 0), Affinity::Rotating);
/// ```
pub fn classify_affinity(day_count: u32, night_count: u32) -> Affinity {
    match (day_count, night_count) {
        (d, 0) if d > 0 => Affinity::FixedDay,
        (0, n) if n > 0 => Affinity::FixedNight,
        _ => Affinity::Rotating,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_grid() {
        for day in 0..6 {
            for night in 0..6 {
                let expected = match (day > 0, night > 0) {
                    (true, false) => Affinity::FixedDay,
                    (false, true) => Affinity::FixedNight,
                    _ => Affinity::Rotating,
                };
                assert_eq!(classify_affinity(day, night), expected, "{day}/{night}");
            }
        }
    }

    #[test]
    fn test_permits() {
        assert!(Affinity::FixedDay.permits(ShiftState::Day));
        assert!(!Affinity::FixedDay.permits(ShiftState::Night));
        assert!(!Affinity::FixedNight.permits(ShiftState::Day));
        assert!(Affinity::FixedNight.permits(ShiftState::Night));
        for state in ShiftState::ALL {
            assert!(Affinity::Rotating.permits(state));
        }
        for affinity in [Affinity::FixedDay, Affinity::FixedNight, Affinity::Rotating] {
            assert!(affinity.permits(ShiftState::Rest));
            assert!(affinity
                .working_states()
                .iter()
                .all(|s| affinity.permits(*s)));
        }
    }
}
