//! Reduced variable domains.

use std::fmt;

use rosterforge_core::{Affinity, ShiftState};

/// Set of states a decision variable may take, stored as a bitset.
///
/// # Example
///
/// ```
/// use rosterforge_core::{Affinity, ShiftState};
/// use rosterforge_scoring::ShiftDomain;
///
/// let domain = ShiftDomain::for_affinity(Affinity::FixedNight);
/// assert!(domain.contains(ShiftState::Rest));
/// assert!(!domain.contains(ShiftState::Day));
/// assert_eq!(domain.working_states().collect::<Vec<_>>(), vec![ShiftState::Night]);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShiftDomain(u8);

impl ShiftDomain {
    pub const EMPTY: ShiftDomain = ShiftDomain(0);

    /// `{Rest, Day, Night}`.
    pub const FULL: ShiftDomain =
        ShiftDomain(ShiftState::Rest.bit() | ShiftState::Day.bit() | ShiftState::Night.bit());

    /// Applies the affinity constraint to the full domain.
    pub fn for_affinity(affinity: Affinity) -> Self {
        ShiftState::ALL
            .into_iter()
            .filter(|s| affinity.permits(*s))
            .fold(Self::EMPTY, Self::with)
    }

    #[inline]
    pub fn contains(self, state: ShiftState) -> bool {
        self.0 & state.bit() != 0
    }

    #[must_use]
    pub fn with(self, state: ShiftState) -> Self {
        Self(self.0 | state.bit())
    }

    #[must_use]
    pub fn without(self, state: ShiftState) -> Self {
        Self(self.0 & !state.bit())
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// States in domain order.
    pub fn iter(self) -> impl Iterator<Item = ShiftState> {
        ShiftState::ALL.into_iter().filter(move |s| self.contains(*s))
    }

    pub fn working_states(self) -> impl Iterator<Item = ShiftState> {
        self.iter().filter(|s| s.is_working())
    }
}

impl fmt::Debug for ShiftDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affinity_reduction() {
        let day = ShiftDomain::for_affinity(Affinity::FixedDay);
        assert_eq!(day.iter().collect::<Vec<_>>(), vec![ShiftState::Rest, ShiftState::Day]);

        let rotating = ShiftDomain::for_affinity(Affinity::Rotating);
        assert_eq!(rotating, ShiftDomain::FULL);
        assert_eq!(rotating.len(), 3);
        assert_eq!(rotating.working_states().count(), 2);
    }

    #[test]
    fn test_with_without() {
        let d = ShiftDomain::EMPTY.with(ShiftState::Night);
        assert!(d.contains(ShiftState::Night));
        assert!(d.without(ShiftState::Night).is_empty());
        assert_eq!(format!("{:?}", ShiftDomain::FULL), "{Rest, Day, Night}");
    }
}
