//! Week pattern catalog.
//!
//! Shift-lock collapses one employee's week to "all rest", "rest + Day" or
//! "rest + Night", and the rest policy bounds the number of rest days. The
//! valid day patterns of one (employee, week) are therefore few enough to
//! enumerate up front. Every pattern in the catalog satisfies all hard
//! constraints, so any choice of one pattern per (employee, week) is a
//! feasible roster.

use std::collections::{BTreeSet, HashMap};

use rosterforge_core::{ConstraintKind, Result, RosterError, ShiftState};
use rosterforge_scoring::{RosterModel, ShiftDomain, WeekStates};

/// One valid day pattern for a week.
///
/// Bit `i` of the rest mask marks day `i` of the week as a rest day; every
/// other day holds `shift`.
///
/// # Example
///
/// ```
/// use rosterforge_core::ShiftState;
/// use rosterforge_solver::WeekPattern;
///
/// // Rest on Sunday and Saturday, nights in between.
/// let pattern = WeekPattern::new(7, 0b100_0001, ShiftState::Night);
/// assert_eq!(pattern.work_days(), 5);
/// assert_eq!(pattern.state_at(0), ShiftState::Rest);
/// assert_eq!(pattern.state_at(3), ShiftState::Night);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekPattern {
    len: u8,
    rest_mask: u8,
    shift: ShiftState,
}

impl WeekPattern {
    pub fn new(len: usize, rest_mask: u8, shift: ShiftState) -> Self {
        let full = full_mask(len);
        let rest_mask = rest_mask & full;
        // An all-rest week carries no shift.
        let shift = if rest_mask == full {
            ShiftState::Rest
        } else {
            shift
        };
        Self {
            len: len as u8,
            rest_mask,
            shift,
        }
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn rest_mask(&self) -> u8 {
        self.rest_mask
    }

    /// The working shift, or `None` for an all-rest week.
    pub fn shift(&self) -> Option<ShiftState> {
        self.shift.is_working().then_some(self.shift)
    }

    pub fn rest_days(&self) -> u32 {
        self.rest_mask.count_ones()
    }

    pub fn work_days(&self) -> u32 {
        self.len as u32 - self.rest_days()
    }

    #[inline]
    pub fn state_at(&self, day: usize) -> ShiftState {
        if self.rest_mask & (1 << day) != 0 {
            ShiftState::Rest
        } else {
            self.shift
        }
    }

    pub fn states(&self) -> WeekStates {
        (0..self.len()).map(|d| self.state_at(d)).collect()
    }

    /// True if `states` is exactly this pattern.
    pub fn matches(&self, states: &[ShiftState]) -> bool {
        states.len() == self.len() && states.iter().enumerate().all(|(d, s)| *s == self.state_at(d))
    }
}

fn full_mask(len: usize) -> u8 {
    ((1u16 << len) - 1) as u8
}

/// Patterns shared by every (employee, week) with the same domain, week
/// length and rest bounds.
#[derive(Debug, Clone)]
struct PatternGroup {
    patterns: Vec<WeekPattern>,
    /// Distinct work-day counts, ascending.
    work_levels: Vec<u32>,
}

impl PatternGroup {
    fn new(patterns: Vec<WeekPattern>) -> Self {
        let work_levels = patterns
            .iter()
            .map(WeekPattern::work_days)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self {
            patterns,
            work_levels,
        }
    }
}

/// Candidate patterns for every (employee, week) of a model.
///
/// Building the catalog is the infeasibility check: an empty pattern set
/// for any (employee, week) fails with [`RosterError::InfeasibleRoster`].
///
/// # Example
///
/// ```
/// use rosterforge_config::RestPolicyConfig;
/// use rosterforge_core::{Affinity, EmployeeProfile, RosterMonth, Workforce};
/// use rosterforge_scoring::RosterModel;
/// use rosterforge_solver::PatternCatalog;
///
/// let workforce = Workforce::new(vec![
///     EmployeeProfile::new("A", "Asha", Affinity::FixedDay),
///     EmployeeProfile::new("C", "Chen", Affinity::Rotating),
/// ]).unwrap();
/// let model = RosterModel::new(RosterMonth::new(2026, 2).unwrap(), workforce, RestPolicyConfig::default());
/// let catalog = PatternCatalog::build(&model).unwrap();
///
/// // Choose 2 rest days out of 7: 21 placements, doubled for Day/Night.
/// assert_eq!(catalog.patterns(0, 0).len(), 21);
/// assert_eq!(catalog.patterns(1, 0).len(), 42);
/// ```
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    week_count: usize,
    /// Group index per (employee, week), row-major by employee.
    slots: Vec<usize>,
    groups: Vec<PatternGroup>,
}

impl PatternCatalog {
    /// Enumerates the patterns of every (employee, week) of the model.
    pub fn build(model: &RosterModel) -> Result<Self> {
        let week_count = model.weeks().len();
        let mut slots = Vec::with_capacity(model.employee_count() * week_count);
        let mut groups: Vec<PatternGroup> = Vec::new();
        let mut cache: HashMap<(ShiftDomain, usize, (usize, usize)), usize> = HashMap::new();

        for e in 0..model.employee_count() {
            let domain = model.domain(e);
            for week in model.weeks() {
                let bounds = model.rest_bounds(week);
                let key = (domain, week.len(), bounds);
                let group = match cache.get(&key) {
                    Some(&group) => group,
                    None => {
                        let patterns = Self::enumerate(week.len(), domain, bounds);
                        if patterns.is_empty() {
                            let (min, max) = bounds;
                            return Err(RosterError::InfeasibleRoster {
                                employee: model.profile(e).id.clone(),
                                week: week.index(),
                                constraint: ConstraintKind::WeeklyRest,
                                reason: format!(
                                    "{}-day week allows no pattern with {} to {} rest days over {:?}",
                                    week.len(),
                                    min,
                                    max,
                                    domain
                                ),
                            });
                        }
                        groups.push(PatternGroup::new(patterns));
                        cache.insert(key, groups.len() - 1);
                        groups.len() - 1
                    }
                };
                slots.push(group);
            }
        }

        Ok(Self {
            week_count,
            slots,
            groups,
        })
    }

    /// All patterns of a `len`-day week whose rest count lies within
    /// `rest_bounds` and whose working days use one state from `domain`.
    pub fn enumerate(len: usize, domain: ShiftDomain, rest_bounds: (usize, usize)) -> Vec<WeekPattern> {
        let (min, max) = rest_bounds;
        let full = full_mask(len);
        let mut patterns = Vec::new();

        if !domain.contains(ShiftState::Rest) {
            return patterns;
        }
        for shift in domain.working_states() {
            for mask in 0..full {
                let rest = mask.count_ones() as usize;
                if rest >= min && rest <= max {
                    patterns.push(WeekPattern::new(len, mask, shift));
                }
            }
        }
        if len >= min && len <= max {
            patterns.push(WeekPattern::new(len, full, ShiftState::Rest));
        }
        patterns
    }

    #[inline]
    fn group(&self, employee: usize, week: usize) -> &PatternGroup {
        &self.groups[self.slots[employee * self.week_count + week]]
    }

    pub fn week_count(&self) -> usize {
        self.week_count
    }

    pub fn employee_count(&self) -> usize {
        if self.week_count == 0 {
            0
        } else {
            self.slots.len() / self.week_count
        }
    }

    /// Number of distinct pattern sets.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn patterns(&self, employee: usize, week: usize) -> &[WeekPattern] {
        &self.group(employee, week).patterns
    }

    pub fn pattern(&self, employee: usize, week: usize, index: usize) -> WeekPattern {
        self.group(employee, week).patterns[index]
    }

    /// Distinct work-day counts of one (employee, week), ascending.
    pub fn work_levels(&self, employee: usize, week: usize) -> &[u32] {
        &self.group(employee, week).work_levels
    }

    /// Index of the pattern equal to `states`, if any.
    pub fn position(&self, employee: usize, week: usize, states: &[ShiftState]) -> Option<usize> {
        self.patterns(employee, week).iter().position(|p| p.matches(states))
    }

    /// Patterns of one (employee, week) with exactly `work` working days.
    pub fn with_work(
        &self,
        employee: usize,
        week: usize,
        work: u32,
    ) -> impl Iterator<Item = (usize, &WeekPattern)> + '_ {
        self.patterns(employee, week)
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.work_days() == work)
    }

    /// Per-week work levels whose sum reaches `total`, or `None` if the
    /// total is unreachable for this employee.
    pub fn split_total(&self, employee: usize, total: u32) -> Option<Vec<u32>> {
        // reachable[w] holds every sum of the first w weeks.
        let mut reachable: Vec<BTreeSet<u32>> = Vec::with_capacity(self.week_count + 1);
        reachable.push(BTreeSet::from([0]));
        for w in 0..self.week_count {
            let next = reachable[w]
                .iter()
                .flat_map(|sum| self.work_levels(employee, w).iter().map(move |l| sum + l))
                .collect();
            reachable.push(next);
        }
        if !reachable[self.week_count].contains(&total) {
            return None;
        }

        let mut levels = vec![0; self.week_count];
        let mut remaining = total;
        for w in (0..self.week_count).rev() {
            let level = self
                .work_levels(employee, w)
                .iter()
                .copied()
                .find(|l| *l <= remaining && reachable[w].contains(&(remaining - l)))?;
            levels[w] = level;
            remaining -= level;
        }
        Some(levels)
    }

    /// Every monthly total one employee can reach, ascending.
    pub fn reachable_totals(&self, employee: usize) -> Vec<u32> {
        let mut sums = BTreeSet::from([0u32]);
        for w in 0..self.week_count {
            sums = sums
                .iter()
                .flat_map(|sum| self.work_levels(employee, w).iter().map(move |l| sum + l))
                .collect();
        }
        sums.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosterforge_config::{PartialWeekPolicy, RestPolicyConfig};
    use rosterforge_core::{Affinity, Workforce};
    use rosterforge_test::{month, profile};

    fn model(year: i32, m: u32, rest: RestPolicyConfig) -> RosterModel {
        let workforce = Workforce::new(vec![
            profile("A", Affinity::FixedDay),
            profile("B", Affinity::FixedNight),
            profile("C", Affinity::Rotating),
        ])
        .unwrap();
        RosterModel::new(month(year, m), workforce, rest)
    }

    #[test]
    fn test_every_pattern_is_feasible() {
        // March 2026 ends with a 3-day partial week.
        let model = model(2026, 3, RestPolicyConfig::default());
        let catalog = PatternCatalog::build(&model).unwrap();
        for e in 0..model.employee_count() {
            for (w, week) in model.weeks().iter().enumerate() {
                for pattern in catalog.patterns(e, w) {
                    let states = pattern.states();
                    assert_eq!(model.week_violations(e, week, &states), 0, "{pattern:?}");
                }
            }
        }
    }

    #[test]
    fn test_domain_reduction_applies_affinity() {
        let model = model(2026, 2, RestPolicyConfig::default());
        let catalog = PatternCatalog::build(&model).unwrap();
        assert!(catalog
            .patterns(0, 1)
            .iter()
            .all(|p| p.shift() == Some(ShiftState::Day)));
        assert!(catalog
            .patterns(1, 1)
            .iter()
            .all(|p| p.shift() == Some(ShiftState::Night)));
        // Full weeks share a group per affinity.
        assert_eq!(catalog.group_count(), 3);
    }

    #[test]
    fn test_partial_week_is_not_forced() {
        let model = model(2026, 3, RestPolicyConfig::default());
        let catalog = PatternCatalog::build(&model).unwrap();
        // 3-day week with at most 2 rest days: 1, 2 or 3 work days.
        assert_eq!(catalog.work_levels(0, 4), &[1, 2, 3]);
        assert_eq!(catalog.work_levels(0, 0), &[5]);
        assert_eq!(catalog.reachable_totals(0), vec![21, 22, 23]);
    }

    #[test]
    fn test_unconstrained_partial_week_allows_all_rest() {
        let rest = RestPolicyConfig {
            partial_week: PartialWeekPolicy::Unconstrained,
            ..RestPolicyConfig::default()
        };
        let model = model(2026, 3, rest);
        let catalog = PatternCatalog::build(&model).unwrap();
        assert_eq!(catalog.work_levels(2, 4), &[0, 1, 2, 3]);
        assert!(catalog.patterns(2, 4).iter().any(|p| p.shift().is_none()));
    }

    #[test]
    fn test_split_total() {
        let model = model(2026, 3, RestPolicyConfig::default());
        let catalog = PatternCatalog::build(&model).unwrap();
        let levels = catalog.split_total(2, 22).unwrap();
        assert_eq!(levels, vec![5, 5, 5, 5, 2]);
        assert!(catalog.split_total(2, 24).is_none());
    }

    #[test]
    fn test_unsatisfiable_quota_is_infeasible() {
        let rest = RestPolicyConfig {
            weekly_rest_days: 8,
            ..RestPolicyConfig::default()
        };
        let model = model(2026, 2, rest);
        match PatternCatalog::build(&model) {
            Err(RosterError::InfeasibleRoster {
                employee,
                week,
                constraint,
                ..
            }) => {
                assert_eq!(employee.as_str(), "A");
                assert_eq!(week, 0);
                assert_eq!(constraint, ConstraintKind::WeeklyRest);
            }
            other => panic!("expected infeasible roster, got {other:?}"),
        }
    }

    #[test]
    fn test_pattern_matching() {
        let pattern = WeekPattern::new(3, 0b001, ShiftState::Day);
        assert!(pattern.matches(&[ShiftState::Rest, ShiftState::Day, ShiftState::Day]));
        assert!(!pattern.matches(&[ShiftState::Rest, ShiftState::Night, ShiftState::Day]));
        assert_eq!(WeekPattern::new(2, 0b11, ShiftState::Day).shift(), None);
    }
}
