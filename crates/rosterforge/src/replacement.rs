//! Substitute selection for an absent employee.
//!
//! A read-only query over a finalized [`Roster`]: candidates are the
//! employees resting on the date whose affinity permits the absent shift,
//! ranked by fewest total worked days and then by identifier.

use chrono::NaiveDate;
use tracing::debug;

use rosterforge_config::DEFAULT_REPLACEMENT_TOP_N;
use rosterforge_core::{Affinity, EmployeeId, Result, Roster, RosterError, RosterRow, ShiftState};

/// One ranked substitute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementCandidate {
    pub employee: EmployeeId,
    pub name: String,
    pub affinity: Affinity,
    pub total_work_units: u32,
}

impl ReplacementCandidate {
    fn from_row(row: &RosterRow) -> Self {
        Self {
            employee: row.employee_id().clone(),
            name: row.profile().name.clone(),
            affinity: row.affinity(),
            total_work_units: row.total_work_units(),
        }
    }
}

/// Result of a replacement query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub absent: EmployeeId,
    pub date: NaiveDate,
    /// The shift left uncovered.
    pub shift: ShiftState,
    pub best: ReplacementCandidate,
    /// The top ranked candidates, `best` first.
    pub alternatives: Vec<ReplacementCandidate>,
}

/// Ranks substitutes for an absent employee.
///
/// # Example
///
/// ```
/// use rosterforge::{generate_roster, EmployeeHistory, ReplacementRecommender, RosterConfig};
///
/// let histories = vec![
///     EmployeeHistory::new("A", "Asha").with_counts(10, 0),
///     EmployeeHistory::new("C", "Cleo").with_counts(4, 4),
/// ];
/// let config = RosterConfig::new().with_month(2026, 2).with_random_seed(1);
/// let roster = generate_roster(&histories, &config).unwrap().roster;
///
/// let recommender = ReplacementRecommender::new(5);
/// for date in roster.dates() {
///     if roster.state_of("A", date).unwrap().is_working() {
///         match recommender.recommend(&roster, "A", date) {
///             Ok(replacement) => assert_eq!(replacement.best.employee.as_str(), "C"),
///             Err(e) => assert!(e.to_string().contains("No replacement")),
///         }
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacementRecommender {
    top_n: usize,
}

impl ReplacementRecommender {
    /// Creates a recommender returning up to `top_n` alternatives (at least one).
    pub fn new(top_n: usize) -> Self {
        Self { top_n: top_n.max(1) }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Recommends substitutes for `employee` on `date`.
    ///
    /// # Errors
    ///
    /// - [`RosterError::UnknownEmployee`] / [`RosterError::DateOutOfRoster`]
    ///   for a query outside the roster
    /// - [`RosterError::InvalidAbsenceState`] if the employee rests that day
    /// - [`RosterError::NoReplacementFound`] if no resting employee may
    ///   work the shift
    pub fn recommend(&self, roster: &Roster, employee: &str, date: NaiveDate) -> Result<Replacement> {
        let absent = roster.row(employee)?.employee_id().clone();
        let shift = roster.state_of(employee, date)?;
        if !shift.is_working() {
            return Err(RosterError::InvalidAbsenceState {
                employee: absent,
                date,
            });
        }

        let mut ranked: Vec<ReplacementCandidate> = roster
            .resting_on(date)?
            .into_iter()
            .filter(|row| row.affinity().permits(shift))
            .map(ReplacementCandidate::from_row)
            .collect();
        ranked.sort_by(|a, b| {
            a.total_work_units
                .cmp(&b.total_work_units)
                .then_with(|| a.employee.cmp(&b.employee))
        });
        ranked.truncate(self.top_n);

        let Some(best) = ranked.first().cloned() else {
            return Err(RosterError::NoReplacementFound {
                employee: absent,
                date,
                shift,
            });
        };
        debug!(
            event = "replacement",
            absent = %absent,
            date = %date,
            shift = %shift,
            best = %best.employee,
            candidates = ranked.len(),
        );

        Ok(Replacement {
            absent,
            date,
            shift,
            best,
            alternatives: ranked,
        })
    }
}

impl Default for ReplacementRecommender {
    fn default() -> Self {
        Self::new(DEFAULT_REPLACEMENT_TOP_N)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosterforge_core::Workforce;
    use rosterforge_test::{month, profile};

    /// February 2026 roster with fixed states on the 2nd and the given totals.
    ///
    /// `members` is `(id, affinity, state on Feb 2, days worked)`; worked days
    /// are placed from the 3rd onwards.
    fn roster_with(members: &[(&str, Affinity, ShiftState, usize)]) -> Roster {
        let workforce =
            Workforce::new(members.iter().map(|(id, a, _, _)| profile(id, *a)).collect()).unwrap();
        Roster::build(month(2026, 2), &workforce, 9, |e, d| {
            let (_, affinity, on_second, worked) = members[e];
            let filler = match affinity {
                Affinity::FixedNight => ShiftState::Night,
                _ => ShiftState::Day,
            };
            match d {
                1 => on_second,
                d if (2..2 + worked).contains(&d) => filler,
                _ => ShiftState::Rest,
            }
        })
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, day).unwrap()
    }

    #[test]
    fn test_incompatible_candidate_is_excluded() {
        let roster = roster_with(&[
            ("A", Affinity::FixedDay, ShiftState::Day, 10),
            ("B", Affinity::FixedNight, ShiftState::Rest, 10),
            ("C", Affinity::Rotating, ShiftState::Rest, 6),
        ]);
        let replacement = ReplacementRecommender::default()
            .recommend(&roster, "A", date(2))
            .unwrap();

        assert_eq!(replacement.shift, ShiftState::Day);
        assert_eq!(replacement.best.employee.as_str(), "C");
        assert_eq!(replacement.best.total_work_units, 6);
        assert_eq!(replacement.alternatives.len(), 1);
    }

    #[test]
    fn test_ranking_by_workload_then_id() {
        let roster = roster_with(&[
            ("N1", Affinity::FixedNight, ShiftState::Night, 4),
            ("R3", Affinity::Rotating, ShiftState::Rest, 5),
            ("R2", Affinity::Rotating, ShiftState::Rest, 3),
            ("N2", Affinity::FixedNight, ShiftState::Rest, 3),
            ("D1", Affinity::FixedDay, ShiftState::Rest, 0),
        ]);
        let replacement = ReplacementRecommender::new(2)
            .recommend(&roster, "N1", date(2))
            .unwrap();

        let ids: Vec<&str> = replacement
            .alternatives
            .iter()
            .map(|c| c.employee.as_str())
            .collect();
        assert_eq!(ids, ["N2", "R2"]);
        assert_eq!(replacement.best.employee.as_str(), "N2");
    }

    #[test]
    fn test_resting_employee_cannot_be_replaced() {
        let roster = roster_with(&[
            ("A", Affinity::FixedDay, ShiftState::Rest, 5),
            ("C", Affinity::Rotating, ShiftState::Rest, 5),
        ]);
        let err = ReplacementRecommender::default()
            .recommend(&roster, "A", date(2))
            .unwrap_err();
        assert!(matches!(err, RosterError::InvalidAbsenceState { .. }));
    }

    #[test]
    fn test_no_compatible_candidate() {
        let roster = roster_with(&[
            ("A", Affinity::FixedDay, ShiftState::Day, 5),
            ("B", Affinity::FixedNight, ShiftState::Rest, 5),
            ("C", Affinity::Rotating, ShiftState::Night, 5),
        ]);
        let err = ReplacementRecommender::default()
            .recommend(&roster, "A", date(2))
            .unwrap_err();
        match err {
            RosterError::NoReplacementFound {
                employee,
                date: d,
                shift,
            } => {
                assert_eq!(employee.as_str(), "A");
                assert_eq!(d, date(2));
                assert_eq!(shift, ShiftState::Day);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_query_outside_roster() {
        let roster = roster_with(&[("A", Affinity::FixedDay, ShiftState::Day, 5)]);
        let recommender = ReplacementRecommender::default();

        assert!(matches!(
            recommender.recommend(&roster, "Z", date(2)),
            Err(RosterError::UnknownEmployee(_))
        ));
        let march = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert!(matches!(
            recommender.recommend(&roster, "A", march),
            Err(RosterError::DateOutOfRoster { .. })
        ));
    }
}
