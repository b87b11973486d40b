//! Tests for the roster constraints.

use rosterforge_config::{PartialWeekPolicy, RestPolicyConfig};
use rosterforge_core::{Affinity, ConstraintKind, ShiftState, Week};
use rosterforge_test::profile;

use super::*;

use ShiftState::{Day, Night, Rest};

fn ctx<'a>(
    profile: &'a rosterforge_core::EmployeeProfile,
    week: &'a Week,
    states: &'a [ShiftState],
) -> WeekContext<'a> {
    WeekContext {
        profile,
        week,
        states,
        rest_bounds: RestPolicyConfig::default().rest_bounds(week.len()),
    }
}

mod affinity {
    use super::*;

    #[test]
    fn test_fixed_day_never_works_nights() {
        let p = profile("A", Affinity::FixedDay);
        let week = Week::new(0, 0, 7);
        let states = [Rest, Day, Day, Night, Day, Night, Rest];
        let c = ctx(&p, &week, &states);
        assert_eq!(AffinityConstraint.violations(&c), 2);
        assert!(AffinityConstraint.justify(&c).contains("FixedDay"));
    }

    #[test]
    fn test_rotating_is_unconstrained() {
        let p = profile("C", Affinity::Rotating);
        let week = Week::new(0, 0, 7);
        let states = [Day, Night, Day, Night, Day, Night, Day];
        assert_eq!(AffinityConstraint.violations(&ctx(&p, &week, &states)), 0);
    }
}

mod weekly_rest {
    use super::*;

    #[test]
    fn test_full_week_requires_exactly_quota() {
        let p = profile("A", Affinity::FixedDay);
        let week = Week::new(1, 7, 7);
        let exact = [Rest, Day, Day, Day, Day, Day, Rest];
        let too_few = [Rest, Day, Day, Day, Day, Day, Day];
        let too_many = [Rest, Rest, Rest, Rest, Day, Day, Day];
        assert_eq!(WeeklyRestConstraint.violations(&ctx(&p, &week, &exact)), 0);
        assert_eq!(WeeklyRestConstraint.violations(&ctx(&p, &week, &too_few)), 1);
        assert_eq!(WeeklyRestConstraint.violations(&ctx(&p, &week, &too_many)), 2);
        assert!(WeeklyRestConstraint
            .justify(&ctx(&p, &week, &too_few))
            .contains("expected exactly 2"));
    }

    #[test]
    fn test_partial_week_is_at_most_quota() {
        let p = profile("A", Affinity::FixedDay);
        let week = Week::new(4, 28, 3);
        for states in [[Day, Day, Day], [Rest, Day, Day], [Rest, Rest, Day]] {
            assert_eq!(WeeklyRestConstraint.violations(&ctx(&p, &week, &states)), 0);
        }
        assert_eq!(
            WeeklyRestConstraint.violations(&ctx(&p, &week, &[Rest, Rest, Rest])),
            1
        );
    }

    #[test]
    fn test_pro_rated_partial_week() {
        let p = profile("A", Affinity::FixedDay);
        let week = Week::new(4, 28, 3);
        let states = [Day, Day, Day];
        let c = WeekContext {
            rest_bounds: RestPolicyConfig {
                partial_week: PartialWeekPolicy::ProRated,
                ..RestPolicyConfig::default()
            }
            .rest_bounds(3),
            ..ctx(&p, &week, &states)
        };
        assert_eq!(WeeklyRestConstraint.violations(&c), 1);
    }
}

mod shift_lock {
    use super::*;

    #[test]
    fn test_single_shift_week_is_fine() {
        let p = profile("C", Affinity::Rotating);
        let week = Week::new(0, 0, 7);
        let states = [Rest, Night, Night, Night, Night, Night, Rest];
        assert_eq!(ShiftLockConstraint.violations(&ctx(&p, &week, &states)), 0);
    }

    #[test]
    fn test_mixed_week_counts_minority_shift() {
        let p = profile("C", Affinity::Rotating);
        let week = Week::new(0, 0, 7);
        let states = [Rest, Day, Day, Day, Night, Night, Rest];
        let c = ctx(&p, &week, &states);
        assert_eq!(ShiftLockConstraint.violations(&c), 2);
        assert!(ShiftLockConstraint.justify(&c).contains("3 day and 2 night"));
    }
}

mod balance {
    use super::*;

    #[test]
    fn test_incremental_matches_rebuild() {
        let mut balance = WorkloadBalance::new(vec![22, 20, 23, 21]);
        assert_eq!(balance.spread(), 3);
        assert_eq!(balance.max(), Some(23));
        assert_eq!(balance.min(), Some(20));

        balance.update(2, 21);
        balance.update(1, 22);
        let rebuilt = WorkloadBalance::new(vec![22, 22, 21, 21]);
        assert_eq!(balance, rebuilt);
        assert_eq!(balance.spread(), 1);
        assert_eq!(balance.employees_at(21).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_equal_totals_score_zero() {
        let balance = WorkloadBalance::new(vec![23; 5]);
        assert_eq!(balance.variance_numerator(), 0);
        assert_eq!(balance.score(0), rosterforge_core::RosterScore::ZERO);
    }

    #[test]
    fn test_empty() {
        let balance = WorkloadBalance::default();
        assert!(balance.is_empty());
        assert_eq!(balance.spread(), 0);
        assert_eq!(balance.variance_numerator(), 0);
    }
}

#[test]
fn test_hard_constraint_set() {
    let kinds: Vec<ConstraintKind> = hard_constraints().iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ConstraintKind::Affinity,
            ConstraintKind::WeeklyRest,
            ConstraintKind::ShiftLock
        ]
    );
    assert!(hard_constraints()
        .iter()
        .all(|c| c.constraint_ref().package == "roster"));
}
