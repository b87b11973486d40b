//! The roster constraint model for one month.

use rosterforge_config::RestPolicyConfig;
use rosterforge_core::{
    ConstraintKind, ConstraintRef, EmployeeProfile, Roster, RosterMonth, RosterScore, ShiftState, Week,
    Workforce,
};

use crate::analysis::{ConstraintAnalysis, ConstraintMatch, ScoreExplanation};
use crate::constraint::{hard_constraints, WeekConstraint, WeekContext, WorkloadBalance};
use crate::domain::ShiftDomain;
use crate::schedule::Schedule;

/// Variables, domains, hard constraints and objective of one month's
/// rostering problem.
///
/// The model performs no search. It owns the affinity-reduced domain of
/// every employee and evaluates any [`Schedule`] against the constraints.
///
/// # Example
///
/// ```
/// use rosterforge_config::RestPolicyConfig;
/// use rosterforge_core::{Affinity, EmployeeProfile, RosterMonth, Workforce};
/// use rosterforge_scoring::RosterModel;
///
/// let workforce = Workforce::new(vec![
///     EmployeeProfile::new("A", "Asha", Affinity::FixedDay),
/// ]).unwrap();
/// let model = RosterModel::new(
///     RosterMonth::new(2026, 2).unwrap(),
///     workforce,
///     RestPolicyConfig::default(),
/// );
///
/// // An all-rest schedule breaks the weekly quota in each of the 4 weeks.
/// let score = model.evaluate(&model.empty_schedule());
/// assert_eq!(score.hard(), -20);
/// ```
#[derive(Debug)]
pub struct RosterModel {
    month: RosterMonth,
    weeks: Vec<Week>,
    workforce: Workforce,
    rest: RestPolicyConfig,
    domains: Vec<ShiftDomain>,
    constraints: Vec<Box<dyn WeekConstraint>>,
}

impl RosterModel {
    /// Builds the model, reducing every employee's domain by affinity.
    pub fn new(month: RosterMonth, workforce: Workforce, rest: RestPolicyConfig) -> Self {
        let domains = workforce
            .iter()
            .map(|p| ShiftDomain::for_affinity(p.affinity()))
            .collect();
        Self {
            month,
            weeks: month.weeks(),
            workforce,
            rest,
            domains,
            constraints: hard_constraints(),
        }
    }

    pub fn month(&self) -> RosterMonth {
        self.month
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn workforce(&self) -> &Workforce {
        &self.workforce
    }

    pub fn rest_policy(&self) -> &RestPolicyConfig {
        &self.rest
    }

    pub fn employee_count(&self) -> usize {
        self.workforce.len()
    }

    pub fn day_count(&self) -> usize {
        self.month.day_count()
    }

    pub fn profile(&self, employee: usize) -> &EmployeeProfile {
        &self.workforce.profiles()[employee]
    }

    /// Affinity-reduced domain of one employee; identical for every day.
    pub fn domain(&self, employee: usize) -> ShiftDomain {
        self.domains[employee]
    }

    pub fn constraints(&self) -> &[Box<dyn WeekConstraint>] {
        &self.constraints
    }

    /// Inclusive bounds on the rest-day count of a week.
    pub fn rest_bounds(&self, week: &Week) -> (usize, usize) {
        self.rest.rest_bounds(week.len())
    }

    pub fn week_context<'a>(
        &'a self,
        employee: usize,
        week: &'a Week,
        states: &'a [ShiftState],
    ) -> WeekContext<'a> {
        WeekContext {
            profile: self.profile(employee),
            week,
            states,
            rest_bounds: self.rest_bounds(week),
        }
    }

    /// Hard violations of one employee's week.
    pub fn week_violations(&self, employee: usize, week: &Week, states: &[ShiftState]) -> u32 {
        let ctx = self.week_context(employee, week, states);
        self.constraints.iter().map(|c| c.violations(&ctx)).sum()
    }

    /// Total hard violations of a schedule.
    pub fn hard_violations(&self, schedule: &Schedule) -> u64 {
        (0..self.employee_count())
            .flat_map(|e| self.weeks.iter().map(move |w| (e, w)))
            .map(|(e, w)| self.week_violations(e, w, schedule.days(e, w.days())) as u64)
            .sum()
    }

    /// An all-rest schedule shaped for this model.
    pub fn empty_schedule(&self) -> Schedule {
        Schedule::new(self.employee_count(), self.day_count())
    }

    /// Full evaluation of a schedule.
    pub fn evaluate(&self, schedule: &Schedule) -> RosterScore {
        WorkloadBalance::new(schedule.work_totals()).score(self.hard_violations(schedule))
    }

    /// Lists every constraint match of a schedule.
    pub fn explain(&self, schedule: &Schedule) -> ScoreExplanation {
        let mut analyses: Vec<ConstraintAnalysis> = Vec::with_capacity(ConstraintKind::ALL.len());

        for constraint in &self.constraints {
            let mut matches = Vec::new();
            for e in 0..self.employee_count() {
                for week in &self.weeks {
                    let ctx = self.week_context(e, week, schedule.days(e, week.days()));
                    let violations = constraint.violations(&ctx);
                    if violations > 0 {
                        matches.push(ConstraintMatch {
                            constraint_ref: constraint.constraint_ref(),
                            employee: Some(ctx.profile.id.clone()),
                            week: Some(week.index()),
                            score: RosterScore::of_hard(-(violations as i64)),
                            description: constraint.justify(&ctx),
                        });
                    }
                }
            }
            analyses.push(ConstraintAnalysis::new(constraint.kind(), matches));
        }

        analyses.push(ConstraintAnalysis::new(
            ConstraintKind::Fairness,
            self.fairness_matches(schedule),
        ));

        let score = analyses.iter().fold(RosterScore::ZERO, |acc, a| acc + a.score);
        ScoreExplanation {
            score,
            constraint_analyses: analyses,
        }
    }

    fn fairness_matches(&self, schedule: &Schedule) -> Vec<ConstraintMatch> {
        let balance = WorkloadBalance::new(schedule.work_totals());
        let (Some(max), Some(min)) = (balance.max(), balance.min()) else {
            return Vec::new();
        };
        if max == min {
            return Vec::new();
        }

        let ids = |total: u32| {
            balance
                .employees_at(total)
                .map(|e| self.profile(e).id.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        vec![ConstraintMatch {
            constraint_ref: ConstraintRef::of_kind(ConstraintKind::Fairness),
            employee: None,
            week: None,
            score: RosterScore::of(
                0,
                -(balance.spread() as i64),
                -(balance.variance_numerator() as i64),
            ),
            description: format!(
                "workload spread {}: max {} ({}), min {} ({})",
                max - min,
                max,
                ids(max),
                min,
                ids(min)
            ),
        }]
    }

    /// Converts a schedule into the published roster.
    pub fn to_roster(&self, schedule: &Schedule, hours_per_shift: u32) -> Roster {
        Roster::build(self.month, &self.workforce, hours_per_shift, |e, d| {
            schedule.get(e, d)
        })
    }
}
