//! Incremental score director.
//!
//! The director owns the working schedule for one solve. Search code
//! changes the schedule one (employee, week) block at a time; only that
//! block is rescanned and the workload balance is updated from the
//! employee's new total.

use std::sync::Arc;

use rosterforge_core::{RosterScore, ShiftState};
use smallvec::SmallVec;

use crate::constraint::WorkloadBalance;
use crate::model::RosterModel;
use crate::schedule::Schedule;


/// States of one week, inline up to a full week.
pub type WeekStates = SmallVec<[ShiftState; 7]>;

/// Score director with per-week incremental hard scoring.
#[derive(Debug, Clone)]
pub struct ScoreDirector {
    model: Arc<RosterModel>,
    schedule: Schedule,
    /// Hard violations per (employee, week), row-major by employee.
    week_violations: Vec<u32>,
    hard_violations: u64,
    balance: WorkloadBalance,
    calculation_count: u64,
}

impl ScoreDirector {
    /// Creates a director over an all-rest schedule.
    pub fn new(model: Arc<RosterModel>) -> Self {
        let schedule = model.empty_schedule();
        Self::with_schedule(model, schedule)
    }

    /// Creates a director over an existing schedule.
    pub fn with_schedule(model: Arc<RosterModel>, schedule: Schedule) -> Self {
        let week_count = model.weeks().len();
        let mut week_violations = Vec::with_capacity(model.employee_count() * week_count);
        for e in 0..model.employee_count() {
            for week in model.weeks() {
                week_violations.push(model.week_violations(e, week, schedule.days(e, week.days())));
            }
        }
        let hard_violations = week_violations.iter().map(|v| *v as u64).sum();
        let balance = WorkloadBalance::new(schedule.work_totals());
        Self {
            model,
            schedule,
            week_violations,
            hard_violations,
            balance,
            calculation_count: 0,
        }
    }

    pub fn model(&self) -> &Arc<RosterModel> {
        &self.model
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn into_schedule(self) -> Schedule {
        self.schedule
    }

    pub fn balance(&self) -> &WorkloadBalance {
        &self.balance
    }

    pub fn employee_count(&self) -> usize {
        self.model.employee_count()
    }

    pub fn week_count(&self) -> usize {
        self.model.weeks().len()
    }

    pub fn total_work(&self, employee: usize) -> u32 {
        self.balance.total(employee)
    }

    pub fn week_states(&self, employee: usize, week: usize) -> &[ShiftState] {
        self.schedule
            .days(employee, self.model.weeks()[week].days())
    }

    pub fn week_violations(&self, employee: usize, week: usize) -> u32 {
        self.week_violations[employee * self.week_count() + week]
    }

    pub fn hard_violations(&self) -> u64 {
        self.hard_violations
    }

    /// Replaces one employee's week and returns the previous states.
    ///
    /// `states` must have the week's length.
    pub fn set_week(&mut self, employee: usize, week: usize, states: &[ShiftState]) -> WeekStates {
        let w = self.model.weeks()[week];
        let slot = employee * self.week_count() + week;

        let block = self.schedule.days_mut(employee, w.days());
        let previous: WeekStates = block.iter().copied().collect();
        let old_work = previous.iter().filter(|s| s.is_working()).count() as u32;
        let new_work = states.iter().filter(|s| s.is_working()).count() as u32;
        block.copy_from_slice(states);

        let violations = self.model.week_violations(employee, &w, states);
        self.hard_violations = self.hard_violations - self.week_violations[slot] as u64 + violations as u64;
        self.week_violations[slot] = violations;

        let total = self.balance.total(employee) - old_work + new_work;
        self.balance.update(employee, total);
        previous
    }

    /// Incremental score of the working schedule.
    pub fn score(&mut self) -> RosterScore {
        self.calculation_count += 1;
        self.balance.score(self.hard_violations)
    }

    /// Score computed from scratch, ignoring incremental state.
    pub fn calculate_score(&mut self) -> RosterScore {
        self.calculation_count += 1;
        self.model.evaluate(&self.schedule)
    }

    pub fn calculation_count(&self) -> u64 {
        self.calculation_count
    }
}
