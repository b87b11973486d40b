//! Roster invariant checks.

use rosterforge_core::{Affinity, Roster, ShiftState};

/// Lists every broken roster invariant: totality, affinity, weekly rest
/// quota (exact in full weeks, at most the quota in partial weeks) and the
/// weekly shift lock.
pub fn roster_violations(roster: &Roster, weekly_rest_days: usize) -> Vec<String> {
    let mut violations = Vec::new();
    let month = roster.month();
    let dates = month.dates();
    let weeks = month.weeks();

    for row in roster.rows() {
        let id = row.employee_id();
        if row.assignments().len() != dates.len() {
            violations.push(format!(
                "{id}: {} assignments for {} days",
                row.assignments().len(),
                dates.len()
            ));
            continue;
        }
        for (a, date) in row.assignments().iter().zip(&dates) {
            if a.date != *date {
                violations.push(format!("{id}: assignment dated {} at {}", a.date, date));
            }
        }

        let forbidden = match row.affinity() {
            Affinity::FixedDay => Some(ShiftState::Night),
            Affinity::FixedNight => Some(ShiftState::Day),
            Affinity::Rotating => None,
        };
        if let Some(f) = forbidden {
            if row.states().any(|s| s == f) {
                violations.push(format!("{id}: {} works {f}", row.affinity()));
            }
        }

        for week in &weeks {
            let states: Vec<ShiftState> = week.days().filter_map(|d| row.state_on(d)).collect();
            let rest = states.iter().filter(|s| **s == ShiftState::Rest).count();
            if week.is_full() && rest != weekly_rest_days {
                violations.push(format!(
                    "{id}: {rest} rest days in full week {}",
                    week.index()
                ));
            }
            if !week.is_full() && rest > weekly_rest_days {
                violations.push(format!(
                    "{id}: {rest} rest days in partial week {}",
                    week.index()
                ));
            }
            if states.contains(&ShiftState::Day) && states.contains(&ShiftState::Night) {
                violations.push(format!("{id}: mixed shifts in week {}", week.index()));
            }
        }
    }
    violations
}

/// Panics with every broken invariant.
pub fn assert_roster_invariants(roster: &Roster, weekly_rest_days: usize) {
    let violations = roster_violations(roster, weekly_rest_days);
    assert!(
        violations.is_empty(),
        "roster invariants broken:\n{}",
        violations.join("\n")
    );
}
