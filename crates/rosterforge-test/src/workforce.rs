//! Employee and month builders.

use rosterforge_core::{Affinity, EmployeeHistory, EmployeeProfile, RosterMonth, Workforce};

/// Builds a month, panicking on invalid input.
pub fn month(year: i32, month: u32) -> RosterMonth {
    RosterMonth::new(year, month).expect("valid test month")
}

/// History with the given day/night counts.
pub fn history(id: &str, day_count: u32, night_count: u32) -> EmployeeHistory {
    EmployeeHistory::new(id, format!("Employee {id}"))
        .with_department("Ops")
        .with_status("Active")
        .with_counts(day_count, night_count)
}

pub fn profile(id: &str, affinity: Affinity) -> EmployeeProfile {
    EmployeeProfile::new(id, format!("Employee {id}"), affinity)
}

/// Workforce from `(id, affinity)` pairs.
pub fn workforce(members: &[(&str, Affinity)]) -> Workforce {
    Workforce::new(members.iter().map(|(id, a)| profile(id, *a)).collect())
        .expect("unique test ids")
}

/// Histories of A (only days), B (only nights) and C (both).
pub fn abc_histories() -> Vec<EmployeeHistory> {
    vec![history("A", 12, 0), history("B", 0, 12), history("C", 6, 6)]
}

/// A: FixedDay, B: FixedNight, C: Rotating.
pub fn abc_workforce() -> Workforce {
    workforce(&[
        ("A", Affinity::FixedDay),
        ("B", Affinity::FixedNight),
        ("C", Affinity::Rotating),
    ])
}

/// `n` employees with mixed history, ids `R00`, `R01`, ...
pub fn rotating_histories(n: usize) -> Vec<EmployeeHistory> {
    (0..n).map(|i| history(&format!("R{i:02}"), 3, 4)).collect()
}
