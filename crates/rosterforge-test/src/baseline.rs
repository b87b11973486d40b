//! Naive round-robin baseline.

use rosterforge_core::{RosterMonth, ShiftState};

/// Assigns a fixed 5-on/2-off cycle, staggered by one day per employee and
/// ignoring week boundaries. Even employees work days, odd ones nights.
///
/// Returns one row per employee.
pub fn round_robin_baseline(month: RosterMonth, employees: usize) -> Vec<Vec<ShiftState>> {
    (0..employees)
        .map(|e| {
            let shift = if e % 2 == 0 {
                ShiftState::Day
            } else {
                ShiftState::Night
            };
            (0..month.day_count())
                .map(|d| if (d + e) % 7 >= 5 { ShiftState::Rest } else { shift })
                .collect()
        })
        .collect()
}

/// `max - min` of the worked-day totals of the given rows.
pub fn spread_of(rows: &[Vec<ShiftState>]) -> u32 {
    let totals: Vec<u32> = rows
        .iter()
        .map(|r| r.iter().filter(|s| s.is_working()).count() as u32)
        .collect();
    match (totals.iter().max(), totals.iter().min()) {
        (Some(max), Some(min)) => max - min,
        _ => 0,
    }
}
