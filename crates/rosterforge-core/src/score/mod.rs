//! Score type for comparing rosters
//!
//! Rosters are compared lexicographically: hard constraint violations first,
//! then the workload spread, then the workload variance.

mod roster_score;

#[cfg(test)]
mod tests;

pub use roster_score::{RosterScore, ScoreParseError};

/// Score level representing different constraint priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreLevel {
    /// Hard constraints - must be satisfied for feasibility.
    Hard,
    /// Workload spread across employees.
    Medium,
    /// Workload variance, consulted only between equal spreads.
    Soft,
}
