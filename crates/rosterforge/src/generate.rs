//! Roster generation pipeline: history → profiles → model → solver → roster.

use std::sync::Arc;

use tracing::info;

use rosterforge_config::RosterConfig;
use rosterforge_core::{EmployeeHistory, Result, Roster, RosterMonth, RosterScore, Workforce};
use rosterforge_scoring::RosterModel;
use rosterforge_solver::{RosterSolver, SolverStatistics, SolverWarning, TerminationReason};

/// A generated roster with the solve diagnostics.
#[derive(Debug, Clone)]
pub struct GeneratedRoster {
    pub roster: Roster,
    pub score: RosterScore,
    pub reason: TerminationReason,
    /// Set when the time or step budget ran out before perfect balance.
    pub warning: Option<SolverWarning>,
    pub statistics: SolverStatistics,
}

impl GeneratedRoster {
    /// Spread of total worked days across employees.
    pub fn spread(&self) -> u32 {
        self.roster.spread()
    }
}

/// Classifies `histories` and generates the roster of the configured month.
///
/// # Example
///
/// ```
/// use rosterforge::{generate_roster, EmployeeHistory, RosterConfig};
///
/// let histories = vec![
///     EmployeeHistory::from_labels("A", "Asha", ["Day", "Day", "WO"]),
///     EmployeeHistory::from_labels("B", "Ben", ["Night", "WO", "Night"]),
///     EmployeeHistory::from_labels("C", "Cleo", ["Day", "Night", "WO"]),
/// ];
/// let config = RosterConfig::new()
///     .with_month(2026, 2)
///     .with_random_seed(7)
///     .with_termination_seconds(5);
///
/// let generated = generate_roster(&histories, &config).unwrap();
/// assert_eq!(generated.roster.len(), 3);
/// assert_eq!(generated.spread(), 0);
/// ```
pub fn generate_roster(histories: &[EmployeeHistory], config: &RosterConfig) -> Result<GeneratedRoster> {
    let workforce = Workforce::classify(histories)?;
    let [fixed_day, fixed_night, rotating] = workforce.affinity_counts();
    info!(
        event = "workforce_classified",
        employees = workforce.len(),
        fixed_day,
        fixed_night,
        rotating,
    );
    generate_for_workforce(workforce, config)
}

/// Generates the roster of the configured month for an already classified
/// workforce.
pub fn generate_for_workforce(workforce: Workforce, config: &RosterConfig) -> Result<GeneratedRoster> {
    let month = RosterMonth::new(config.year, config.month)?;
    let model = Arc::new(RosterModel::new(month, workforce, config.rest));

    let outcome = RosterSolver::new(config.solver.clone()).solve(Arc::clone(&model))?;
    let roster = outcome.to_roster(&model, config.hours_per_shift);

    Ok(GeneratedRoster {
        roster,
        score: outcome.score,
        reason: outcome.reason,
        warning: outcome.warning,
        statistics: outcome.statistics,
    })
}
