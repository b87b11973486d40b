//! Configuration system for RosterForge.
//!
//! Load roster configuration from TOML or YAML to choose the target month,
//! the hours credited per shift, the rest policy, and the solver's
//! termination and phases without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use rosterforge_config::{PartialWeekPolicy, RosterConfig};
//! use std::time::Duration;
//!
//! let config = RosterConfig::from_toml_str(r#"
//!     year = 2026
//!     month = 6
//!     hours_per_shift = 8
//!
//!     [rest]
//!     partial_week = "pro_rated"
//!
//!     [solver.termination]
//!     seconds_spent_limit = 10
//!
//!     [[solver.phases]]
//!     type = "construction_heuristic"
//!     construction_heuristic_type = "first_fit"
//!
//!     [[solver.phases]]
//!     type = "local_search"
//!     [solver.phases.acceptor]
//!     type = "late_acceptance"
//!     late_acceptance_size = 200
//! "#).unwrap();
//!
//! assert_eq!(config.month, 6);
//! assert_eq!(config.replacement_top_n, 5);
//! assert_eq!(config.rest.partial_week, PartialWeekPolicy::ProRated);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(10)));
//! assert_eq!(config.solver.phases.len(), 2);
//! ```
//!
//! Use default config when the file is missing:
//!
//! ```
//! use rosterforge_config::RosterConfig;
//!
//! let config = RosterConfig::load("roster.toml").unwrap_or_default();
//! assert_eq!(config.hours_per_shift, 9);
//! ```

use std::path::Path;
use std::time::Duration;

use rosterforge_core::{RosterMonth, RosterScore, DEFAULT_HOURS_PER_SHIFT, MAX_HOURS_PER_SHIFT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default wall-clock budget for one solve.
pub const DEFAULT_SECONDS_SPENT_LIMIT: u64 = 30;

/// Default number of ranked replacement candidates.
pub const DEFAULT_REPLACEMENT_TOP_N: usize = 5;

/// Default number of rest days in a full week.
pub const DEFAULT_WEEKLY_REST_DAYS: u32 = 2;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration for one generation run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RosterConfig {
    /// Target year.
    pub year: i32,

    /// Target month, 1 through 12.
    pub month: u32,

    /// Hours credited per worked shift.
    pub hours_per_shift: u32,

    /// Number of ranked alternatives returned by a replacement query.
    pub replacement_top_n: usize,

    /// Weekly rest quota policy.
    pub rest: RestPolicyConfig,

    /// Solver configuration.
    pub solver: SolverConfig,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            year: 2026,
            month: 3,
            hours_per_shift: DEFAULT_HOURS_PER_SHIFT,
            replacement_top_n: DEFAULT_REPLACEMENT_TOP_N,
            rest: RestPolicyConfig::default(),
            solver: SolverConfig::default(),
        }
    }
}

impl RosterConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the target month.
    pub fn with_month(mut self, year: i32, month: u32) -> Self {
        self.year = year;
        self.month = month;
        self
    }

    pub fn with_hours_per_shift(mut self, hours: u32) -> Self {
        self.hours_per_shift = hours;
        self
    }

    pub fn with_replacement_top_n(mut self, top_n: usize) -> Self {
        self.replacement_top_n = top_n;
        self
    }

    pub fn with_partial_week_policy(mut self, policy: PartialWeekPolicy) -> Self {
        self.rest.partial_week = policy;
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.solver = self.solver.with_termination_seconds(seconds);
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.solver = self.solver.with_random_seed(seed);
        self
    }

    /// Adds a phase configuration.
    pub fn with_phase(mut self, phase: PhaseConfig) -> Self {
        self.solver = self.solver.with_phase(phase);
        self
    }

    /// Returns the target month.
    pub fn roster_month(&self) -> Result<RosterMonth, ConfigError> {
        RosterMonth::new(self.year, self.month).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Returns the termination time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.solver.time_limit()
    }

    /// Checks values that no generation run could use.
    ///
    /// An unsatisfiable rest quota is not rejected here: it is reported by
    /// the solver as an infeasible roster, naming the employee and week.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.roster_month()?;
        if self.hours_per_shift == 0 || self.hours_per_shift > MAX_HOURS_PER_SHIFT {
            return Err(ConfigError::Invalid(format!(
                "hours_per_shift must be in 1..={MAX_HOURS_PER_SHIFT}, got {}",
                self.hours_per_shift
            )));
        }
        if self.replacement_top_n == 0 {
            return Err(ConfigError::Invalid(
                "replacement_top_n must be positive".to_string(),
            ));
        }
        self.solver.termination.best_score()?;
        for phase in &self.solver.phases {
            if let Some(termination) = phase.termination() {
                termination.best_score()?;
            }
        }
        Ok(())
    }
}

/// Weekly rest quota configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RestPolicyConfig {
    /// Rest days required in every full week.
    pub weekly_rest_days: u32,

    /// Rule applied to partial first and last weeks.
    pub partial_week: PartialWeekPolicy,
}

impl Default for RestPolicyConfig {
    fn default() -> Self {
        Self {
            weekly_rest_days: DEFAULT_WEEKLY_REST_DAYS,
            partial_week: PartialWeekPolicy::default(),
        }
    }
}

impl RestPolicyConfig {
    /// Inclusive bounds on the rest-day count of a week with `len` days.
    ///
    /// Full weeks always require exactly the quota. The lower bound may
    /// exceed `len` when the quota is larger than a week; no pattern can
    /// satisfy such a week.
    pub fn rest_bounds(&self, len: usize) -> (usize, usize) {
        let quota = self.weekly_rest_days as usize;
        if len >= 7 {
            return (quota, quota);
        }
        match self.partial_week {
            PartialWeekPolicy::AtMostQuota => (0, quota.min(len)),
            PartialWeekPolicy::ProRated => {
                let target = (quota * len + 3) / 7;
                (target, target)
            }
            PartialWeekPolicy::Unconstrained => (0, len),
        }
    }
}

/// Rest rule for weeks shorter than seven days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialWeekPolicy {
    /// At most the weekly quota.
    #[default]
    AtMostQuota,

    /// Exactly the quota scaled by `len / 7`, rounded half up.
    ProRated,

    /// Any number of rest days.
    Unconstrained,
}

/// Solver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Termination configuration.
    #[serde(default = "TerminationConfig::with_default_budget")]
    pub termination: TerminationConfig,

    /// Phase configurations. Empty means the default phase list.
    #[serde(default)]
    pub phases: Vec<PhaseConfig>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            random_seed: None,
            termination: TerminationConfig::with_default_budget(),
            phases: Vec::new(),
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination.seconds_spent_limit = Some(seconds);
        self
    }

    pub fn with_termination(mut self, termination: TerminationConfig) -> Self {
        self.termination = termination;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Adds a phase configuration.
    pub fn with_phase(mut self, phase: PhaseConfig) -> Self {
        self.phases.push(phase);
        self
    }

    /// Returns the termination time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.time_limit()
    }

    /// Configured phases, or construction followed by late-acceptance
    /// local search when none are configured.
    pub fn effective_phases(&self) -> Vec<PhaseConfig> {
        if self.phases.is_empty() {
            vec![
                PhaseConfig::ConstructionHeuristic(ConstructionHeuristicConfig::default()),
                PhaseConfig::LocalSearch(LocalSearchConfig::default()),
            ]
        } else {
            self.phases.clone()
        }
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving, added to the seconds limit.
    pub millis_spent_limit: Option<u64>,

    /// Target best score, e.g. `"0hard/0medium/0soft"`.
    pub best_score_limit: Option<String>,

    /// Maximum number of steps.
    pub step_count_limit: Option<u64>,

    /// Maximum unimproved steps before terminating.
    pub unimproved_step_count_limit: Option<u64>,

    /// Maximum seconds without improvement.
    pub unimproved_seconds_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Termination with only the default time budget.
    pub fn with_default_budget() -> Self {
        Self {
            seconds_spent_limit: Some(DEFAULT_SECONDS_SPENT_LIMIT),
            ..Self::default()
        }
    }

    /// Returns the time limit as a Duration, if any.
    ///
    /// Seconds and milliseconds add up, saturating at `Duration::MAX`.
    pub fn time_limit(&self) -> Option<Duration> {
        let secs = Duration::from_secs(self.seconds_spent_limit.unwrap_or(0));
        let millis = Duration::from_millis(self.millis_spent_limit.unwrap_or(0));
        let limit = secs.saturating_add(millis);
        if limit.is_zero() {
            None
        } else {
            Some(limit)
        }
    }

    /// Returns the unimproved time limit as a Duration, if any.
    pub fn unimproved_time_limit(&self) -> Option<Duration> {
        self.unimproved_seconds_spent_limit.map(Duration::from_secs)
    }

    /// Parses the best score limit, if configured.
    pub fn best_score(&self) -> Result<Option<RosterScore>, ConfigError> {
        self.best_score_limit
            .as_deref()
            .map(RosterScore::parse)
            .transpose()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Returns true if no time, step, or unimproved limit is set.
    pub fn is_unbounded(&self) -> bool {
        self.time_limit().is_none()
            && self.step_count_limit.is_none()
            && self.unimproved_step_count_limit.is_none()
            && self.unimproved_seconds_spent_limit.is_none()
    }
}

/// Phase configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhaseConfig {
    /// Construction heuristic phase.
    ConstructionHeuristic(ConstructionHeuristicConfig),

    /// Branch-and-bound over employee work totals.
    ExhaustiveSearch(ExhaustiveSearchConfig),

    /// Local search phase.
    LocalSearch(LocalSearchConfig),
}

impl PhaseConfig {
    /// Phase-level termination, if any.
    pub fn termination(&self) -> Option<&TerminationConfig> {
        match self {
            PhaseConfig::ConstructionHeuristic(_) => None,
            PhaseConfig::ExhaustiveSearch(c) => c.termination.as_ref(),
            PhaseConfig::LocalSearch(c) => c.termination.as_ref(),
        }
    }
}

/// Construction heuristic configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConstructionHeuristicConfig {
    /// Type of construction heuristic.
    #[serde(default)]
    pub construction_heuristic_type: ConstructionHeuristicType,
}

/// Construction heuristic types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionHeuristicType {
    /// First feasible pattern for every (employee, week).
    FirstFit,

    /// Uniformly random feasible pattern for every (employee, week).
    #[default]
    RandomFit,
}

/// Exhaustive search configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExhaustiveSearchConfig {
    /// Maximum number of search nodes to expand.
    pub node_limit: Option<u64>,

    /// Phase termination configuration.
    pub termination: Option<TerminationConfig>,
}

/// Local search configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    /// Acceptor configuration.
    pub acceptor: Option<AcceptorConfig>,

    /// Forager configuration.
    pub forager: Option<ForagerConfig>,

    /// Maximum moves evaluated per step.
    pub move_limit: Option<usize>,

    /// Phase termination configuration.
    pub termination: Option<TerminationConfig>,
}

/// Acceptor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptorConfig {
    /// Hill climbing (only accept non-worsening moves).
    HillClimbing,

    /// Tabu search acceptor.
    TabuSearch(TabuSearchConfig),

    /// Late acceptance acceptor.
    LateAcceptance(LateAcceptanceConfig),
}

/// Tabu search configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TabuSearchConfig {
    /// Number of recent steps during which a changed employee stays tabu.
    pub entity_tabu_size: Option<usize>,
}

/// Late acceptance configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LateAcceptanceConfig {
    /// Size of late acceptance list.
    pub late_acceptance_size: Option<usize>,
}

/// Forager configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ForagerConfig {
    /// Maximum number of accepted moves to consider.
    pub accepted_count_limit: Option<usize>,

    /// Whether to pick early if an improving move is found.
    pub pick_early_type: Option<PickEarlyType>,
}

/// Pick early type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PickEarlyType {
    /// Never pick early.
    #[default]
    Never,

    /// Pick first move improving the best score.
    FirstBestScoreImproving,

    /// Pick first move improving the last step score.
    FirstLastStepScoreImproving,
}

#[cfg(test)]
mod tests;
