//! Termination conditions for the solver and its phases.
//!
//! A termination reads a [`TerminationContext`]. The solver scope is the
//! context for solver-level limits; a phase scope is the context for
//! phase-level limits, so the same termination types measure either the
//! whole solve or a single phase.

mod best_score;
mod composite;
mod external;
mod step_count;
mod time;
mod unimproved;

use std::fmt::Debug;
use std::time::Duration;

use rosterforge_config::{TerminationConfig, DEFAULT_SECONDS_SPENT_LIMIT};
use rosterforge_core::RosterScore;

pub use best_score::BestScoreTermination;
pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;
pub use unimproved::{UnimprovedStepCountTermination, UnimprovedTimeTermination};

/// Progress counters a termination decides on.
pub trait TerminationContext {
    /// Time since the measured span started.
    fn elapsed(&self) -> Duration;

    /// Steps taken in the measured span.
    fn step_count(&self) -> u64;

    /// Best score found so far.
    fn best_score(&self) -> Option<RosterScore>;

    /// Steps since the best score last improved.
    fn steps_since_improvement(&self) -> u64;

    /// Time since the best score last improved.
    fn time_since_improvement(&self) -> Duration;

    /// True once an external caller requested termination.
    fn is_terminate_early(&self) -> bool;
}

/// Trait for determining when to stop solving.
pub trait Termination: Send + Debug {
    /// Returns true if solving should terminate.
    fn is_terminated<C: TerminationContext + ?Sized>(&self, ctx: &C) -> bool;
}

impl<T: Termination> Termination for Option<T> {
    fn is_terminated<C: TerminationContext + ?Sized>(&self, ctx: &C) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(ctx))
    }
}

/// Termination assembled from a [`TerminationConfig`].
///
/// Absent limits are `None` and never fire.
pub type ConfiguredTermination = OrTermination<(
    Option<TimeTermination>,
    Option<StepCountTermination>,
    Option<UnimprovedStepCountTermination>,
    Option<UnimprovedTimeTermination>,
    Option<BestScoreTermination>,
    Option<ExternalTermination>,
)>;

/// Builds the solver-level termination.
///
/// Without a configured time limit the default time budget applies, even
/// when step or unimproved limits are set. The best score target defaults
/// to `target`. The external flag is always honored.
pub fn solver_termination(config: &TerminationConfig, target: RosterScore) -> ConfiguredTermination {
    let time_limit = config
        .time_limit()
        .unwrap_or(Duration::from_secs(DEFAULT_SECONDS_SPENT_LIMIT));
    OrTermination::new((
        Some(TimeTermination::new(time_limit)),
        config.step_count_limit.map(StepCountTermination::new),
        config
            .unimproved_step_count_limit
            .map(UnimprovedStepCountTermination::new),
        config.unimproved_time_limit().map(UnimprovedTimeTermination::new),
        Some(BestScoreTermination::new(target)),
        Some(ExternalTermination),
    ))
}

/// Builds a phase-level termination. Only configured limits apply.
pub fn phase_termination(config: &TerminationConfig) -> ConfiguredTermination {
    OrTermination::new((
        config.time_limit().map(TimeTermination::new),
        config.step_count_limit.map(StepCountTermination::new),
        config
            .unimproved_step_count_limit
            .map(UnimprovedStepCountTermination::new),
        config.unimproved_time_limit().map(UnimprovedTimeTermination::new),
        config
            .best_score()
            .ok()
            .flatten()
            .map(BestScoreTermination::new),
        None,
    ))
}
