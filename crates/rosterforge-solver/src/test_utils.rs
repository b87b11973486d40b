//! Test utilities for rosterforge-solver.
//!
//! Re-exports the workforce fixtures from rosterforge-test and adds
//! scope builders over them.

use std::sync::Arc;

use rosterforge_config::RestPolicyConfig;
use rosterforge_core::Workforce;
use rosterforge_scoring::{RosterModel, ScoreDirector};

use crate::pattern::PatternCatalog;
use crate::scope::SolverScope;

pub use rosterforge_test::{abc_workforce, month, profile, workforce};

/// Model for `workforce` over the given month with the default rest policy.
pub fn create_model(workforce: Workforce, year: i32, m: u32) -> Arc<RosterModel> {
    Arc::new(RosterModel::new(
        month(year, m),
        workforce,
        RestPolicyConfig::default(),
    ))
}

/// A/B/C workforce over March 2026 (four full weeks and a 3-day week).
pub fn create_abc_model() -> Arc<RosterModel> {
    create_model(abc_workforce(), 2026, 3)
}

/// Seeded scope over an all-rest schedule of `model`.
pub fn create_scope(model: Arc<RosterModel>, seed: u64) -> SolverScope {
    let catalog = PatternCatalog::build(&model).expect("feasible test model");
    SolverScope::with_seed(ScoreDirector::new(model), Arc::new(catalog), seed)
}

/// `n` rotating employees `R00`, `R01`, ... over the given month.
pub fn create_rotating_model(n: usize, year: i32, m: u32) -> Arc<RosterModel> {
    let ids: Vec<String> = (0..n).map(|i| format!("R{i:02}")).collect();
    let members: Vec<(&str, rosterforge_core::Affinity)> = ids
        .iter()
        .map(|id| (id.as_str(), rosterforge_core::Affinity::Rotating))
        .collect();
    create_model(workforce(&members), year, m)
}
