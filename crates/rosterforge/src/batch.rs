//! Parallel generation of independent rosters.
//!
//! Each request owns its model and search state, so requests run on the
//! rayon pool without shared mutable state.

use rayon::prelude::*;

use rosterforge_config::RosterConfig;
use rosterforge_core::{EmployeeHistory, Result};

use crate::generate::{generate_roster, GeneratedRoster};

/// One roster generation request.
#[derive(Debug, Clone)]
pub struct RosterRequest {
    pub histories: Vec<EmployeeHistory>,
    pub config: RosterConfig,
}

impl RosterRequest {
    pub fn new(histories: Vec<EmployeeHistory>, config: RosterConfig) -> Self {
        Self { histories, config }
    }
}

/// Generates every request in parallel; results keep the request order.
pub fn generate_batch(requests: &[RosterRequest]) -> Vec<Result<GeneratedRoster>> {
    requests
        .par_iter()
        .map(|request| generate_roster(&request.histories, &request.config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosterforge_core::RosterError;
    use rosterforge_test::{abc_histories, rotating_histories};

    fn config(year: i32, month: u32, seed: u64) -> RosterConfig {
        RosterConfig::new()
            .with_month(year, month)
            .with_random_seed(seed)
            .with_termination_seconds(10)
    }

    #[test]
    fn test_batch_keeps_request_order() {
        let requests = vec![
            RosterRequest::new(abc_histories(), config(2026, 2, 1)),
            RosterRequest::new(rotating_histories(5), config(2026, 3, 2)),
            RosterRequest::new(abc_histories(), config(2026, 13, 3)),
        ];
        let results = generate_batch(&requests);

        assert_eq!(results.len(), 3);
        let february = results[0].as_ref().unwrap();
        assert_eq!(february.roster.month().month(), 2);
        assert_eq!(february.roster.len(), 3);

        let march = results[1].as_ref().unwrap();
        assert_eq!(march.roster.month().month(), 3);
        assert_eq!(march.roster.len(), 5);

        assert!(matches!(
            results[2],
            Err(RosterError::InvalidMonth { year: 2026, month: 13 })
        ));
    }
}
