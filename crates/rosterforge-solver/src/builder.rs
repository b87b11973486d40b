//! Builder module for constructing solver components from configuration
//!
//! This module provides the wiring between configuration types and
//! the actual solver implementation.

use rosterforge_config::{
    AcceptorConfig, ConstructionHeuristicConfig, ExhaustiveSearchConfig, ForagerConfig,
    LocalSearchConfig, PhaseConfig, SolverConfig,
};

use crate::phase::construction::ConstructionHeuristicPhase;
use crate::phase::exhaustive::BranchAndBoundPhase;
use crate::phase::localsearch::{
    AcceptedCountForager, Acceptor, EntityTabuAcceptor, HillClimbingAcceptor,
    LateAcceptanceAcceptor, LocalSearchPhase, RosterMove, RosterMoveSelector,
    DEFAULT_ACCEPTED_COUNT_LIMIT, DEFAULT_ENTITY_TABU_SIZE, DEFAULT_LATE_ACCEPTANCE_SIZE,
    DEFAULT_MOVE_LIMIT,
};
use crate::phase::Phase;
use crate::termination::phase_termination;

/// Builder for constructing acceptors from configuration.
pub struct AcceptorBuilder;

impl AcceptorBuilder {
    /// Builds an acceptor from configuration.
    pub fn build(config: &AcceptorConfig) -> Box<dyn Acceptor> {
        match config {
            AcceptorConfig::HillClimbing => Box::new(HillClimbingAcceptor::new()),

            AcceptorConfig::TabuSearch(tabu_config) => {
                let tabu_size = tabu_config
                    .entity_tabu_size
                    .unwrap_or(DEFAULT_ENTITY_TABU_SIZE);
                Box::new(EntityTabuAcceptor::new(tabu_size))
            }

            AcceptorConfig::LateAcceptance(la_config) => {
                let size = la_config
                    .late_acceptance_size
                    .unwrap_or(DEFAULT_LATE_ACCEPTANCE_SIZE);
                Box::new(LateAcceptanceAcceptor::new(size))
            }
        }
    }

    /// Builds the configured acceptor, or late acceptance when none is set.
    pub fn build_or_default(config: Option<&AcceptorConfig>) -> Box<dyn Acceptor> {
        match config {
            Some(config) => Self::build(config),
            None => Box::new(LateAcceptanceAcceptor::default()),
        }
    }
}

/// Builder for constructing phases from configuration.
pub struct PhaseBuilder;

impl PhaseBuilder {
    /// Builds one phase.
    pub fn build(config: &PhaseConfig) -> Box<dyn Phase> {
        match config {
            PhaseConfig::ConstructionHeuristic(c) => Box::new(Self::construction(c)),
            PhaseConfig::ExhaustiveSearch(c) => Box::new(Self::exhaustive(c)),
            PhaseConfig::LocalSearch(c) => Box::new(Self::local_search(c)),
        }
    }

    /// Builds the phase list of a solve.
    ///
    /// A construction phase is prepended when the configured list does not
    /// start with one, since later phases need a complete schedule.
    pub fn build_phases(config: &SolverConfig) -> Vec<Box<dyn Phase>> {
        let configs = config.effective_phases();
        let mut phases: Vec<Box<dyn Phase>> = Vec::with_capacity(configs.len() + 1);
        if !matches!(configs.first(), Some(PhaseConfig::ConstructionHeuristic(_))) {
            phases.push(Box::new(ConstructionHeuristicPhase::default()));
        }
        phases.extend(configs.iter().map(Self::build));
        phases
    }

    fn construction(config: &ConstructionHeuristicConfig) -> ConstructionHeuristicPhase {
        ConstructionHeuristicPhase::new(config.construction_heuristic_type)
    }

    fn exhaustive(config: &ExhaustiveSearchConfig) -> BranchAndBoundPhase {
        let mut phase = BranchAndBoundPhase::new();
        if let Some(limit) = config.node_limit {
            phase = phase.with_node_limit(limit);
        }
        if let Some(termination) = &config.termination {
            phase = phase.with_termination(phase_termination(termination));
        }
        phase
    }

    fn local_search(
        config: &LocalSearchConfig,
    ) -> LocalSearchPhase<Box<dyn Acceptor>, AcceptedCountForager<RosterMove>> {
        let move_limit = config.move_limit.unwrap_or(DEFAULT_MOVE_LIMIT);
        let acceptor = AcceptorBuilder::build_or_default(config.acceptor.as_ref());
        let forager = Self::forager(config.forager.as_ref(), config.acceptor.as_ref(), move_limit);

        let phase = LocalSearchPhase::new(RosterMoveSelector::new(move_limit), acceptor, forager);
        match &config.termination {
            Some(termination) => phase.with_termination(phase_termination(termination)),
            None => phase,
        }
    }

    /// Tabu search considers every move of the step by default; the other
    /// acceptors settle for the best of the first few accepted.
    fn forager(
        config: Option<&ForagerConfig>,
        acceptor: Option<&AcceptorConfig>,
        move_limit: usize,
    ) -> AcceptedCountForager<RosterMove> {
        let default_limit = match acceptor {
            Some(AcceptorConfig::TabuSearch(_)) => move_limit,
            _ => DEFAULT_ACCEPTED_COUNT_LIMIT,
        };
        let limit = config
            .and_then(|c| c.accepted_count_limit)
            .unwrap_or(default_limit);
        let forager = AcceptedCountForager::new(limit);
        match config.and_then(|c| c.pick_early_type) {
            Some(pick_early) => forager.with_pick_early(pick_early),
            None => forager,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosterforge_config::{
        ConstructionHeuristicType, LateAcceptanceConfig, PickEarlyType, TabuSearchConfig,
        TerminationConfig,
    };
    use rosterforge_core::RosterScore;

    #[test]
    fn test_acceptor_builder_hill_climbing() {
        let acceptor = AcceptorBuilder::build(&AcceptorConfig::HillClimbing);
        assert!(format!("{:?}", acceptor).contains("HillClimbing"));
    }

    #[test]
    fn test_acceptor_builder_tabu_search() {
        let config = AcceptorConfig::TabuSearch(TabuSearchConfig {
            entity_tabu_size: Some(3),
        });
        let mut acceptor = AcceptorBuilder::build(&config);
        acceptor.record_moved_employee(4);
        acceptor.step_ended(&RosterScore::ZERO);
        assert!(acceptor.is_employee_tabu(4));
        assert!(!acceptor.is_employee_tabu(5));
    }

    #[test]
    fn test_acceptor_builder_late_acceptance() {
        let config = AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
            late_acceptance_size: Some(500),
        });
        let acceptor = AcceptorBuilder::build(&config);
        assert!(format!("{:?}", acceptor).contains("late_acceptance_size: 500"));
    }

    #[test]
    fn test_default_acceptor_is_late_acceptance() {
        let acceptor = AcceptorBuilder::build_or_default(None);
        assert!(format!("{:?}", acceptor).contains("LateAcceptance"));
    }

    #[test]
    fn test_phase_builder_names() {
        let construction = PhaseBuilder::build(&PhaseConfig::ConstructionHeuristic(
            ConstructionHeuristicConfig {
                construction_heuristic_type: ConstructionHeuristicType::FirstFit,
            },
        ));
        let exhaustive = PhaseBuilder::build(&PhaseConfig::ExhaustiveSearch(
            ExhaustiveSearchConfig {
                node_limit: Some(100),
                termination: None,
            },
        ));
        let local = PhaseBuilder::build(&PhaseConfig::LocalSearch(LocalSearchConfig::default()));

        assert_eq!(construction.phase_type_name(), "ConstructionHeuristic");
        assert_eq!(exhaustive.phase_type_name(), "ExhaustiveSearch");
        assert_eq!(local.phase_type_name(), "LocalSearch");
    }

    #[test]
    fn test_default_phase_list() {
        let phases = PhaseBuilder::build_phases(&SolverConfig::default());
        let names: Vec<_> = phases.iter().map(|p| p.phase_type_name()).collect();
        assert_eq!(names, ["ConstructionHeuristic", "LocalSearch"]);
    }

    #[test]
    fn test_construction_is_prepended() {
        let config = SolverConfig::new().with_phase(PhaseConfig::LocalSearch(LocalSearchConfig {
            termination: Some(TerminationConfig {
                step_count_limit: Some(10),
                ..TerminationConfig::default()
            }),
            ..LocalSearchConfig::default()
        }));
        let phases = PhaseBuilder::build_phases(&config);
        let names: Vec<_> = phases.iter().map(|p| p.phase_type_name()).collect();
        assert_eq!(names, ["ConstructionHeuristic", "LocalSearch"]);
    }

    #[test]
    fn test_forager_defaults_follow_acceptor() {
        let tabu = AcceptorConfig::TabuSearch(TabuSearchConfig::default());
        assert_eq!(
            PhaseBuilder::forager(None, Some(&tabu), 64).accepted_count_limit(),
            64
        );
        assert_eq!(
            PhaseBuilder::forager(None, None, 64).accepted_count_limit(),
            DEFAULT_ACCEPTED_COUNT_LIMIT
        );

        let configured = ForagerConfig {
            accepted_count_limit: Some(9),
            pick_early_type: Some(PickEarlyType::FirstBestScoreImproving),
        };
        let forager = PhaseBuilder::forager(Some(&configured), Some(&tabu), 64);
        assert_eq!(forager.accepted_count_limit(), 9);
    }
}
