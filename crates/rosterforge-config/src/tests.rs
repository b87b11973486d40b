//! Tests for roster configuration.

use super::*;

#[test]
fn test_defaults() {
    let config = RosterConfig::default();
    assert_eq!((config.year, config.month), (2026, 3));
    assert_eq!(config.hours_per_shift, 9);
    assert_eq!(config.replacement_top_n, 5);
    assert_eq!(config.rest.weekly_rest_days, 2);
    assert_eq!(config.rest.partial_week, PartialWeekPolicy::AtMostQuota);
    assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
    assert!(config.solver.phases.is_empty());
    assert_eq!(config.solver.effective_phases().len(), 2);
    assert!(config.validate().is_ok());
}

#[test]
fn test_toml_parsing() {
    let toml = r#"
        year = 2026
        month = 2
        replacement_top_n = 3

        [rest]
        weekly_rest_days = 1
        partial_week = "unconstrained"

        [solver]
        random_seed = 42

        [solver.termination]
        seconds_spent_limit = 5
        best_score_limit = "0hard/0medium/0soft"

        [[solver.phases]]
        type = "construction_heuristic"
        construction_heuristic_type = "first_fit"

        [[solver.phases]]
        type = "exhaustive_search"
        node_limit = 10000

        [[solver.phases]]
        type = "local_search"
        move_limit = 64
        [solver.phases.acceptor]
        type = "tabu_search"
        entity_tabu_size = 3
    "#;

    let config = RosterConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.month, 2);
    assert_eq!(config.hours_per_shift, 9);
    assert_eq!(config.replacement_top_n, 3);
    assert_eq!(config.rest.weekly_rest_days, 1);
    assert_eq!(config.rest.partial_week, PartialWeekPolicy::Unconstrained);
    assert_eq!(config.solver.random_seed, Some(42));
    assert_eq!(
        config.solver.termination.best_score().unwrap(),
        Some(RosterScore::ZERO)
    );
    assert_eq!(config.solver.phases.len(), 3);
    assert_eq!(
        config.solver.phases[0],
        PhaseConfig::ConstructionHeuristic(ConstructionHeuristicConfig {
            construction_heuristic_type: ConstructionHeuristicType::FirstFit,
        })
    );
    match &config.solver.phases[2] {
        PhaseConfig::LocalSearch(ls) => {
            assert_eq!(ls.move_limit, Some(64));
            assert_eq!(
                ls.acceptor,
                Some(AcceptorConfig::TabuSearch(TabuSearchConfig {
                    entity_tabu_size: Some(3)
                }))
            );
        }
        other => panic!("expected local search, got {:?}", other),
    }
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        year: 2026
        month: 6
        hours_per_shift: 8
        rest:
          partial_week: pro_rated
        solver:
          random_seed: 7
          termination:
            step_count_limit: 500
          phases:
            - type: construction_heuristic
            - type: local_search
              acceptor:
                type: late_acceptance
                late_acceptance_size: 50
    "#;

    let config = RosterConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.month, 6);
    assert_eq!(config.hours_per_shift, 8);
    assert_eq!(config.rest.partial_week, PartialWeekPolicy::ProRated);
    assert_eq!(config.solver.termination.step_count_limit, Some(500));
    // An explicit termination section replaces the default budget.
    assert_eq!(config.time_limit(), None);
    assert!(!config.solver.termination.is_unbounded());
    assert_eq!(
        config.solver.phases[0],
        PhaseConfig::ConstructionHeuristic(ConstructionHeuristicConfig::default())
    );
}

#[test]
fn test_builder() {
    let config = RosterConfig::new()
        .with_month(2026, 2)
        .with_hours_per_shift(12)
        .with_replacement_top_n(2)
        .with_partial_week_policy(PartialWeekPolicy::ProRated)
        .with_random_seed(123)
        .with_termination_seconds(60)
        .with_phase(PhaseConfig::ConstructionHeuristic(
            ConstructionHeuristicConfig::default(),
        ))
        .with_phase(PhaseConfig::LocalSearch(LocalSearchConfig::default()));

    assert_eq!(config.roster_month().unwrap().to_string(), "2026-02");
    assert_eq!(config.hours_per_shift, 12);
    assert_eq!(config.solver.random_seed, Some(123));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
    assert_eq!(config.solver.phases.len(), 2);
}

#[test]
fn test_validate_rejects_unusable_values() {
    assert!(RosterConfig::new().with_month(2026, 13).validate().is_err());
    assert!(RosterConfig::new().with_hours_per_shift(0).validate().is_err());
    assert!(RosterConfig::new().with_replacement_top_n(0).validate().is_err());

    let mut bad_score = RosterConfig::new();
    bad_score.solver.termination.best_score_limit = Some("zero".to_string());
    assert!(matches!(bad_score.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_accepts_unsatisfiable_quota() {
    let mut config = RosterConfig::new();
    config.rest.weekly_rest_days = 9;
    assert!(config.validate().is_ok());
}

#[test]
fn test_rest_bounds() {
    let at_most = RestPolicyConfig::default();
    assert_eq!(at_most.rest_bounds(7), (2, 2));
    assert_eq!(at_most.rest_bounds(3), (0, 2));
    assert_eq!(at_most.rest_bounds(1), (0, 1));

    let pro_rated = RestPolicyConfig {
        partial_week: PartialWeekPolicy::ProRated,
        ..RestPolicyConfig::default()
    };
    assert_eq!(pro_rated.rest_bounds(7), (2, 2));
    assert_eq!(pro_rated.rest_bounds(6), (2, 2));
    assert_eq!(pro_rated.rest_bounds(3), (1, 1));
    assert_eq!(pro_rated.rest_bounds(1), (0, 0));

    let free = RestPolicyConfig {
        partial_week: PartialWeekPolicy::Unconstrained,
        ..RestPolicyConfig::default()
    };
    assert_eq!(free.rest_bounds(7), (2, 2));
    assert_eq!(free.rest_bounds(4), (0, 4));
}

#[test]
fn test_time_limit_combines_units() {
    let termination = TerminationConfig {
        seconds_spent_limit: Some(1),
        millis_spent_limit: Some(250),
        ..TerminationConfig::default()
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_millis(1250)));
    assert!(TerminationConfig::default().is_unbounded());
}

#[test]
fn test_time_limit_saturates_on_huge_values() {
    let termination = TerminationConfig {
        seconds_spent_limit: Some(u64::MAX / 10),
        millis_spent_limit: Some(u64::MAX),
        ..TerminationConfig::default()
    };
    let limit = termination.time_limit().unwrap();
    assert!(limit >= Duration::from_secs(u64::MAX / 10));

    let millis_only = TerminationConfig {
        millis_spent_limit: Some(u64::MAX),
        ..TerminationConfig::default()
    };
    assert_eq!(millis_only.time_limit(), Some(Duration::from_millis(u64::MAX)));
}

#[test]
fn test_validate_bounds_hours_per_shift() {
    assert!(RosterConfig::new().with_hours_per_shift(1).validate().is_ok());
    assert!(RosterConfig::new()
        .with_hours_per_shift(MAX_HOURS_PER_SHIFT)
        .validate()
        .is_ok());
    assert!(matches!(
        RosterConfig::new().with_hours_per_shift(25).validate(),
        Err(ConfigError::Invalid(_))
    ));
    assert!(RosterConfig::new()
        .with_hours_per_shift(200_000_000)
        .validate()
        .is_err());
}

#[test]
fn test_missing_file_falls_back_to_default() {
    let config = RosterConfig::load("does/not/exist.toml").unwrap_or_default();
    assert_eq!(config.month, 3);
}
