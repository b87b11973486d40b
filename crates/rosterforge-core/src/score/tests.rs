//! Tests for the roster score.

use super::*;

#[test]
fn test_creation() {
    let score = RosterScore::of(-1, -2, -30);
    assert_eq!(score.hard(), -1);
    assert_eq!(score.medium(), -2);
    assert_eq!(score.soft(), -30);
    assert_eq!(score.to_level_numbers(), [-1, -2, -30]);
}

#[test]
fn test_feasibility() {
    assert!(RosterScore::ZERO.is_feasible());
    assert!(RosterScore::of(0, -5, -100).is_feasible());
    assert!(!RosterScore::of(-1, 0, 0).is_feasible());
}

#[test]
fn test_comparison_is_lexicographic() {
    // Hard dominates everything.
    assert!(RosterScore::of(0, -10, -1000) > RosterScore::of(-1, 0, 0));
    // Spread dominates variance.
    assert!(RosterScore::of(0, -1, -500) > RosterScore::of(0, -2, -4));
    // Variance breaks spread ties.
    assert!(RosterScore::of(0, -1, -4) > RosterScore::of(0, -1, -8));
    assert_eq!(
        RosterScore::of(0, -1, -4).cmp(&RosterScore::of(0, -1, -4)),
        std::cmp::Ordering::Equal
    );
}

#[test]
fn test_from_workload() {
    let score = RosterScore::from_workload(0, 3, 42);
    assert_eq!(score, RosterScore::of(0, -3, -42));
    assert_eq!(score.spread(), 3);
}

#[test]
fn test_arithmetic() {
    let a = RosterScore::of(-1, -2, -3);
    let b = RosterScore::of(-1, -1, -1);
    assert_eq!(a + b, RosterScore::of(-2, -3, -4));
    assert_eq!(a - b, RosterScore::of(0, -1, -2));
    assert_eq!(-a, RosterScore::of(1, 2, 3));
    assert_eq!(RosterScore::ZERO - RosterScore::ONE_HARD, RosterScore::of_hard(-1));
}

#[test]
fn test_display_and_parse() {
    let score = RosterScore::of(-2, -1, -64);
    assert_eq!(score.to_string(), "-2hard/-1medium/-64soft");
    assert_eq!(RosterScore::parse("-2hard/-1medium/-64soft").unwrap(), score);
    assert_eq!(
        " 0hard / 0medium / 0soft ".parse::<RosterScore>().unwrap(),
        RosterScore::ZERO
    );
}

#[test]
fn test_parse_errors() {
    assert!(RosterScore::parse("0hard/0soft").is_err());
    assert!(RosterScore::parse("0hard/0medium/0").is_err());
    let err = RosterScore::parse("xhard/0medium/0soft").unwrap_err();
    assert!(err.message.contains("hard"));
}

#[test]
fn test_level_labels() {
    assert_eq!(RosterScore::level_label(0), Some(ScoreLevel::Hard));
    assert_eq!(RosterScore::level_label(2), Some(ScoreLevel::Soft));
    assert_eq!(RosterScore::level_label(3), None);
}
