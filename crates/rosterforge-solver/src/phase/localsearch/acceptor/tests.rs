//! Tests for acceptors.

use super::*;

fn medium(m: i64) -> RosterScore {
    RosterScore::of(0, m, 0)
}

#[test]
fn test_hill_climbing_accepts_improving() {
    let acceptor: Box<dyn Acceptor> = Box::new(HillClimbingAcceptor::new());
    assert!(acceptor.is_accepted(&medium(-3), &medium(-1)));
}

#[test]
fn test_hill_climbing_rejects_equal_and_worsening() {
    let acceptor = HillClimbingAcceptor::new();
    assert!(!acceptor.is_accepted(&medium(-2), &medium(-2)));
    assert!(!acceptor.is_accepted(&medium(-2), &RosterScore::of(-1, 0, 0)));
}

#[test]
fn test_late_acceptance_history() {
    let mut acceptor = LateAcceptanceAcceptor::new(2);
    acceptor.phase_started(&medium(-5));

    assert!(acceptor.is_accepted(&medium(-5), &medium(-4)));
    assert!(acceptor.is_accepted(&medium(-3), &medium(-5)));
    assert!(!acceptor.is_accepted(&medium(-3), &medium(-6)));

    // Two steps later the late score is -3.
    acceptor.step_ended(&medium(-3));
    acceptor.step_ended(&medium(-2));
    assert!(!acceptor.is_accepted(&medium(-2), &medium(-4)));
    assert!(acceptor.is_accepted(&medium(-2), &medium(-3)));
}

#[test]
fn test_late_acceptance_zero_size_is_raised() {
    let acceptor = LateAcceptanceAcceptor::new(0);
    assert_eq!(acceptor.late_acceptance_size(), 1);
}

#[test]
fn test_entity_tabu_expires() {
    let mut acceptor = EntityTabuAcceptor::new(2);
    acceptor.phase_started(&RosterScore::ZERO);

    for employee in [1, 2, 3] {
        acceptor.step_started();
        acceptor.record_moved_employee(employee);
        acceptor.step_ended(&RosterScore::ZERO);
    }

    assert!(!acceptor.is_employee_tabu(1));
    assert!(acceptor.is_employee_tabu(2));
    assert!(acceptor.is_employee_tabu(3));
    assert!(acceptor.is_accepted(&RosterScore::ZERO, &RosterScore::of(-1, 0, 0)));

    acceptor.phase_ended();
    assert!(!acceptor.is_employee_tabu(3));
}

#[test]
fn test_boxed_acceptor_forwards_tabu_hooks() {
    let mut acceptor: Box<dyn Acceptor> = Box::new(EntityTabuAcceptor::default());
    acceptor.phase_started(&RosterScore::ZERO);
    acceptor.record_moved_employee(0);
    acceptor.step_ended(&RosterScore::ZERO);
    assert!(acceptor.is_employee_tabu(0));
}
