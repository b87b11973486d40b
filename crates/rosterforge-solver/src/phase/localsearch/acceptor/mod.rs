//! Acceptors for local search move acceptance.
//!
//! An acceptor decides whether a move is eligible for the forager by
//! comparing its score with the last step's score.

mod entity_tabu;
mod hill_climbing;
mod late_acceptance;

use std::fmt::Debug;

use rosterforge_core::RosterScore;

pub use entity_tabu::{EntityTabuAcceptor, DEFAULT_ENTITY_TABU_SIZE};
pub use hill_climbing::HillClimbingAcceptor;
pub use late_acceptance::{LateAcceptanceAcceptor, DEFAULT_LATE_ACCEPTANCE_SIZE};

/// Trait for accepting or rejecting moves in local search.
pub trait Acceptor: Send + Debug {
    /// Returns true if a move resulting in `move_score` should be accepted,
    /// given the previous step's score.
    fn is_accepted(&self, last_step_score: &RosterScore, move_score: &RosterScore) -> bool;

    /// Returns true if moves touching `employee` are currently forbidden.
    fn is_employee_tabu(&self, _employee: usize) -> bool {
        false
    }

    /// Records an employee changed by the step's picked move.
    fn record_moved_employee(&mut self, _employee: usize) {}

    /// Called when a phase starts.
    fn phase_started(&mut self, _initial_score: &RosterScore) {}

    /// Called when a phase ends.
    fn phase_ended(&mut self) {}

    /// Called when a step starts.
    fn step_started(&mut self) {}

    /// Called when a step ends with an accepted move.
    fn step_ended(&mut self, _step_score: &RosterScore) {}
}

impl Acceptor for Box<dyn Acceptor> {
    fn is_accepted(&self, last_step_score: &RosterScore, move_score: &RosterScore) -> bool {
        (**self).is_accepted(last_step_score, move_score)
    }

    fn is_employee_tabu(&self, employee: usize) -> bool {
        (**self).is_employee_tabu(employee)
    }

    fn record_moved_employee(&mut self, employee: usize) {
        (**self).record_moved_employee(employee)
    }

    fn phase_started(&mut self, initial_score: &RosterScore) {
        (**self).phase_started(initial_score)
    }

    fn phase_ended(&mut self) {
        (**self).phase_ended()
    }

    fn step_started(&mut self) {
        (**self).step_started()
    }

    fn step_ended(&mut self, step_score: &RosterScore) {
        (**self).step_ended(step_score)
    }
}

#[cfg(test)]
mod tests;
