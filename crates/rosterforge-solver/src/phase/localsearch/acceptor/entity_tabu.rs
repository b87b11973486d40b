//! Entity tabu acceptor.

use std::collections::VecDeque;
use std::fmt::Debug;

use rosterforge_core::RosterScore;

use super::Acceptor;

/// Default number of recently moved employees kept tabu.
pub const DEFAULT_ENTITY_TABU_SIZE: usize = 7;

/// Entity tabu acceptor - employees changed in recent steps are tabu.
///
/// Every score is acceptable; the local search phase filters moves that
/// touch a tabu employee unless they beat the best score.
///
/// # Example
///
/// ```
/// use rosterforge_core::RosterScore;
/// use rosterforge_solver::{Acceptor, EntityTabuAcceptor};
///
/// let mut acceptor = EntityTabuAcceptor::new(2);
/// acceptor.phase_started(&RosterScore::ZERO);
/// acceptor.record_moved_employee(4);
/// acceptor.step_ended(&RosterScore::ZERO);
/// assert!(acceptor.is_employee_tabu(4));
/// ```
#[derive(Clone)]
pub struct EntityTabuAcceptor {
    entity_tabu_size: usize,
    entity_tabu_list: VecDeque<usize>,
    current_step_entities: Vec<usize>,
}

impl Debug for EntityTabuAcceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityTabuAcceptor")
            .field("entity_tabu_size", &self.entity_tabu_size)
            .field("tabu_list_len", &self.entity_tabu_list.len())
            .finish()
    }
}

impl EntityTabuAcceptor {
    /// Creates an entity tabu acceptor; a size of 0 is raised to 1.
    pub fn new(entity_tabu_size: usize) -> Self {
        let entity_tabu_size = entity_tabu_size.max(1);
        Self {
            entity_tabu_size,
            entity_tabu_list: VecDeque::with_capacity(entity_tabu_size),
            current_step_entities: Vec::new(),
        }
    }

    pub fn entity_tabu_size(&self) -> usize {
        self.entity_tabu_size
    }
}

impl Default for EntityTabuAcceptor {
    fn default() -> Self {
        Self::new(DEFAULT_ENTITY_TABU_SIZE)
    }
}

impl Acceptor for EntityTabuAcceptor {
    fn is_accepted(&self, _last_step_score: &RosterScore, _move_score: &RosterScore) -> bool {
        true
    }

    fn is_employee_tabu(&self, employee: usize) -> bool {
        self.entity_tabu_list.contains(&employee)
    }

    fn record_moved_employee(&mut self, employee: usize) {
        self.current_step_entities.push(employee);
    }

    fn phase_started(&mut self, _initial_score: &RosterScore) {
        self.entity_tabu_list.clear();
        self.current_step_entities.clear();
    }

    fn phase_ended(&mut self) {
        self.entity_tabu_list.clear();
    }

    fn step_started(&mut self) {
        self.current_step_entities.clear();
    }

    fn step_ended(&mut self, _step_score: &RosterScore) {
        for employee in self.current_step_entities.drain(..) {
            if self.entity_tabu_list.len() >= self.entity_tabu_size {
                self.entity_tabu_list.pop_front();
            }
            self.entity_tabu_list.push_back(employee);
        }
    }
}
