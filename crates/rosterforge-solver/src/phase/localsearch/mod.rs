//! Local search phase.
//!
//! Improves the constructed roster with pattern moves. Each step
//! evaluates candidate moves, filters them through an [`Acceptor`] and
//! lets a [`LocalSearchForager`] pick the one to apply.

mod acceptor;
mod forager;
mod moves;
mod phase;
mod selector;

pub use acceptor::{
    Acceptor, EntityTabuAcceptor, HillClimbingAcceptor, LateAcceptanceAcceptor,
    DEFAULT_ENTITY_TABU_SIZE, DEFAULT_LATE_ACCEPTANCE_SIZE,
};
pub use forager::{AcceptedCountForager, LocalSearchForager, DEFAULT_ACCEPTED_COUNT_LIMIT};
pub use moves::{ChangePatternMove, MoveUndo, RosterMove, SwapPatternMove};
pub use phase::LocalSearchPhase;
pub use selector::{RosterMoveSelector, DEFAULT_MOVE_LIMIT};
