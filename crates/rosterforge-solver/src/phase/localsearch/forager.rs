//! Foragers for local search move selection.
//!
//! Foragers collect accepted moves during a step and select the
//! best one to apply.

use std::fmt::Debug;

use rosterforge_config::PickEarlyType;
use rosterforge_core::RosterScore;

/// Default number of accepted moves collected per step.
pub const DEFAULT_ACCEPTED_COUNT_LIMIT: usize = 4;

/// Trait for collecting and selecting moves in local search.
pub trait LocalSearchForager<M>: Send + Debug {
    /// Called at the start of each step to reset state.
    fn step_started(&mut self, best_score: Option<RosterScore>, last_step_score: RosterScore);

    /// Adds an accepted move to the forager.
    fn add_move(&mut self, m: M, score: RosterScore);

    /// Returns true once no further moves need evaluating this step.
    fn is_quit_early(&self) -> bool;

    /// Picks the best move from those collected.
    ///
    /// Returns None if no moves were accepted.
    fn pick_move(&mut self) -> Option<(M, RosterScore)>;
}

/// A forager that collects a limited number of accepted moves.
///
/// Once the limit is reached, or a move satisfies the pick-early rule, it
/// quits early. It picks the best move among those collected; ties go to
/// the earliest.
///
/// # Example
///
/// ```
/// use rosterforge_core::RosterScore;
/// use rosterforge_solver::{AcceptedCountForager, LocalSearchForager};
///
/// let mut forager = AcceptedCountForager::new(2);
/// forager.step_started(None, RosterScore::of(0, -3, 0));
/// forager.add_move("a", RosterScore::of(0, -2, -6));
/// forager.add_move("b", RosterScore::of(0, -1, -4));
/// assert!(forager.is_quit_early());
/// assert_eq!(forager.pick_move(), Some(("b", RosterScore::of(0, -1, -4))));
/// ```
pub struct AcceptedCountForager<M> {
    accepted_count_limit: usize,
    pick_early: PickEarlyType,
    accepted_moves: Vec<(M, RosterScore)>,
    best_score: Option<RosterScore>,
    last_step_score: Option<RosterScore>,
    picked_early: bool,
}

impl<M> AcceptedCountForager<M> {
    /// Creates a forager; a limit of 0 is raised to 1.
    pub fn new(accepted_count_limit: usize) -> Self {
        Self {
            accepted_count_limit: accepted_count_limit.max(1),
            pick_early: PickEarlyType::Never,
            accepted_moves: Vec::new(),
            best_score: None,
            last_step_score: None,
            picked_early: false,
        }
    }

    pub fn with_pick_early(mut self, pick_early: PickEarlyType) -> Self {
        self.pick_early = pick_early;
        self
    }

    pub fn accepted_count_limit(&self) -> usize {
        self.accepted_count_limit
    }

    fn is_pick_early(&self, score: &RosterScore) -> bool {
        match self.pick_early {
            PickEarlyType::Never => false,
            PickEarlyType::FirstBestScoreImproving => self.best_score.map_or(true, |best| *score > best),
            PickEarlyType::FirstLastStepScoreImproving => {
                self.last_step_score.map_or(true, |last| *score > last)
            }
        }
    }
}

impl<M> Default for AcceptedCountForager<M> {
    fn default() -> Self {
        Self::new(DEFAULT_ACCEPTED_COUNT_LIMIT)
    }
}

impl<M> Debug for AcceptedCountForager<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcceptedCountForager")
            .field("accepted_count_limit", &self.accepted_count_limit)
            .field("pick_early", &self.pick_early)
            .field("accepted_count", &self.accepted_moves.len())
            .finish()
    }
}

impl<M: Send> LocalSearchForager<M> for AcceptedCountForager<M> {
    fn step_started(&mut self, best_score: Option<RosterScore>, last_step_score: RosterScore) {
        self.accepted_moves.clear();
        self.best_score = best_score;
        self.last_step_score = Some(last_step_score);
        self.picked_early = false;
    }

    fn add_move(&mut self, m: M, score: RosterScore) {
        if self.is_pick_early(&score) {
            self.accepted_moves.clear();
            self.picked_early = true;
        }
        self.accepted_moves.push((m, score));
    }

    fn is_quit_early(&self) -> bool {
        self.picked_early || self.accepted_moves.len() >= self.accepted_count_limit
    }

    fn pick_move(&mut self) -> Option<(M, RosterScore)> {
        let mut best_index = 0;
        let mut best_score = self.accepted_moves.first()?.1;
        for (i, (_, score)) in self.accepted_moves.iter().enumerate().skip(1) {
            if *score > best_score {
                best_index = i;
                best_score = *score;
            }
        }
        Some(self.accepted_moves.swap_remove(best_index))
    }
}
