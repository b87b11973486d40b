//! Move generation for local search.
//!
//! Each step starts with moves aimed at the workload extremes: lowering an
//! employee at the maximum total, raising one at the minimum, or moving a
//! working day from the first to the second inside one week. Random
//! pattern changes fill the remaining budget.

use rand::rngs::StdRng;
use rand::Rng;

use rosterforge_core::ShiftState;
use rosterforge_scoring::ScoreDirector;

use super::moves::{ChangePatternMove, RosterMove, SwapPatternMove};
use crate::pattern::{PatternCatalog, WeekPattern};

/// Default number of moves generated per step.
pub const DEFAULT_MOVE_LIMIT: usize = 256;

/// Generates the candidate moves of one step.
///
/// # Example
///
/// ```
/// use rosterforge_solver::RosterMoveSelector;
///
/// let selector = RosterMoveSelector::new(64);
/// assert_eq!(selector.move_limit(), 64);
/// ```
#[derive(Debug, Clone)]
pub struct RosterMoveSelector {
    move_limit: usize,
}

impl RosterMoveSelector {
    pub fn new(move_limit: usize) -> Self {
        Self {
            move_limit: move_limit.max(1),
        }
    }

    pub fn move_limit(&self) -> usize {
        self.move_limit
    }

    /// Moves for the current working schedule, targeted moves first.
    pub fn moves(
        &self,
        director: &ScoreDirector,
        catalog: &PatternCatalog,
        rng: &mut StdRng,
    ) -> Vec<RosterMove> {
        let mut moves = Vec::with_capacity(self.move_limit);
        self.targeted_moves(director, catalog, &mut moves);
        self.random_moves(director, catalog, rng, &mut moves);
        moves
    }

    fn targeted_moves(&self, director: &ScoreDirector, catalog: &PatternCatalog, moves: &mut Vec<RosterMove>) {
        let balance = director.balance();
        let (Some(max), Some(min)) = (balance.max(), balance.min()) else {
            return;
        };
        if max == min {
            return;
        }
        let budget = self.move_limit / 2;
        let high: Vec<usize> = balance.employees_at(max).collect();
        let low: Vec<usize> = balance.employees_at(min).collect();

        // Alternate directions so both appear early in the list.
        for i in 0..high.len().max(low.len()) {
            for week in 0..catalog.week_count() {
                if moves.len() >= budget {
                    return;
                }
                if let Some(&e) = high.get(i) {
                    if let Some(pattern) = shifted_pattern(director, catalog, e, week, -1) {
                        moves.push(ChangePatternMove::new(e, week, pattern).into());
                    }
                }
                if let Some(&e) = low.get(i) {
                    if let Some(pattern) = shifted_pattern(director, catalog, e, week, 1) {
                        moves.push(ChangePatternMove::new(e, week, pattern).into());
                    }
                }
            }
        }

        for &h in &high {
            for &l in &low {
                for week in 0..catalog.week_count() {
                    if moves.len() >= budget {
                        return;
                    }
                    let down = shifted_pattern(director, catalog, h, week, -1);
                    let up = shifted_pattern(director, catalog, l, week, 1);
                    if let (Some(down), Some(up)) = (down, up) {
                        moves.push(SwapPatternMove::new(week, (h, down), (l, up)).into());
                    }
                }
            }
        }
    }

    fn random_moves(
        &self,
        director: &ScoreDirector,
        catalog: &PatternCatalog,
        rng: &mut StdRng,
        moves: &mut Vec<RosterMove>,
    ) {
        let employees = director.employee_count();
        let weeks = catalog.week_count();
        if employees == 0 || weeks == 0 {
            return;
        }
        while moves.len() < self.move_limit {
            let e = rng.random_range(0..employees);
            let w = rng.random_range(0..weeks);
            let patterns = catalog.patterns(e, w);
            let pattern = patterns[rng.random_range(0..patterns.len())];
            moves.push(ChangePatternMove::new(e, w, pattern).into());
        }
    }
}

impl Default for RosterMoveSelector {
    fn default() -> Self {
        Self::new(DEFAULT_MOVE_LIMIT)
    }
}

/// The pattern closest to the current week with `delta` more working days.
///
/// Closest means the same shift where possible, then the fewest changed
/// rest days.
fn shifted_pattern(
    director: &ScoreDirector,
    catalog: &PatternCatalog,
    employee: usize,
    week: usize,
    delta: i32,
) -> Option<WeekPattern> {
    let current = director.week_states(employee, week);
    let worked = current.iter().filter(|s| s.is_working()).count() as i32;
    let level = u32::try_from(worked + delta).ok()?;
    let shift = current.iter().copied().find(|s| s.is_working());
    let mask = rest_mask(current);

    catalog
        .with_work(employee, week, level)
        .map(|(_, p)| *p)
        .min_by_key(|p| {
            let same_shift = shift.is_none() || p.shift().is_none() || p.shift() == shift;
            (!same_shift, (p.rest_mask() ^ mask).count_ones())
        })
}

fn rest_mask(states: &[ShiftState]) -> u8 {
    states
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_working())
        .fold(0, |mask, (d, _)| mask | (1 << d))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::SeedableRng;

    use super::*;
    use crate::test_utils::create_abc_model;

    fn constructed() -> (ScoreDirector, PatternCatalog) {
        let model = create_abc_model();
        let catalog = PatternCatalog::build(&model).unwrap();
        let mut director = ScoreDirector::new(Arc::clone(&model));
        for e in 0..3 {
            for w in 0..4 {
                director.set_week(e, w, &catalog.pattern(e, w, 0).states());
            }
        }
        // Partial week: A works 3, B works 2, C works 1.
        director.set_week(0, 4, &WeekPattern::new(3, 0b000, ShiftState::Day).states());
        director.set_week(1, 4, &WeekPattern::new(3, 0b001, ShiftState::Night).states());
        director.set_week(2, 4, &WeekPattern::new(3, 0b011, ShiftState::Night).states());
        (director, catalog)
    }

    #[test]
    fn test_targeted_moves_come_first() {
        let (director, catalog) = constructed();
        let mut rng = StdRng::seed_from_u64(0);
        let moves = RosterMoveSelector::new(16).moves(&director, &catalog, &mut rng);
        assert_eq!(moves.len(), 16);

        // A (23) down and C (21) up in the partial week, then the swap.
        assert_eq!(
            moves[0],
            RosterMove::Change(ChangePatternMove::new(0, 4, WeekPattern::new(3, 0b001, ShiftState::Day)))
        );
        assert!(matches!(moves[1], RosterMove::Change(m) if m.employee == 2 && m.week == 4));
        assert!(matches!(moves[2], RosterMove::Swap(m) if m.left.0 == 0 && m.right.0 == 2));
    }

    #[test]
    fn test_shifted_pattern_keeps_shift() {
        let (director, catalog) = constructed();
        let up = shifted_pattern(&director, &catalog, 2, 4, 1).unwrap();
        assert_eq!(up.shift(), Some(ShiftState::Night));
        assert_eq!(up.work_days(), 2);
        // Full weeks allow exactly 5 working days.
        assert!(shifted_pattern(&director, &catalog, 2, 0, 1).is_none());
    }

    #[test]
    fn test_balanced_roster_has_only_random_moves() {
        let (mut director, catalog) = constructed();
        director.set_week(0, 4, &WeekPattern::new(3, 0b001, ShiftState::Day).states());
        director.set_week(2, 4, &WeekPattern::new(3, 0b001, ShiftState::Night).states());
        let mut rng = StdRng::seed_from_u64(3);
        let moves = RosterMoveSelector::new(8).moves(&director, &catalog, &mut rng);
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|m| matches!(m, RosterMove::Change(_))));
    }
}
