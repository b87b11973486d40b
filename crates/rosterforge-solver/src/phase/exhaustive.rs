//! Branch-and-bound over employee work totals.
//!
//! Every catalog pattern is feasible, so the hard level is settled and the
//! remaining objective only depends on each employee's monthly total. The
//! search assigns one reachable total per employee, depth first, pruning
//! any branch whose spread lower bound already exceeds the best leaf. The
//! chosen totals are then realized week by week from the catalog.

use std::sync::Arc;

use tracing::debug;

use rosterforge_core::{RosterScore, ShiftState};

use crate::pattern::PatternCatalog;
use crate::phase::Phase;
use crate::scope::{PhaseScope, SolverScope};
use crate::termination::{ConfiguredTermination, Termination};

/// Check termination every this many nodes.
const TERMINATION_CHECK_INTERVAL: u64 = 256;

/// Exhaustive search phase minimizing the workload spread.
///
/// # Example
///
/// ```
/// use rosterforge_solver::BranchAndBoundPhase;
///
/// let phase = BranchAndBoundPhase::new().with_node_limit(100_000);
/// assert_eq!(phase.node_limit(), Some(100_000));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BranchAndBoundPhase {
    node_limit: Option<u64>,
    termination: Option<ConfiguredTermination>,
}

impl BranchAndBoundPhase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(node_limit);
        self
    }

    pub fn with_termination(mut self, termination: ConfiguredTermination) -> Self {
        self.termination = Some(termination);
        self
    }

    pub fn node_limit(&self) -> Option<u64> {
        self.node_limit
    }
}

impl Phase for BranchAndBoundPhase {
    fn solve(&mut self, solver_scope: &mut SolverScope, phase_index: usize) {
        let catalog = Arc::clone(solver_scope.catalog());
        let mut phase_scope = PhaseScope::start(solver_scope, phase_index, self.phase_type_name());

        let options = ordered_totals(&catalog);
        let (best, nodes, halted) = {
            let scope = &phase_scope;
            let termination = &self.termination;
            let stop = || termination.is_terminated(scope) || scope.solver_scope().should_terminate();
            let mut search = TotalsSearch::new(&options, self.node_limit, &stop);
            search.run();
            (search.best, search.nodes, search.halted)
        };

        match best {
            Some((balance, totals)) => {
                let candidate = RosterScore::from_workload(0, balance.spread, balance.variance);
                let current = phase_scope.calculate_score();
                debug!(
                    event = "bound_search",
                    nodes,
                    halted,
                    spread = balance.spread,
                    score = %candidate,
                );
                if candidate > current {
                    realize_totals(&mut phase_scope, &catalog, &totals);
                }
            }
            None => debug!(event = "bound_search", nodes, halted, spread = "none"),
        }

        phase_scope.update_best_solution();
        phase_scope.end();
    }

    fn phase_type_name(&self) -> &'static str {
        "ExhaustiveSearch"
    }
}

/// Reachable totals of every employee, closest to a shared target first.
///
/// The target is the middle of the range every employee can reach, when
/// such a range exists.
fn ordered_totals(catalog: &PatternCatalog) -> Vec<Vec<u32>> {
    let mut options: Vec<Vec<u32>> = (0..catalog.employee_count())
        .map(|e| catalog.reachable_totals(e))
        .collect();

    let lows = options.iter().filter_map(|o| o.first().copied());
    let highs = options.iter().filter_map(|o| o.last().copied());
    let lo = lows.clone().max().unwrap_or(0);
    let hi = highs.clone().min().unwrap_or(0);
    let target = if lo <= hi {
        (lo + hi) / 2
    } else {
        (lows.min().unwrap_or(0) + highs.max().unwrap_or(0)) / 2
    };

    for totals in &mut options {
        totals.sort_by_key(|t| (t.abs_diff(target), *t));
    }
    options
}

/// Objective of a complete assignment; smaller is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Balance {
    spread: u32,
    variance: u64,
}

impl Balance {
    const PERFECT: Balance = Balance {
        spread: 0,
        variance: 0,
    };
}

struct TotalsSearch<'a> {
    options: &'a [Vec<u32>],
    path: Vec<u32>,
    best: Option<(Balance, Vec<u32>)>,
    nodes: u64,
    node_limit: Option<u64>,
    stop: &'a dyn Fn() -> bool,
    halted: bool,
}

impl<'a> TotalsSearch<'a> {
    fn new(options: &'a [Vec<u32>], node_limit: Option<u64>, stop: &'a dyn Fn() -> bool) -> Self {
        Self {
            options,
            path: Vec::with_capacity(options.len()),
            best: None,
            nodes: 0,
            node_limit,
            stop,
            halted: false,
        }
    }

    fn run(&mut self) {
        if self.options.is_empty() || self.options.iter().any(Vec::is_empty) {
            return;
        }
        self.descend(0, 0, 0, 0, 0);
    }

    fn is_optimal(&self) -> bool {
        matches!(&self.best, Some((b, _)) if *b == Balance::PERFECT)
    }

    fn descend(&mut self, depth: usize, lo: u32, hi: u32, sum: u64, sum_sq: u64) {
        self.nodes += 1;
        if self.node_limit.is_some_and(|limit| self.nodes > limit)
            || (self.nodes % TERMINATION_CHECK_INTERVAL == 0 && (self.stop)())
        {
            self.halted = true;
            return;
        }

        let n = self.options.len();
        if depth == n {
            let balance = Balance {
                spread: hi - lo,
                variance: (n as u64 * sum_sq).saturating_sub(sum * sum),
            };
            let improves = match &self.best {
                Some((best, _)) => balance < *best,
                None => true,
            };
            if improves {
                self.best = Some((balance, self.path.clone()));
            }
            return;
        }

        let options = self.options;
        for &total in &options[depth] {
            let (lo, hi) = if depth == 0 {
                (total, total)
            } else {
                (lo.min(total), hi.max(total))
            };
            if self.can_prune(depth + 1, lo, hi) {
                continue;
            }

            let t = total as u64;
            self.path.push(total);
            self.descend(depth + 1, lo, hi, sum + t, sum_sq + t * t);
            self.path.pop();
            if self.halted || self.is_optimal() {
                return;
            }
        }
    }

    /// True if no completion of the prefix can beat the best leaf.
    fn can_prune(&self, from: usize, lo: u32, hi: u32) -> bool {
        let Some((best, _)) = &self.best else {
            return false;
        };
        let mut bound = hi - lo;
        for totals in &self.options[from..] {
            let widest = totals
                .iter()
                .map(|&t| hi.max(t) - lo.min(t))
                .min()
                .unwrap_or(0);
            bound = bound.max(widest);
        }
        bound > best.spread || (bound == best.spread && best.variance == 0)
    }
}

/// Rewrites each employee's weeks so the monthly total equals `totals[e]`.
///
/// Weeks already holding a catalog pattern at the required level are kept;
/// otherwise the replacement keeps the week's current shift when possible.
fn realize_totals(phase_scope: &mut PhaseScope<'_>, catalog: &PatternCatalog, totals: &[u32]) {
    for (employee, &total) in totals.iter().enumerate() {
        let director = phase_scope.director();
        let settled = director.total_work(employee) == total
            && (0..catalog.week_count()).all(|w| director.week_violations(employee, w) == 0);
        if settled {
            continue;
        }
        let Some(levels) = catalog.split_total(employee, total) else {
            continue;
        };

        for (week, &level) in levels.iter().enumerate() {
            let current = phase_scope.director().week_states(employee, week);
            let worked = current.iter().filter(|s| s.is_working()).count() as u32;
            if worked == level && catalog.position(employee, week, current).is_some() {
                continue;
            }
            let shift = working_shift(current);
            let pattern = catalog
                .with_work(employee, week, level)
                .map(|(_, p)| *p)
                .find(|p| shift.is_none() || p.shift() == shift)
                .or_else(|| catalog.with_work(employee, week, level).map(|(_, p)| *p).next());
            if let Some(pattern) = pattern {
                phase_scope
                    .director_mut()
                    .set_week(employee, week, &pattern.states());
            }
        }
        phase_scope.increment_step_count();
    }
}

fn working_shift(states: &[ShiftState]) -> Option<ShiftState> {
    states.iter().copied().find(|s| s.is_working())
}
