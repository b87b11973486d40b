//! Incremental workload balance across employees.
//!
//! Tracks each employee's total worked days together with running sums so
//! that the spread and the variance numerator are available after every
//! single-employee update without a full rescan.

use std::collections::BTreeMap;

use rosterforge_core::RosterScore;

/// Workload statistics backing the fairness objective.
///
/// - spread: `max totalWork - min totalWork`
/// - variance numerator: `n * sum(w^2) - sum(w)^2`, which is `n^2` times the
///   population variance and zero iff all totals are equal
///
/// # Example
///
/// ```
/// use rosterforge_scoring::WorkloadBalance;
///
/// let mut balance = WorkloadBalance::new(vec![20, 22, 23]);
/// assert_eq!(balance.spread(), 3);
///
/// balance.update(2, 21);
/// assert_eq!(balance.spread(), 2);
/// // n * sum(w^2) - sum(w)^2 = 3 * 1325 - 63^2
/// assert_eq!(balance.variance_numerator(), 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkloadBalance {
    totals: Vec<u32>,
    /// Total -> number of employees at that total.
    histogram: BTreeMap<u32, usize>,
    sum: u64,
    sum_squared: u64,
}

impl WorkloadBalance {
    pub fn new(totals: Vec<u32>) -> Self {
        let mut histogram = BTreeMap::new();
        let mut sum = 0;
        let mut sum_squared = 0;
        for &t in &totals {
            *histogram.entry(t).or_insert(0) += 1;
            sum += t as u64;
            sum_squared += (t as u64) * (t as u64);
        }
        Self {
            totals,
            histogram,
            sum,
            sum_squared,
        }
    }

    /// Replaces one employee's total.
    pub fn update(&mut self, employee: usize, total: u32) {
        let old = self.totals[employee];
        if old == total {
            return;
        }
        if let Some(count) = self.histogram.get_mut(&old) {
            *count -= 1;
            if *count == 0 {
                self.histogram.remove(&old);
            }
        }
        *self.histogram.entry(total).or_insert(0) += 1;
        self.sum = self.sum - old as u64 + total as u64;
        self.sum_squared =
            self.sum_squared - (old as u64) * (old as u64) + (total as u64) * (total as u64);
        self.totals[employee] = total;
    }

    pub fn total(&self, employee: usize) -> u32 {
        self.totals[employee]
    }

    pub fn totals(&self) -> &[u32] {
        &self.totals
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn max(&self) -> Option<u32> {
        self.histogram.keys().next_back().copied()
    }

    pub fn min(&self) -> Option<u32> {
        self.histogram.keys().next().copied()
    }

    pub fn spread(&self) -> u32 {
        match (self.max(), self.min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        }
    }

    pub fn variance_numerator(&self) -> u64 {
        let n = self.totals.len() as u64;
        (n * self.sum_squared).saturating_sub(self.sum * self.sum)
    }

    /// Employees whose total equals `total`, in index order.
    pub fn employees_at(&self, total: u32) -> impl Iterator<Item = usize> + '_ {
        self.totals
            .iter()
            .enumerate()
            .filter(move |(_, t)| **t == total)
            .map(|(e, _)| e)
    }

    /// Score for a roster with `violations` broken hard constraints.
    pub fn score(&self, violations: u64) -> RosterScore {
        RosterScore::from_workload(violations, self.spread(), self.variance_numerator())
    }
}
