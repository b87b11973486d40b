//! Score analysis types for explaining a schedule's score.

use rosterforge_core::{ConstraintKind, ConstraintRef, EmployeeId, RosterScore};

/// One match of a constraint against the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintMatch {
    pub constraint_ref: ConstraintRef,
    /// Employee involved, if the match is scoped to one.
    pub employee: Option<EmployeeId>,
    /// Week index, if the match is scoped to one.
    pub week: Option<usize>,
    /// Score impact of this match.
    pub score: RosterScore,
    pub description: String,
}

/// Per-constraint breakdown in a score explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintAnalysis {
    pub constraint_ref: ConstraintRef,
    pub kind: ConstraintKind,
    /// Total score from this constraint.
    pub score: RosterScore,
    pub matches: Vec<ConstraintMatch>,
}

impl ConstraintAnalysis {
    pub fn new(kind: ConstraintKind, matches: Vec<ConstraintMatch>) -> Self {
        let score = matches
            .iter()
            .fold(RosterScore::ZERO, |acc, m| acc + m.score);
        Self {
            constraint_ref: ConstraintRef::of_kind(kind),
            kind,
            score,
            matches,
        }
    }

    pub fn is_hard(&self) -> bool {
        self.kind.is_hard()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// Complete score explanation for a schedule.
///
/// The explanation holds one analysis per constraint kind, in
/// [`ConstraintKind::ALL`] order, including kinds without matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreExplanation {
    pub score: RosterScore,
    pub constraint_analyses: Vec<ConstraintAnalysis>,
}

impl ScoreExplanation {
    /// Returns the analysis for one constraint kind.
    pub fn analysis(&self, kind: ConstraintKind) -> Option<&ConstraintAnalysis> {
        self.constraint_analyses.iter().find(|a| a.kind == kind)
    }

    /// All matches of hard constraints.
    pub fn violations(&self) -> impl Iterator<Item = &ConstraintMatch> {
        self.constraint_analyses
            .iter()
            .filter(|a| a.is_hard())
            .flat_map(|a| a.matches.iter())
    }

    pub fn total_match_count(&self) -> usize {
        self.constraint_analyses.iter().map(|a| a.match_count()).sum()
    }
}
