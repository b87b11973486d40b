//! Core constraint types.
//!
//! This module provides constraint identification and classification types
//! used by the constraint model and by error reporting.

use std::fmt;

/// Package name under which all roster constraints are registered.
pub const ROSTER_PACKAGE: &str = "roster";

/// Reference to a constraint for identification.
///
/// # Example
///
/// ```
/// use rosterforge_core::ConstraintRef;
///
/// let cr = ConstraintRef::new("roster", "Weekly rest quota");
/// assert_eq!(cr.full_name(), "roster/Weekly rest quota");
///
/// let simple = ConstraintRef::new("", "Simple");
/// assert_eq!(simple.full_name(), "Simple");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstraintRef {
    /// Package/module containing the constraint.
    pub package: String,
    /// Name of the constraint.
    pub name: String,
}

impl ConstraintRef {
    /// Creates a new constraint reference.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Creates the reference for one of the built-in roster constraints.
    pub fn of_kind(kind: ConstraintKind) -> Self {
        Self::new(ROSTER_PACKAGE, kind.display_name())
    }

    /// Returns the fully qualified name.
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.package, self.name)
        }
    }
}

/// The constraint classes of the roster model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConstraintKind {
    /// Fixed-day employees never work nights, fixed-night never work days.
    Affinity,
    /// Rest-day quota per Sunday-to-Saturday week.
    WeeklyRest,
    /// No mixing of day and night shifts within one week.
    ShiftLock,
    /// Spread of total worked days across employees.
    Fairness,
}

impl ConstraintKind {
    /// All constraint kinds, hard constraints first.
    pub const ALL: [ConstraintKind; 4] = [
        ConstraintKind::Affinity,
        ConstraintKind::WeeklyRest,
        ConstraintKind::ShiftLock,
        ConstraintKind::Fairness,
    ];

    /// Returns true for constraints that must hold in every roster.
    pub fn is_hard(self) -> bool {
        !matches!(self, ConstraintKind::Fairness)
    }

    /// Short machine-friendly identifier used in error messages.
    pub fn code(self) -> &'static str {
        match self {
            ConstraintKind::Affinity => "affinity",
            ConstraintKind::WeeklyRest => "weekly_rest",
            ConstraintKind::ShiftLock => "shift_lock",
            ConstraintKind::Fairness => "fairness",
        }
    }

    /// Human-readable constraint name.
    pub fn display_name(self) -> &'static str {
        match self {
            ConstraintKind::Affinity => "Shift affinity",
            ConstraintKind::WeeklyRest => "Weekly rest quota",
            ConstraintKind::ShiftLock => "Weekly shift lock",
            ConstraintKind::Fairness => "Balanced workload",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_ref_full_name() {
        let cr = ConstraintRef::new("my.package", "TestConstraint");
        assert_eq!(cr.full_name(), "my.package/TestConstraint");
    }

    #[test]
    fn test_constraint_ref_empty_package() {
        let cr = ConstraintRef::new("", "Simple");
        assert_eq!(cr.full_name(), "Simple");
    }

    #[test]
    fn test_kind_refs() {
        let cr = ConstraintRef::of_kind(ConstraintKind::ShiftLock);
        assert_eq!(cr.full_name(), "roster/Weekly shift lock");
    }

    #[test]
    fn test_only_fairness_is_soft() {
        let soft: Vec<_> = ConstraintKind::ALL
            .iter()
            .filter(|k| !k.is_hard())
            .collect();
        assert_eq!(soft, vec![&ConstraintKind::Fairness]);
    }
}
