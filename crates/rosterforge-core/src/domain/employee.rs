//! Employees, their shift history, and the immutable workforce set.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{classify_affinity, Affinity, ShiftState};
use crate::error::{Result, RosterError};

/// Stable employee identifier supplied by ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EmployeeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for EmployeeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Normalized history for one employee over the observation window.
///
/// Only the day and night counts feed classification; the descriptive
/// fields are carried through to the roster untouched.
///
/// # Example
///
/// ```
/// use rosterforge_core::{Affinity, EmployeeHistory};
///
/// let history = EmployeeHistory::from_labels("E1", "Asha", ["Day", " day ", "WO", "NIGHT"]);
/// assert_eq!(history.day_count, 2);
/// assert_eq!(history.night_count, 1);
/// assert_eq!(history.affinity(), Affinity::Rotating);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmployeeHistory {
    pub id: EmployeeId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub department: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub day_count: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub night_count: u32,
}

impl EmployeeHistory {
    /// Creates a history with no recorded shifts.
    pub fn new(id: impl Into<EmployeeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: String::new(),
            status: String::new(),
            day_count: 0,
            night_count: 0,
        }
    }

    /// Builds a history from raw per-day labels.
    pub fn from_labels<I, L>(id: impl Into<EmployeeId>, name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut history = Self::new(id, name);
        for label in labels {
            history.record_label(label.as_ref());
        }
        history
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_counts(mut self, day_count: u32, night_count: u32) -> Self {
        self.day_count = day_count;
        self.night_count = night_count;
        self
    }

    /// Records one raw history label.
    pub fn record_label(&mut self, label: &str) {
        match ShiftState::from_history_label(label) {
            Some(ShiftState::Day) => self.day_count += 1,
            Some(ShiftState::Night) => self.night_count += 1,
            _ => {}
        }
    }

    /// Classifies this history.
    pub fn affinity(&self) -> Affinity {
        classify_affinity(self.day_count, self.night_count)
    }
}

/// One employee as seen by the roster engine.
///
/// The affinity is computed once per generation run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmployeeProfile {
    pub id: EmployeeId,
    pub name: String,
    pub department: String,
    pub status: String,
    affinity: Affinity,
}

impl EmployeeProfile {
    pub fn new(id: impl Into<EmployeeId>, name: impl Into<String>, affinity: Affinity) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: String::new(),
            status: String::new(),
            affinity,
        }
    }

    /// Classifies a history into a profile.
    pub fn from_history(history: &EmployeeHistory) -> Self {
        Self {
            id: history.id.clone(),
            name: history.name.clone(),
            department: history.department.clone(),
            status: history.status.clone(),
            affinity: history.affinity(),
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn affinity(&self) -> Affinity {
        self.affinity
    }
}

/// Immutable set of employee profiles for one generation run.
///
/// Built once and passed explicitly to the model and the solver. Cloning
/// is cheap and shares the underlying profiles.
#[derive(Debug, Clone)]
pub struct Workforce {
    profiles: Arc<[EmployeeProfile]>,
    index: Arc<HashMap<EmployeeId, usize>>,
}

impl Workforce {
    /// Creates a workforce, rejecting duplicate identifiers.
    pub fn new(profiles: Vec<EmployeeProfile>) -> Result<Self> {
        let mut index = HashMap::with_capacity(profiles.len());
        for (i, profile) in profiles.iter().enumerate() {
            if index.insert(profile.id.clone(), i).is_some() {
                return Err(RosterError::DuplicateEmployee(profile.id.clone()));
            }
        }
        Ok(Self {
            profiles: profiles.into(),
            index: Arc::new(index),
        })
    }

    /// Classifies every history and builds the workforce.
    pub fn classify<'a, I>(histories: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a EmployeeHistory>,
    {
        Self::new(
            histories
                .into_iter()
                .map(EmployeeProfile::from_history)
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn profiles(&self) -> &[EmployeeProfile] {
        &self.profiles
    }

    pub fn get(&self, index: usize) -> Option<&EmployeeProfile> {
        self.profiles.get(index)
    }

    /// Returns the position of an employee in this workforce.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EmployeeProfile> {
        self.profiles.iter()
    }

    /// Number of employees per affinity, in `FixedDay, FixedNight, Rotating` order.
    pub fn affinity_counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for p in self.iter() {
            let slot = match p.affinity() {
                Affinity::FixedDay => 0,
                Affinity::FixedNight => 1,
                Affinity::Rotating => 2,
            };
            counts[slot] += 1;
        }
        counts
    }
}

impl Default for Workforce {
    fn default() -> Self {
        Self {
            profiles: Arc::from(Vec::new()),
            index: Arc::new(HashMap::new()),
        }
    }
}

impl<'a> IntoIterator for &'a Workforce {
    type Item = &'a EmployeeProfile;
    type IntoIter = std::slice::Iter<'a, EmployeeProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
