//! RosterScore - Three-level score with hard, medium, and soft levels

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::ScoreLevel;

/// Quality of a roster.
///
/// - `hard`: negated count of hard constraint violations
/// - `medium`: negated spread `max totalWork - min totalWork`
/// - `soft`: negated `n * sum(w^2) - sum(w)^2`, zero iff every employee
///   works the same number of days
///
/// Comparison order: hard > medium > soft. Higher is better.
///
/// # Examples
///
/// ```
/// use rosterforge_core::RosterScore;
///
/// let balanced = RosterScore::of(0, -1, -40);
/// let lopsided = RosterScore::of(0, -3, -12);
///
/// // A smaller spread wins even with a worse variance
/// assert!(balanced > lopsided);
/// assert!(balanced.is_feasible());
/// assert_eq!(balanced.to_string(), "0hard/-1medium/-40soft");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterScore {
    hard: i64,
    medium: i64,
    soft: i64,
}

impl RosterScore {
    /// The zero score: feasible and perfectly balanced.
    pub const ZERO: RosterScore = RosterScore {
        hard: 0,
        medium: 0,
        soft: 0,
    };

    /// One hard constraint penalty.
    pub const ONE_HARD: RosterScore = RosterScore {
        hard: 1,
        medium: 0,
        soft: 0,
    };

    /// Creates a new RosterScore.
    #[inline]
    pub const fn of(hard: i64, medium: i64, soft: i64) -> Self {
        RosterScore { hard, medium, soft }
    }

    /// Creates a score with only a hard component.
    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        RosterScore {
            hard,
            medium: 0,
            soft: 0,
        }
    }

    /// Creates a score from the raw workload statistics of a feasible roster.
    pub fn from_workload(violations: u64, spread: u32, variance_numerator: u64) -> Self {
        RosterScore {
            hard: -(violations as i64),
            medium: -(spread as i64),
            soft: -(variance_numerator as i64),
        }
    }

    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    #[inline]
    pub const fn medium(&self) -> i64 {
        self.medium
    }

    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// Returns true when no hard constraint is violated.
    #[inline]
    pub const fn is_feasible(&self) -> bool {
        self.hard >= 0
    }

    /// Workload spread encoded in the medium level.
    pub fn spread(&self) -> u32 {
        self.medium.unsigned_abs() as u32
    }

    pub fn to_level_numbers(&self) -> [i64; 3] {
        [self.hard, self.medium, self.soft]
    }

    pub fn level_label(index: usize) -> Option<ScoreLevel> {
        match index {
            0 => Some(ScoreLevel::Hard),
            1 => Some(ScoreLevel::Medium),
            2 => Some(ScoreLevel::Soft),
            _ => None,
        }
    }

    /// Parses the `"Xhard/Ymedium/Zsoft"` representation.
    pub fn parse(s: &str) -> Result<Self, ScoreParseError> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 3 {
            return Err(ScoreParseError::new(format!(
                "Invalid RosterScore format '{}': expected 3 parts separated by '/'",
                s
            )));
        }

        let mut levels = [0i64; 3];
        for (slot, (part, suffix)) in levels
            .iter_mut()
            .zip(parts.iter().zip(["hard", "medium", "soft"]))
        {
            let part = part.trim();
            let num = part.strip_suffix(suffix).ok_or_else(|| {
                ScoreParseError::new(format!("{} part '{}' must end with '{}'", suffix, part, suffix))
            })?;
            *slot = num.parse::<i64>().map_err(|e| {
                ScoreParseError::new(format!("Invalid {} score '{}': {}", suffix, num, e))
            })?;
        }
        Ok(RosterScore::of(levels[0], levels[1], levels[2]))
    }
}

impl Ord for RosterScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hard
            .cmp(&other.hard)
            .then(self.medium.cmp(&other.medium))
            .then(self.soft.cmp(&other.soft))
    }
}

impl PartialOrd for RosterScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::ops::Add for RosterScore {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        RosterScore::of(
            self.hard + other.hard,
            self.medium + other.medium,
            self.soft + other.soft,
        )
    }
}

impl std::ops::Sub for RosterScore {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        RosterScore::of(
            self.hard - other.hard,
            self.medium - other.medium,
            self.soft - other.soft,
        )
    }
}

impl std::ops::Neg for RosterScore {
    type Output = Self;

    fn neg(self) -> Self {
        RosterScore::of(-self.hard, -self.medium, -self.soft)
    }
}

impl fmt::Debug for RosterScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RosterScore({}, {}, {})",
            self.hard, self.medium, self.soft
        )
    }
}

impl fmt::Display for RosterScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}medium/{}soft", self.hard, self.medium, self.soft)
    }
}

impl FromStr for RosterScore {
    type Err = ScoreParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RosterScore::parse(s)
    }
}

/// Error when parsing a score from string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Score parse error: {message}")]
pub struct ScoreParseError {
    pub message: String,
}

impl ScoreParseError {
    fn new(message: String) -> Self {
        Self { message }
    }
}
