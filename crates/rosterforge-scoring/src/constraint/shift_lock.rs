//! No mixing of day and night shifts within one week.

use rosterforge_core::{ConstraintKind, ShiftState};

use super::{WeekConstraint, WeekContext};

/// Violations equal the number of days that would have to change to make
/// the week single-shift: the smaller of its day and night counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftLockConstraint;

impl WeekConstraint for ShiftLockConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::ShiftLock
    }

    fn violations(&self, ctx: &WeekContext<'_>) -> u32 {
        ctx.count(ShiftState::Day).min(ctx.count(ShiftState::Night)) as u32
    }

    fn justify(&self, ctx: &WeekContext<'_>) -> String {
        format!(
            "employee {} mixes {} day and {} night shift(s) in week {}",
            ctx.profile.id,
            ctx.count(ShiftState::Day),
            ctx.count(ShiftState::Night),
            ctx.week.index()
        )
    }
}
