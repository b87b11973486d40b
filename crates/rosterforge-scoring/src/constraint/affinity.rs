//! Fixed-day employees never work nights; fixed-night employees never work days.

use rosterforge_core::ConstraintKind;

use super::{WeekConstraint, WeekContext};

/// One violation per day holding a state the employee's affinity forbids.
#[derive(Debug, Clone, Copy, Default)]
pub struct AffinityConstraint;

impl WeekConstraint for AffinityConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Affinity
    }

    fn violations(&self, ctx: &WeekContext<'_>) -> u32 {
        let affinity = ctx.profile.affinity();
        ctx.states.iter().filter(|s| !affinity.permits(**s)).count() as u32
    }

    fn justify(&self, ctx: &WeekContext<'_>) -> String {
        format!(
            "{} employee {} holds {} forbidden shift(s) in week {}",
            ctx.profile.affinity(),
            ctx.profile.id,
            self.violations(ctx),
            ctx.week.index()
        )
    }
}
