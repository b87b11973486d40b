//! Rest-day quota per Sunday-to-Saturday week.

use rosterforge_core::ConstraintKind;

use super::{WeekConstraint, WeekContext};

/// One violation per rest day missing from, or in excess of, the week's bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeeklyRestConstraint;

impl WeekConstraint for WeeklyRestConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::WeeklyRest
    }

    fn violations(&self, ctx: &WeekContext<'_>) -> u32 {
        let rest = ctx.rest_count();
        let (min, max) = ctx.rest_bounds;
        if rest < min {
            (min - rest) as u32
        } else {
            rest.saturating_sub(max) as u32
        }
    }

    fn justify(&self, ctx: &WeekContext<'_>) -> String {
        let (min, max) = ctx.rest_bounds;
        let bound = if min == max {
            format!("exactly {}", min)
        } else {
            format!("{} to {}", min, max)
        };
        format!(
            "employee {} rests {} day(s) in {}-day week {}, expected {}",
            ctx.profile.id,
            ctx.rest_count(),
            ctx.week.len(),
            ctx.week.index(),
            bound
        )
    }
}
