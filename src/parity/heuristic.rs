//! Default parity heuristic.

use super::beat_grid::BombScan;
use super::{ParityContext, ParityDecision};
use crate::geometry::angle_for;
use crate::models::{CutDirection, Parity, ResetType};

const DOT_CLAMP: f32 = 45.0;

pub(super) fn decide(ctx: &ParityContext<'_>) -> ParityDecision {
    let last = ctx.last;
    let config = ctx.config;
    let Some(next) = ctx.next_note() else {
        return ParityDecision::alternate(last.parity);
    };

    let current_afn = ctx.current_afn();
    let next_direction = ctx.next_direction();
    let next_afn = angle_for(next_direction, last.parity.opposite(), ctx.hand);

    if !ctx.bombs.is_empty() {
        let scan = BombScan::run(last, ctx.hand, ctx.bombs, ctx.player_x_offset, config);
        if scan.reset_indicated(last.parity) {
            // Held swing must stay within tolerance of the exit angle.
            let held_afn = angle_for(next_direction, last.parity, ctx.hand);
            let tolerance = match last.parity {
                Parity::Forehand => config.forehand_bomb_tolerance,
                Parity::Backhand => config.backhand_bomb_tolerance,
            };
            if next.is_dot() || (current_afn - held_afn).abs() <= tolerance {
                let decision = ParityDecision::hold(last.parity, ResetType::Bomb);
                if ctx.single_dots() {
                    let angle = ctx.candidate.end.angle.clamp(-DOT_CLAMP, DOT_CLAMP);
                    return decision.with_angle(angle);
                }
                return decision;
            }
        }
    }

    let upside_down = last.end.angle > 0.0
        && match last.parity {
            Parity::Backhand => matches!(next.direction, CutDirection::Up | CutDirection::Any),
            Parity::Forehand => matches!(next.direction, CutDirection::Down | CutDirection::Any),
        };

    let angle_change = if upside_down {
        current_afn + next_afn
    } else {
        current_afn - next_afn
    };

    if !upside_down && angle_change.abs() > config.rotation_reset_limit {
        return ParityDecision::hold(last.parity, ResetType::Normal);
    }
    ParityDecision::alternate(last.parity).upside_down(upside_down)
}
