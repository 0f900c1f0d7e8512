//! Strict parity reading: resets as soon as a swing would rotate past 90°.

use super::{ParityContext, ParityDecision};
use crate::geometry::angle_for;
use crate::models::{CutDirection, Hand, Parity, ResetType};

const ROTATION_LIMIT: f32 = 90.0;

/// Whether a bomb in the return path after an exit in `direction` forces a
/// reset: downward exits on a forehand, upward exits on a backhand.
fn resets_on_bomb(direction: CutDirection, parity: Parity) -> bool {
    match parity {
        Parity::Forehand => direction.is_downward(),
        Parity::Backhand => direction.is_upward(),
    }
}

pub(super) fn decide(ctx: &ParityContext<'_>) -> ParityDecision {
    let last = ctx.last;
    let (Some(next), Some(exit)) = (ctx.next_note(), last.last_note()) else {
        return ParityDecision::alternate(last.parity);
    };

    // Only the cell the hand returns through is checked.
    let bomb_layer = match last.parity {
        Parity::Forehand => 0,
        Parity::Backhand => 2,
    };
    let bomb_column = match ctx.hand {
        Hand::Right => 2,
        Hand::Left => 1,
    } + ctx.player_x_offset;
    let blocked = ctx
        .bombs
        .iter()
        .any(|b| b.x == bomb_column && b.y == bomb_layer);
    if blocked && resets_on_bomb(exit.direction, last.parity) {
        return ParityDecision::hold(last.parity, ResetType::Bomb);
    }

    // Bottom-row dots and outer-lane horizontals are read as down hits.
    if next.is_dot() && next.y == 0 {
        return forced_forehand(last.parity);
    }
    if matches!(next.direction, CutDirection::Left | CutDirection::Right)
        && (next.x == 0 || next.x == 3)
        && next.y == 0
    {
        return forced_forehand(last.parity);
    }

    let next_afn = angle_for(ctx.next_direction(), last.parity.opposite(), ctx.hand);
    if (ctx.current_afn() - next_afn).abs() > ROTATION_LIMIT {
        ParityDecision::hold(last.parity, ResetType::Normal)
    } else {
        ParityDecision::alternate(last.parity)
    }
}

fn forced_forehand(last: Parity) -> ParityDecision {
    match last {
        Parity::Forehand => ParityDecision::hold(last, ResetType::Normal),
        Parity::Backhand => ParityDecision::alternate(last),
    }
}
