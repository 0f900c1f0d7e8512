//! Bomb-grid parity reading with tight rotation limits.

use super::beat_grid::BombScan;
use super::{ParityContext, ParityDecision};
use crate::geometry::angle_for;
use crate::models::{Parity, ResetType};

const DOT_CLAMP: f32 = 45.0;
const HOLD_LIMIT: f32 = 90.0;
const INWARD_LIMIT: f32 = 90.0;
const OUTWARD_LIMIT: f32 = -135.0;
const ROTATION_LIMIT: f32 = 135.0;

pub(super) fn decide(ctx: &ParityContext<'_>) -> ParityDecision {
    let last = ctx.last;
    let config = ctx.config;
    let Some(next) = ctx.next_note() else {
        return ParityDecision::alternate(last.parity);
    };

    let current_afn = ctx.current_afn();
    let orientation = ctx.next_direction();
    let next_afn = angle_for(orientation, last.parity.opposite(), ctx.hand);
    let angle_change = current_afn - next_afn;

    if !ctx.bombs.is_empty() {
        let scan = BombScan::run(last, ctx.hand, ctx.bombs, ctx.player_x_offset, config);
        if scan.reset_indicated(last.parity) {
            let tolerance = match scan.parity {
                Parity::Forehand => config.forehand_bomb_tolerance,
                Parity::Backhand => config.backhand_bomb_tolerance,
            };
            // Small turns flow around the bombs without resetting.
            let flows_around = !next.is_dot() && angle_change.abs() < tolerance;
            if !flows_around {
                let decision = ParityDecision::hold(last.parity, ResetType::Bomb);
                if ctx.single_dots() {
                    let angle = ctx.candidate.end.angle.clamp(-DOT_CLAMP, DOT_CLAMP);
                    return decision.with_angle(angle);
                }
                return decision;
            }
        }
    }

    if ctx.candidate.all_dots() {
        return ParityDecision::alternate(last.parity);
    }

    let held_afn = angle_for(orientation, last.parity, ctx.hand);
    if (current_afn - held_afn).abs() < HOLD_LIMIT {
        return ParityDecision::hold(last.parity, ResetType::Normal);
    }
    if next_afn > INWARD_LIMIT || next_afn < OUTWARD_LIMIT {
        return ParityDecision::hold(last.parity, ResetType::Normal);
    }
    if angle_change.abs() > ROTATION_LIMIT {
        return ParityDecision::hold(last.parity, ResetType::Normal);
    }
    ParityDecision::alternate(last.parity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParityConfig;
    use crate::models::{Bomb, CutDirection, Hand, Swing};
    use crate::parity::test_support::swing;

    fn run(last: &Swing, candidate: &Swing, bombs: &[Bomb]) -> ParityDecision {
        let config = ParityConfig::default();
        decide(&ParityContext {
            hand: Hand::Right,
            last,
            candidate,
            bombs,
            player_x_offset: 0,
            seconds_since_last: 0.5,
            config: &config,
        })
    }

    #[test]
    fn test_repeated_down_is_normal_reset() {
        let last = swing(&[(0.0, 1, 0, CutDirection::Down)], Parity::Forehand, 0.0);
        let next = swing(&[(1.0, 1, 0, CutDirection::Down)], Parity::Forehand, 0.0);
        assert_eq!(
            run(&last, &next, &[]),
            ParityDecision::hold(Parity::Forehand, ResetType::Normal)
        );
    }

    #[test]
    fn test_dot_pair_over_bomb_clamps_angle() {
        let last = swing(&[(0.0, 1, 2, CutDirection::Any)], Parity::Forehand, 20.0);
        let next = swing(&[(1.0, 1, 2, CutDirection::Any)], Parity::Forehand, 60.0);
        let decision = run(&last, &next, &[Bomb::new(0.5, 1, 0)]);
        assert_eq!(decision.reset, ResetType::Bomb);
        assert_eq!(decision.parity, Parity::Forehand);
        assert_eq!(decision.angle, Some(45.0));
    }

    #[test]
    fn test_natural_return_flows_around_bomb() {
        let last = swing(&[(0.0, 1, 2, CutDirection::Down)], Parity::Forehand, 0.0);
        let next = swing(&[(1.0, 1, 0, CutDirection::Up)], Parity::Forehand, 0.0);
        let decision = run(&last, &next, &[Bomb::new(0.5, 1, 0)]);
        assert_eq!(decision, ParityDecision::alternate(Parity::Forehand));
    }

    #[test]
    fn test_small_forehand_turn_resets() {
        // Down-left after a forehand down stays within 45° of the held angle.
        let last = swing(&[(0.0, 1, 1, CutDirection::Down)], Parity::Forehand, 0.0);
        let next = swing(&[(1.0, 1, 1, CutDirection::DownLeft)], Parity::Forehand, 0.0);
        assert_eq!(run(&last, &next, &[]).reset, ResetType::Normal);
    }

    #[test]
    fn test_all_dot_candidate_alternates() {
        let last = swing(&[(0.0, 1, 0, CutDirection::Down)], Parity::Forehand, 0.0);
        let next = swing(&[(1.0, 1, 0, CutDirection::Any)], Parity::Forehand, 0.0);
        assert_eq!(run(&last, &next, &[]), ParityDecision::alternate(Parity::Forehand));
    }
}
