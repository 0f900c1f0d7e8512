//! Parity decision strategies.
//!
//! A strategy looks at the previous swing and the next candidate swing and
//! decides whether the hand alternates (forehand <-> backhand) or has to
//! reset. Strategies are pure: they return a [`ParityDecision`] patch that
//! the swing map builder applies.

pub mod beat_grid;
mod grid_avoidance;
mod heuristic;
mod reset_only;

use crate::config::ParityConfig;
use crate::geometry::direction_for_angle;
use crate::models::{Bomb, CutDirection, Hand, Note, Parity, ResetType, Swing};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use beat_grid::{BeatGrid, BombScan};

/// Available parity strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParityStrategy {
    /// Rolling bomb-grid scan, hold tolerances and upside-down detection.
    #[default]
    Heuristic,
    /// Strict reading that resets readily (fixed bomb cells, 90° limit).
    ResetOnly,
    /// Bomb-grid scan with tighter rotation limits.
    GridAvoidance,
}

impl ParityStrategy {
    pub const ALL: [ParityStrategy; 3] = [
        ParityStrategy::Heuristic,
        ParityStrategy::ResetOnly,
        ParityStrategy::GridAvoidance,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ParityStrategy::Heuristic => "heuristic",
            ParityStrategy::ResetOnly => "reset_only",
            ParityStrategy::GridAvoidance => "grid_avoidance",
        }
    }

    /// Decides the parity of `ctx.candidate`.
    ///
    /// The candidate must contain at least one note; an empty candidate
    /// simply alternates.
    pub fn decide(self, ctx: &ParityContext<'_>) -> ParityDecision {
        debug_assert!(!ctx.candidate.notes.is_empty(), "parity check on empty swing");
        if ctx.candidate.notes.is_empty() || ctx.last.notes.is_empty() {
            return ParityDecision::alternate(ctx.last.parity);
        }
        match self {
            ParityStrategy::Heuristic => heuristic::decide(ctx),
            ParityStrategy::ResetOnly => reset_only::decide(ctx),
            ParityStrategy::GridAvoidance => grid_avoidance::decide(ctx),
        }
    }
}

impl fmt::Display for ParityStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Everything a strategy may look at for one transition.
#[derive(Debug, Clone, Copy)]
pub struct ParityContext<'a> {
    pub hand: Hand,
    /// Previous cut swing, fully resolved.
    pub last: &'a Swing,
    /// Next swing: notes in path order, provisional angles.
    pub candidate: &'a Swing,
    /// Bombs strictly between the last note of `last` and the last note of
    /// `candidate`, sorted by beat.
    pub bombs: &'a [Bomb],
    /// Lateral player displacement caused by walls, in columns.
    pub player_x_offset: i32,
    /// Real time between the two swings' closest notes.
    pub seconds_since_last: f32,
    pub config: &'a ParityConfig,
}

impl<'a> ParityContext<'a> {
    /// First note of the candidate, in path order.
    pub fn next_note(&self) -> Option<&'a Note> {
        self.candidate.first_note()
    }

    /// Exit angle of the previous swing.
    #[inline]
    pub fn current_afn(&self) -> f32 {
        self.last.end.angle
    }

    /// Direction of the candidate's first note. Dots borrow the direction
    /// implied by the previous swing's exit angle.
    pub fn next_direction(&self) -> CutDirection {
        match self.next_note() {
            Some(note) if !note.is_dot() => note.direction,
            _ => direction_for_angle(
                self.last.end.angle,
                self.last.parity,
                self.hand,
                self.config.angle_interval,
            ),
        }
    }

    /// True when both swings are a single dot each.
    pub fn single_dots(&self) -> bool {
        self.last.notes.len() == 1
            && self.last.all_dots()
            && self.candidate.notes.len() == 1
            && self.candidate.all_dots()
    }
}

/// Patch produced by a strategy. The builder applies it to the candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParityDecision {
    pub parity: Parity,
    pub reset: ResetType,
    /// Overrides both start and end angle when set.
    pub angle: Option<f32>,
    /// The swing continues a rotation past 180° instead of flipping sign.
    pub upside_down: bool,
}

impl ParityDecision {
    /// Natural alternation after a swing of parity `last`.
    pub fn alternate(last: Parity) -> Self {
        Self {
            parity: last.opposite(),
            reset: ResetType::None,
            angle: None,
            upside_down: false,
        }
    }

    /// Repeat `last` parity, flagged with `reset`.
    pub fn hold(last: Parity, reset: ResetType) -> Self {
        Self {
            parity: last,
            reset,
            angle: None,
            upside_down: false,
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn upside_down(mut self, upside_down: bool) -> Self {
        self.upside_down = upside_down;
        self
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::swing;
    use super::*;

    #[test]
    fn test_strategy_ids_round_trip_through_serde() {
        for strategy in ParityStrategy::ALL {
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{}\"", strategy.id()));
            let back: ParityStrategy = serde_json::from_str(&json).unwrap();
            assert_eq!(back, strategy);
        }
    }

    #[test]
    fn test_dot_borrows_direction_from_exit_angle() {
        let config = ParityConfig::default();
        let last = swing(&[(0.0, 1, 0, CutDirection::Down)], Parity::Forehand, 0.0);
        let candidate = swing(&[(1.0, 1, 0, CutDirection::Any)], Parity::Forehand, 0.0);
        let ctx = ParityContext {
            hand: Hand::Right,
            last: &last,
            candidate: &candidate,
            bombs: &[],
            player_x_offset: 0,
            seconds_since_last: 0.5,
            config: &config,
        };
        assert_eq!(ctx.next_direction(), CutDirection::Down);
        assert!(!ctx.single_dots());
    }

    #[test]
    fn test_up_down_alternates_under_every_strategy() {
        let config = ParityConfig::default();
        let last = swing(&[(0.0, 1, 1, CutDirection::Up)], Parity::Backhand, 0.0);
        let candidate = swing(&[(1.0, 1, 1, CutDirection::Down)], Parity::Forehand, 0.0);
        let ctx = ParityContext {
            hand: Hand::Right,
            last: &last,
            candidate: &candidate,
            bombs: &[],
            player_x_offset: 0,
            seconds_since_last: 0.5,
            config: &config,
        };
        for strategy in ParityStrategy::ALL {
            let decision = strategy.decide(&ctx);
            assert_eq!(decision.parity, Parity::Forehand, "{}", strategy);
            assert_eq!(decision.reset, ResetType::None, "{}", strategy);
        }
    }
}
