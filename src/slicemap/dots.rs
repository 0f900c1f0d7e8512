//! Angles for swings made only of dots, inferred from the previous swing.

use crate::geometry::{angle_for, direction_between};
use crate::models::{Hand, Note, Parity, Swing};

/// Angle of a single dot swung with `parity` after `last`.
///
/// The dot is cut along the path from the previous exit note. A dot on the
/// same cell keeps the previous exit angle. The result is clamped to avoid
/// implausible wrist rotation on short or sideways moves.
pub fn dot_angle(last: &Swing, dot: &Note, parity: Parity, hand: Hand) -> f32 {
    let Some(exit) = last.last_note() else {
        return last.end.angle;
    };
    let Some(orientation) = direction_between(exit.position(), dot.position()) else {
        return last.end.angle;
    };
    let angle = angle_for(orientation, parity, hand);

    let x_diff = (dot.x - exit.x).abs();
    let y_diff = (dot.y - exit.y).abs();
    if x_diff == 3 {
        angle.clamp(-90.0, 90.0)
    } else if (y_diff == 0 && x_diff < 2) || (y_diff > 0 && x_diff > 0) {
        angle.clamp(-45.0, 45.0)
    } else {
        angle
    }
}

/// Angle of a multi-dot swing whose notes are already in path order.
///
/// The stack is cut along first -> last or the reverse, whichever needs
/// less rotation from the previous exit angle.
pub fn dot_stack_angle(last: &Swing, notes: &[Note], parity: Parity, hand: Hand) -> f32 {
    let (Some(first), Some(final_note)) = (notes.first(), notes.last()) else {
        return last.end.angle;
    };
    let (Some(forward), Some(backward)) = (
        direction_between(first.position(), final_note.position()),
        direction_between(final_note.position(), first.position()),
    ) else {
        return last.end.angle;
    };
    let angle = angle_for(forward, parity, hand);
    let alt_angle = angle_for(backward, parity, hand);
    if (last.end.angle - alt_angle).abs() < (last.end.angle - angle).abs() {
        alt_angle
    } else {
        angle
    }
}
