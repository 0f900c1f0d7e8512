//! Synthetic avoidance swings.
//!
//! A reset means the hand had to travel back without cutting anything. That
//! motion is made explicit by inserting an avoidance swing of the opposite
//! parity in the gap before every reset swing, so parity alternates across
//! the whole sequence.

use crate::geometry::rotated_step;
use crate::models::{GRID_COLUMNS, GRID_ROWS, Positioning, ResetType, Swing, SwingKind};

/// Builds the avoidance swing between `previous` and the reset swing `reset`.
pub fn avoidance_swing(previous: &Swing, reset: &Swing) -> Swing {
    let window = (reset.start_beat - previous.end_beat).max(0.0);
    let start_beat = previous.end_beat + window / 5.0;
    let end_beat = start_beat + window / 4.0;

    let angle = previous.end.angle + (reset.start.angle - previous.end.angle) / 2.0;
    let (x, y) = (previous.end.x, previous.end.y);
    let (dx, dy) = rotated_step(angle);
    let end_x = (x + dx).clamp(0, GRID_COLUMNS - 1);
    let end_y = (y + dy).clamp(0, GRID_ROWS - 1);

    Swing {
        kind: SwingKind::Avoidance,
        notes: Vec::new(),
        parity: reset.parity.opposite(),
        reset: ResetType::None,
        start: Positioning::new(x, y, angle),
        end: Positioning::new(end_x, end_y, angle),
        start_beat,
        end_beat,
        ebpm: reset.ebpm,
        is_inverted: false,
        player_x_offset: reset.player_x_offset,
        player_y_offset: reset.player_y_offset,
    }
}

/// Inserts an avoidance swing before every reset swing.
pub fn insert_avoidance_swings(swings: Vec<Swing>) -> Vec<Swing> {
    let resets = swings.iter().filter(|s| s.is_reset()).count();
    let mut result: Vec<Swing> = Vec::with_capacity(swings.len() + resets);
    for swing in swings {
        if swing.is_reset() {
            if let Some(previous) = result.last() {
                let avoidance = avoidance_swing(previous, &swing);
                log::debug!(
                    "SLICEMAP: Avoidance swing at beat {:.3} ({:?})",
                    avoidance.start_beat,
                    avoidance.parity
                );
                result.push(avoidance);
            }
        }
        result.push(swing);
    }
    result
}
