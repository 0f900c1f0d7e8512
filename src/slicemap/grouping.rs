//! Grouping of one hand's notes into swings, and path ordering of stacks.

use crate::geometry::{
    angle_for, cell_delta, cell_distance, direction_for_angle, direction_vector, dot, opposite,
    vectors::normalize,
};
use crate::models::{Hand, Note, Parity, Swing};
use crate::timing::beats_to_ms;

/// Max table difference for two arrows to share a swing.
const ADJACENT_ANGLE: f32 = 45.0;
const PERPENDICULAR_EPSILON: f32 = 1e-6;

/// Whether `next` can be cut in the same motion as `current`.
pub fn compatible(current: &Note, next: &Note, hand: Hand) -> bool {
    if current.is_dot() || next.is_dot() || current.direction == next.direction {
        return true;
    }
    [Parity::Forehand, Parity::Backhand].iter().any(|&parity| {
        (angle_for(current.direction, parity, hand) - angle_for(next.direction, parity, hand)).abs()
            <= ADJACENT_ANGLE
    })
}

/// Splits beat-sorted notes into swing groups. A note joins the open group
/// when it follows the previous note within `precision_ms` and is
/// compatible with it.
pub fn group_notes(notes: &[Note], bpm: f32, hand: Hand, precision_ms: f32) -> Vec<Vec<Note>> {
    let mut groups = Vec::new();
    let mut current: Vec<Note> = Vec::new();
    for (i, note) in notes.iter().enumerate() {
        current.push(*note);
        if let Some(next) = notes.get(i + 1) {
            let gap_ms = beats_to_ms(bpm, next.beat - note.beat).abs();
            if gap_ms <= precision_ms && compatible(note, next, hand) {
                continue;
            }
        }
        groups.push(std::mem::take(&mut current));
    }
    groups
}

/// The two notes furthest apart; the first such pair in iteration order.
fn furthest_pair(notes: &[Note]) -> Option<(Note, Note)> {
    let mut best: Option<(Note, Note, f32)> = None;
    for a in notes {
        for b in notes {
            let distance = cell_distance(a.position(), b.position());
            if best.as_ref().is_none_or(|(_, _, d)| distance > *d) {
                best = Some((*a, *b, distance));
            }
        }
    }
    best.map(|(a, b, _)| (a, b))
}

fn projection(note: &Note, origin: (i32, i32), axis: (f32, f32)) -> f32 {
    dot(cell_delta(origin, note.position()), axis)
}

/// Orders a stack of arrows along the line through its two furthest notes,
/// pointing the way the first arrow cuts. Dots in the stack only lie on the
/// line. Ties go to the note closest to `previous_exit`.
pub fn order_arrow_stack(notes: &mut [Note], previous_exit: Option<(i32, i32)>) {
    let Some((a, b)) = furthest_pair(notes) else {
        return;
    };
    let Some(arrow) = notes.iter().find(|n| !n.is_dot()).copied() else {
        return;
    };
    let mut axis = cell_delta(a.position(), b.position());
    if dot(direction_vector(arrow.direction), axis) < 0.0 {
        axis = (-axis.0, -axis.1);
    }
    let origin = a.position();
    notes.sort_by(|n, m| {
        projection(n, origin, axis)
            .total_cmp(&projection(m, origin, axis))
            .then_with(|| match previous_exit {
                Some(exit) => cell_distance(n.position(), exit)
                    .total_cmp(&cell_distance(m.position(), exit)),
                None => std::cmp::Ordering::Equal,
            })
    });
}

/// Orders a stack of dots. Dots carry no direction, so the axis is seeded
/// by the opposite of the previous swing's exit direction.
pub fn order_dot_stack(notes: &mut [Note], last: &Swing, hand: Hand, interval: f32) {
    let Some((a, b)) = furthest_pair(notes) else {
        return;
    };
    if a.position() == b.position() {
        return;
    }
    let exit = (last.end.x, last.end.y);
    let last_direction = direction_for_angle(last.end.angle, last.parity, hand, interval);
    let prior = direction_vector(opposite(last_direction));
    let mut axis = normalize(cell_delta(a.position(), b.position()));
    let alignment = dot(prior, axis);

    if alignment.abs() < PERPENDICULAR_EPSILON {
        // Right angle to the prior swing: start from the dot nearest the exit.
        notes.sort_by(|n, m| {
            cell_distance(n.position(), exit).total_cmp(&cell_distance(m.position(), exit))
        });
        return;
    }
    if alignment < 0.0 {
        axis = (-axis.0, -axis.1);
    }
    let origin = a.position();
    notes.sort_by(|n, m| projection(n, origin, axis).total_cmp(&projection(m, origin, axis)));
}
