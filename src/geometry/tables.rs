//! Cut direction -> angle-from-neutral tables.
//!
//! Neutral is a forehand down cut (0°). Rotating the wrist inwards, towards
//! the centre line, is positive. The left hand tables are the right hand
//! tables mirrored horizontally.

use crate::models::{CutDirection, Hand, Parity};
use ordered_float::OrderedFloat;

/// Default rounding interval for angle -> direction lookups.
pub const DEFAULT_ANGLE_INTERVAL: f32 = 45.0;

// Indexed by cut direction id: up, down, left, right, up-left, up-right,
// down-left, down-right, any.
const RIGHT_FOREHAND: [f32; 9] = [-180.0, 0.0, -90.0, 90.0, -135.0, 135.0, -45.0, 45.0, 0.0];
const RIGHT_BACKHAND: [f32; 9] = [0.0, -180.0, 90.0, -90.0, 45.0, -45.0, 135.0, -135.0, 0.0];
const LEFT_FOREHAND: [f32; 9] = [-180.0, 0.0, 90.0, -90.0, 135.0, -135.0, 45.0, -45.0, 0.0];
const LEFT_BACKHAND: [f32; 9] = [0.0, -180.0, -90.0, 90.0, -45.0, 45.0, -135.0, 135.0, 0.0];

const OPPOSITES: [CutDirection; 9] = [
    CutDirection::Down,
    CutDirection::Up,
    CutDirection::Right,
    CutDirection::Left,
    CutDirection::DownRight,
    CutDirection::DownLeft,
    CutDirection::UpRight,
    CutDirection::UpLeft,
    CutDirection::Any,
];

fn table(parity: Parity, hand: Hand) -> &'static [f32; 9] {
    match (hand, parity) {
        (Hand::Right, Parity::Forehand) => &RIGHT_FOREHAND,
        (Hand::Right, Parity::Backhand) => &RIGHT_BACKHAND,
        (Hand::Left, Parity::Forehand) => &LEFT_FOREHAND,
        (Hand::Left, Parity::Backhand) => &LEFT_BACKHAND,
    }
}

/// Angle from neutral of a cut in `direction` swung with `parity`.
///
/// Dots map to 0°; callers infer a dot's real angle from context.
#[inline]
pub fn angle_for(direction: CutDirection, parity: Parity, hand: Hand) -> f32 {
    table(parity, hand)[direction.id()]
}

/// The direction rotated by 180°. A dot stays a dot.
#[inline]
pub fn opposite(direction: CutDirection) -> CutDirection {
    OPPOSITES[direction.id()]
}

/// Wraps an angle into [-180, 180).
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// Snaps `angle` towards neutral onto a multiple of `interval`.
///
/// An interval of zero floors onto the 45° lattice instead.
pub fn snap_angle(angle: f32, interval: f32) -> f32 {
    if interval > 0.0 {
        let steps = angle / interval;
        let steps = if steps >= 0.0 { steps.floor() } else { steps.ceil() };
        steps * interval
    } else {
        (angle / DEFAULT_ANGLE_INTERVAL).floor() * DEFAULT_ANGLE_INTERVAL
    }
}

/// Inverse lookup: the compass direction whose angle under `parity` lies
/// closest to `angle` after snapping. Ties resolve to the lower direction id,
/// so 0° maps to `Down` for a forehand and never to `Any`.
pub fn direction_for_angle(angle: f32, parity: Parity, hand: Hand, interval: f32) -> CutDirection {
    let target = wrap_angle(snap_angle(angle, interval));
    let angles = table(parity, hand);
    CutDirection::COMPASS
        .iter()
        .copied()
        .min_by_key(|d| OrderedFloat(wrap_angle(angles[d.id()] - target).abs()))
        .unwrap_or(CutDirection::Down)
}
