//! Grid-space direction vectors.

use crate::models::CutDirection;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

/// Integer step of a cut direction on the grid (y grows upwards).
/// Dots have no direction and step nowhere.
pub fn direction_step(direction: CutDirection) -> (i32, i32) {
    match direction {
        CutDirection::Up => (0, 1),
        CutDirection::Down => (0, -1),
        CutDirection::Left => (-1, 0),
        CutDirection::Right => (1, 0),
        CutDirection::UpLeft => (-1, 1),
        CutDirection::UpRight => (1, 1),
        CutDirection::DownLeft => (-1, -1),
        CutDirection::DownRight => (1, -1),
        CutDirection::Any => (0, 0),
    }
}

/// Unit vector of a cut direction, or zero for a dot.
pub fn direction_vector(direction: CutDirection) -> (f32, f32) {
    let (x, y) = direction_step(direction);
    normalize((x as f32, y as f32))
}

pub fn normalize(v: (f32, f32)) -> (f32, f32) {
    let len = length(v);
    if len <= f32::EPSILON {
        (0.0, 0.0)
    } else {
        (v.0 / len, v.1 / len)
    }
}

#[inline]
pub fn dot(a: (f32, f32), b: (f32, f32)) -> f32 {
    a.0 * b.0 + a.1 * b.1
}

#[inline]
pub fn length(v: (f32, f32)) -> f32 {
    (v.0 * v.0 + v.1 * v.1).sqrt()
}

/// Euclidean distance between two grid cells.
pub fn cell_distance(a: (i32, i32), b: (i32, i32)) -> f32 {
    length(((b.0 - a.0) as f32, (b.1 - a.1) as f32))
}

/// Vector from cell `a` to cell `b`.
pub fn cell_delta(a: (i32, i32), b: (i32, i32)) -> (f32, f32) {
    ((b.0 - a.0) as f32, (b.1 - a.1) as f32)
}

/// Compass direction best describing the displacement `from -> to`.
///
/// Returns `None` when both cells coincide.
pub fn direction_between(from: (i32, i32), to: (i32, i32)) -> Option<CutDirection> {
    if from == to {
        return None;
    }
    let delta = normalize(cell_delta(from, to));
    CutDirection::COMPASS
        .iter()
        .copied()
        .min_by_key(|d| Reverse(OrderedFloat(dot(direction_vector(*d), delta))))
}

/// Rotates the unit up vector by `angle` degrees counter-clockwise and
/// rounds the result to the nearest grid step, so diagonals step diagonally.
pub fn rotated_step(angle: f32) -> (i32, i32) {
    let radians = angle.to_radians();
    ((-radians.sin()).round() as i32, radians.cos().round() as i32)
}
