//! Swing geometry: angle tables and grid vectors.

pub mod tables;
pub mod vectors;

pub use tables::{
    DEFAULT_ANGLE_INTERVAL, angle_for, direction_for_angle, opposite, snap_angle, wrap_angle,
};
pub use vectors::{
    cell_delta, cell_distance, direction_between, direction_step, direction_vector, dot,
    rotated_step,
};
