//! Beatmap input types and the swing records derived from them.

pub mod beatmap;
pub mod swing;

pub use beatmap::{
    Beatmap, Bomb, CutDirection, DifficultyRank, GRID_COLUMNS, GRID_ROWS, Hand, MapMetadata,
    Note, Obstacle, ObstacleHeight,
};
pub use swing::{Parity, Positioning, ResetType, Swing, SwingKind};
