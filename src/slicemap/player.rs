//! Player displacement caused by walls.

use crate::models::{Obstacle, ObstacleHeight};
use crate::timing::beats_to_seconds;

/// Tracks how far the player has dodged sideways or ducked, decaying back
/// to the centre once no wall has been seen for a while.
#[derive(Debug, Clone, Default)]
pub struct PlayerOffset {
    x: i32,
    y: i32,
    last_wall_beat: f32,
    last_duck_beat: f32,
}

impl PlayerOffset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Applies `walls` (all starting before `beat`), then resets any offset
    /// whose last wall is more than `undodge_seconds` before `beat`.
    pub fn update<'a>(
        &mut self,
        walls: impl IntoIterator<Item = &'a Obstacle>,
        beat: f32,
        bpm: f32,
        undodge_seconds: f32,
    ) -> (i32, i32) {
        for wall in walls {
            if wall.height == ObstacleHeight::Crouch
                && ((wall.width >= 3 && wall.x <= 1) || (wall.width == 2 && wall.x == 1))
            {
                self.y = -1;
                self.last_duck_beat = wall.beat;
            }

            if wall.x == 1 || (wall.x == 0 && wall.width > 1) {
                self.x = 1;
                self.last_wall_beat = wall.beat;
            } else if wall.x == 2 {
                self.x = -1;
                self.last_wall_beat = wall.beat;
            }
        }

        if beats_to_seconds(bpm, beat - self.last_wall_beat) > undodge_seconds {
            self.x = 0;
        }
        if beats_to_seconds(bpm, beat - self.last_duck_beat) > undodge_seconds {
            self.y = 0;
        }
        (self.x, self.y)
    }
}
