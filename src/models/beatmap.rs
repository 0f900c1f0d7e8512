//! Beatmap timeline types: colour notes, bombs, obstacles and map metadata.
//!
//! These are produced by an external loader and never mutated by the engine.
//! Field names serialize with the short keys used by v3 beatmap files
//! (`b`, `x`, `y`, `c`, `d`, `w`, `h`).

use crate::error::SliceMapError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const GRID_COLUMNS: i32 = 4;
pub const GRID_ROWS: i32 = 3;

/// Which saber a note belongs to (colour `c`: 0 = left/red, 1 = right/blue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Hand {
    Left,
    Right,
}

impl TryFrom<u8> for Hand {
    type Error = SliceMapError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Hand::Left),
            1 => Ok(Hand::Right),
            other => Err(SliceMapError::InvalidColor(other)),
        }
    }
}

impl From<Hand> for u8 {
    fn from(hand: Hand) -> Self {
        match hand {
            Hand::Left => 0,
            Hand::Right => 1,
        }
    }
}

/// The nine cut directions. `Any` is a dot note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CutDirection {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    Any,
}

impl CutDirection {
    /// The eight compass directions, in id order.
    pub const COMPASS: [CutDirection; 8] = [
        CutDirection::Up,
        CutDirection::Down,
        CutDirection::Left,
        CutDirection::Right,
        CutDirection::UpLeft,
        CutDirection::UpRight,
        CutDirection::DownLeft,
        CutDirection::DownRight,
    ];

    /// Numeric id (0..=8) as stored in beatmap files.
    #[inline]
    pub fn id(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn is_dot(self) -> bool {
        matches!(self, CutDirection::Any)
    }

    /// Up, up-left and up-right: cuts that start from below.
    pub fn is_upward(self) -> bool {
        matches!(
            self,
            CutDirection::Up | CutDirection::UpLeft | CutDirection::UpRight
        )
    }

    /// Down, down-left and down-right.
    pub fn is_downward(self) -> bool {
        matches!(
            self,
            CutDirection::Down | CutDirection::DownLeft | CutDirection::DownRight
        )
    }
}

impl TryFrom<u8> for CutDirection {
    type Error = SliceMapError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0..=7 => Ok(CutDirection::COMPASS[value as usize]),
            8 => Ok(CutDirection::Any),
            other => Err(SliceMapError::InvalidCutDirection(other)),
        }
    }
}

impl From<CutDirection> for u8 {
    fn from(direction: CutDirection) -> Self {
        direction as u8
    }
}

/// A colour note.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "b")]
    pub beat: f32,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "c")]
    pub color: Hand,
    #[serde(rename = "d")]
    pub direction: CutDirection,
}

impl Note {
    pub fn new(beat: f32, x: i32, y: i32, color: Hand, direction: CutDirection) -> Self {
        Self {
            beat,
            x,
            y,
            color,
            direction,
        }
    }

    /// Builds a note from the raw integers of a beatmap file.
    pub fn from_raw(beat: f32, x: i32, y: i32, c: u8, d: u8) -> Result<Self, SliceMapError> {
        let note = Self::new(beat, x, y, Hand::try_from(c)?, CutDirection::try_from(d)?);
        note.validate()?;
        Ok(note)
    }

    #[inline]
    pub fn is_dot(&self) -> bool {
        self.direction.is_dot()
    }

    #[inline]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn validate(&self) -> Result<(), SliceMapError> {
        if !self.beat.is_finite() {
            return Err(SliceMapError::NonFiniteBeat(self.beat));
        }
        if !(0..GRID_COLUMNS).contains(&self.x) || !(0..GRID_ROWS).contains(&self.y) {
            return Err(SliceMapError::InvalidGridPosition {
                beat: self.beat,
                x: self.x,
                y: self.y,
            });
        }
        Ok(())
    }
}

/// A bomb. Bombs may sit anywhere (including outside the grid), only the
/// beat has to be finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bomb {
    #[serde(rename = "b")]
    pub beat: f32,
    pub x: i32,
    pub y: i32,
}

impl Bomb {
    pub fn new(beat: f32, x: i32, y: i32) -> Self {
        Self { beat, x, y }
    }
}

/// Height class of a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleHeight {
    /// Reaches the floor and spans the full play height.
    Full,
    /// Hangs from the top; the player ducks under it.
    Crouch,
}

impl ObstacleHeight {
    /// Derives the class from the raw start row and height of a wall.
    pub fn from_raw(y: i32, h: i32) -> Self {
        if y <= 0 && h >= 3 {
            ObstacleHeight::Full
        } else {
            ObstacleHeight::Crouch
        }
    }
}

/// A wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    #[serde(rename = "b")]
    pub beat: f32,
    pub x: i32,
    #[serde(rename = "w")]
    pub width: i32,
    #[serde(rename = "d")]
    pub duration: f32,
    pub height: ObstacleHeight,
}

impl Obstacle {
    pub fn new(beat: f32, x: i32, width: i32, duration: f32, height: ObstacleHeight) -> Self {
        Self {
            beat,
            x,
            width,
            duration,
            height,
        }
    }

    /// Builds an obstacle from the raw v3 fields.
    pub fn from_raw(beat: f32, x: i32, y: i32, duration: f32, w: i32, h: i32) -> Self {
        Self::new(beat, x, w, duration, ObstacleHeight::from_raw(y, h))
    }
}

/// Difficulty rank of a beatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DifficultyRank {
    #[default]
    Easy,
    Normal,
    Hard,
    Expert,
    ExpertPlus,
}

impl FromStr for DifficultyRank {
    type Err = std::convert::Infallible;

    /// Case-insensitive; unknown names fall back to `Easy`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "normal" => DifficultyRank::Normal,
            "hard" => DifficultyRank::Hard,
            "expert" => DifficultyRank::Expert,
            "expertplus" | "expert+" => DifficultyRank::ExpertPlus,
            _ => DifficultyRank::Easy,
        })
    }
}

impl fmt::Display for DifficultyRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DifficultyRank::Easy => "Easy",
            DifficultyRank::Normal => "Normal",
            DifficultyRank::Hard => "Hard",
            DifficultyRank::Expert => "Expert",
            DifficultyRank::ExpertPlus => "ExpertPlus",
        };
        f.write_str(name)
    }
}

/// Identifying information for one difficulty of a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMetadata {
    pub song_name: String,
    pub difficulty: String,
    pub difficulty_rank: DifficultyRank,
    pub bpm: f32,
    #[serde(default)]
    pub hash: Option<String>,
}

impl MapMetadata {
    pub fn new(song_name: impl Into<String>, difficulty: impl Into<String>, bpm: f32) -> Self {
        let difficulty = difficulty.into();
        let difficulty_rank = difficulty.parse().unwrap_or_default();
        Self {
            song_name: song_name.into(),
            difficulty,
            difficulty_rank,
            bpm,
            hash: None,
        }
    }
}

/// One playable difficulty: metadata plus its full timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beatmap {
    pub metadata: MapMetadata,
    #[serde(rename = "colorNotes", default)]
    pub notes: Vec<Note>,
    #[serde(rename = "bombNotes", default)]
    pub bombs: Vec<Bomb>,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl Beatmap {
    pub fn new(
        metadata: MapMetadata,
        notes: Vec<Note>,
        bombs: Vec<Bomb>,
        obstacles: Vec<Obstacle>,
    ) -> Self {
        Self {
            metadata,
            notes,
            bombs,
            obstacles,
        }
    }

    /// Notes of one colour, in file order.
    pub fn notes_for(&self, hand: Hand) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(move |n| n.color == hand)
    }

    /// md5 hex digest of the timeline, stable across runs.
    pub fn content_hash(&self) -> String {
        let mut context = md5::Context::new();
        for n in &self.notes {
            context.consume(
                format!(
                    "n{}:{}:{}:{}:{};",
                    n.beat,
                    n.x,
                    n.y,
                    u8::from(n.color),
                    u8::from(n.direction)
                )
                .as_bytes(),
            );
        }
        for b in &self.bombs {
            context.consume(format!("b{}:{}:{};", b.beat, b.x, b.y).as_bytes());
        }
        for o in &self.obstacles {
            context.consume(
                format!("o{}:{}:{}:{};", o.beat, o.x, o.width, o.duration).as_bytes(),
            );
        }
        format!("{:x}", context.finalize())
    }

    /// The metadata hash, computing it from the timeline when absent.
    pub fn hash(&self) -> String {
        self.metadata
            .hash
            .clone()
            .unwrap_or_else(|| self.content_hash())
    }
}
