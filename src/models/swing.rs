//! Swing records produced by the swing map builder.

use super::beatmap::Note;
use serde::{Deserialize, Serialize};

/// Orientation of the hand during a swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Parity {
    #[default]
    Forehand,
    Backhand,
}

impl Parity {
    pub fn opposite(self) -> Self {
        match self {
            Parity::Forehand => Parity::Backhand,
            Parity::Backhand => Parity::Forehand,
        }
    }
}

/// Why a swing broke forehand/backhand alternation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResetType {
    #[default]
    None,
    /// Rotation reset: alternating would overrotate the wrist.
    Normal,
    /// The natural return swing is blocked by bombs.
    Bomb,
}

impl ResetType {
    #[inline]
    pub fn is_reset(self) -> bool {
        !matches!(self, ResetType::None)
    }
}

/// Hand position on the grid and blade angle-from-neutral, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Positioning {
    pub x: i32,
    pub y: i32,
    pub angle: f32,
}

impl Positioning {
    pub fn new(x: i32, y: i32, angle: f32) -> Self {
        Self { x, y, angle }
    }
}

/// Whether a swing cuts notes or is the extra motion inserted before a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwingKind {
    #[default]
    Cut,
    Avoidance,
}

/// One continuous sword motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swing {
    pub kind: SwingKind,
    /// Notes in blade path order. Empty only for avoidance swings.
    pub notes: Vec<Note>,
    pub parity: Parity,
    pub reset: ResetType,
    pub start: Positioning,
    pub end: Positioning,
    pub start_beat: f32,
    pub end_beat: f32,
    pub ebpm: f32,
    pub is_inverted: bool,
    pub player_x_offset: i32,
    pub player_y_offset: i32,
}

impl Swing {
    /// Creates a forehand cut swing over `notes` (path order, non-empty).
    ///
    /// Start/end cells come from the first and last notes. The beat window
    /// spans the earliest note to the latest note plus `tail_beats`, whatever
    /// the path order.
    pub fn from_notes(notes: Vec<Note>, tail_beats: f32) -> Self {
        debug_assert!(!notes.is_empty(), "cut swing built without notes");
        let start_beat = notes.iter().map(|n| n.beat).reduce(f32::min).unwrap_or(0.0);
        let last_beat = notes.iter().map(|n| n.beat).reduce(f32::max).unwrap_or(start_beat);
        let mut swing = Self {
            kind: SwingKind::Cut,
            notes,
            parity: Parity::Forehand,
            reset: ResetType::None,
            start: Positioning::default(),
            end: Positioning::default(),
            start_beat,
            end_beat: last_beat + tail_beats,
            ebpm: 0.0,
            is_inverted: false,
            player_x_offset: 0,
            player_y_offset: 0,
        };
        swing.sync_positions();
        swing
    }

    /// Re-derives start/end cells from the current note order.
    pub fn sync_positions(&mut self) {
        if let Some(first) = self.notes.first() {
            self.start.x = first.x;
            self.start.y = first.y;
        }
        if let Some(last) = self.notes.last() {
            self.end.x = last.x;
            self.end.y = last.y;
        }
    }

    pub fn set_angles(&mut self, start: f32, end: f32) {
        self.start.angle = start;
        self.end.angle = end;
    }

    #[inline]
    pub fn is_reset(&self) -> bool {
        self.reset.is_reset()
    }

    #[inline]
    pub fn is_cut(&self) -> bool {
        self.kind == SwingKind::Cut
    }

    pub fn first_note(&self) -> Option<&Note> {
        self.notes.first()
    }

    pub fn last_note(&self) -> Option<&Note> {
        self.notes.last()
    }

    /// Beat of the latest note, regardless of path order.
    pub fn latest_note_beat(&self) -> Option<f32> {
        self.notes.iter().map(|n| n.beat).reduce(f32::max)
    }

    /// True when every note is a dot (false for avoidance swings).
    pub fn all_dots(&self) -> bool {
        !self.notes.is_empty() && self.notes.iter().all(Note::is_dot)
    }

    /// First note with an arrow, in path order.
    pub fn leading_arrow(&self) -> Option<&Note> {
        self.notes.iter().find(|n| !n.is_dot())
    }

    /// Last note with an arrow, in path order.
    pub fn trailing_arrow(&self) -> Option<&Note> {
        self.notes.iter().rev().find(|n| !n.is_dot())
    }
}
