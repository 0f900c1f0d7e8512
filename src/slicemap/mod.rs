//! Swing map construction.
//!
//! A [`SliceMap`] is the ordered sequence of swings one hand performs over a
//! beatmap: notes grouped into swings, each with a decided parity, reset
//! classification, positions and angles, plus synthetic avoidance swings
//! before every reset.

mod avoidance;
mod builder;
pub mod dots;
pub mod grouping;
mod player;

use crate::config::SliceMapConfig;
use crate::error::SliceMapError;
use crate::models::{Beatmap, Bomb, Hand, Note, Obstacle, Swing};
use builder::SwingBuilder;
use serde::{Deserialize, Serialize};

pub use avoidance::{avoidance_swing, insert_avoidance_swings};
pub use builder::is_inverted;
pub use player::PlayerOffset;

/// The swing sequence of one hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceMap {
    hand: Hand,
    bpm: f32,
    swings: Vec<Swing>,
}

impl SliceMap {
    /// Builds the swing map of `hand` from a full difficulty timeline.
    ///
    /// `notes` may contain both colours; only `hand`'s notes are used. Fails
    /// on a non-positive BPM, an empty note list, or notes off the grid.
    pub fn build(
        bpm: f32,
        notes: &[Note],
        bombs: &[Bomb],
        obstacles: &[Obstacle],
        hand: Hand,
        config: &SliceMapConfig,
    ) -> Result<Self, SliceMapError> {
        validate(bpm, notes, bombs, obstacles)?;

        let mut hand_notes: Vec<Note> = notes.iter().filter(|n| n.color == hand).copied().collect();
        hand_notes.sort_by(|a, b| a.beat.total_cmp(&b.beat));
        let mut bombs = bombs.to_vec();
        bombs.sort_by(|a, b| a.beat.total_cmp(&b.beat));
        let mut obstacles = obstacles.to_vec();
        obstacles.sort_by(|a, b| a.beat.total_cmp(&b.beat));

        let swings = SwingBuilder {
            bpm,
            hand,
            bombs: &bombs,
            obstacles: &obstacles,
            config,
        }
        .build(&hand_notes);

        let map = Self { hand, bpm, swings };
        log::info!(
            "SLICEMAP: Built {:?} hand: {} notes, {} swings, {} resets ({})",
            hand,
            hand_notes.len(),
            map.len(),
            map.reset_count(),
            config.parity.strategy
        );
        Ok(map)
    }

    pub fn from_beatmap(
        beatmap: &Beatmap,
        hand: Hand,
        config: &SliceMapConfig,
    ) -> Result<Self, SliceMapError> {
        Self::build(
            beatmap.metadata.bpm,
            &beatmap.notes,
            &beatmap.bombs,
            &beatmap.obstacles,
            hand,
            config,
        )
    }

    pub fn hand(&self) -> Hand {
        self.hand
    }

    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    pub fn swings(&self) -> &[Swing] {
        &self.swings
    }

    pub fn len(&self) -> usize {
        self.swings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Swing> {
        self.swings.get(index)
    }

    /// Swings that cut notes, skipping synthetic avoidance swings.
    pub fn cuts(&self) -> impl Iterator<Item = &Swing> {
        self.swings.iter().filter(|s| s.is_cut())
    }

    pub fn reset_count(&self) -> usize {
        self.swings.iter().filter(|s| s.is_reset()).count()
    }

    pub fn into_swings(self) -> Vec<Swing> {
        self.swings
    }
}

fn validate(
    bpm: f32,
    notes: &[Note],
    bombs: &[Bomb],
    obstacles: &[Obstacle],
) -> Result<(), SliceMapError> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(SliceMapError::InvalidBpm(bpm));
    }
    if notes.is_empty() {
        return Err(SliceMapError::EmptyNoteList);
    }
    for note in notes {
        note.validate()?;
    }
    if let Some(bomb) = bombs.iter().find(|b| !b.beat.is_finite()) {
        return Err(SliceMapError::NonFiniteBeat(bomb.beat));
    }
    if let Some(wall) = obstacles.iter().find(|o| !o.beat.is_finite()) {
        return Err(SliceMapError::NonFiniteBeat(wall.beat));
    }
    Ok(())
}
