//! Beat and time conversions.
//!
//! All map positions are in beats; these helpers convert to real time for a
//! fixed BPM.

pub const SECONDS_PER_MINUTE: f32 = 60.0;
pub const MS_PER_SECOND: f32 = 1000.0;

/// Converts seconds to beats.
#[inline]
pub fn seconds_to_beats(bpm: f32, seconds: f32) -> f32 {
    seconds * (bpm / SECONDS_PER_MINUTE)
}

/// Converts beats to seconds.
#[inline]
pub fn beats_to_seconds(bpm: f32, beats: f32) -> f32 {
    (SECONDS_PER_MINUTE / bpm) * beats
}

/// Converts beats to milliseconds.
#[inline]
pub fn beats_to_ms(bpm: f32, beats: f32) -> f32 {
    beats_to_seconds(bpm, beats) * MS_PER_SECOND
}

/// Effective BPM of a swing that follows the previous one after `beat_gap`.
///
/// A swing pair (down + up) covers one beat of "swing BPM", so the gap is
/// halved. Zero or negative gaps yield 0.
pub fn swing_ebpm(bpm: f32, beat_gap: f32) -> f32 {
    let seconds = beats_to_seconds(bpm, beat_gap);
    if seconds <= 0.0 {
        return 0.0;
    }
    (SECONDS_PER_MINUTE / seconds) / 2.0
}
