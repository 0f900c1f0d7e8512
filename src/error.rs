//! Error types for swing map construction, analysis and configuration.
//!
//! Input validation happens once, at the entry of [`SliceMap::build`](crate::slicemap::SliceMap::build).
//! Everything past that point indexes geometry tables directly and treats
//! ambiguous geometry as specified tie-breaks, never as errors.

use std::fmt;

/// Error type for malformed swing map input.
#[derive(Debug, Clone, PartialEq)]
pub enum SliceMapError {
    /// No colour notes at all were supplied.
    EmptyNoteList,
    /// BPM must be finite and strictly positive.
    InvalidBpm(f32),
    /// A note, bomb or obstacle carried a NaN or infinite beat.
    NonFiniteBeat(f32),
    /// A note sits outside the 4x3 grid.
    InvalidGridPosition { beat: f32, x: i32, y: i32 },
    /// Cut direction id outside 0..=8.
    InvalidCutDirection(u8),
    /// Colour id outside 0..=1.
    InvalidColor(u8),
}

impl fmt::Display for SliceMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceMapError::EmptyNoteList => write!(f, "Beatmap contains no colour notes"),
            SliceMapError::InvalidBpm(bpm) => write!(f, "Invalid BPM: {}", bpm),
            SliceMapError::NonFiniteBeat(beat) => write!(f, "Non-finite beat: {}", beat),
            SliceMapError::InvalidGridPosition { beat, x, y } => {
                write!(f, "Note at beat {} is off the grid: ({}, {})", beat, x, y)
            }
            SliceMapError::InvalidCutDirection(d) => write!(f, "Invalid cut direction: {}", d),
            SliceMapError::InvalidColor(c) => write!(f, "Invalid note colour: {}", c),
        }
    }
}

impl std::error::Error for SliceMapError {}

/// Error type for a single analyzer run.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Both swing maps were empty and the analyzer needs at least one swing.
    EmptySwingMaps,
    /// The analysis context is unusable (e.g. zero BPM, zero bucket width).
    InvalidContext(String),
    /// The payload could not be converted to JSON.
    Serialization(String),
    /// Generic error with message.
    Other(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::EmptySwingMaps => write!(f, "Both swing maps are empty"),
            AnalysisError::InvalidContext(msg) => write!(f, "Invalid analysis context: {}", msg),
            AnalysisError::Serialization(msg) => write!(f, "Serialization failed: {}", msg),
            AnalysisError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Serialization(err.to_string())
    }
}

/// Error type for configuration loading.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Failed to read config: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Failed to parse config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
