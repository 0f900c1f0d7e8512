//! Trait definition for swing analyzers.
//!
//! An analyzer folds over both hands' swing maps and produces one
//! independently serializable payload. Analyzers never mutate the swings
//! they are given.

use crate::error::AnalysisError;
use crate::models::{Hand, MapMetadata, Swing};
use std::fmt::Debug;

/// Read-only input shared by every analyzer of one beatmap.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub metadata: &'a MapMetadata,
    pub left_hand: &'a [Swing],
    pub right_hand: &'a [Swing],
    /// Width of one analysis bucket, in seconds.
    pub bucket_seconds: f32,
    /// Song length in seconds, when known.
    pub duration_seconds: Option<f32>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        metadata: &'a MapMetadata,
        left_hand: &'a [Swing],
        right_hand: &'a [Swing],
        bucket_seconds: f32,
    ) -> Self {
        Self {
            metadata,
            left_hand,
            right_hand,
            bucket_seconds,
            duration_seconds: None,
        }
    }

    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    #[inline]
    pub fn bpm(&self) -> f32 {
        self.metadata.bpm
    }

    pub fn swings(&self, hand: Hand) -> &'a [Swing] {
        match hand {
            Hand::Left => self.left_hand,
            Hand::Right => self.right_hand,
        }
    }

    /// Both hands' swings, left first.
    pub fn all_swings(&self) -> impl Iterator<Item = &'a Swing> {
        self.left_hand.iter().chain(self.right_hand.iter())
    }

    /// Latest end beat over both hands, `None` without swings.
    pub fn last_beat(&self) -> Option<f32> {
        self.all_swings()
            .map(|s| s.end_beat)
            .max_by(|a, b| a.total_cmp(b))
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(self.bpm().is_finite() && self.bpm() > 0.0) {
            return Err(AnalysisError::InvalidContext(format!(
                "BPM must be positive, got {}",
                self.bpm()
            )));
        }
        if !(self.bucket_seconds.is_finite() && self.bucket_seconds > 0.0) {
            return Err(AnalysisError::InvalidContext(format!(
                "Bucket width must be positive, got {}",
                self.bucket_seconds
            )));
        }
        Ok(())
    }
}

/// Trait that all swing analyzers must implement.
pub trait SwingAnalyzer: Send + Sync + Debug {
    /// Unique name, used as the key of the analyzer's output.
    fn name(&self) -> &str;

    /// Human-readable description of the metric.
    fn description(&self) -> &str;

    /// Computes the metric for both hands' swings.
    fn process(&self, ctx: &AnalysisContext<'_>) -> Result<serde_json::Value, AnalysisError>;
}
