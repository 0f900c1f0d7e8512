//! Fixed-width time buckets shared by the built-in analyzers.

use super::analyzer::AnalysisContext;
use crate::error::AnalysisError;
use crate::timing::beats_to_seconds;
use serde::{Deserialize, Serialize};

/// An overall value plus one value per time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketedValue {
    pub overall_value: f32,
    pub bucket_values: Vec<f32>,
    pub seconds_per_bucket: f32,
}

/// A value tracked separately for each hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerHand<T> {
    pub left_hand: T,
    pub right_hand: T,
}

/// Upper bound on buckets per map; ten-second buckets cover about eleven days.
pub const MAX_BUCKETS: usize = 100_000;

/// Maps beats to bucket indices for one beatmap.
#[derive(Debug, Clone, Copy)]
pub struct Buckets {
    bpm: f32,
    seconds_per_bucket: f32,
    count: usize,
}

impl Buckets {
    /// Enough buckets to hold the latest swing of either hand; none when
    /// both hands are empty. Fails when that would exceed [`MAX_BUCKETS`].
    pub fn new(ctx: &AnalysisContext<'_>) -> Result<Self, AnalysisError> {
        ctx.validate()?;
        let mut buckets = Self {
            bpm: ctx.bpm(),
            seconds_per_bucket: ctx.bucket_seconds,
            count: 0,
        };
        if let Some(last) = ctx.last_beat() {
            let count = buckets.raw_index(last).saturating_add(1);
            if count > MAX_BUCKETS {
                return Err(AnalysisError::InvalidContext(format!(
                    "Last swing at beat {} needs more than {} buckets",
                    last, MAX_BUCKETS
                )));
            }
            buckets.count = count;
        }
        Ok(buckets)
    }

    fn raw_index(&self, beat: f32) -> usize {
        let seconds = beats_to_seconds(self.bpm, beat).max(0.0);
        (seconds / self.seconds_per_bucket).floor() as usize
    }

    /// Bucket of `beat`, clamped into range.
    pub fn index(&self, beat: f32) -> usize {
        let index = self.raw_index(beat);
        if index >= self.count {
            log::warn!(
                "ANALYSIS: Beat {} falls outside {} buckets, clamping",
                beat,
                self.count
            );
            return self.count.saturating_sub(1);
        }
        index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn seconds_per_bucket(&self) -> f32 {
        self.seconds_per_bucket
    }

    /// Packs an overall value with per-bucket values.
    pub fn value(&self, overall_value: f32, bucket_values: Vec<f32>) -> BucketedValue {
        BucketedValue {
            overall_value,
            bucket_values,
            seconds_per_bucket: self.seconds_per_bucket,
        }
    }
}

/// `numerator / denominator`, or 0 for an empty denominator.
pub(crate) fn ratio(numerator: f32, denominator: f32) -> f32 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
