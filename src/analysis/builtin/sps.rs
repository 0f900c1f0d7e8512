//! Swings per second, over the whole map and per bucket.

use crate::analysis::analyzer::{AnalysisContext, SwingAnalyzer};
use crate::analysis::bucketed::{Buckets, ratio};
use crate::error::AnalysisError;
use crate::timing::beats_to_seconds;

#[derive(Debug, Default)]
pub struct SwingsPerSecondAnalyzer;

impl SwingsPerSecondAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl SwingAnalyzer for SwingsPerSecondAnalyzer {
    fn name(&self) -> &str {
        "swings_per_second"
    }

    fn description(&self) -> &str {
        "Swings of both hands per second of song"
    }

    fn process(&self, ctx: &AnalysisContext<'_>) -> Result<serde_json::Value, AnalysisError> {
        let buckets = Buckets::new(ctx)?;
        let duration = match (ctx.duration_seconds, ctx.last_beat()) {
            (Some(seconds), _) => seconds,
            (None, Some(beat)) => beats_to_seconds(ctx.bpm(), beat),
            (None, None) => return Err(AnalysisError::EmptySwingMaps),
        };

        let mut counts = vec![0usize; buckets.count()];
        let mut total = 0usize;
        for swing in ctx.all_swings() {
            total += 1;
            if let Some(count) = counts.get_mut(buckets.index(swing.start_beat)) {
                *count += 1;
            }
        }

        let value = buckets.value(
            ratio(total as f32, duration),
            counts
                .iter()
                .map(|&c| c as f32 / buckets.seconds_per_bucket())
                .collect(),
        );
        Ok(serde_json::to_value(value)?)
    }
}
