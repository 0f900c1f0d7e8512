//! Horizontal-angle ratio per hand: 0 for vertical cuts (and dots), 1 for
//! horizontal cuts, 0.5 for diagonals.

use crate::analysis::analyzer::{AnalysisContext, SwingAnalyzer};
use crate::analysis::bucketed::{BucketedValue, Buckets, PerHand, ratio};
use crate::error::AnalysisError;
use crate::models::{CutDirection, Hand};

pub fn horizontalness(direction: CutDirection) -> f32 {
    match direction {
        CutDirection::Up | CutDirection::Down | CutDirection::Any => 0.0,
        CutDirection::Left | CutDirection::Right => 1.0,
        CutDirection::UpLeft
        | CutDirection::UpRight
        | CutDirection::DownLeft
        | CutDirection::DownRight => 0.5,
    }
}

#[derive(Debug, Default)]
pub struct HorizontalAnalyzer;

impl HorizontalAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn hand_value(ctx: &AnalysisContext<'_>, buckets: &Buckets, hand: Hand) -> BucketedValue {
        let mut sums = vec![(0.0f32, 0.0f32); buckets.count()];
        let (mut sum, mut count) = (0.0f32, 0.0f32);
        for note in ctx.swings(hand).iter().flat_map(|s| s.notes.iter()) {
            let value = horizontalness(note.direction);
            sum += value;
            count += 1.0;
            if let Some(bucket) = sums.get_mut(buckets.index(note.beat)) {
                bucket.0 += value;
                bucket.1 += 1.0;
            }
        }
        buckets.value(
            ratio(sum, count),
            sums.iter().map(|&(s, c)| ratio(s, c)).collect(),
        )
    }
}

impl SwingAnalyzer for HorizontalAnalyzer {
    fn name(&self) -> &str {
        "horizontal"
    }

    fn description(&self) -> &str {
        "Average horizontalness of cut directions, per hand"
    }

    fn process(&self, ctx: &AnalysisContext<'_>) -> Result<serde_json::Value, AnalysisError> {
        let buckets = Buckets::new(ctx)?;
        let value = PerHand {
            left_hand: Self::hand_value(ctx, &buckets, Hand::Left),
            right_hand: Self::hand_value(ctx, &buckets, Hand::Right),
        };
        Ok(serde_json::to_value(value)?)
    }
}
