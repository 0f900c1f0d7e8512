//! Doubles ratio: how often both hands swing together.

use crate::analysis::analyzer::{AnalysisContext, SwingAnalyzer};
use crate::analysis::bucketed::{Buckets, ratio};
use crate::error::AnalysisError;
use crate::models::Swing;

/// Start beats closer than this count as simultaneous.
const SAME_BEAT: f32 = 1e-3;

#[derive(Debug, Default)]
pub struct DoublesAnalyzer;

impl DoublesAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    singles: f32,
    doubles: f32,
}

impl Tally {
    fn ratio(&self) -> f32 {
        ratio(self.doubles, self.singles + self.doubles)
    }
}

impl SwingAnalyzer for DoublesAnalyzer {
    fn name(&self) -> &str {
        "doubles"
    }

    fn description(&self) -> &str {
        "Share of swing moments where both hands cut at the same beat"
    }

    fn process(&self, ctx: &AnalysisContext<'_>) -> Result<serde_json::Value, AnalysisError> {
        let buckets = Buckets::new(ctx)?;
        let left: Vec<&Swing> = ctx.left_hand.iter().filter(|s| s.is_cut()).collect();
        let right: Vec<&Swing> = ctx.right_hand.iter().filter(|s| s.is_cut()).collect();

        let mut overall = Tally::default();
        let mut per_bucket = vec![Tally::default(); buckets.count()];
        let mut record = |beat: f32, double: bool| {
            let index = buckets.index(beat);
            for tally in [Some(&mut overall), per_bucket.get_mut(index)].into_iter().flatten() {
                if double {
                    tally.doubles += 1.0;
                } else {
                    tally.singles += 1.0;
                }
            }
        };

        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            let (l, r) = (left[i].start_beat, right[j].start_beat);
            if (l - r).abs() <= SAME_BEAT {
                record(l, true);
                i += 1;
                j += 1;
            } else if l < r {
                record(l, false);
                i += 1;
            } else {
                record(r, false);
                j += 1;
            }
        }
        for swing in left[i..].iter().chain(right[j..].iter()) {
            record(swing.start_beat, false);
        }

        let value = buckets.value(
            overall.ratio(),
            per_bucket.iter().map(Tally::ratio).collect(),
        );
        Ok(serde_json::to_value(value)?)
    }
}
