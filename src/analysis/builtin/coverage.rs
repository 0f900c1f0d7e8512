//! Accuracy grid coverage: how many of the 4x3 positions x 2 colours x 9
//! directions the map actually uses.

use crate::analysis::analyzer::{AnalysisContext, SwingAnalyzer};
use crate::analysis::bucketed::Buckets;
use crate::error::AnalysisError;
use crate::models::{CutDirection, GRID_COLUMNS, GRID_ROWS, Hand, Note};
use std::collections::HashSet;

/// Number of distinct (x, y, colour, direction) cells.
pub const GRID_CELLS: usize = (GRID_COLUMNS * GRID_ROWS) as usize * 2 * 9;

type GridKey = (i32, i32, Hand, CutDirection);

fn key(note: &Note) -> GridKey {
    (note.x, note.y, note.color, note.direction)
}

#[derive(Debug, Default)]
pub struct CoverageAnalyzer;

impl CoverageAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl SwingAnalyzer for CoverageAnalyzer {
    fn name(&self) -> &str {
        "coverage"
    }

    fn description(&self) -> &str {
        "Fraction of the position/colour/direction grid hit at least once"
    }

    fn process(&self, ctx: &AnalysisContext<'_>) -> Result<serde_json::Value, AnalysisError> {
        let buckets = Buckets::new(ctx)?;
        let mut overall: HashSet<GridKey> = HashSet::new();
        let mut per_bucket: Vec<HashSet<GridKey>> = vec![HashSet::new(); buckets.count()];

        for note in ctx.all_swings().flat_map(|s| s.notes.iter()) {
            overall.insert(key(note));
            if let Some(bucket) = per_bucket.get_mut(buckets.index(note.beat)) {
                bucket.insert(key(note));
            }
        }

        let factor = |cells: usize| cells as f32 / GRID_CELLS as f32;
        let value = buckets.value(
            factor(overall.len()),
            per_bucket.iter().map(|b| factor(b.len())).collect(),
        );
        Ok(serde_json::to_value(value)?)
    }
}
