//! End-to-end processing of one beatmap: build both hands' swing maps, then
//! run every registered analyzer over them.

use super::analyzer::AnalysisContext;
use super::registry::AnalyzerRegistry;
use super::report::AnalysisReport;
use crate::config::SliceMapConfig;
use crate::error::SliceMapError;
use crate::models::{Beatmap, Hand, MapMetadata};
use crate::slicemap::SliceMap;

#[derive(Debug)]
pub struct SwingPipeline {
    registry: AnalyzerRegistry,
    config: SliceMapConfig,
}

impl Default for SwingPipeline {
    fn default() -> Self {
        Self::new(SliceMapConfig::default())
    }
}

impl SwingPipeline {
    /// Creates a pipeline with the built-in analyzers.
    pub fn new(config: SliceMapConfig) -> Self {
        Self::with_registry(AnalyzerRegistry::with_builtin(), config)
    }

    pub fn with_registry(registry: AnalyzerRegistry, config: SliceMapConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &AnalyzerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AnalyzerRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &SliceMapConfig {
        &self.config
    }

    /// Builds the left and right swing maps in parallel.
    pub fn build_hands(&self, beatmap: &Beatmap) -> Result<(SliceMap, SliceMap), SliceMapError> {
        let (left, right) = rayon::join(
            || SliceMap::from_beatmap(beatmap, Hand::Left, &self.config),
            || SliceMap::from_beatmap(beatmap, Hand::Right, &self.config),
        );
        Ok((left?, right?))
    }

    /// Runs every analyzer over already built swing maps.
    pub fn analyze(
        &self,
        metadata: &MapMetadata,
        left: SliceMap,
        right: SliceMap,
    ) -> AnalysisReport {
        let (left_hand, right_hand) = (left.into_swings(), right.into_swings());
        let ctx = AnalysisContext::new(
            metadata,
            &left_hand,
            &right_hand,
            self.config.analysis.bucket_seconds,
        );
        let (analytics, failures) = self.registry.run_all(&ctx);
        log::info!(
            "ANALYSIS: {} [{}]: {} analyzers ok, {} failed",
            metadata.song_name,
            metadata.difficulty,
            analytics.len(),
            failures.len()
        );
        AnalysisReport {
            metadata: metadata.clone(),
            left_hand,
            right_hand,
            analytics,
            failures,
        }
    }

    /// Builds both swing maps and analyzes them. Malformed input fails the
    /// whole beatmap; analyzer failures are recorded in the report.
    pub fn process(&self, beatmap: &Beatmap) -> Result<AnalysisReport, SliceMapError> {
        let (left, right) = self.build_hands(beatmap)?;
        let mut metadata = beatmap.metadata.clone();
        if metadata.hash.is_none() {
            metadata.hash = Some(beatmap.content_hash());
        }
        Ok(self.analyze(&metadata, left, right))
    }
}
