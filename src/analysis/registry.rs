//! Registry for the analyzers run on every processed beatmap.
//!
//! Analyzers are keyed by an opaque [`AnalyzerHandle`] handed out at
//! registration. Iteration follows registration order so reports are
//! deterministic.

use super::analyzer::{AnalysisContext, SwingAnalyzer};
use super::builtin::{
    CoverageAnalyzer, DoublesAnalyzer, HorizontalAnalyzer, SwingsPerSecondAnalyzer,
};
use super::report::{AnalyzerFailure, AnalyzerOutput};
use crate::error::AnalysisError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Opaque key of a registered analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnalyzerHandle(u64);

#[derive(Debug, Default)]
pub struct AnalyzerRegistry {
    analyzers: BTreeMap<AnalyzerHandle, Arc<dyn SwingAnalyzer>>,
    next_handle: u64,
}

impl AnalyzerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in analyzers.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CoverageAnalyzer::new()));
        registry.register(Arc::new(DoublesAnalyzer::new()));
        registry.register(Arc::new(SwingsPerSecondAnalyzer::new()));
        registry.register(Arc::new(HorizontalAnalyzer::new()));
        registry
    }

    /// Registers an analyzer and returns its handle.
    pub fn register(&mut self, analyzer: Arc<dyn SwingAnalyzer>) -> AnalyzerHandle {
        let handle = AnalyzerHandle(self.next_handle);
        self.next_handle += 1;
        log::debug!("ANALYSIS: Registered '{}' as {:?}", analyzer.name(), handle);
        self.analyzers.insert(handle, analyzer);
        handle
    }

    /// Removes the analyzer behind `handle`. Returns whether it existed.
    pub fn unregister(&mut self, handle: AnalyzerHandle) -> bool {
        self.analyzers.remove(&handle).is_some()
    }

    pub fn get(&self, handle: AnalyzerHandle) -> Option<&Arc<dyn SwingAnalyzer>> {
        self.analyzers.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// Names of all registered analyzers, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.analyzers.values().map(|a| a.name()).collect()
    }

    /// Runs every analyzer on `ctx` in parallel. A failing or panicking
    /// analyzer is reported by name and does not affect the others.
    pub fn run_all(
        &self,
        ctx: &AnalysisContext<'_>,
    ) -> (Vec<AnalyzerOutput>, Vec<AnalyzerFailure>) {
        let analyzers: Vec<&Arc<dyn SwingAnalyzer>> = self.analyzers.values().collect();
        let results: Vec<_> = analyzers
            .par_iter()
            .map(|analyzer| (analyzer, run_isolated(analyzer, ctx)))
            .collect();

        let mut outputs = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (analyzer, result) in results {
            match result {
                Ok(value) => outputs.push(AnalyzerOutput {
                    name: analyzer.name().to_string(),
                    description: analyzer.description().to_string(),
                    value,
                }),
                Err(e) => {
                    log::warn!("ANALYSIS: '{}' failed: {}", analyzer.name(), e);
                    failures.push(AnalyzerFailure {
                        name: analyzer.name().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }
        (outputs, failures)
    }
}

/// Runs one analyzer, turning a panic into an error.
fn run_isolated(
    analyzer: &Arc<dyn SwingAnalyzer>,
    ctx: &AnalysisContext<'_>,
) -> Result<serde_json::Value, AnalysisError> {
    panic::catch_unwind(AssertUnwindSafe(|| analyzer.process(ctx))).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(AnalysisError::Other(format!("panicked: {}", message)))
    })
}
