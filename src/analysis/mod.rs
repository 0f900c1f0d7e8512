//! Swing analysis.
//!
//! Analyzers fold over both hands' swing maps and produce bucketed and
//! overall statistics. The [`SwingPipeline`] builds the swing maps of a
//! beatmap and runs every analyzer in an [`AnalyzerRegistry`] over them.

pub mod analyzer;
pub mod bucketed;
pub mod builtin;
pub mod pipeline;
pub mod registry;
pub mod report;

pub use analyzer::{AnalysisContext, SwingAnalyzer};
pub use bucketed::{BucketedValue, Buckets, PerHand};
pub use builtin::{CoverageAnalyzer, DoublesAnalyzer, HorizontalAnalyzer, SwingsPerSecondAnalyzer};
pub use pipeline::SwingPipeline;
pub use registry::{AnalyzerHandle, AnalyzerRegistry};
pub use report::{AnalysisReport, AnalyzerFailure, AnalyzerOutput};
