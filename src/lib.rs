//! Swing reconstruction and swing analytics for block-slicing rhythm game
//! beatmaps.
//!
//! Given the notes, bombs and obstacles of one difficulty, [`SliceMap::build`]
//! reconstructs the swings each hand performs: which notes are cut together,
//! whether each swing is a forehand or backhand, where the hand resets, and
//! the angles the blade travels through. [`SwingPipeline`] builds both hands
//! and runs a registry of analyzers over the result.
//!
//! ```no_run
//! use slicemap::{Beatmap, SliceMapConfig, SwingPipeline};
//!
//! # fn run(beatmap: &Beatmap) -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = SwingPipeline::new(SliceMapConfig::default());
//! let report = pipeline.process(beatmap)?;
//! println!("{}", report.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod geometry;
pub mod models;
pub mod parity;
pub mod slicemap;
pub mod timing;

pub use analysis::{AnalysisContext, AnalysisReport, AnalyzerRegistry, SwingAnalyzer, SwingPipeline};
pub use config::{AnalysisConfig, ParityConfig, SliceMapConfig};
pub use error::{AnalysisError, ConfigError, SliceMapError};
pub use models::{
    Beatmap, Bomb, CutDirection, DifficultyRank, Hand, MapMetadata, Note, Obstacle,
    ObstacleHeight, Parity, Positioning, ResetType, Swing, SwingKind,
};
pub use parity::{ParityContext, ParityDecision, ParityStrategy};
pub use slicemap::SliceMap;
