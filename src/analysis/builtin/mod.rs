//! Built-in swing analyzers.

mod coverage;
mod doubles;
mod horizontal;
mod sps;

pub use coverage::CoverageAnalyzer;
pub use doubles::DoublesAnalyzer;
pub use horizontal::HorizontalAnalyzer;
pub use sps::SwingsPerSecondAnalyzer;
