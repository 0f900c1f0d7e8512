//! Analysis report: map identity, both swing maps and every analyzer's
//! payload.

use crate::error::AnalysisError;
use crate::models::{MapMetadata, Swing};
use serde::{Deserialize, Serialize};

/// One analyzer's result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerOutput {
    pub name: String,
    pub description: String,
    pub value: serde_json::Value,
}

/// An analyzer that failed, with its error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerFailure {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: MapMetadata,
    pub left_hand: Vec<Swing>,
    pub right_hand: Vec<Swing>,
    pub analytics: Vec<AnalyzerOutput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<AnalyzerFailure>,
}

impl AnalysisReport {
    /// The output of the analyzer called `name`, if it succeeded.
    pub fn output(&self, name: &str) -> Option<&AnalyzerOutput> {
        self.analytics.iter().find(|o| o.name == name)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String, AnalysisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
