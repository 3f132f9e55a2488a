//! Small shared value types used across analysis crates.

use serde::{Deserialize, Serialize};

/// Metadata describing an analysis engine's identity and capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
    pub symbol_kinds_supported: Vec<String>,
}
