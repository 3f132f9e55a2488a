//! Shared types and utilities used by the analysis crates: the error
//! taxonomy, small metadata types, and glob matching for ignore patterns.

pub mod error;
pub mod glob;
pub mod types;

pub use error::AnalysisError;
pub use types::AnalysisMetadata;
