//! Shared error taxonomy for the analysis crates.

/// Common error type for analysis operations.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("file system error: {0}")]
    FileSystemError(String),

    #[error("parse error in {file}: {message}")]
    ParseError { file: String, message: String },

    #[error("plugin '{plugin}' extraction error in {file}: {message}")]
    PluginExtractionError {
        plugin: String,
        file: String,
        message: String,
    },

    #[error("internal invariant violated: {0}")]
    Internal(String),
}
