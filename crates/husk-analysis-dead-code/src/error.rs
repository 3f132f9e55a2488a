//! Error types for dead code analysis.

use thiserror::Error;

/// Errors that can occur while running the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// `manifest.json` or `lock.json` is missing or malformed. Fatal: raised
    /// before any collection or analysis runs.
    #[error("configuration error: {0}")]
    Config(String),

    /// A source file could not be read or parsed. Non-fatal: the file is
    /// excluded from collection, analysis proceeds without it.
    #[error("parse error in {file}: {message}")]
    Parse { file: String, message: String },

    /// A plugin failed while scanning a project file for synthetic
    /// references. Non-fatal: the plugin's contribution from that file is
    /// simply absent.
    #[error("plugin '{plugin}' extraction error in {file}: {message}")]
    PluginExtraction {
        plugin: String,
        file: String,
        message: String,
    },

    /// File system error unrelated to parsing a specific source file.
    #[error("file system error: {0}")]
    FileSystem(String),

    /// Reserved for invariants analyzers are not expected to violate.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<husk_analysis_common::AnalysisError> for Error {
    fn from(err: husk_analysis_common::AnalysisError) -> Self {
        use husk_analysis_common::AnalysisError as Ae;
        match err {
            Ae::ConfigError(msg) => Error::Config(msg),
            Ae::FileSystemError(msg) => Error::FileSystem(msg),
            Ae::ParseError { file, message } => Error::Parse { file, message },
            Ae::PluginExtractionError {
                plugin,
                file,
                message,
            } => Error::PluginExtraction {
                plugin,
                file,
                message,
            },
            Ae::Internal(msg) => Error::Internal(msg),
        }
    }
}
