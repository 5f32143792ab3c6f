// Error taxonomy for a generation run

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can end a generation run early
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("No active selection or source file")]
    NoActiveContext,

    #[error("No method signature found in the selected text")]
    NoSignatureMatch,

    #[error("Cancelled by user")]
    UserCancelled,

    #[error("No workspace is currently open")]
    NoWorkspace,

    #[error("Path {path} does not match the expected layout (missing '{marker}')")]
    PathPatternMismatch { path: String, marker: String },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No private field declarations found in {0}")]
    NoFieldsFound(String),

    #[error("No delete marker or identifying field among: {}", .0.join(", "))]
    NoIdentifyingField(Vec<String>),

    #[error("Failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown query type: {0}")]
    UnknownQueryKind(String),
}

impl GeneratorError {
    /// Errors that are reported as a plain message before exiting cleanly.
    /// Nothing has been written when one of these is raised.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            GeneratorError::UserCancelled
                | GeneratorError::NoActiveContext
                | GeneratorError::NoWorkspace
                | GeneratorError::PathPatternMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
