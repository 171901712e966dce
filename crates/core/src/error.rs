use std::io;
use std::path::PathBuf;

/// Errors that can occur while assembling or writing a solution
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to evaluate project {}: {reason}", path.display())]
    ProjectEvaluation { path: PathBuf, reason: String },

    #[error("Cannot express {} relative to {}", path.display(), base.display())]
    RelativePathUnresolvable { path: PathBuf, base: PathBuf },

    #[error("Path is not valid Unicode: {}", path.display())]
    NonUnicodePath { path: PathBuf },

    #[error("No project files found")]
    NoProjectsFound,

    #[error("Unrecognized project type: {}", path.display())]
    UnrecognizedProjectType { path: PathBuf },

    #[error("Invalid entry point {}: {source}", path.display())]
    InvalidEntryPoint {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write solution file {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error aborts the run.
    ///
    /// Recovered errors are collected into the generation report while the
    /// run carries on without the affected project or entry.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::ProjectEvaluation { .. }
                | Error::RelativePathUnresolvable { .. }
                | Error::UnrecognizedProjectType { .. }
                | Error::NonUnicodePath { .. }
        )
    }
}

/// Result type alias for solgen operations
pub type Result<T> = std::result::Result<T, Error>;
