use std::path::PathBuf;

use thiserror::Error;

/// Typed error values for tidyfs operations.
///
/// `anyhow` handles the binary boundary; these variants exist where callers
/// need to distinguish failure classes: entry-local errors are skipped and
/// logged, operation-precondition errors abort one operation, and workspace
/// errors abort the whole run.
#[derive(Debug, Error)]
pub enum TidyError {
    /// File system operation failed on a specific path
    #[error("I/O error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Target directory for an operation does not exist
    #[error("directory not found: '{}'", .0.display())]
    MissingRoot(PathBuf),

    /// Target path exists but is not a directory
    #[error("not a directory: '{}'", .0.display())]
    NotADirectory(PathBuf),

    /// Rename refused because the destination already exists
    #[error("refusing to overwrite existing path: '{}'", .0.display())]
    DestinationExists(PathBuf),

    /// Mutation refused because the path is on the protected list
    #[error("refusing to touch protected path: '{}'", .0.display())]
    ProtectedPath(PathBuf),

    /// Scoped workspace could not be created or written — fatal to the run
    #[error("workspace error: {0}")]
    Workspace(String),

    /// Hash computation failed for one file
    #[error("hash failed for '{}': {source}", .path.display())]
    Hash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is invalid
    #[error("config error in '{}': {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl TidyError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TidyError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error must abort the whole run rather than one
    /// operation. Losing scratch storage mid-run is the one case nothing
    /// downstream can recover from.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TidyError::Workspace(_))
    }
}
