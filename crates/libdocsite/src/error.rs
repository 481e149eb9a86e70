use std::{path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// Errors produced while staging files or running external build tools.
#[derive(Error, Debug)]
pub enum DocsiteError {
    /// A file the build needs to read does not exist.
    #[error("file not found: {0}")]
    MissingFile(PathBuf),

    /// The backup path already holds a file and the clobber policy forbids
    /// overwriting it.
    #[error("backup path already exists: {0}")]
    BackupExists(PathBuf),

    /// The external program could not be resolved on PATH.
    #[error("command not found on PATH: {0}")]
    CommandNotFound(String),

    /// The external program ran but exited non-zero.
    #[error("command `{command}` failed with {status}")]
    CommandFailed {
        /// The command line that was executed.
        command: String,
        /// The child's exit status.
        status: ExitStatus,
    },

    /// A user-supplied command string could not be split into words.
    #[error("failed to parse command line: {0}")]
    CommandParse(#[from] shell_words::ParseError),

    /// A command string parsed to zero words.
    #[error("empty command line")]
    EmptyCommand,

    /// Any filesystem failure during copy, create or delete.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DocsiteError>;
