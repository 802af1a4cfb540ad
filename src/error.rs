use thiserror::Error;
use tracing::{error, warn};

/// Domain errors for the launcher core.
///
/// Not-found variants are raised synchronously, before any gateway I/O is
/// attempted. Persistence failures from a mutator's write-through save
/// propagate to the caller unchanged; load failures never surface here
/// (stores downgrade them to an empty reset).
#[derive(Error, Debug)]
pub enum Error {
    #[error("script not found: {0}")]
    ScriptNotFound(String),

    #[error("snippet not found: {0}")]
    SnippetNotFound(String),

    #[error("command {command_id} not found in script {script_id}")]
    CommandNotFound {
        script_id: String,
        command_id: String,
    },

    #[error("config persistence failed: {0}")]
    Persistence(String),

    #[error("command execution failed: {0}")]
    Execution(String),

    #[error("clipboard write failed: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the caller doesn't need to know.
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?err,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?err,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}
