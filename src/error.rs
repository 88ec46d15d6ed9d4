//! Error types for the build driver.
//!
//! Everything below the command boundary returns [`BuildError`]; `main`
//! wraps it in `anyhow` and turns it into a process exit code.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// A compilation that exited unsuccessfully.
#[derive(Debug, Clone)]
pub struct CompileFailure {
    pub source: PathBuf,
    pub status: ExitStatus,
}

#[derive(Debug, Error)]
pub enum BuildError {
    /// `kiln.toml` or a flag-discovery helper is unusable. Fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// An external program could not be started at all.
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The typed command failed validation before it was flattened.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("{} of {total} compilation(s) failed", failures.len())]
    CompileFailed {
        failures: Vec<CompileFailure>,
        total: usize,
    },

    #[error("linking `{output}` failed ({status})")]
    LinkFailed { output: PathBuf, status: ExitStatus },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl BuildError {
    /// Exit code the driver should terminate with.
    ///
    /// Compiler and linker failures forward the tool's own code; a process
    /// killed by a signal has no code and maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::CompileFailed { failures, .. } => failures
                .first()
                .and_then(|f| f.status.code())
                .filter(|code| *code != 0)
                .unwrap_or(1),
            BuildError::LinkFailed { status, .. } => {
                status.code().filter(|code| *code != 0).unwrap_or(1)
            }
            _ => 1,
        }
    }
}
