//! Error types for maven invocation

use std::io;
use thiserror::Error;

/// Errors surfaced by the builder, locator and invocation layers
#[derive(Debug, Error)]
pub enum MavenError {
    #[error("maven executable not found (searched {})", .searched.join(", "))]
    ExecutableNotFound { searched: Vec<String> },

    #[error("cannot finalize a command with no targets")]
    NoTargets,

    #[error("command is already finalized")]
    AlreadyFinalized,

    #[error("nothing to execute: no pending command and empty history")]
    NothingToExecute,

    #[error("failed to invoke `{}`: {source}", .argv.join(" "))]
    Invocation {
        argv: Vec<String>,
        #[source]
        source: io::Error,
    },

    #[error("version probe exited with code {exit_code}")]
    VersionProbeFailed { exit_code: i32, output: String },

    #[error("version output matched no known maven family")]
    VersionUnrecognized { output: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, MavenError>;
