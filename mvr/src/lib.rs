//! mavenrunner - programmatic command builder and invoker for Apache Maven
//!
//! Assembles maven invocations (options, goals/phases, `-Dkey=value`
//! parameters), dispatches them as blocking subprocesses and records output
//! and exit status. The builder lives in a [`CommandContext`] that finalizes
//! into an immutable argv; a [`Maven`] handle accumulates builder calls,
//! executes on demand and keeps the history of executed commands.
//!
//! # Example
//!
//! ```ignore
//! use mavenrunner::Maven;
//!
//! let mut maven = Maven::discover()?.with_working_dir("/proj");
//! maven.targets(["clean", "install"]).set_parameter("skipTests", "true");
//! let result = maven.result_blocking()?;
//! println!("exit {}: {}", result.exit_code().unwrap_or(-1), result.output().unwrap_or(""));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod quote;
pub mod system;
pub mod version;

mod context;
mod maven;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{CommandContext, ContextState};
pub use error::{MavenError, Result};
pub use lifecycle::{all_phases, is_goal, is_phase};
pub use maven::Maven;
pub use quote::quote;
pub use system::{ProcessRunner, RunOutput, SystemRunner, locate_maven, maven_executable_name};
pub use version::{VersionFamily, VersionInfo, VersionMatcher, detect_version, probe_version};
