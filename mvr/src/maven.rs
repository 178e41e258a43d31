//! The maven handle: pending command, history, and invocation paths

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::debug;

use crate::context::{CommandContext, ContextState};
use crate::error::{MavenError, Result};
use crate::system::{ProcessRunner, SystemRunner, locate_maven};
use crate::version::{VersionInfo, probe_version};

/// Handle on a maven installation.
///
/// Accumulates builder calls into a single pending [`CommandContext`],
/// executes it on demand and keeps every executed context in history. One
/// logical build-orchestration thread per handle; execution blocks until the
/// spawned process exits, with no timeout or cancellation — a hung invocation
/// is the caller's to kill.
pub struct Maven {
    executable_path: PathBuf,
    working_dir: Option<PathBuf>,
    env: BTreeMap<String, String>,
    pending: Option<CommandContext>,
    history: Vec<CommandContext>,
    runner: Box<dyn ProcessRunner>,
}

impl Maven {
    /// Handle over an explicit executable path
    pub fn new(executable_path: impl Into<PathBuf>) -> Self {
        Self {
            executable_path: executable_path.into(),
            working_dir: None,
            env: BTreeMap::new(),
            pending: None,
            history: Vec::new(),
            runner: Box::new(SystemRunner),
        }
    }

    /// Handle over the maven located via `PATH` / `M2_HOME` / `MAVEN_HOME`
    pub fn discover() -> Result<Self> {
        Ok(Self::new(locate_maven()?))
    }

    /// Locate maven, probe its version, and return the handle together with
    /// what was detected
    pub fn autodetect() -> Result<(Self, VersionInfo)> {
        let maven = Self::discover()?;
        let info = maven.version()?;
        Ok((maven, info))
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Add an environment override applied to every spawn
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Swap the process runner (test seam)
    pub fn with_runner(mut self, runner: Box<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn executable_path(&self) -> &Path {
        &self.executable_path
    }

    pub fn set_executable_path(&mut self, path: impl Into<PathBuf>) {
        self.executable_path = path.into();
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn set_working_dir(&mut self, dir: impl Into<PathBuf>) {
        self.working_dir = Some(dir.into());
    }

    /// Environment overrides applied to every spawn
    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn set_env(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.env.insert(key.into(), value.into());
    }

    /// Every executed context, in execution order
    pub fn history(&self) -> &[CommandContext] {
        &self.history
    }

    /// The most recently executed context, if any
    pub fn last_result(&self) -> Option<&CommandContext> {
        self.history.last()
    }

    /// The context currently being built, if any
    pub fn pending(&self) -> Option<&CommandContext> {
        self.pending.as_ref()
    }

    /// Append option tokens to the pending command; an empty iterator clears
    /// the option list instead. Mutating after execution starts a fresh
    /// pending command.
    pub fn options<I, S>(&mut self, options: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let pending = self.pending_building();
        if options.is_empty() {
            pending.reset_options();
        } else {
            pending.push_options(options);
        }
        self
    }

    /// Append goals or lifecycle phases to the pending command; an empty
    /// iterator clears the target list instead. Mutating after execution
    /// starts a fresh pending command.
    pub fn targets<I, S>(&mut self, targets: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let targets: Vec<String> = targets.into_iter().map(Into::into).collect();
        let pending = self.pending_building();
        if targets.is_empty() {
            pending.reset_targets();
        } else {
            pending.push_targets(targets);
        }
        self
    }

    /// Store a `-D<key>=<value>` parameter on the pending command
    pub fn set_parameter(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pending_building().insert_parameter(key.into(), value.into());
        self
    }

    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.options([option.into()]);
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.targets([target.into()]);
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_parameter(key, value);
        self
    }

    /// Finalize and execute the pending command if there is one, then return
    /// the most recent result. Blocks until the spawned process exits.
    ///
    /// Errors with [`MavenError::NothingToExecute`] when nothing is pending
    /// and nothing has been executed yet.
    pub fn result_blocking(&mut self) -> Result<&CommandContext> {
        if self.pending.is_some() {
            self.execute_pending()?;
        }
        self.history.last().ok_or(MavenError::NothingToExecute)
    }

    /// Explicit invocation path: duplicate the pending command (which stays
    /// untouched), merge `parameters`, append `targets`, execute immediately
    /// and return the executed context.
    pub fn invoke<I, S>(&mut self, targets: I, parameters: &[(&str, &str)]) -> Result<&CommandContext>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut context = self.pending.as_ref().map(CommandContext::duplicate).unwrap_or_default();
        for (key, value) in parameters {
            context.insert_parameter((*key).to_string(), (*value).to_string());
        }
        context.push_targets(targets.into_iter().map(Into::into).collect());

        context.execute(&*self.runner, &self.executable_path, self.working_dir.as_deref(), &self.env)?;
        debug!("invoked: {}", context.command_line().unwrap_or_default());

        self.history.push(context);
        self.history.last().ok_or(MavenError::NothingToExecute)
    }

    /// Probe the executable's version. See [`crate::version`].
    pub fn version(&self) -> Result<VersionInfo> {
        probe_version(&self.executable_path, &*self.runner)
    }

    /// Execute the pending command and move it into history. On error the
    /// pending command is kept so the caller can repair it (for instance by
    /// adding a missing target).
    fn execute_pending(&mut self) -> Result<()> {
        let Some(context) = self.pending.as_mut() else {
            return Ok(());
        };
        context.execute(&*self.runner, &self.executable_path, self.working_dir.as_deref(), &self.env)?;

        if let Some(executed) = self.pending.take() {
            self.history.push(executed);
        }
        Ok(())
    }

    /// The pending context, creating a fresh one when absent or when the
    /// previous one has already been finalized or executed
    fn pending_building(&mut self) -> &mut CommandContext {
        if self.pending.as_ref().is_some_and(|c| c.state() != ContextState::Building) {
            debug!("previous command finalized; starting a fresh one");
            self.pending = None;
        }
        self.pending.get_or_insert_with(CommandContext::new)
    }
}
