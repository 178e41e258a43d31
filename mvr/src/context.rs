//! Command context state machine
//!
//! A [`CommandContext`] is the builder/record for one maven invocation. It
//! starts out mutable (`Building`), turns into an immutable argv on
//! [`finalize`](CommandContext::finalize), and records the outcome of
//! [`execute`](CommandContext::execute). The transition is one-way.

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;

use crate::error::{MavenError, Result};
use crate::quote::quote;
use crate::system::{ProcessRunner, RunOutput};

/// Lifecycle state of a [`CommandContext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// Mutable: options, targets and parameters may still change
    Building,
    /// argv computed; immutable but not yet run
    Finalized,
    /// Ran to completion; output and exit code recorded. Terminal.
    Executed,
}

/// Builder and record for a single maven invocation
#[derive(Debug, Clone)]
pub struct CommandContext {
    options: Vec<String>,
    targets: Vec<String>,
    parameters: BTreeMap<String, String>,
    state: ContextState,
    argv: Option<Vec<String>>,
    output: Option<String>,
    exit_code: Option<i32>,
}

impl CommandContext {
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            targets: Vec::new(),
            parameters: BTreeMap::new(),
            state: ContextState::Building,
            argv: None,
            output: None,
            exit_code: None,
        }
    }

    pub fn state(&self) -> ContextState {
        self.state
    }

    /// Option tokens in the order they were added
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Goals and lifecycle phases in the order they were added
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// The computed argv; `None` until finalized
    pub fn argv(&self) -> Option<&[String]> {
        self.argv.as_deref()
    }

    /// Combined stdout/stderr of the invocation; `None` until executed
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// The tool's own exit code; `None` until executed
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Space-joined rendering of the finalized argv, for logs and display
    pub fn command_line(&self) -> Option<String> {
        self.argv.as_ref().map(|argv| argv.join(" "))
    }

    /// Append option tokens. Errors once the context is finalized.
    pub fn add_options<I, S>(&mut self, options: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ensure_building()?;
        self.push_options(options.into_iter().map(Into::into).collect());
        Ok(self)
    }

    /// Reset the option list. Errors once the context is finalized.
    pub fn clear_options(&mut self) -> Result<&mut Self> {
        self.ensure_building()?;
        self.reset_options();
        Ok(self)
    }

    /// Append goals or lifecycle phases. Errors once the context is finalized.
    pub fn add_targets<I, S>(&mut self, targets: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ensure_building()?;
        self.push_targets(targets.into_iter().map(Into::into).collect());
        Ok(self)
    }

    /// Reset the target list. Errors once the context is finalized.
    pub fn clear_targets(&mut self) -> Result<&mut Self> {
        self.ensure_building()?;
        self.reset_targets();
        Ok(self)
    }

    /// Store a `-D<key>=<value>` parameter. Errors once the context is
    /// finalized. A repeated key overwrites the earlier value.
    pub fn set_parameter(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<&mut Self> {
        self.ensure_building()?;
        self.insert_parameter(key.into(), value.into());
        Ok(self)
    }

    /// One-way transition to `Finalized`: validates targets, injects the
    /// project-file option when needed and computes the immutable argv.
    ///
    /// When no option token is `-f`/`--file` and `working_dir` is set,
    /// `--file <working_dir>` is appended so maven resolves the intended
    /// project unless the caller explicitly overrode it.
    pub fn finalize(&mut self, executable: &Path, working_dir: Option<&Path>) -> Result<()> {
        if self.state != ContextState::Building {
            return Err(MavenError::AlreadyFinalized);
        }
        if self.targets.is_empty() {
            return Err(MavenError::NoTargets);
        }

        if let Some(dir) = working_dir {
            if !self.has_project_file_option() {
                self.options.push("--file".to_string());
                self.options.push(dir.display().to_string());
            }
        }

        let mut argv = Vec::with_capacity(1 + self.options.len() + self.targets.len() + self.parameters.len());
        argv.push(executable.display().to_string());
        argv.extend(self.options.iter().cloned());
        argv.extend(self.targets.iter().cloned());
        for (name, value) in &self.parameters {
            argv.push(format!("-D{}={}", name, quote(value)));
        }

        debug!("finalized command: {}", argv.join(" "));
        self.argv = Some(argv);
        self.state = ContextState::Finalized;
        Ok(())
    }

    /// Run the command via `runner`, recording output and exit code.
    ///
    /// Auto-finalizes a still-building context. The tool's own non-zero exit
    /// is not an error; only a spawn-level failure from the runner is.
    pub fn execute(
        &mut self,
        runner: &dyn ProcessRunner,
        executable: &Path,
        working_dir: Option<&Path>,
        env: &BTreeMap<String, String>,
    ) -> Result<()> {
        match self.state {
            ContextState::Building => self.finalize(executable, working_dir)?,
            ContextState::Finalized => {}
            ContextState::Executed => return Err(MavenError::AlreadyFinalized),
        }

        let argv = self.argv.clone().unwrap_or_default();
        let RunOutput { exit_code, output } = runner.run(&argv, working_dir, env)?;
        debug!("command exited with code {}", exit_code);

        self.output = Some(output);
        self.exit_code = Some(exit_code);
        self.state = ContextState::Executed;
        Ok(())
    }

    /// Produce a fresh `Building` context copying options, targets and
    /// parameters by value. Works on a context in any state; the copy never
    /// aliases the original, so mutating it leaves the original untouched.
    pub fn duplicate(&self) -> CommandContext {
        CommandContext {
            options: self.options.clone(),
            targets: self.targets.clone(),
            parameters: self.parameters.clone(),
            state: ContextState::Building,
            argv: None,
            output: None,
            exit_code: None,
        }
    }

    // Infallible mutation paths for the handle, which maintains the Building
    // invariant itself.
    pub(crate) fn push_options(&mut self, options: Vec<String>) {
        self.options.extend(options);
    }

    pub(crate) fn push_targets(&mut self, targets: Vec<String>) {
        self.targets.extend(targets);
    }

    pub(crate) fn insert_parameter(&mut self, key: String, value: String) {
        self.parameters.insert(key, value);
    }

    pub(crate) fn reset_options(&mut self) {
        self.options.clear();
    }

    pub(crate) fn reset_targets(&mut self) {
        self.targets.clear();
    }

    fn ensure_building(&self) -> Result<()> {
        if self.state == ContextState::Building {
            Ok(())
        } else {
            Err(MavenError::AlreadyFinalized)
        }
    }

    fn has_project_file_option(&self) -> bool {
        self.options.iter().any(|opt| {
            let flag = opt.split_whitespace().next().unwrap_or(opt.as_str());
            flag == "-f" || flag == "--file" || flag.starts_with("--file=")
        })
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new()
    }
}
