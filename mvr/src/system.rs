//! Executable location and subprocess execution
//!
//! The locator walks `PATH` and falls back to the conventional install-root
//! environment variables. The runner is a trait so command execution can be
//! stubbed out in tests; the real implementation blocks until the child exits
//! and returns stdout and stderr interleaved into a single stream.

use std::collections::BTreeMap;
use std::env;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{MavenError, Result};

/// Environment variables checked for a maven install root, in order
pub const INSTALL_ROOT_VARS: [&str; 2] = ["M2_HOME", "MAVEN_HOME"];

/// Platform-appropriate name of the maven launcher
pub fn maven_executable_name() -> &'static str {
    if cfg!(windows) { "mvn.cmd" } else { "mvn" }
}

/// Locate the maven executable via `PATH`, then `M2_HOME`/`MAVEN_HOME`
pub fn locate_maven() -> Result<PathBuf> {
    locate_executable(maven_executable_name())
}

/// Locate `name` on `PATH`; on failure check each install-root variable for
/// `<root>/bin/<name>`. The error lists every location that was tried.
pub fn locate_executable(name: &str) -> Result<PathBuf> {
    let mut searched = vec!["PATH".to_string()];

    if let Some(path_var) = env::var_os("PATH") {
        for dir in env::split_paths(&path_var) {
            let candidate = dir.join(name);
            if candidate.is_file() {
                debug!("located {} at {}", name, candidate.display());
                return Ok(candidate);
            }
        }
    }

    for var in INSTALL_ROOT_VARS {
        match env::var_os(var) {
            Some(root) => {
                let candidate = PathBuf::from(root).join("bin").join(name);
                if candidate.is_file() {
                    debug!("located {} via {} at {}", name, var, candidate.display());
                    return Ok(candidate);
                }
                searched.push(format!("{}={}", var, candidate.display()));
            }
            None => searched.push(format!("{} (unset)", var)),
        }
    }

    Err(MavenError::ExecutableNotFound { searched })
}

/// Exit code and combined output of one subprocess run
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub exit_code: i32,
    /// stdout and stderr interleaved as a single decoded stream
    pub output: String,
}

/// Boundary for spawning the build tool.
///
/// `env` is an explicit overlay applied on top of the inherited environment;
/// implementations must not mutate the process-global environment.
pub trait ProcessRunner {
    fn run(&self, argv: &[String], cwd: Option<&Path>, env: &BTreeMap<String, String>) -> Result<RunOutput>;
}

/// Blocking [`ProcessRunner`] backed by `std::process::Command`.
///
/// Both child streams share one pipe, so the captured output preserves the
/// order the child wrote in. A spawn-level failure (missing binary, permission
/// denied) maps to [`MavenError::Invocation`]; the child's own non-zero exit
/// is returned as data.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, argv: &[String], cwd: Option<&Path>, env: &BTreeMap<String, String>) -> Result<RunOutput> {
        let (program, args) = argv.split_first().ok_or_else(|| MavenError::Invocation {
            argv: argv.to_vec(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty argv"),
        })?;

        let (mut reader, writer) = std::io::pipe()?;
        let stderr_writer = writer.try_clone()?;

        debug!("spawning: {}", argv.join(" "));
        let mut child = {
            let mut command = Command::new(program);
            command
                .args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::from(writer))
                .stderr(Stdio::from(stderr_writer));
            if let Some(dir) = cwd {
                command.current_dir(dir);
            }
            command.envs(env);
            command.spawn().map_err(|source| MavenError::Invocation {
                argv: argv.to_vec(),
                source,
            })?
            // command drops here, closing the parent's copies of the write
            // end so the read below terminates when the child exits
        };

        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        let status = child.wait()?;

        let exit_code = status.code().unwrap_or(-1);
        debug!("{} exited with code {}", program, exit_code);

        Ok(RunOutput {
            exit_code,
            output: String::from_utf8_lossy(&raw).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn sh(script: &str) -> Vec<String> {
        vec!["/bin/sh".to_string(), "-c".to_string(), script.to_string()]
    }

    #[test]
    fn test_executable_name_is_platform_appropriate() {
        if cfg!(windows) {
            assert_eq!(maven_executable_name(), "mvn.cmd");
        } else {
            assert_eq!(maven_executable_name(), "mvn");
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_run_captures_stdout_and_stderr_interleaved() {
        let out = SystemRunner
            .run(&sh("echo one; echo two >&2; echo three"), None, &BTreeMap::new())
            .unwrap();

        assert_eq!(out.exit_code, 0);
        assert_eq!(out.output, "one\ntwo\nthree\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_nonzero_exit_is_data_not_error() {
        let out = SystemRunner.run(&sh("exit 3"), None, &BTreeMap::new()).unwrap();

        assert_eq!(out.exit_code, 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_honors_working_dir() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let out = SystemRunner
            .run(&sh("pwd"), Some(temp.path()), &BTreeMap::new())
            .unwrap();

        let reported = PathBuf::from(out.output.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_run_applies_env_overlay() {
        let mut env = BTreeMap::new();
        env.insert("MVR_TEST_VAR".to_string(), "overlay-value".to_string());

        let out = SystemRunner.run(&sh("echo $MVR_TEST_VAR"), None, &env).unwrap();

        assert_eq!(out.output.trim(), "overlay-value");
    }

    #[test]
    fn test_run_missing_executable_is_invocation_error() {
        let argv = vec!["/definitely/not/a/real/binary".to_string()];
        let err = SystemRunner.run(&argv, None, &BTreeMap::new()).unwrap_err();

        assert!(matches!(err, MavenError::Invocation { .. }));
        assert!(err.to_string().contains("/definitely/not/a/real/binary"));
    }

    #[test]
    fn test_run_empty_argv_is_invocation_error() {
        let err = SystemRunner.run(&[], None, &BTreeMap::new()).unwrap_err();

        assert!(matches!(err, MavenError::Invocation { .. }));
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_locate_falls_back_to_install_root_vars() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("Failed to create temp dir");
        let bin_dir = temp.path().join("bin");
        std::fs::create_dir_all(&bin_dir).unwrap();
        let mvn = bin_dir.join("mvn");
        std::fs::write(&mvn, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&mvn, std::fs::Permissions::from_mode(0o755)).unwrap();

        let saved_path = env::var_os("PATH");
        let saved_m2 = env::var_os("M2_HOME");
        unsafe {
            env::set_var("PATH", temp.path().join("empty"));
            env::set_var("M2_HOME", temp.path());
        }

        let located = locate_executable("mvn");

        unsafe {
            match saved_path {
                Some(p) => env::set_var("PATH", p),
                None => env::remove_var("PATH"),
            }
            match saved_m2 {
                Some(p) => env::set_var("M2_HOME", p),
                None => env::remove_var("M2_HOME"),
            }
        }

        assert_eq!(located.unwrap(), mvn);
    }

    #[test]
    #[serial]
    fn test_locate_missing_lists_searched_locations() {
        let saved_path = env::var_os("PATH");
        let saved_m2 = env::var_os("M2_HOME");
        let saved_maven_home = env::var_os("MAVEN_HOME");
        unsafe {
            env::set_var("PATH", "/definitely/not/a/real/dir");
            env::remove_var("M2_HOME");
            env::remove_var("MAVEN_HOME");
        }

        let result = locate_executable("mvn-does-not-exist");

        unsafe {
            match saved_path {
                Some(p) => env::set_var("PATH", p),
                None => env::remove_var("PATH"),
            }
            if let Some(p) = saved_m2 {
                env::set_var("M2_HOME", p);
            }
            if let Some(p) = saved_maven_home {
                env::set_var("MAVEN_HOME", p);
            }
        }

        let err = result.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("PATH"));
        assert!(msg.contains("M2_HOME (unset)"));
        assert!(msg.contains("MAVEN_HOME (unset)"));
    }
}
