//! Test-only process runner that records calls and returns canned results

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::system::{ProcessRunner, RunOutput};

/// One recorded [`StubRunner::run`] call
#[derive(Debug, Clone)]
pub struct RecordedRun {
    pub argv: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

/// [`ProcessRunner`] returning a fixed exit code and output, recording every
/// invocation for later assertions
#[derive(Debug)]
pub struct StubRunner {
    exit_code: i32,
    output: String,
    calls: RefCell<Vec<RecordedRun>>,
}

impl StubRunner {
    pub fn new(exit_code: i32, output: &str) -> Self {
        Self {
            exit_code,
            output: output.to_string(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedRun> {
        self.calls.borrow().clone()
    }
}

impl ProcessRunner for StubRunner {
    fn run(&self, argv: &[String], cwd: Option<&Path>, env: &BTreeMap<String, String>) -> Result<RunOutput> {
        self.calls.borrow_mut().push(RecordedRun {
            argv: argv.to_vec(),
            cwd: cwd.map(Path::to_path_buf),
            env: env.clone(),
        });
        Ok(RunOutput {
            exit_code: self.exit_code,
            output: self.output.clone(),
        })
    }
}
