//! Test utilities for whipbuild-lib.
//!
//! Helpers for laying out source trees and for standing in for a compiler.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use crate::invocation::Invocation;
use crate::run::{BuildOutcome, ProcessRunner, RunError};

/// Create each relative path under `root` as a small C file, with parent directories.
pub fn write_tree(root: &Path, files: &[&str]) {
  for file in files {
    let path = root.join(file);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, "int x;\n").unwrap();
  }
}

pub fn c_extensions() -> BTreeSet<String> {
  BTreeSet::from([".c".to_string()])
}

/// A program that ignores its arguments and exits 0.
#[cfg(unix)]
pub fn succeeding_program() -> &'static str {
  "true"
}

/// A program that ignores its arguments and exits 1.
#[cfg(unix)]
pub fn failing_program() -> &'static str {
  "false"
}

/// Runner that records every argument vector instead of spawning it.
pub struct RecordingRunner {
  code: i32,
  runs: Mutex<Vec<Vec<String>>>,
}

impl RecordingRunner {
  pub fn new(code: i32) -> Self {
    Self {
      code,
      runs: Mutex::new(Vec::new()),
    }
  }

  pub fn runs(&self) -> Vec<Vec<String>> {
    self.runs.lock().unwrap().clone()
  }
}

impl ProcessRunner for RecordingRunner {
  async fn run(&self, invocation: &Invocation) -> Result<BuildOutcome, RunError> {
    self.runs.lock().unwrap().push(invocation.argv().to_vec());
    Ok(BuildOutcome {
      code: Some(self.code),
      elapsed: Duration::ZERO,
    })
  }
}
