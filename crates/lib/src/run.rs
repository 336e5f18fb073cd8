//! Compiler process execution.
//!
//! The invocation is spawned directly, without a shell, so every argument
//! reaches the compiler verbatim. Standard streams are inherited; compiler
//! diagnostics go straight to the user and are never parsed here.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tracing::{debug, info};

use crate::invocation::Invocation;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
  #[error("failed to start {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },
}

/// How a finished compiler run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOutcome {
  /// Exit code, or `None` if the process was killed by a signal.
  pub code: Option<i32>,
  pub elapsed: Duration,
}

impl BuildOutcome {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

pub trait ProcessRunner {
  /// Run the invocation to completion.
  fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<BuildOutcome, RunError>>;
}

/// Runs invocations as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsProcessRunner;

impl OsProcessRunner {
  pub fn new() -> Self {
    Self
  }
}

impl ProcessRunner for OsProcessRunner {
  async fn run(&self, invocation: &Invocation) -> Result<BuildOutcome, RunError> {
    info!(program = %invocation.program(), args = invocation.args().len(), "running compiler");

    let started = Instant::now();
    let status = Command::new(invocation.program())
      .args(invocation.args())
      .status()
      .await
      .map_err(|source| RunError::Spawn {
        program: invocation.program().to_string(),
        source,
      })?;
    let elapsed = started.elapsed();

    debug!(code = ?status.code(), elapsed_ms = elapsed.as_millis() as u64, "compiler exited");

    Ok(BuildOutcome {
      code: status.code(),
      elapsed,
    })
  }
}
