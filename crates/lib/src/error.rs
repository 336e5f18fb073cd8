//! Errors of the discovery-to-execution pipeline.

use thiserror::Error;

use crate::discover::DiscoveryError;
use crate::run::RunError;

#[derive(Debug, Error)]
pub enum BuildError {
  #[error(transparent)]
  Discovery(#[from] DiscoveryError),

  /// Nothing left to compile after exclusions.
  #[error("no source files found under {root}")]
  NoSources { root: String },

  #[error(transparent)]
  Run(#[from] RunError),
}

impl BuildError {
  /// True for errors that signal a broken internal assumption rather than bad input.
  pub fn is_invariant_violation(&self) -> bool {
    matches!(self, BuildError::Discovery(DiscoveryError::DuplicateSource { .. }))
  }
}
