//! Discovery, assembly and execution for one build run.

use tracing::{debug, info};

use crate::config::BuildConfig;
use crate::discover::{SourceSet, discover, filter};
use crate::error::BuildError;
use crate::invocation::{Invocation, assemble};
use crate::profile::BuildProfile;
use crate::run::{BuildOutcome, ProcessRunner};

/// Drives a single run against one configuration and runner.
pub struct Builder<R> {
  config: BuildConfig,
  runner: R,
}

impl<R: ProcessRunner> Builder<R> {
  pub fn new(config: BuildConfig, runner: R) -> Self {
    Self { config, runner }
  }

  pub fn config(&self) -> &BuildConfig {
    &self.config
  }

  /// Discovered sources minus exclusions.
  pub fn sources(&self) -> Result<SourceSet, BuildError> {
    let root = &self.config.source_root;
    let discovered = discover(root, &self.config.extensions)?;
    let sources = filter(&discovered, &self.config.exclude, root);

    debug!(
      discovered = discovered.len(),
      excluded = discovered.len() - sources.len(),
      "filtered sources"
    );

    Ok(sources)
  }

  /// Compute the invocation without running anything.
  ///
  /// # Errors
  ///
  /// Fails if discovery fails or no sources remain after exclusion.
  pub fn plan(&self, profile: &BuildProfile) -> Result<Invocation, BuildError> {
    let sources = self.sources()?;

    if sources.is_empty() {
      return Err(BuildError::NoSources {
        root: self.config.source_root.display().to_string(),
      });
    }

    let invocation = assemble(&self.config.compiler, profile, &sources);
    info!(profile = %profile.kind(), sources = sources.len(), "assembled invocation");

    Ok(invocation)
  }

  /// Run a planned invocation.
  pub async fn execute(&self, invocation: &Invocation) -> Result<BuildOutcome, BuildError> {
    let outcome = self.runner.run(invocation).await?;
    info!(code = ?outcome.code, "build finished");

    Ok(outcome)
  }

  /// Plan and execute.
  pub async fn build(&self, profile: &BuildProfile) -> Result<BuildOutcome, BuildError> {
    let invocation = self.plan(profile)?;
    self.execute(&invocation).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::discover::DiscoveryError;
  use crate::profile::FeatureChoices;
  use crate::util::testutil::{RecordingRunner, write_tree};
  use std::path::Path;
  use tempfile::TempDir;

  fn config_for(root: &Path) -> BuildConfig {
    BuildConfig::default().with_source_root(root)
  }

  #[test]
  fn plan_applies_exclusions_and_sorts_sources() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_tree(root, &["b.c", "a.c", "sub/c.c", "main_test.c", "util.h"]);
    let builder = Builder::new(config_for(root).with_exclude(["main_test.c"]), RecordingRunner::new(0));

    let invocation = builder.plan(&BuildProfile::release()).unwrap();

    let expected: Vec<String> = ["a.c", "b.c", "sub/c.c"]
      .iter()
      .map(|p| root.join(p).display().to_string())
      .collect();
    assert_eq!(invocation.sources(), expected.as_slice());
    assert_eq!(invocation.program(), "cc");
  }

  #[test]
  fn plan_rejects_empty_source_set() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_tree(root, &["only.c"]);
    let builder = Builder::new(config_for(root).with_exclude(["only.c"]), RecordingRunner::new(0));

    let result = builder.plan(&BuildProfile::debug());

    assert!(matches!(result, Err(BuildError::NoSources { .. })));
  }

  #[test]
  fn plan_surfaces_walk_errors() {
    let temp = TempDir::new().unwrap();
    let builder = Builder::new(config_for(&temp.path().join("missing")), RecordingRunner::new(0));

    let result = builder.plan(&BuildProfile::release());

    assert!(matches!(result, Err(BuildError::Discovery(DiscoveryError::Walk { .. }))));
    assert!(!result.unwrap_err().is_invariant_violation());
  }

  #[test]
  fn duplicate_source_is_flagged_as_invariant_violation() {
    let error = BuildError::from(DiscoveryError::DuplicateSource {
      path: "src/a.c".into(),
    });

    assert!(error.is_invariant_violation());
  }

  #[tokio::test]
  async fn build_runs_the_planned_invocation_once() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("src");
    write_tree(&root, &["a.c"]);
    let runner = RecordingRunner::new(0);
    let builder = Builder::new(config_for(&root).with_compiler("gcc"), runner);
    let profile = BuildProfile::custom(&FeatureChoices::default());

    let outcome = builder.build(&profile).await.unwrap();

    assert!(outcome.success());
    let runs = builder.runner.runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0], builder.plan(&profile).unwrap().into_argv());
  }

  #[tokio::test]
  async fn build_reports_compiler_failure() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("src");
    write_tree(&root, &["a.c"]);
    let builder = Builder::new(config_for(&root), RecordingRunner::new(2));

    let outcome = builder.build(&BuildProfile::release()).await.unwrap();

    assert_eq!(outcome.code, Some(2));
    assert!(!outcome.success());
  }

  #[tokio::test]
  async fn failed_plan_never_runs() {
    let temp = TempDir::new().unwrap();
    let builder = Builder::new(config_for(temp.path()), RecordingRunner::new(0));

    let result = builder.build(&BuildProfile::release()).await;

    assert!(matches!(result, Err(BuildError::NoSources { .. })));
    assert!(builder.runner.runs().is_empty());
  }
}
