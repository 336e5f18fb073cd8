//! Per-run build configuration.
//!
//! A [`BuildConfig`] is constructed once at startup and handed by reference to
//! discovery, filtering and assembly. Nothing in the crate reads ambient state.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::consts::{DEFAULT_COMPILER, DEFAULT_EXTENSIONS, DEFAULT_SOURCE_DIR};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
  /// Compiler executable, resolved through `PATH` by the OS.
  pub compiler: String,

  /// Directory walked for sources.
  pub source_root: PathBuf,

  /// A file is a source iff its name ends with one of these.
  pub extensions: BTreeSet<String>,

  /// Paths relative to `source_root` removed from the discovered set.
  pub exclude: BTreeSet<PathBuf>,
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self {
      compiler: DEFAULT_COMPILER.to_string(),
      source_root: PathBuf::from(DEFAULT_SOURCE_DIR),
      extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
      exclude: BTreeSet::new(),
    }
  }
}

impl BuildConfig {
  pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
    self.compiler = compiler.into();
    self
  }

  pub fn with_source_root(mut self, root: impl AsRef<Path>) -> Self {
    self.source_root = root.as_ref().to_path_buf();
    self
  }

  /// Replace the extension set. An empty iterator keeps the current set.
  pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let extensions: BTreeSet<String> = extensions.into_iter().map(Into::into).collect();
    if !extensions.is_empty() {
      self.extensions = extensions;
    }
    self
  }

  pub fn with_exclude<I, P>(mut self, exclude: I) -> Self
  where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
  {
    self.exclude.extend(exclude.into_iter().map(Into::into));
    self
  }
}
