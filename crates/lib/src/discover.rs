//! Source discovery and exclusion.
//!
//! This module provides:
//! - `discover()`: recursive walk collecting files by name suffix
//! - `collect_sources()`: the set-building step, which enforces path uniqueness
//! - `filter()`: removal of root-relative exclusions from a discovered set
//!
//! Discovered paths are formed by joining the root with the walk's relative path,
//! so `src` + `sub/c.c` yields `src/sub/c.c`. Exclusions are resolved the same
//! way before comparison.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

/// An ordered, duplicate-free set of source files.
///
/// Iteration order is the component-wise lexicographic order of the paths, which
/// keeps the source segment of an invocation stable between runs.
pub type SourceSet = BTreeSet<PathBuf>;

/// Error during source discovery.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
  #[error("failed to walk {root}: {message}")]
  Walk { root: String, message: String },

  /// The walk produced the same path twice. Filesystem traversal is assumed to
  /// never do this, so the run must stop rather than merge the entries.
  #[error("broken invariant: source {} discovered twice", path.display())]
  DuplicateSource { path: PathBuf },

  #[error("source path is not valid UTF-8: {path}")]
  NonUtf8Path { path: String },
}

/// Recursively collect every file under `root` whose name ends with one of
/// `extensions`.
///
/// Directories are traversed but never returned. Symlinked directories are not
/// descended into; symlinks to files are treated as files.
///
/// # Errors
///
/// Returns `DiscoveryError::Walk` if the root or a subdirectory cannot be read,
/// and `DiscoveryError::DuplicateSource` if a path is yielded twice.
pub fn discover(root: &Path, extensions: &BTreeSet<String>) -> Result<SourceSet, DiscoveryError> {
  let mut paths = Vec::new();

  for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
    let entry = entry.map_err(|e| DiscoveryError::Walk {
      root: root.display().to_string(),
      message: e.to_string(),
    })?;

    if entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir()) {
      continue;
    }

    paths.push(entry.into_path());
  }

  let sources = collect_sources(paths, extensions)?;
  info!(root = %root.display(), count = sources.len(), "discovered sources");

  Ok(sources)
}

/// Build a [`SourceSet`] from a stream of candidate file paths.
///
/// Paths whose file name does not end with one of `extensions` are skipped.
/// A path equal (component-wise) to one already collected is an invariant
/// violation.
pub fn collect_sources<I>(paths: I, extensions: &BTreeSet<String>) -> Result<SourceSet, DiscoveryError>
where
  I: IntoIterator<Item = PathBuf>,
{
  let mut sources = SourceSet::new();

  for path in paths {
    if !has_extension(&path, extensions) {
      continue;
    }

    if path.to_str().is_none() {
      return Err(DiscoveryError::NonUtf8Path {
        path: path.display().to_string(),
      });
    }

    if sources.contains(&path) {
      return Err(DiscoveryError::DuplicateSource { path });
    }

    debug!(path = %path.display(), "source");
    sources.insert(path);
  }

  Ok(sources)
}

/// Remove `exclusions`, resolved against `root`, from `discovered`.
///
/// Exclusions that match nothing are ignored so that exclusion lists may name
/// files that do not exist yet.
pub fn filter(discovered: &SourceSet, exclusions: &BTreeSet<PathBuf>, root: &Path) -> SourceSet {
  let resolved: BTreeSet<PathBuf> = exclusions.iter().map(|exclusion| root.join(exclusion)).collect();

  for path in &resolved {
    if discovered.contains(path) {
      debug!(path = %path.display(), "excluding source");
    } else {
      debug!(path = %path.display(), "exclusion matches no source");
    }
  }

  discovered.difference(&resolved).cloned().collect()
}

fn has_extension(path: &Path, extensions: &BTreeSet<String>) -> bool {
  let Some(name) = path.file_name() else {
    return false;
  };
  let name = name.to_string_lossy();

  extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}
