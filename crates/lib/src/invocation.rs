//! Compiler invocation assembly.

use std::fmt;

use crate::consts::OUTPUT_FLAG;
use crate::discover::SourceSet;
use crate::profile::BuildProfile;

/// The ordered argument list `[compiler, flags.., -o<output>, sources..]`.
///
/// Always holds at least the compiler and the output designator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  argv: Vec<String>,
  output_index: usize,
}

/// Combine a compiler, a profile and a source set into one invocation.
///
/// The source segment follows the set's iteration order. An empty source set
/// still yields a complete prefix; rejecting it is up to the caller.
pub fn assemble(compiler: &str, profile: &BuildProfile, sources: &SourceSet) -> Invocation {
  let mut argv = Vec::with_capacity(2 + profile.flags().len() + sources.len());

  argv.push(compiler.to_string());
  argv.extend(profile.flags().iter().cloned());

  let output_index = argv.len();
  argv.push(format!("{}{}", OUTPUT_FLAG, profile.output().display()));

  // Discovery only admits UTF-8 paths, so this conversion is lossless.
  argv.extend(sources.iter().map(|source| source.to_string_lossy().into_owned()));

  Invocation { argv, output_index }
}

impl Invocation {
  pub fn program(&self) -> &str {
    &self.argv[0]
  }

  /// Everything after the program name.
  pub fn args(&self) -> &[String] {
    &self.argv[1..]
  }

  pub fn flags(&self) -> &[String] {
    &self.argv[1..self.output_index]
  }

  /// The `-o<path>` token.
  pub fn output_arg(&self) -> &str {
    &self.argv[self.output_index]
  }

  pub fn sources(&self) -> &[String] {
    &self.argv[self.output_index + 1..]
  }

  pub fn argv(&self) -> &[String] {
    &self.argv
  }

  pub fn into_argv(self) -> Vec<String> {
    self.argv
  }
}

/// Space-joined, unquoted. Arguments containing spaces are not escaped.
impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.argv.join(" "))
  }
}
