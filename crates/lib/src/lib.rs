//! whipbuild-lib: configuration-to-invocation pipeline for whipbuild
//!
//! This crate turns a build configuration and a chosen profile into a single
//! compiler invocation and runs it:
//! - `discover`: recursive source discovery and exclusion
//! - `profile`: release, debug and feature-derived custom profiles
//! - `invocation`: ordered argument list assembly
//! - `prompt`: the question engine used to pick a profile and its features
//! - `run`: child process execution
//! - `pipeline`: the `Builder` tying the steps together

pub mod config;
pub mod consts;
pub mod discover;
pub mod error;
pub mod invocation;
pub mod pipeline;
pub mod profile;
pub mod prompt;
pub mod run;
pub mod util;

pub use config::BuildConfig;
pub use discover::{DiscoveryError, SourceSet};
pub use error::BuildError;
pub use invocation::{Invocation, assemble};
pub use pipeline::Builder;
pub use profile::{BuildProfile, Feature, FeatureChoices, ProfileError, ProfileKind};
pub use prompt::{LinePrompter, MenuChoice, PromptError, Prompter, ScriptedPrompter};
pub use run::{BuildOutcome, OsProcessRunner, ProcessRunner, RunError};
