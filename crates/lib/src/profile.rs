//! Build profiles and feature flags.
//!
//! A profile is a complete, ordered compiler flag list plus the artifact path it
//! writes. Release and debug are fixed. Custom profiles are derived from one
//! yes/no decision per [`Feature`]; each decision contributes its flags
//! independently of the others.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::consts::{CUSTOM_OUTPUT, DEBUG_OUTPUT, RELEASE_OUTPUT};

const NO_ASSERTS: &str = "-DNO_INCLUDE_ASSERTS";
const NO_TESTS: &str = "-DNO_TESTS";
const OPTIMIZE: &str = "-O2";

const RELEASE_FLAGS: &[&str] = &[NO_ASSERTS, NO_TESTS, OPTIMIZE];
const DEBUG_FLAGS: &[&str] = &["-DDEBUG", "-DVERSION_NAME=\"DEBUG BUILD\"", "-Wall", "-Wpedantic", "-g"];
const CUSTOM_BASE_FLAGS: &[&str] = &[NO_TESTS, OPTIMIZE];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProfileError {
  #[error("unknown build profile selector: {selector:?}")]
  UnknownProfile { selector: String },
}

/// The closed set of profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
  Release,
  Debug,
  Custom,
}

impl ProfileKind {
  /// Menu order.
  pub const ALL: [ProfileKind; 3] = [ProfileKind::Release, ProfileKind::Debug, ProfileKind::Custom];

  /// Resolve a menu selector (`1`, `2` or `3`).
  pub fn from_selector(selector: &str) -> Result<Self, ProfileError> {
    match selector.trim() {
      "1" => Ok(ProfileKind::Release),
      "2" => Ok(ProfileKind::Debug),
      "3" => Ok(ProfileKind::Custom),
      other => Err(ProfileError::UnknownProfile {
        selector: other.to_string(),
      }),
    }
  }

  pub fn selector(self) -> &'static str {
    match self {
      ProfileKind::Release => "1",
      ProfileKind::Debug => "2",
      ProfileKind::Custom => "3",
    }
  }

  /// Menu label.
  pub fn label(self) -> &'static str {
    match self {
      ProfileKind::Release => "Release",
      ProfileKind::Debug => "Debug",
      ProfileKind::Custom => "Custom (recommended)",
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      ProfileKind::Release => "release",
      ProfileKind::Debug => "debug",
      ProfileKind::Custom => "custom",
    }
  }
}

impl fmt::Display for ProfileKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A yes/no build-time decision of the custom profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
  RichTerminal,
  ManualApproval,
  KeepAssertions,
}

impl Feature {
  /// The order in which decisions are asked for and their flags emitted.
  pub const ALL: [Feature; 3] = [Feature::RichTerminal, Feature::ManualApproval, Feature::KeepAssertions];

  pub fn title(self) -> &'static str {
    match self {
      Feature::RichTerminal => "Rich terminal interface",
      Feature::ManualApproval => "Manual approval of commands and file handling",
      Feature::KeepAssertions => "Assertions",
    }
  }

  pub fn description(self) -> &'static str {
    match self {
      Feature::RichTerminal => {
        "The interactive prompt can run in either basic or rich mode. Rich mode adds line editing, \
         history and highlighting, but may be less stable and portable. This only sets the default; \
         --terminal-basic and --terminal-rich select a mode at startup."
      }
      Feature::ManualApproval => {
        "Whether the interpreter asks for permission by default before running external programs \
         or opening files for reading or writing. Guards against accidental execution or edits \
         caused by user error or interpreter bugs. --manual-approve and --no-manual-approve select \
         the behaviour at startup."
      }
      Feature::KeepAssertions => {
        "Assertions make the code safer and easier to debug, but potentially slower and more \
         crash-prone, since the program stops immediately on a failed assertion instead of \
         misbehaving."
      }
    }
  }

  pub fn question(self) -> &'static str {
    match self {
      Feature::RichTerminal => "Use rich terminal by default?",
      Feature::ManualApproval => "Use manual approval by default?",
      Feature::KeepAssertions => "Keep asserts?",
    }
  }

  /// Compiler flags contributed by this decision.
  pub fn flags(self, enabled: bool) -> &'static [&'static str] {
    match (self, enabled) {
      (Feature::RichTerminal, true) => &["-DSETTING_RICH_TERMINAL=1"],
      (Feature::RichTerminal, false) => &["-DSETTING_RICH_TERMINAL=0"],
      (Feature::ManualApproval, true) => &["-DSETTING_APPROVE_COMMANDS=1"],
      (Feature::ManualApproval, false) => &["-DSETTING_APPROVE_COMMANDS=0"],
      (Feature::KeepAssertions, true) => &[],
      (Feature::KeepAssertions, false) => &[NO_ASSERTS],
    }
  }
}

/// Decisions for every [`Feature`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureChoices {
  pub rich_terminal: bool,
  pub manual_approval: bool,
  pub keep_assertions: bool,
}

impl FeatureChoices {
  pub fn get(&self, feature: Feature) -> bool {
    match feature {
      Feature::RichTerminal => self.rich_terminal,
      Feature::ManualApproval => self.manual_approval,
      Feature::KeepAssertions => self.keep_assertions,
    }
  }

  pub fn set(&mut self, feature: Feature, enabled: bool) {
    match feature {
      Feature::RichTerminal => self.rich_terminal = enabled,
      Feature::ManualApproval => self.manual_approval = enabled,
      Feature::KeepAssertions => self.keep_assertions = enabled,
    }
  }
}

/// A named compiler flag list plus output artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildProfile {
  kind: ProfileKind,
  flags: Vec<String>,
  output: PathBuf,
  echo: bool,
}

impl BuildProfile {
  pub fn release() -> Self {
    Self::new(ProfileKind::Release, RELEASE_FLAGS.iter(), RELEASE_OUTPUT, false)
  }

  pub fn debug() -> Self {
    Self::new(ProfileKind::Debug, DEBUG_FLAGS.iter(), DEBUG_OUTPUT, true)
  }

  pub fn custom(choices: &FeatureChoices) -> Self {
    let feature_flags = Feature::ALL
      .into_iter()
      .flat_map(|feature| feature.flags(choices.get(feature)).iter());

    Self::new(
      ProfileKind::Custom,
      CUSTOM_BASE_FLAGS.iter().chain(feature_flags),
      CUSTOM_OUTPUT,
      true,
    )
  }

  fn new<'a>(kind: ProfileKind, flags: impl Iterator<Item = &'a &'static str>, output: &str, echo: bool) -> Self {
    Self {
      kind,
      flags: flags.map(|flag| flag.to_string()).collect(),
      output: PathBuf::from(output),
      echo,
    }
  }

  pub fn kind(&self) -> ProfileKind {
    self.kind
  }

  pub fn flags(&self) -> &[String] {
    &self.flags
  }

  pub fn output(&self) -> &Path {
    &self.output
  }

  /// Whether the command line is printed before it runs.
  pub fn echo(&self) -> bool {
    self.echo
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn choices(rich_terminal: bool, manual_approval: bool, keep_assertions: bool) -> FeatureChoices {
    FeatureChoices {
      rich_terminal,
      manual_approval,
      keep_assertions,
    }
  }

  #[test]
  fn release_flags_in_definition_order() {
    let profile = BuildProfile::release();

    assert_eq!(profile.kind(), ProfileKind::Release);
    assert_eq!(profile.flags(), ["-DNO_INCLUDE_ASSERTS", "-DNO_TESTS", "-O2"]);
    assert_eq!(profile.output(), Path::new("out/whippet.out"));
    assert!(!profile.echo());
  }

  #[test]
  fn debug_flags_in_definition_order() {
    let profile = BuildProfile::debug();

    assert_eq!(profile.kind(), ProfileKind::Debug);
    assert_eq!(
      profile.flags(),
      ["-DDEBUG", "-DVERSION_NAME=\"DEBUG BUILD\"", "-Wall", "-Wpedantic", "-g"]
    );
    assert_eq!(profile.output(), Path::new("out/a.out"));
    assert!(profile.echo());
  }

  #[test]
  fn custom_profile_with_mixed_choices() {
    let profile = BuildProfile::custom(&choices(true, false, false));

    assert_eq!(
      profile.flags(),
      [
        "-DNO_TESTS",
        "-O2",
        "-DSETTING_RICH_TERMINAL=1",
        "-DSETTING_APPROVE_COMMANDS=0",
        "-DNO_INCLUDE_ASSERTS",
      ]
    );
    assert_eq!(profile.output(), Path::new("out/c_whippet.out"));
  }

  #[test]
  fn keeping_assertions_adds_no_flag() {
    let profile = BuildProfile::custom(&choices(false, true, true));

    assert_eq!(
      profile.flags(),
      [
        "-DNO_TESTS",
        "-O2",
        "-DSETTING_RICH_TERMINAL=0",
        "-DSETTING_APPROVE_COMMANDS=1"
      ]
    );
  }

  #[test]
  fn features_contribute_independently() {
    for bits in 0..8u8 {
      let c = choices(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
      let profile = BuildProfile::custom(&c);

      let expected: Vec<String> = ["-DNO_TESTS", "-O2"]
        .iter()
        .chain(Feature::ALL.iter().flat_map(|f| f.flags(c.get(*f)).iter()))
        .map(|s| s.to_string())
        .collect();
      assert_eq!(profile.flags(), expected.as_slice());
    }
  }

  #[test]
  fn custom_profile_is_deterministic() {
    let c = choices(true, true, false);

    assert_eq!(BuildProfile::custom(&c), BuildProfile::custom(&c));
  }

  #[test]
  fn every_profile_writes_a_distinct_artifact() {
    let release = BuildProfile::release();
    let debug = BuildProfile::debug();
    let custom = BuildProfile::custom(&FeatureChoices::default());

    assert_ne!(release.output(), debug.output());
    assert_ne!(release.output(), custom.output());
    assert_ne!(debug.output(), custom.output());
  }

  #[test]
  fn selectors_map_to_kinds() {
    assert_eq!(ProfileKind::from_selector("1"), Ok(ProfileKind::Release));
    assert_eq!(ProfileKind::from_selector("2"), Ok(ProfileKind::Debug));
    assert_eq!(ProfileKind::from_selector(" 3\n"), Ok(ProfileKind::Custom));

    for kind in ProfileKind::ALL {
      assert_eq!(ProfileKind::from_selector(kind.selector()), Ok(kind));
    }
  }

  #[test]
  fn unknown_selector_is_a_configuration_error() {
    assert_eq!(
      ProfileKind::from_selector("4"),
      Err(ProfileError::UnknownProfile {
        selector: "4".to_string()
      })
    );
  }

  #[test]
  fn choices_get_and_set_round_trip_per_feature() {
    let mut c = FeatureChoices::default();

    c.set(Feature::ManualApproval, true);

    assert!(c.get(Feature::ManualApproval));
    assert!(!c.get(Feature::RichTerminal));
    assert!(!c.get(Feature::KeepAssertions));
  }
}
