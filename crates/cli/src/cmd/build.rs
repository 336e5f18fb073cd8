//! Implementation of the build flow.
//!
//! Selects a profile (from the `d` shortcut or the interactive menu), plans the
//! compiler invocation and runs it, reporting the compiler's exit status.

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{error, info};

use whipbuild_lib::prompt::ask_features;
use whipbuild_lib::{
  BuildConfig, BuildOutcome, BuildProfile, Builder, Invocation, MenuChoice, OsProcessRunner, ProfileKind, Prompter,
};

use crate::output::{OutputFormat, format_duration, print_error, print_info, print_json, print_stat, print_success};
use crate::prompts;

/// The only positional argument recognised without prompting.
const DEBUG_SHORTCUT: &str = "d";

#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
  pub dry_run: bool,
  pub format: OutputFormat,
}

/// Execute the build flow.
///
/// Returns the process exit code: success on quit or a clean compile, the
/// compiler's own code when it fails.
pub fn cmd_build(config: BuildConfig, args: &[String], options: &BuildOptions) -> Result<ExitCode> {
  let mut prompter = prompts::terminal();

  let Some(profile) = resolve_profile(args, &mut prompter)? else {
    print_info("Nothing built");
    return Ok(ExitCode::SUCCESS);
  };

  let builder = Builder::new(config, OsProcessRunner::new());
  let invocation = match builder.plan(&profile) {
    Ok(invocation) => invocation,
    Err(err) => {
      if err.is_invariant_violation() {
        error!(error = %err, "source discovery returned inconsistent results");
      }
      return Err(err).context("Failed to plan build");
    }
  };

  if options.dry_run {
    print_plan(&profile, &invocation, options.format)?;
    return Ok(ExitCode::SUCCESS);
  }

  if profile.echo() {
    println!("{}", invocation);
  }

  if let Some(parent) = profile.output().parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }

  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  let outcome = rt.block_on(builder.execute(&invocation)).context("Build failed")?;

  Ok(report(&profile, &outcome))
}

/// Pick the profile for this run, or `None` if the user quit.
pub fn resolve_profile<P: Prompter>(args: &[String], prompter: &mut P) -> Result<Option<BuildProfile>> {
  let kind = match args {
    [arg] if arg == DEBUG_SHORTCUT => ProfileKind::Debug,
    _ => match prompter.choose_menu()? {
      MenuChoice::Build(kind) => kind,
      MenuChoice::Quit => return Ok(None),
    },
  };

  info!(profile = %kind, "profile selected");

  let profile = match kind {
    ProfileKind::Release => BuildProfile::release(),
    ProfileKind::Debug => BuildProfile::debug(),
    ProfileKind::Custom => BuildProfile::custom(&ask_features(prompter)?),
  };

  Ok(Some(profile))
}

fn print_plan(profile: &BuildProfile, invocation: &Invocation, format: OutputFormat) -> Result<()> {
  if format.is_json() {
    return print_json(&serde_json::json!({
      "profile": profile.kind(),
      "output": profile.output(),
      "flags": profile.flags(),
      "sources": invocation.sources(),
      "argv": invocation.argv(),
    }));
  }

  print_stat("Profile", profile.kind().as_str());
  print_stat("Output", &profile.output().display().to_string());
  print_stat("Sources", &invocation.sources().len().to_string());
  println!("{}", invocation);

  Ok(())
}

fn report(profile: &BuildProfile, outcome: &BuildOutcome) -> ExitCode {
  if outcome.success() {
    print_success(&format!(
      "Built {} in {}",
      profile.output().display(),
      format_duration(outcome.elapsed)
    ));
    return ExitCode::SUCCESS;
  }

  match outcome.code {
    Some(code) => print_error(&format!("Compiler exited with status {}", code)),
    None => print_error("Compiler was terminated by a signal"),
  }

  ExitCode::from(failure_status(outcome))
}

/// The compiler's exit code when it fits an exit status, 1 otherwise.
fn failure_status(outcome: &BuildOutcome) -> u8 {
  outcome
    .code
    .and_then(|code| u8::try_from(code).ok())
    .filter(|code| *code != 0)
    .unwrap_or(1)
}
