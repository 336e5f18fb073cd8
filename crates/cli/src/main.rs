mod cmd;
mod output;
mod prompts;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use whipbuild_lib::BuildConfig;
use whipbuild_lib::consts::{DEFAULT_COMPILER, DEFAULT_SOURCE_DIR};

use cmd::BuildOptions;
use output::{OutputFormat, print_error};

/// whipbuild - build configurator for the Whippet C interpreter
#[derive(Parser)]
#[command(name = "whipbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// A single `d` builds the debug profile without prompting; anything else opens the menu
  args: Vec<String>,

  /// Change to this directory before doing anything else
  #[arg(short = 'C', long, value_name = "DIR")]
  directory: Option<PathBuf>,

  /// Compiler executable
  #[arg(long, default_value = DEFAULT_COMPILER)]
  compiler: String,

  /// Directory searched for sources
  #[arg(long, value_name = "DIR", default_value = DEFAULT_SOURCE_DIR)]
  source_dir: PathBuf,

  /// Source file suffix (repeatable, default: .c)
  #[arg(long = "extension", value_name = "EXT")]
  extensions: Vec<String>,

  /// Source path to leave out, relative to the source directory (repeatable)
  #[arg(long, value_name = "PATH")]
  exclude: Vec<PathBuf>,

  /// Print the compiler invocation instead of running it
  #[arg(long)]
  dry_run: bool,

  /// Format of the dry-run output
  #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  init_logging(cli.verbose);

  match run(cli) {
    Ok(code) => code,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}

fn init_logging(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
  if let Some(directory) = &cli.directory {
    let directory = dunce::canonicalize(directory)
      .with_context(|| format!("Failed to resolve directory {}", directory.display()))?;
    std::env::set_current_dir(&directory)
      .with_context(|| format!("Failed to change to directory {}", directory.display()))?;
    debug!(directory = %directory.display(), "changed working directory");
  }

  let config = BuildConfig::default()
    .with_compiler(cli.compiler)
    .with_source_root(&cli.source_dir)
    .with_extensions(cli.extensions)
    .with_exclude(cli.exclude);

  let options = BuildOptions {
    dry_run: cli.dry_run,
    format: cli.format,
  };

  cmd::cmd_build(config, &cli.args, &options)
}
