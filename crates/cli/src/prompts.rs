use std::io::{self, IsTerminal, StdinLock, Stdout};

use tracing::debug;
use whipbuild_lib::LinePrompter;

pub type TerminalPrompter = LinePrompter<StdinLock<'static>, Stdout>;

/// Prompter reading answers from stdin and writing questions to stdout.
///
/// Piped input is accepted line by line like typed input.
pub fn terminal() -> TerminalPrompter {
  if !io::stdin().is_terminal() {
    debug!("stdin is not a terminal; reading answers line by line");
  }

  LinePrompter::new(io::stdin().lock(), io::stdout())
}
