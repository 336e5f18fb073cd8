//! Interactive question engine.
//!
//! Questions are asked one at a time. Each blocks until an accepted answer is
//! read; anything else is counted as a rejected attempt and the question is
//! asked again. [`LinePrompter`] works over any reader/writer pair, so a
//! terminal session and a scripted one drive the same code.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::profile::{Feature, FeatureChoices, ProfileKind};

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
  #[error("input closed before an answer was given")]
  Closed,

  #[error("io error: {0}")]
  Io(#[from] io::Error),
}

/// An accepted answer to the build menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
  Build(ProfileKind),
  Quit,
}

/// Accepts `y`, `yes`, `n`, `no` in any case.
pub fn parse_yes_no(input: &str) -> Option<bool> {
  match input.trim().to_ascii_lowercase().as_str() {
    "y" | "yes" => Some(true),
    "n" | "no" => Some(false),
    _ => None,
  }
}

/// Accepts a profile selector or `q` / `quit` in any case.
pub fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
  let input = input.trim();

  if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
    return Some(MenuChoice::Quit);
  }

  ProfileKind::from_selector(input).ok().map(MenuChoice::Build)
}

pub trait Prompter {
  /// Show informational text that needs no answer.
  fn show(&mut self, text: &str) -> Result<(), PromptError>;

  fn ask_yes_no(&mut self, question: &str) -> Result<bool, PromptError>;

  fn choose_menu(&mut self) -> Result<MenuChoice, PromptError>;
}

/// Ask every feature question in order and collect the answers.
pub fn ask_features<P: Prompter + ?Sized>(prompter: &mut P) -> Result<FeatureChoices, PromptError> {
  let mut choices = FeatureChoices::default();

  for (index, feature) in Feature::ALL.into_iter().enumerate() {
    prompter.show(&format!("{}. {}\n  {}\n", index + 1, feature.title(), feature.description()))?;
    let enabled = prompter.ask_yes_no(feature.question())?;
    debug!(feature = ?feature, enabled, "feature decided");
    choices.set(feature, enabled);
  }

  Ok(choices)
}

/// Line-oriented prompter over a buffered reader and a writer.
pub struct LinePrompter<R, W> {
  input: R,
  output: W,
  rejected: usize,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
  pub fn new(input: R, output: W) -> Self {
    Self {
      input,
      output,
      rejected: 0,
    }
  }

  /// Number of answers that were not accepted so far.
  pub fn rejected(&self) -> usize {
    self.rejected
  }

  pub fn into_output(self) -> W {
    self.output
  }

  fn ask<T>(
    &mut self,
    render: impl Fn(&mut W) -> io::Result<()>,
    parse: impl Fn(&str) -> Option<T>,
  ) -> Result<T, PromptError> {
    loop {
      render(&mut self.output)?;
      self.output.flush()?;

      let mut line = String::new();
      if self.input.read_line(&mut line)? == 0 {
        return Err(PromptError::Closed);
      }

      if let Some(answer) = parse(&line) {
        return Ok(answer);
      }

      self.rejected += 1;
      debug!(input = %line.trim(), "answer rejected");
    }
  }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
  fn show(&mut self, text: &str) -> Result<(), PromptError> {
    writeln!(self.output, "{}", text)?;
    Ok(())
  }

  fn ask_yes_no(&mut self, question: &str) -> Result<bool, PromptError> {
    self.ask(|out| write!(out, "{} (y/n): ", question), parse_yes_no)
  }

  fn choose_menu(&mut self) -> Result<MenuChoice, PromptError> {
    self.ask(write_menu, parse_menu_choice)
  }
}

fn write_menu<W: Write>(out: &mut W) -> io::Result<()> {
  writeln!(out, "Select build option:")?;
  for kind in ProfileKind::ALL {
    writeln!(out, "{}. {}", kind.selector(), kind.label())?;
  }
  writeln!(out, "Q. Quit")?;
  write!(out, ":")
}

/// Prompter that replays fixed answers, for driving the flow without a terminal.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
  answers: VecDeque<bool>,
  menu: VecDeque<MenuChoice>,
  asked: Vec<String>,
}

impl ScriptedPrompter {
  pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
    Self {
      answers: answers.into_iter().collect(),
      ..Self::default()
    }
  }

  pub fn with_menu(mut self, choices: impl IntoIterator<Item = MenuChoice>) -> Self {
    self.menu.extend(choices);
    self
  }

  /// Questions asked so far, in order.
  pub fn asked(&self) -> &[String] {
    &self.asked
  }
}

impl Prompter for ScriptedPrompter {
  fn show(&mut self, _text: &str) -> Result<(), PromptError> {
    Ok(())
  }

  fn ask_yes_no(&mut self, question: &str) -> Result<bool, PromptError> {
    self.asked.push(question.to_string());
    self.answers.pop_front().ok_or(PromptError::Closed)
  }

  fn choose_menu(&mut self) -> Result<MenuChoice, PromptError> {
    self.menu.pop_front().ok_or(PromptError::Closed)
  }
}
