//! Line-based terminal I/O.

use std::io::{self, BufRead, Write};

use crate::domain::QuestionKind;

pub trait Console {
  /// Print one line of output
  fn say(&mut self, text: &str) -> io::Result<()>;

  /// Print `prompt` without a newline and read one line.
  /// Returns None once input is exhausted.
  fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

  /// Show a subject and ask for one kind of answer
  fn ask(&mut self, display: &str, kind: QuestionKind) -> io::Result<Option<String>> {
    self.say(display)?;
    self.read_line(&format!("{}: ", kind.label()))
  }
}

/// Console over any buffered reader and writer
pub struct LineConsole<R, W> {
  input: R,
  output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
  pub fn new(input: R, output: W) -> Self {
    Self { input, output }
  }

  pub fn into_output(self) -> W {
    self.output
  }
}

impl LineConsole<io::StdinLock<'static>, io::Stdout> {
  pub fn stdio() -> Self {
    Self::new(io::stdin().lock(), io::stdout())
  }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
  fn say(&mut self, text: &str) -> io::Result<()> {
    writeln!(self.output, "{}", text)
  }

  fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
    write!(self.output, "{}", prompt)?;
    self.output.flush()?;

    let mut line = String::new();
    if self.input.read_line(&mut line)? == 0 {
      return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(Some(trimmed.to_string()))
  }
}
