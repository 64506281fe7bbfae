//! Commands accepted at the main prompt.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
  Help,
  Lesson,
  Review,
  Summary,
  History,
  Quit,
}

impl Command {
  /// Map a typed token to its command
  pub fn parse(input: &str) -> Option<Self> {
    match input.trim().to_lowercase().as_str() {
      "help" | "h" => Some(Self::Help),
      "lesson" | "lessons" | "l" => Some(Self::Lesson),
      "review" | "reviews" | "r" => Some(Self::Review),
      "summary" | "s" => Some(Self::Summary),
      "history" => Some(Self::History),
      "quit" | "exit" | "q" => Some(Self::Quit),
      _ => None,
    }
  }
}

pub const HELP_TEXT: &str = "
COMMANDS
    help           list commands
    lesson         start lessons
    review         start reviews
    summary        show available lessons and reviews
    history        show recently completed items
    quit/exit      exit program

While answering, type q on its own to stop the current batch.
";

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_aliases() {
    assert_eq!(Command::parse("h"), Some(Command::Help));
    assert_eq!(Command::parse("lessons"), Some(Command::Lesson));
    assert_eq!(Command::parse("l"), Some(Command::Lesson));
    assert_eq!(Command::parse("r"), Some(Command::Review));
    assert_eq!(Command::parse("reviews"), Some(Command::Review));
    assert_eq!(Command::parse("s"), Some(Command::Summary));
    assert_eq!(Command::parse("history"), Some(Command::History));
    assert_eq!(Command::parse("exit"), Some(Command::Quit));
    assert_eq!(Command::parse("q"), Some(Command::Quit));
  }

  #[test]
  fn test_whitespace_and_case() {
    assert_eq!(Command::parse("  Review \n"), Some(Command::Review));
  }

  #[test]
  fn test_unknown() {
    assert_eq!(Command::parse("dance"), None);
    assert_eq!(Command::parse(""), None);
  }
}
