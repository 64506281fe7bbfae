//! Answer validation: script checks and matching against accepted answers.
//!
//! Meanings are typed in Latin script and readings in kana. Before an answer
//! is scored it must be in the script its question expects; a mismatch is
//! reported back to the user and never counts as a wrong answer.

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::domain::{QuestionKind, Subject};

// ============================================================================
// Charset checks
// ============================================================================

/// Printable ASCII range accepted for meanings and rejected for readings
const ASCII_PRINTABLE: std::ops::RangeInclusive<u32> = 0x20..=0x7F;

fn is_ascii_printable(c: char) -> bool {
  ASCII_PRINTABLE.contains(&(c as u32))
}

/// Input was typed in the wrong script for the question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharsetMismatch {
  pub expected: QuestionKind,
}

impl fmt::Display for CharsetMismatch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.expected {
      QuestionKind::Reading => {
        write!(f, "Careful! This is a reading and you entered latin letters.")
      }
      QuestionKind::Meaning => {
        write!(f, "Careful! This is a meaning and you entered non-latin letters.")
      }
    }
  }
}

impl std::error::Error for CharsetMismatch {}

/// Whether `input` is written in the script `kind` expects.
///
/// Readings may not contain any printable ASCII, meanings may contain
/// nothing else. Empty input passes both.
pub fn is_acceptable_charset(input: &str, kind: QuestionKind) -> bool {
  match kind {
    QuestionKind::Reading => !input.chars().any(is_ascii_printable),
    QuestionKind::Meaning => input.chars().all(is_ascii_printable),
  }
}

pub fn check_charset(input: &str, kind: QuestionKind) -> Result<(), CharsetMismatch> {
  if is_acceptable_charset(input, kind) {
    Ok(())
  } else {
    Err(CharsetMismatch { expected: kind })
  }
}

// ============================================================================
// Normalization
// ============================================================================

/// Trim and lowercase a typed line. The quit check and the charset check
/// both look at this form.
pub fn prepare_input(raw: &str) -> String {
  raw.trim().to_lowercase()
}

/// Normalize an answer for scoring.
///
/// Meanings are NFKC-folded so compatibility forms in stored answers compare
/// as plain text; readings only get NFC so kana composed from a dakuten mark
/// compares equal to the precomposed form. Both are lowercased, and runs of
/// whitespace collapse to a single space.
pub fn normalize_answer(input: &str, kind: QuestionKind) -> String {
  let folded: String = match kind {
    QuestionKind::Meaning => input.nfkc().collect(),
    QuestionKind::Reading => input.nfc().collect(),
  };
  folded
    .to_lowercase()
    .split_whitespace()
    .collect::<Vec<_>>()
    .join(" ")
}

// ============================================================================
// Scoring
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerResult {
  Correct,
  Incorrect,
}

impl AnswerResult {
  pub fn is_correct(&self) -> bool {
    matches!(self, Self::Correct)
  }
}

/// Every accepted answer for the question, primary or not, in display order
pub fn accepted_answers(subject: &Subject, kind: QuestionKind) -> Vec<String> {
  let raw: Vec<&str> = match kind {
    QuestionKind::Meaning => subject.meanings.iter().map(|m| m.meaning.as_str()).collect(),
    QuestionKind::Reading => subject.readings.iter().map(|r| r.reading.as_str()).collect(),
  };
  raw.into_iter().map(|a| normalize_answer(a, kind)).collect()
}

/// Score an already-normalized answer against the subject
pub fn validate_answer(normalized_input: &str, subject: &Subject, kind: QuestionKind) -> AnswerResult {
  if normalized_input.is_empty() {
    return AnswerResult::Incorrect;
  }
  if accepted_answers(subject, kind)
    .iter()
    .any(|accepted| accepted == normalized_input)
  {
    AnswerResult::Correct
  } else {
    AnswerResult::Incorrect
  }
}
