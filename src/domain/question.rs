use serde::{Deserialize, Serialize};

use super::{AssignmentId, SubjectKind};

/// The two independently scored facets of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
  Meaning,
  Reading,
}

impl QuestionKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Meaning => "meaning",
      Self::Reading => "reading",
    }
  }

  /// Label shown in front of the answer prompt
  pub fn label(&self) -> &'static str {
    match self {
      Self::Meaning => "MEANING",
      Self::Reading => "READING",
    }
  }
}

/// One scorable (item, kind) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Question {
  pub assignment_id: AssignmentId,
  pub kind: QuestionKind,
}

impl Question {
  pub fn new(assignment_id: AssignmentId, kind: QuestionKind) -> Self {
    Self { assignment_id, kind }
  }
}

/// Per-item answer progress within one batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerState {
  pub subject_kind: SubjectKind,
  pub meaning_correct: bool,
  /// Never set for radicals
  pub reading_correct: bool,
  pub incorrect_meaning: u32,
  pub incorrect_reading: u32,
}

impl AnswerState {
  pub fn new(subject_kind: SubjectKind) -> Self {
    Self {
      subject_kind,
      meaning_correct: false,
      reading_correct: false,
      incorrect_meaning: 0,
      incorrect_reading: 0,
    }
  }

  pub fn record(&mut self, kind: QuestionKind, correct: bool) {
    match (kind, correct) {
      (QuestionKind::Meaning, true) => self.meaning_correct = true,
      (QuestionKind::Reading, true) => self.reading_correct = true,
      (QuestionKind::Meaning, false) => self.incorrect_meaning += 1,
      (QuestionKind::Reading, false) => self.incorrect_reading += 1,
    }
  }

  pub fn is_complete(&self) -> bool {
    self.meaning_correct && (!self.subject_kind.has_reading() || self.reading_correct)
  }
}
