use serde::{Deserialize, Serialize};

use super::{SubjectId, SubjectKind};

pub type AssignmentId = u64;

/// A user's progress record for one subject (an "item").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
  pub id: AssignmentId,
  pub subject_id: SubjectId,
  pub subject_kind: SubjectKind,
}

/// Which flow an item was completed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudyMode {
  Lesson,
  Review,
}

impl StudyMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Lesson => "lesson",
      Self::Review => "review",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "lesson" => Some(Self::Lesson),
      "review" => Some(Self::Review),
      _ => None,
    }
  }

  /// Plural noun used in user-facing messages
  pub fn plural(&self) -> &'static str {
    match self {
      Self::Lesson => "lessons",
      Self::Review => "reviews",
    }
  }
}
