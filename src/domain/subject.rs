use serde::{Deserialize, Serialize};

pub type SubjectId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
  Radical,
  Kanji,
  Vocabulary,
  KanaVocabulary,
}

impl SubjectKind {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "radical" => Some(Self::Radical),
      "kanji" => Some(Self::Kanji),
      "vocabulary" => Some(Self::Vocabulary),
      "kana_vocabulary" => Some(Self::KanaVocabulary),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Radical => "radical",
      Self::Kanji => "kanji",
      Self::Vocabulary => "vocabulary",
      Self::KanaVocabulary => "kana_vocabulary",
    }
  }

  /// Radicals are only ever quizzed on their meaning
  pub fn has_reading(&self) -> bool {
    !matches!(self, Self::Radical)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meaning {
  pub meaning: String,
  pub primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
  pub reading: String,
  pub primary: bool,
}

/// A learnable unit with the answers accepted for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
  pub id: SubjectId,
  pub kind: SubjectKind,
  /// Glyph, or a bracketed placeholder for image-only radicals
  pub display: String,
  pub meanings: Vec<Meaning>,
  pub readings: Vec<Reading>,
}
