//! JSON shapes of the WaniKani v2 API and their conversion to domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Assignment, Meaning, Reading, Subject, SubjectKind};
use crate::error::{Result, WkError};

/// A single resource: `{ id, object, data }`
#[derive(Debug, Deserialize)]
pub struct Resource<T> {
  pub id: u64,
  pub object: String,
  pub data: T,
}

/// A paginated list of resources
#[derive(Debug, Deserialize)]
pub struct Collection<T> {
  pub data: Vec<Resource<T>>,
  #[serde(default)]
  pub pages: Pages,
}

#[derive(Debug, Default, Deserialize)]
pub struct Pages {
  pub next_url: Option<String>,
}

/// A report object such as `/summary`
#[derive(Debug, Deserialize)]
pub struct Report<T> {
  pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
  pub error: Option<String>,
}

// ==================== Summary ====================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SummaryEntry {
  pub available_at: DateTime<Utc>,
  pub subject_ids: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Summary {
  #[serde(default)]
  pub lessons: Vec<SummaryEntry>,
  #[serde(default)]
  pub reviews: Vec<SummaryEntry>,
}

impl Summary {
  pub fn available_lessons(&self, at: DateTime<Utc>) -> usize {
    count_available(&self.lessons, at)
  }

  pub fn available_reviews(&self, at: DateTime<Utc>) -> usize {
    count_available(&self.reviews, at)
  }
}

fn count_available(entries: &[SummaryEntry], at: DateTime<Utc>) -> usize {
  entries
    .iter()
    .filter(|e| e.available_at < at)
    .map(|e| e.subject_ids.len())
    .sum()
}

// ==================== Assignments ====================

#[derive(Debug, Deserialize)]
pub struct AssignmentData {
  pub subject_id: u64,
  pub subject_type: String,
}

impl Resource<AssignmentData> {
  pub fn into_assignment(self) -> Result<Assignment> {
    let subject_kind = SubjectKind::from_str(&self.data.subject_type)
      .ok_or_else(|| WkError::UnknownSubjectKind(self.data.subject_type.clone()))?;
    Ok(Assignment {
      id: self.id,
      subject_id: self.data.subject_id,
      subject_kind,
    })
  }
}

// ==================== Subjects ====================

#[derive(Debug, Deserialize)]
pub struct ApiMeaning {
  pub meaning: String,
  pub primary: bool,
  #[serde(default = "default_true")]
  pub accepted_answer: bool,
}

#[derive(Debug, Deserialize)]
pub struct ApiReading {
  pub reading: String,
  pub primary: bool,
  #[serde(default = "default_true")]
  pub accepted_answer: bool,
}

fn default_true() -> bool {
  true
}

#[derive(Debug, Deserialize)]
pub struct SubjectData {
  pub characters: Option<String>,
  #[serde(default)]
  pub slug: String,
  #[serde(default)]
  pub meanings: Vec<ApiMeaning>,
  #[serde(default)]
  pub readings: Vec<ApiReading>,
}

impl Resource<SubjectData> {
  /// Keep only accepted answers. Image-only radicals display as `[slug]`;
  /// kana-only vocabulary is read as written.
  pub fn into_subject(self) -> Result<Subject> {
    let kind =
      SubjectKind::from_str(&self.object).ok_or_else(|| WkError::UnknownSubjectKind(self.object.clone()))?;
    let data = self.data;

    let display = match data.characters {
      Some(chars) if !chars.is_empty() => chars,
      _ => format!("[{}]", data.slug),
    };

    let meanings = data
      .meanings
      .into_iter()
      .filter(|m| m.accepted_answer)
      .map(|m| Meaning {
        meaning: m.meaning,
        primary: m.primary,
      })
      .collect();

    let mut readings: Vec<Reading> = data
      .readings
      .into_iter()
      .filter(|r| r.accepted_answer)
      .map(|r| Reading {
        reading: r.reading,
        primary: r.primary,
      })
      .collect();
    if kind == SubjectKind::KanaVocabulary && readings.is_empty() {
      readings.push(Reading {
        reading: display.clone(),
        primary: true,
      });
    }
    if kind == SubjectKind::Radical {
      readings.clear();
    }

    Ok(Subject {
      id: self.id,
      kind,
      display,
      meanings,
      readings,
    })
  }
}

// ==================== Requests ====================

#[derive(Debug, Serialize)]
pub struct NewReview {
  pub assignment_id: u64,
  pub incorrect_meaning_answers: u32,
  pub incorrect_reading_answers: u32,
}

#[derive(Debug, Serialize)]
pub struct ReviewRequest {
  pub review: NewReview,
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn test_summary_counts_only_past_entries() {
    let json = r#"{
      "object": "report",
      "data": {
        "lessons": [
          { "available_at": "2024-01-01T10:00:00.000000Z", "subject_ids": [1, 2, 3] }
        ],
        "reviews": [
          { "available_at": "2024-01-01T09:00:00.000000Z", "subject_ids": [4, 5] },
          { "available_at": "2024-01-01T11:00:00.000000Z", "subject_ids": [6] },
          { "available_at": "2024-01-01T12:00:00.000000Z", "subject_ids": [] }
        ]
      }
    }"#;
    let report: Report<Summary> = serde_json::from_str(json).unwrap();
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 10, 30, 0).unwrap();

    assert_eq!(report.data.available_lessons(at), 3);
    assert_eq!(report.data.available_reviews(at), 2);
  }

  #[test]
  fn test_summary_boundary_is_exclusive() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let summary = Summary {
      lessons: vec![SummaryEntry {
        available_at: at,
        subject_ids: vec![1],
      }],
      reviews: vec![],
    };
    assert_eq!(summary.available_lessons(at), 0);
  }

  #[test]
  fn test_assignment_collection() {
    let json = r#"{
      "object": "collection",
      "pages": { "next_url": "https://api.wanikani.com/v2/assignments?page_after_id=80", "per_page": 500 },
      "data": [
        { "id": 80, "object": "assignment", "data": { "subject_id": 8761, "subject_type": "radical", "srs_stage": 1 } },
        { "id": 81, "object": "assignment", "data": { "subject_id": 440, "subject_type": "kanji" } }
      ]
    }"#;
    let page: Collection<AssignmentData> = serde_json::from_str(json).unwrap();
    assert!(page.pages.next_url.is_some());

    let assignments: Vec<Assignment> = page
      .data
      .into_iter()
      .map(|r| r.into_assignment().unwrap())
      .collect();
    assert_eq!(assignments[0].id, 80);
    assert_eq!(assignments[0].subject_kind, SubjectKind::Radical);
    assert_eq!(assignments[1].subject_id, 440);
  }

  #[test]
  fn test_last_page_has_no_next_url() {
    let json = r#"{ "object": "collection", "pages": { "next_url": null }, "data": [] }"#;
    let page: Collection<AssignmentData> = serde_json::from_str(json).unwrap();
    assert!(page.pages.next_url.is_none());
    assert!(page.data.is_empty());
  }

  #[test]
  fn test_kanji_subject_filters_unaccepted() {
    let json = r#"{
      "id": 440,
      "object": "kanji",
      "data": {
        "characters": "一",
        "slug": "一",
        "meanings": [ { "meaning": "One", "primary": true, "accepted_answer": true } ],
        "readings": [
          { "type": "onyomi", "primary": true, "accepted_answer": true, "reading": "いち" },
          { "type": "kunyomi", "primary": false, "accepted_answer": false, "reading": "ひと" }
        ]
      }
    }"#;
    let resource: Resource<SubjectData> = serde_json::from_str(json).unwrap();
    let subject = resource.into_subject().unwrap();

    assert_eq!(subject.kind, SubjectKind::Kanji);
    assert_eq!(subject.display, "一");
    assert_eq!(subject.readings.len(), 1);
    assert_eq!(subject.readings[0].reading, "いち");
  }

  #[test]
  fn test_image_radical_uses_slug() {
    let json = r#"{
      "id": 8761,
      "object": "radical",
      "data": {
        "characters": null,
        "slug": "stick",
        "meanings": [ { "meaning": "Stick", "primary": true, "accepted_answer": true } ]
      }
    }"#;
    let resource: Resource<SubjectData> = serde_json::from_str(json).unwrap();
    let subject = resource.into_subject().unwrap();

    assert_eq!(subject.kind, SubjectKind::Radical);
    assert_eq!(subject.display, "[stick]");
    assert!(subject.readings.is_empty());
  }

  #[test]
  fn test_kana_vocabulary_reads_as_written() {
    let json = r#"{
      "id": 9000,
      "object": "kana_vocabulary",
      "data": {
        "characters": "ぺらぺら",
        "slug": "ぺらぺら",
        "meanings": [ { "meaning": "Fluent", "primary": true, "accepted_answer": true } ]
      }
    }"#;
    let resource: Resource<SubjectData> = serde_json::from_str(json).unwrap();
    let subject = resource.into_subject().unwrap();
    assert_eq!(subject.readings[0].reading, "ぺらぺら");
  }

  #[test]
  fn test_unknown_subject_type() {
    let json = r#"{ "id": 1, "object": "sentence", "data": { "characters": "x" } }"#;
    let resource: Resource<SubjectData> = serde_json::from_str(json).unwrap();
    assert!(matches!(resource.into_subject(), Err(WkError::UnknownSubjectKind(_))));
  }

  #[test]
  fn test_review_request_shape() {
    let request = ReviewRequest {
      review: NewReview {
        assignment_id: 80,
        incorrect_meaning_answers: 1,
        incorrect_reading_answers: 0,
      },
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["review"]["assignment_id"], 80);
    assert_eq!(value["review"]["incorrect_meaning_answers"], 1);
    assert_eq!(value["review"]["incorrect_reading_answers"], 0);
  }
}
