//! Completion handlers that report finished items to the service.
//!
//! Both are best-effort: a failed request is logged and noted in the local
//! completion log, and the quiz carries on.

use chrono::Utc;
use rusqlite::Connection;

use super::WaniKani;
use crate::db::{self, CompletionRecord};
use crate::domain::{AnswerState, Assignment, StudyMode, Subject};
use crate::error::LogOnError;
use crate::srs::CompletionHandler;

fn log_completion(
  conn: Option<&Connection>,
  mode: StudyMode,
  assignment: &Assignment,
  subject: &Subject,
  answers: &AnswerState,
  submitted: bool,
) {
  let Some(conn) = conn else {
    return;
  };
  let record = CompletionRecord {
    assignment_id: assignment.id,
    subject_id: subject.id,
    display: subject.display.clone(),
    study_mode: mode,
    incorrect_meaning: answers.incorrect_meaning,
    incorrect_reading: answers.incorrect_reading,
    submitted,
    completed_at: Utc::now(),
  };
  db::insert_completion(conn, &record).log_warn("Failed to log completion locally");
}

/// Submits a review record for each finished review item
pub struct ReviewReporter<'a, A: WaniKani + ?Sized> {
  api: &'a A,
  conn: Option<&'a Connection>,
}

impl<'a, A: WaniKani + ?Sized> ReviewReporter<'a, A> {
  pub fn new(api: &'a A, conn: Option<&'a Connection>) -> Self {
    Self { api, conn }
  }
}

impl<A: WaniKani + ?Sized> CompletionHandler for ReviewReporter<'_, A> {
  fn item_complete(&mut self, assignment: &Assignment, subject: &Subject, answers: &AnswerState) {
    let submitted = self
      .api
      .create_review(assignment.id, answers.incorrect_meaning, answers.incorrect_reading)
      .log_warn(&format!("Failed to submit review for assignment {}", assignment.id))
      .is_some();
    log_completion(self.conn, StudyMode::Review, assignment, subject, answers, submitted);
  }
}

/// Starts each freshly learned lesson item so it enters the review cycle
pub struct LessonStarter<'a, A: WaniKani + ?Sized> {
  api: &'a A,
  conn: Option<&'a Connection>,
}

impl<'a, A: WaniKani + ?Sized> LessonStarter<'a, A> {
  pub fn new(api: &'a A, conn: Option<&'a Connection>) -> Self {
    Self { api, conn }
  }
}

impl<A: WaniKani + ?Sized> CompletionHandler for LessonStarter<'_, A> {
  fn item_complete(&mut self, assignment: &Assignment, subject: &Subject, answers: &AnswerState) {
    let submitted = self
      .api
      .start_assignment(assignment.id)
      .log_warn(&format!("Failed to start assignment {}", assignment.id))
      .is_some();
    log_completion(self.conn, StudyMode::Lesson, assignment, subject, answers, submitted);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{QuestionKind, SubjectKind};
  use crate::testing::{FakeWaniKani, assignment, vocabulary};

  fn finished(kind: SubjectKind, wrong_meanings: u32) -> AnswerState {
    let mut state = AnswerState::new(kind);
    for _ in 0..wrong_meanings {
      state.record(QuestionKind::Meaning, false);
    }
    state.record(QuestionKind::Meaning, true);
    state.record(QuestionKind::Reading, true);
    state
  }

  #[test]
  fn test_review_reporter_submits_counters() {
    let api = FakeWaniKani::new();
    let conn = db::open_in_memory().unwrap();
    let subject = vocabulary(1, "空", &["sky"], &["そら"]);
    let item = assignment(10, 1, SubjectKind::Vocabulary);

    let mut reporter = ReviewReporter::new(&api, Some(&conn));
    reporter.item_complete(&item, &subject, &finished(SubjectKind::Vocabulary, 2));

    assert_eq!(api.submitted_reviews(), vec![(10, 2, 0)]);
    let log = db::recent_completions(&conn, 10).unwrap();
    assert_eq!(log.len(), 1);
    assert!(log[0].submitted);
    assert_eq!(log[0].study_mode, StudyMode::Review);
  }

  #[test]
  fn test_review_failure_is_logged_not_raised() {
    let mut api = FakeWaniKani::new();
    api.fail_writes = true;
    let conn = db::open_in_memory().unwrap();
    let subject = vocabulary(1, "空", &["sky"], &["そら"]);
    let item = assignment(10, 1, SubjectKind::Vocabulary);

    let mut reporter = ReviewReporter::new(&api, Some(&conn));
    reporter.item_complete(&item, &subject, &finished(SubjectKind::Vocabulary, 0));

    assert!(api.submitted_reviews().is_empty());
    let log = db::recent_completions(&conn, 10).unwrap();
    assert!(!log[0].submitted);
  }

  #[test]
  fn test_lesson_starter_starts_assignment() {
    let api = FakeWaniKani::new();
    let subject = vocabulary(1, "空", &["sky"], &["そら"]);
    let item = assignment(10, 1, SubjectKind::Vocabulary);

    let mut starter = LessonStarter::new(&api, None);
    starter.item_complete(&item, &subject, &finished(SubjectKind::Vocabulary, 0));

    assert_eq!(api.started_assignments(), vec![10]);
    assert!(api.submitted_reviews().is_empty());
  }
}
