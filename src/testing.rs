//! Test doubles for the quiz: an in-memory service, a scripted console
//! and a handler that records completions.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::io;

use crate::api::{Summary, WaniKani};
use crate::console::Console;
use crate::domain::{
  AnswerState, Assignment, AssignmentId, Meaning, QuestionKind, Reading, Subject, SubjectId, SubjectKind,
};
use crate::error::{Result, WkError};
use crate::srs::CompletionHandler;

// ==================== Builders ====================

pub fn assignment(id: AssignmentId, subject_id: SubjectId, subject_kind: SubjectKind) -> Assignment {
  Assignment {
    id,
    subject_id,
    subject_kind,
  }
}

pub fn vocabulary(id: SubjectId, display: &str, meanings: &[&str], readings: &[&str]) -> Subject {
  Subject {
    id,
    kind: SubjectKind::Vocabulary,
    display: display.to_string(),
    meanings: meanings
      .iter()
      .enumerate()
      .map(|(i, m)| Meaning {
        meaning: m.to_string(),
        primary: i == 0,
      })
      .collect(),
    readings: readings
      .iter()
      .enumerate()
      .map(|(i, r)| Reading {
        reading: r.to_string(),
        primary: i == 0,
      })
      .collect(),
  }
}

pub fn radical(id: SubjectId, display: &str, meanings: &[&str]) -> Subject {
  Subject {
    kind: SubjectKind::Radical,
    ..vocabulary(id, display, meanings, &[])
  }
}

// ==================== Service ====================

/// In-memory stand-in for the WaniKani API
#[derive(Debug, Default)]
pub struct FakeWaniKani {
  pub subjects: HashMap<SubjectId, Subject>,
  pub reviews: Vec<Assignment>,
  pub lessons: Vec<Assignment>,
  pub summary: Summary,
  /// Make review submissions and assignment starts fail
  pub fail_writes: bool,
  /// Make summary and assignment listing fail
  pub fail_reads: bool,
  submitted: RefCell<Vec<(AssignmentId, u32, u32)>>,
  started: RefCell<Vec<AssignmentId>>,
  assignment_fetches: Cell<usize>,
}

impl FakeWaniKani {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_subject(&mut self, subject: Subject) {
    self.subjects.insert(subject.id, subject);
  }

  /// Add a subject together with a due review for it
  pub fn add_review(&mut self, assignment_id: AssignmentId, subject: Subject) {
    self.reviews.push(assignment(assignment_id, subject.id, subject.kind));
    self.add_subject(subject);
  }

  /// Add a subject together with an available lesson for it
  pub fn add_lesson(&mut self, assignment_id: AssignmentId, subject: Subject) {
    self.lessons.push(assignment(assignment_id, subject.id, subject.kind));
    self.add_subject(subject);
  }

  pub fn submitted_reviews(&self) -> Vec<(AssignmentId, u32, u32)> {
    self.submitted.borrow().clone()
  }

  pub fn started_assignments(&self) -> Vec<AssignmentId> {
    self.started.borrow().clone()
  }

  /// Number of times either assignment list was requested
  pub fn assignment_fetches(&self) -> usize {
    self.assignment_fetches.get()
  }

  fn unavailable() -> WkError {
    WkError::Api {
      status: 503,
      message: "Service Unavailable".into(),
    }
  }
}

impl WaniKani for FakeWaniKani {
  fn summary(&self) -> Result<Summary> {
    if self.fail_reads {
      return Err(Self::unavailable());
    }
    Ok(self.summary.clone())
  }

  fn review_assignments(&self) -> Result<Vec<Assignment>> {
    self.assignment_fetches.set(self.assignment_fetches.get() + 1);
    if self.fail_reads {
      return Err(Self::unavailable());
    }
    Ok(self.reviews.clone())
  }

  fn lesson_assignments(&self) -> Result<Vec<Assignment>> {
    self.assignment_fetches.set(self.assignment_fetches.get() + 1);
    if self.fail_reads {
      return Err(Self::unavailable());
    }
    Ok(self.lessons.clone())
  }

  fn subject(&self, id: SubjectId) -> Result<Subject> {
    self.subjects.get(&id).cloned().ok_or_else(|| WkError::Api {
      status: 404,
      message: "Not Found".into(),
    })
  }

  fn create_review(&self, assignment_id: AssignmentId, incorrect_meaning: u32, incorrect_reading: u32) -> Result<()> {
    if self.fail_writes {
      return Err(Self::unavailable());
    }
    self
      .submitted
      .borrow_mut()
      .push((assignment_id, incorrect_meaning, incorrect_reading));
    Ok(())
  }

  fn start_assignment(&self, assignment_id: AssignmentId) -> Result<()> {
    if self.fail_writes {
      return Err(Self::unavailable());
    }
    self.started.borrow_mut().push(assignment_id);
    Ok(())
  }
}

// ==================== Console ====================

/// Console that answers questions from scripts and records everything shown.
///
/// Answers come either from one script per question kind, consumed in order,
/// or from a fixed answer per displayed subject. Plain `read_line` calls are
/// served from a separate line script. An exhausted script reads as end of
/// input.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
  meanings: VecDeque<String>,
  readings: VecDeque<String>,
  by_display: HashMap<String, (String, String)>,
  lines: VecDeque<String>,
  transcript: Vec<String>,
  asked: HashMap<QuestionKind, usize>,
}

fn owned(items: &[&str]) -> VecDeque<String> {
  items.iter().map(|s| s.to_string()).collect()
}

impl ScriptedConsole {
  pub fn new(meanings: &[&str], readings: &[&str]) -> Self {
    Self {
      meanings: owned(meanings),
      readings: owned(readings),
      ..Self::default()
    }
  }

  /// Always answer `(display, meaning, reading)` for the matching subject
  pub fn by_subject(answers: &[(&str, &str, &str)]) -> Self {
    Self {
      by_display: answers
        .iter()
        .map(|(display, meaning, reading)| (display.to_string(), (meaning.to_string(), reading.to_string())))
        .collect(),
      ..Self::default()
    }
  }

  pub fn with_lines(mut self, lines: &[&str]) -> Self {
    self.lines = owned(lines);
    self
  }

  pub fn transcript_contains(&self, needle: &str) -> bool {
    self.transcript.iter().any(|line| line.contains(needle))
  }

  /// How many times a question of `kind` was asked
  pub fn asked(&self, kind: QuestionKind) -> usize {
    self.asked.get(&kind).copied().unwrap_or(0)
  }
}

impl Console for ScriptedConsole {
  fn say(&mut self, text: &str) -> io::Result<()> {
    self.transcript.push(text.to_string());
    Ok(())
  }

  fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
    self.transcript.push(prompt.to_string());
    Ok(self.lines.pop_front())
  }

  fn ask(&mut self, display: &str, kind: QuestionKind) -> io::Result<Option<String>> {
    self.transcript.push(format!("{} {}:", display, kind.label()));
    *self.asked.entry(kind).or_insert(0) += 1;

    if let Some((meaning, reading)) = self.by_display.get(display) {
      let answer = match kind {
        QuestionKind::Meaning => meaning,
        QuestionKind::Reading => reading,
      };
      return Ok(Some(answer.clone()));
    }
    Ok(match kind {
      QuestionKind::Meaning => self.meanings.pop_front(),
      QuestionKind::Reading => self.readings.pop_front(),
    })
  }
}

// ==================== Handler ====================

#[derive(Debug, Default)]
pub struct RecordingHandler {
  pub completed: Vec<(AssignmentId, AnswerState)>,
}

impl CompletionHandler for RecordingHandler {
  fn item_complete(&mut self, assignment: &Assignment, _subject: &Subject, answers: &AnswerState) {
    self.completed.push((assignment.id, answers.clone()));
  }
}
