//! The WaniKani service as seen by the quiz: fetching due items and
//! subjects, and reporting finished items back.

pub mod client;
pub mod completion;
pub mod models;

pub use client::WaniKaniClient;
pub use completion::{LessonStarter, ReviewReporter};
pub use models::{Summary, SummaryEntry};

use crate::domain::{Assignment, AssignmentId, Subject, SubjectId};
use crate::error::Result;

pub trait WaniKani {
  fn summary(&self) -> Result<Summary>;

  /// Assignments whose review is due now
  fn review_assignments(&self) -> Result<Vec<Assignment>>;

  /// Assignments unlocked but not yet learned
  fn lesson_assignments(&self) -> Result<Vec<Assignment>>;

  fn subject(&self, id: SubjectId) -> Result<Subject>;

  fn create_review(&self, assignment_id: AssignmentId, incorrect_meaning: u32, incorrect_reading: u32) -> Result<()>;

  /// Move a freshly learned item into the review cycle
  fn start_assignment(&self, assignment_id: AssignmentId) -> Result<()>;
}
