//! Slices due items into batches and expands them into questions.

use std::collections::HashMap;

use crate::api::WaniKani;
use crate::domain::{Assignment, AssignmentId, Question, QuestionKind, Subject};
use crate::error::{Result, WkError};

use super::{CompletionTracker, QuestionQueue};

/// Everything one engine run needs: the questions, their answer state and
/// the subjects they are scored against
#[derive(Debug, Default)]
pub struct Batch {
  pub queue: QuestionQueue,
  pub tracker: CompletionTracker,
  pub assignments: HashMap<AssignmentId, Assignment>,
  pub subjects: HashMap<AssignmentId, Subject>,
  /// Number of items taken from the front of the source
  pub consumed: usize,
}

/// Build a batch from the first `batch_size` items.
///
/// Every item gets a meaning question, and a reading question unless its
/// subject is a radical. A subject that cannot be fetched, or that has
/// nothing to score against, fails the whole batch.
pub fn assemble_batch<'a, I, A>(items: I, batch_size: usize, api: &A) -> Result<Batch>
where
  I: IntoIterator<Item = &'a Assignment>,
  A: WaniKani + ?Sized,
{
  let mut batch = Batch::default();

  for assignment in items.into_iter().take(batch_size) {
    let subject = api.subject(assignment.subject_id)?;
    if subject.meanings.is_empty() || (subject.kind.has_reading() && subject.readings.is_empty()) {
      return Err(WkError::Unscorable(subject.id));
    }
    if subject.kind != assignment.subject_kind {
      tracing::debug!(
        "Assignment {} says {} but subject {} is {}",
        assignment.id,
        assignment.subject_kind.as_str(),
        subject.id,
        subject.kind.as_str()
      );
    }

    batch.tracker.insert(assignment.id, subject.kind);
    batch.queue.push(Question::new(assignment.id, QuestionKind::Meaning));
    if subject.kind.has_reading() {
      batch.queue.push(Question::new(assignment.id, QuestionKind::Reading));
    }

    batch.assignments.insert(assignment.id, assignment.clone());
    batch.subjects.insert(assignment.id, subject);
    batch.consumed += 1;
  }

  tracing::debug!(
    "Assembled batch of {} items ({} questions)",
    batch.consumed,
    batch.queue.len()
  );
  Ok(batch)
}
