//! Quiz loop that drains one batch.
//!
//! Questions are drawn at random from the batch queue until every one has
//! been answered correctly or the user types `q`. Answers in the wrong
//! script are bounced back before scoring. When both parts of an item (or
//! just the meaning, for radicals) are correct the completion handler is
//! called, once per item.

use std::io;

use rand::Rng;

use crate::console::Console;
use crate::domain::{AnswerState, Assignment, Subject};
use crate::validation::{accepted_answers, check_charset, normalize_answer, prepare_input, validate_answer};

use super::Batch;

/// Typed alone, ends the batch early
pub const QUIT_TOKEN: &str = "q";

/// Receives each item once it is fully answered
pub trait CompletionHandler {
  fn item_complete(&mut self, assignment: &Assignment, subject: &Subject, answers: &AnswerState);
}

/// How a batch run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
  /// Every question was answered correctly
  Finished,
  /// The user quit, or input ran out
  Quit,
}

impl BatchOutcome {
  pub fn is_quit(&self) -> bool {
    matches!(self, Self::Quit)
  }
}

/// Run the quiz over `batch` until its queue is empty or the user quits.
///
/// Only console I/O errors are returned; handler failures stay with the
/// handler.
pub fn run_batch<C, H, R>(
  batch: &mut Batch,
  console: &mut C,
  handler: &mut H,
  rng: &mut R,
) -> io::Result<BatchOutcome>
where
  C: Console + ?Sized,
  H: CompletionHandler + ?Sized,
  R: Rng + ?Sized,
{
  loop {
    let Some(question) = batch.queue.draw(rng) else {
      tracing::debug!("Batch finished");
      return Ok(BatchOutcome::Finished);
    };
    let (Some(subject), Some(assignment)) = (
      batch.subjects.get(&question.assignment_id),
      batch.assignments.get(&question.assignment_id),
    ) else {
      tracing::warn!("Dropping question for unknown assignment {}", question.assignment_id);
      batch.queue.remove_on_correct(&question);
      continue;
    };

    // Re-ask the same question until the answer is in the right script
    let answer = loop {
      let Some(raw) = console.ask(&subject.display, question.kind)? else {
        console.say("exiting...")?;
        return Ok(BatchOutcome::Quit);
      };
      let typed = prepare_input(&raw);
      if typed == QUIT_TOKEN {
        console.say("exiting...")?;
        return Ok(BatchOutcome::Quit);
      }
      match check_charset(&typed, question.kind) {
        Ok(()) => break typed,
        Err(mismatch) => console.say(&mismatch.to_string())?,
      }
    };

    let answer = normalize_answer(&answer, question.kind);
    let correct = validate_answer(&answer, subject, question.kind).is_correct();
    batch
      .tracker
      .record_answer(question.assignment_id, question.kind, correct);

    if correct {
      batch.queue.remove_on_correct(&question);
      console.say("CORRECT!")?;
    } else {
      let accepted = accepted_answers(subject, question.kind);
      console.say(&format!("INCORRECT...\nAccepted answers: {}", accepted.join(", ")))?;
    }

    if let Some(answers) = batch.tracker.claim_completion(question.assignment_id) {
      tracing::info!(
        "Assignment {} complete ({} wrong meanings, {} wrong readings)",
        assignment.id,
        answers.incorrect_meaning,
        answers.incorrect_reading
      );
      handler.item_complete(assignment, subject, &answers);
    }
  }
}
