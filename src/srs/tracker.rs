//! Per-item answer tracking for one batch.

use std::collections::{HashMap, HashSet};

use crate::domain::{AnswerState, AssignmentId, QuestionKind, SubjectKind};

/// Answer state for every item in a batch, plus which completions have
/// already been handed out
#[derive(Debug, Clone, Default)]
pub struct CompletionTracker {
  states: HashMap<AssignmentId, AnswerState>,
  reported: HashSet<AssignmentId>,
}

impl CompletionTracker {
  pub fn new() -> Self {
    Self::default()
  }

  /// Start tracking an item; re-inserting resets its state
  pub fn insert(&mut self, assignment_id: AssignmentId, subject_kind: SubjectKind) {
    self.states.insert(assignment_id, AnswerState::new(subject_kind));
    self.reported.remove(&assignment_id);
  }

  /// Record one scored answer. Unknown items are ignored.
  pub fn record_answer(&mut self, assignment_id: AssignmentId, kind: QuestionKind, correct: bool) {
    match self.states.get_mut(&assignment_id) {
      Some(state) => state.record(kind, correct),
      None => tracing::warn!("Answer recorded for untracked assignment {}", assignment_id),
    }
  }

  pub fn is_complete(&self, assignment_id: AssignmentId) -> bool {
    self
      .states
      .get(&assignment_id)
      .is_some_and(AnswerState::is_complete)
  }

  pub fn get(&self, assignment_id: AssignmentId) -> Option<&AnswerState> {
    self.states.get(&assignment_id)
  }

  /// Returns the item's final state the first time it is seen complete,
  /// and None on every call after that
  pub fn claim_completion(&mut self, assignment_id: AssignmentId) -> Option<AnswerState> {
    if !self.is_complete(assignment_id) || !self.reported.insert(assignment_id) {
      return None;
    }
    self.states.get(&assignment_id).cloned()
  }

  pub fn len(&self) -> usize {
    self.states.len()
  }

  pub fn is_empty(&self) -> bool {
    self.states.is_empty()
  }

  /// Items that were never completed
  pub fn unfinished(&self) -> usize {
    self.states.values().filter(|s| !s.is_complete()).count()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tracker_new_is_empty() {
    let tracker = CompletionTracker::new();
    assert!(tracker.is_empty());
    assert!(!tracker.is_complete(1));
  }

  #[test]
  fn test_kanji_requires_both() {
    let mut tracker = CompletionTracker::new();
    tracker.insert(7, SubjectKind::Kanji);

    tracker.record_answer(7, QuestionKind::Meaning, true);
    assert!(!tracker.is_complete(7));

    tracker.record_answer(7, QuestionKind::Reading, true);
    assert!(tracker.is_complete(7));
  }

  #[test]
  fn test_radical_requires_meaning_only() {
    let mut tracker = CompletionTracker::new();
    tracker.insert(3, SubjectKind::Radical);
    tracker.record_answer(3, QuestionKind::Meaning, true);
    assert!(tracker.is_complete(3));
  }

  #[test]
  fn test_counters_accumulate() {
    let mut tracker = CompletionTracker::new();
    tracker.insert(1, SubjectKind::Vocabulary);
    tracker.record_answer(1, QuestionKind::Meaning, false);
    tracker.record_answer(1, QuestionKind::Meaning, false);
    tracker.record_answer(1, QuestionKind::Reading, false);

    let state = tracker.get(1).unwrap();
    assert_eq!(state.incorrect_meaning, 2);
    assert_eq!(state.incorrect_reading, 1);
    assert!(!state.meaning_correct);
  }

  #[test]
  fn test_claim_completion_only_once() {
    let mut tracker = CompletionTracker::new();
    tracker.insert(5, SubjectKind::Radical);
    assert!(tracker.claim_completion(5).is_none());

    tracker.record_answer(5, QuestionKind::Meaning, true);
    assert!(tracker.claim_completion(5).is_some());
    assert!(tracker.claim_completion(5).is_none());

    // Late answers do not re-open the item
    tracker.record_answer(5, QuestionKind::Meaning, false);
    assert!(tracker.is_complete(5));
    assert!(tracker.is_complete(5));
    assert!(tracker.claim_completion(5).is_none());
  }

  #[test]
  fn test_unknown_assignment_ignored() {
    let mut tracker = CompletionTracker::new();
    tracker.record_answer(99, QuestionKind::Meaning, true);
    assert!(tracker.get(99).is_none());
    assert!(tracker.claim_completion(99).is_none());
  }

  #[test]
  fn test_unfinished_count() {
    let mut tracker = CompletionTracker::new();
    tracker.insert(1, SubjectKind::Radical);
    tracker.insert(2, SubjectKind::Kanji);
    tracker.record_answer(1, QuestionKind::Meaning, true);
    assert_eq!(tracker.len(), 2);
    assert_eq!(tracker.unfinished(), 1);
  }
}
