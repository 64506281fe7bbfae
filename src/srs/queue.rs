//! Working set of questions still waiting for a correct answer.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::Question;

#[derive(Debug, Clone, Default)]
pub struct QuestionQueue {
  pending: Vec<Question>,
}

impl QuestionQueue {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, question: Question) {
    self.pending.push(question);
  }

  /// Shuffle every pending question and return the first.
  ///
  /// The whole set is reshuffled on each draw, so the question just asked
  /// can come straight back until it is answered correctly.
  pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Question> {
    self.pending.shuffle(rng);
    self.pending.first().copied()
  }

  /// Drop a correctly answered question; absent questions are ignored
  pub fn remove_on_correct(&mut self, question: &Question) {
    self.pending.retain(|q| q != question);
  }

  pub fn contains(&self, question: &Question) -> bool {
    self.pending.contains(question)
  }

  pub fn len(&self) -> usize {
    self.pending.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pending.is_empty()
  }
}
