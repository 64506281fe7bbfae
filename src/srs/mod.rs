pub mod batch;
pub mod engine;
pub mod queue;
pub mod tracker;

pub use batch::{Batch, assemble_batch};
pub use engine::{BatchOutcome, CompletionHandler, QUIT_TOKEN, run_batch};
pub use queue::QuestionQueue;
pub use tracker::CompletionTracker;
