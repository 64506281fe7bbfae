pub mod assignment;
pub mod question;
pub mod subject;

pub use assignment::{Assignment, AssignmentId, StudyMode};
pub use question::{AnswerState, Question, QuestionKind};
pub use subject::{Meaning, Reading, Subject, SubjectId, SubjectKind};
