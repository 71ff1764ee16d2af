pub mod entity_list;
pub mod quiz_session;

pub use entity_list::{EntityListController, EntityListState};
pub use quiz_session::{AnswerOutcome, LoadRequest, QuizPhase, QuizSessionEngine, QuizSnapshot};
