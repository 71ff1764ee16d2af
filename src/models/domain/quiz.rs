use crate::models::domain::quiz_question::QuizQuestion;

/// A named, ordered question set served by the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}
