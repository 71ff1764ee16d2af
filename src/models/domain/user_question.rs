use crate::models::domain::{Question, User};

/// Score a user obtained on one catalogue question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserQuestion {
    pub user_question_id: i32,
    pub user: User,
    pub question: Question,
    pub score: i32,
}
