use crate::models::domain::{Difficulty, Status, Topic};

/// Catalogue question as the backend stores it, without its answers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub question_id: i32,
    pub question_text: String,
    pub reviewed_by: i32, // user id of the reviewer
    pub topic: Topic,
    pub status: Status,
    pub difficulty: Difficulty,
}
