use crate::models::domain::Question;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Answer {
    pub answer_id: i32,
    pub text: String,
    pub correct: bool,
    pub question: Question,
}
