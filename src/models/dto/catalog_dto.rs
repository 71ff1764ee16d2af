use serde::{Deserialize, Serialize};

use crate::models::domain::{
    Answer, Difficulty, Question, Status, Topic, User, UserQuestion, UserRole,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDto {
    pub topic_id: i32,
    pub topic: String,
}

impl From<TopicDto> for Topic {
    fn from(dto: TopicDto) -> Self {
        Topic {
            topic_id: dto.topic_id,
            topic: dto.topic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDto {
    pub status_id: i32,
    pub text: String,
}

impl From<StatusDto> for Status {
    fn from(dto: StatusDto) -> Self {
        Status {
            status_id: dto.status_id,
            text: dto.text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyDto {
    pub difficulty_id: i32,
    pub mode: String,
}

impl From<DifficultyDto> for Difficulty {
    fn from(dto: DifficultyDto) -> Self {
        Difficulty {
            difficulty_id: dto.difficulty_id,
            mode: dto.mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub question_id: i32,
    pub question_text: String,
    pub reviewed_by: i32,
    pub topic: TopicDto,
    pub status: StatusDto,
    pub difficulty: DifficultyDto,
}

impl From<QuestionDto> for Question {
    fn from(dto: QuestionDto) -> Self {
        Question {
            question_id: dto.question_id,
            question_text: dto.question_text,
            reviewed_by: dto.reviewed_by,
            topic: dto.topic.into(),
            status: dto.status.into(),
            difficulty: dto.difficulty.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDto {
    pub answer_id: i32,
    pub text: String,
    pub correct: bool,
    pub question: QuestionDto,
}

impl From<AnswerDto> for Answer {
    fn from(dto: AnswerDto) -> Self {
        Answer {
            answer_id: dto.answer_id,
            text: dto.text,
            correct: dto.correct,
            question: dto.question.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleDto {
    pub user_role_id: i32,
    pub user_role: String,
}

impl From<UserRoleDto> for UserRole {
    fn from(dto: UserRoleDto) -> Self {
        UserRole {
            user_role_id: dto.user_role_id,
            user_role: dto.user_role,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_id: i32,
    pub surname: String,
    pub firstname: String,
    pub birthdate: String,
    pub nickname: String,
    pub email: String,
    pub password: String,
    pub user_role: UserRoleDto,
}

impl std::fmt::Debug for UserDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDto")
            .field("user_id", &self.user_id)
            .field("nickname", &self.nickname)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        User {
            user_id: dto.user_id,
            surname: dto.surname,
            firstname: dto.firstname,
            birthdate: dto.birthdate,
            nickname: dto.nickname,
            email: dto.email,
            password: dto.password,
            user_role: dto.user_role.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuestionDto {
    pub user_question_id: i32,
    pub user: UserDto,
    pub question: QuestionDto,
    pub score: i32,
}

impl From<UserQuestionDto> for UserQuestion {
    fn from(dto: UserQuestionDto) -> Self {
        UserQuestion {
            user_question_id: dto.user_question_id,
            user: dto.user.into(),
            question: dto.question.into(),
            score: dto.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUESTION_JSON: &str = r#"{
        "questionId": 5,
        "questionText": "What is 7 * 6?",
        "reviewedBy": 2,
        "topic": {"topicId": 1, "topic": "Mathematics"},
        "status": {"statusId": 3, "text": "approved"},
        "difficulty": {"difficultyId": 1, "mode": "EASY"}
    }"#;

    #[test]
    fn question_decodes_nested_records() {
        let dto: QuestionDto = serde_json::from_str(QUESTION_JSON).expect("question should decode");
        let question = Question::from(dto);

        assert_eq!(question.question_id, 5);
        assert_eq!(question.reviewed_by, 2);
        assert_eq!(question.topic.topic, "Mathematics");
        assert_eq!(question.status.text, "approved");
        assert_eq!(question.difficulty.mode, "EASY");
    }

    #[test]
    fn answer_carries_its_question() {
        let json = format!(
            r#"{{"answerId": 9, "text": "42", "correct": true, "question": {}}}"#,
            QUESTION_JSON
        );

        let answer = Answer::from(serde_json::from_str::<AnswerDto>(&json).unwrap());

        assert!(answer.correct);
        assert_eq!(answer.text, "42");
        assert_eq!(answer.question.question_id, 5);
    }

    #[test]
    fn user_question_decodes_user_and_role() {
        let json = format!(
            r#"{{
                "userQuestionId": 11,
                "user": {{
                    "userId": 4, "surname": "Smith", "firstname": "Ann",
                    "birthdate": "1999-01-01", "nickname": "ann", "email": "ann@example.com",
                    "password": "secret", "userRole": {{"userRoleId": 1, "userRole": "ADMIN"}}
                }},
                "question": {},
                "score": 3
            }}"#,
            QUESTION_JSON
        );

        let user_question =
            UserQuestion::from(serde_json::from_str::<UserQuestionDto>(&json).unwrap());

        assert_eq!(user_question.score, 3);
        assert_eq!(user_question.user.user_role.user_role, "ADMIN");
        assert_eq!(user_question.question.topic.topic_id, 1);
    }

    #[test]
    fn topic_missing_field_fails_to_decode() {
        let parsed = serde_json::from_str::<TopicDto>(r#"{"topicId": 1}"#);

        assert!(parsed.is_err());
    }

    #[test]
    fn user_dto_debug_hides_password() {
        let dto = UserDto {
            user_id: 1,
            surname: "S".to_string(),
            firstname: "F".to_string(),
            birthdate: "2000-01-01".to_string(),
            nickname: "n".to_string(),
            email: "e@example.com".to_string(),
            password: "topsecret".to_string(),
            user_role: UserRoleDto {
                user_role_id: 1,
                user_role: "PLAYER".to_string(),
            },
        };

        assert!(!format!("{:?}", dto).contains("topsecret"));
    }
}
