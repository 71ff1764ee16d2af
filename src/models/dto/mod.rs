pub mod catalog_dto;
pub mod quiz_dto;
pub mod request;

pub use catalog_dto::{
    AnswerDto, DifficultyDto, QuestionDto, StatusDto, TopicDto, UserDto, UserQuestionDto,
    UserRoleDto,
};
pub use quiz_dto::{QuizDto, QuizQuestionDto};
pub use request::QuestionQuery;
