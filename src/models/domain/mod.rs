pub mod answer;
pub mod difficulty;
pub mod question;
pub mod quiz;
pub mod quiz_question;
pub mod status;
pub mod topic;
pub mod user;
pub mod user_question;
pub mod user_role;
pub use answer::Answer;
pub use difficulty::Difficulty;
pub use question::Question;
pub use quiz::Quiz;
pub use quiz_question::QuizQuestion;
pub use status::Status;
pub use topic::Topic;
pub use user::User;
pub use user_question::UserQuestion;
pub use user_role::UserRole;
