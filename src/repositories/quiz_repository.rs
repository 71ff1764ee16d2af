use async_trait::async_trait;
use validator::Validate;

use crate::{
    api::{routes, ApiClient},
    errors::{AppResult, FetchResult},
    models::{
        domain::{Quiz, QuizQuestion},
        dto::{quiz_dto::questions_from_dtos, QuestionQuery, QuizDto, QuizQuestionDto},
    },
    repositories::into_fetch_result,
};

/// Question source for the quiz session engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn fetch_random(&self, query: &QuestionQuery) -> FetchResult<Vec<QuizQuestion>>;
    async fn fetch_by_quiz_id(&self, quiz_id: i64) -> FetchResult<Quiz>;
    async fn list_quizzes(&self) -> FetchResult<Vec<Quiz>>;
    async fn list_categories(&self) -> FetchResult<Vec<String>>;
}

pub struct HttpQuizRepository {
    client: ApiClient,
}

impl HttpQuizRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn random_questions(&self, query: &QuestionQuery) -> AppResult<Vec<QuizQuestion>> {
        query.validate()?;

        let dtos: Vec<QuizQuestionDto> = self
            .client
            .get_json(routes::RANDOM_QUESTIONS, &query.to_query_pairs())
            .await?;
        questions_from_dtos(dtos)
    }

    async fn quiz(&self, quiz_id: i64) -> AppResult<Quiz> {
        let path = format!("{}/{}", routes::QUIZZES, quiz_id);
        let dto: QuizDto = self.client.get_json(&path, &[]).await?;
        Quiz::try_from(dto)
    }

    async fn quizzes(&self) -> AppResult<Vec<Quiz>> {
        let dtos: Vec<QuizDto> = self.client.get_json(routes::QUIZZES, &[]).await?;
        dtos.into_iter().map(Quiz::try_from).collect()
    }
}

#[async_trait]
impl QuizRepository for HttpQuizRepository {
    async fn fetch_random(&self, query: &QuestionQuery) -> FetchResult<Vec<QuizQuestion>> {
        into_fetch_result(self.random_questions(query).await, || {
            "Failed to load questions".to_string()
        })
    }

    async fn fetch_by_quiz_id(&self, quiz_id: i64) -> FetchResult<Quiz> {
        into_fetch_result(self.quiz(quiz_id).await, || {
            format!("Failed to load quiz {}", quiz_id)
        })
    }

    async fn list_quizzes(&self) -> FetchResult<Vec<Quiz>> {
        into_fetch_result(self.quizzes().await, || "Failed to load quizzes".to_string())
    }

    async fn list_categories(&self) -> FetchResult<Vec<String>> {
        let result: AppResult<Vec<String>> = self.client.get_json(routes::CATEGORIES, &[]).await;
        into_fetch_result(result, || "Failed to load categories".to_string())
    }
}
