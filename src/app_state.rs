use std::sync::Arc;

use crate::{
    api::ApiClient,
    config::Config,
    errors::AppResult,
    models::domain::{Answer, Difficulty, Question, Status, Topic, User, UserQuestion, UserRole},
    repositories::{EntityRepository, HttpEntityRepository, HttpQuizRepository, QuizRepository, RemoteEntity},
    services::{EntityListController, QuizSessionEngine},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_repository: Arc<dyn QuizRepository>,
    pub topics: Arc<dyn EntityRepository<Topic>>,
    pub statuses: Arc<dyn EntityRepository<Status>>,
    pub difficulties: Arc<dyn EntityRepository<Difficulty>>,
    pub questions: Arc<dyn EntityRepository<Question>>,
    pub answers: Arc<dyn EntityRepository<Answer>>,
    pub users: Arc<dyn EntityRepository<User>>,
    pub user_roles: Arc<dyn EntityRepository<UserRole>>,
    pub user_questions: Arc<dyn EntityRepository<UserQuestion>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        config.validate()?;
        let client = ApiClient::new(&config)?;
        log::info!("Using quiz backend at {}", client.base_url());

        Ok(Self {
            quiz_repository: Arc::new(HttpQuizRepository::new(client.clone())),
            topics: entity_repository(&client),
            statuses: entity_repository(&client),
            difficulties: entity_repository(&client),
            questions: entity_repository(&client),
            answers: entity_repository(&client),
            users: entity_repository(&client),
            user_roles: entity_repository(&client),
            user_questions: entity_repository(&client),
            config: Arc::new(config),
        })
    }

    /// A fresh engine; each one owns its own session.
    pub fn quiz_engine(&self) -> Arc<QuizSessionEngine> {
        Arc::new(QuizSessionEngine::new(Arc::clone(&self.quiz_repository)))
    }

    pub fn topic_list(&self) -> EntityListController<Topic> {
        EntityListController::new(Arc::clone(&self.topics))
    }

    pub fn difficulty_list(&self) -> EntityListController<Difficulty> {
        EntityListController::new(Arc::clone(&self.difficulties))
    }

    pub fn status_list(&self) -> EntityListController<Status> {
        EntityListController::new(Arc::clone(&self.statuses))
    }

    pub fn question_list(&self) -> EntityListController<Question> {
        EntityListController::new(Arc::clone(&self.questions))
    }

    pub fn answer_list(&self) -> EntityListController<Answer> {
        EntityListController::new(Arc::clone(&self.answers))
    }

    pub fn user_list(&self) -> EntityListController<User> {
        EntityListController::new(Arc::clone(&self.users))
    }

    pub fn user_role_list(&self) -> EntityListController<UserRole> {
        EntityListController::new(Arc::clone(&self.user_roles))
    }

    pub fn user_question_list(&self) -> EntityListController<UserQuestion> {
        EntityListController::new(Arc::clone(&self.user_questions))
    }
}

fn entity_repository<T: RemoteEntity>(client: &ApiClient) -> Arc<dyn EntityRepository<T>> {
    Arc::new(HttpEntityRepository::<T>::new(client.clone()))
}
