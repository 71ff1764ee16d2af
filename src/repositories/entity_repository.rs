use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{
    api::{routes, ApiClient},
    errors::{AppResult, FetchResult},
    models::{
        domain::{Answer, Difficulty, Question, Status, Topic, User, UserQuestion, UserRole},
        dto::{
            AnswerDto, DifficultyDto, QuestionDto, StatusDto, TopicDto, UserDto,
            UserQuestionDto, UserRoleDto,
        },
    },
    repositories::into_fetch_result,
};

/// Read-only access to one backend entity family.
#[async_trait]
pub trait EntityRepository<T: Send>: Send + Sync {
    async fn get_all(&self) -> FetchResult<Vec<T>>;
    async fn get_by_id(&self, id: i32) -> FetchResult<T>;
}

/// Binds a domain entity to its wire record and its backend route.
pub trait RemoteEntity: Sized + Send + Sync + 'static {
    type Dto: DeserializeOwned + Send;

    /// Collection route, `<RESOURCE>/{id}` addresses one record.
    const RESOURCE: &'static str;
    /// Plural noun used in error messages.
    const LABEL: &'static str;

    fn from_dto(dto: Self::Dto) -> AppResult<Self>;
}

macro_rules! remote_entity {
    ($entity:ty, $dto:ty, $resource:expr, $label:literal) => {
        impl RemoteEntity for $entity {
            type Dto = $dto;
            const RESOURCE: &'static str = $resource;
            const LABEL: &'static str = $label;

            fn from_dto(dto: Self::Dto) -> AppResult<Self> {
                Ok(dto.into())
            }
        }
    };
}

remote_entity!(Topic, TopicDto, routes::TOPICS, "topics");
remote_entity!(Status, StatusDto, routes::STATUSES, "statuses");
remote_entity!(Difficulty, DifficultyDto, routes::DIFFICULTIES, "difficulties");
remote_entity!(Question, QuestionDto, routes::QUESTIONS, "questions");
remote_entity!(Answer, AnswerDto, routes::ANSWERS, "answers");
remote_entity!(User, UserDto, routes::USERS, "users");
remote_entity!(UserRole, UserRoleDto, routes::USER_ROLES, "user roles");
remote_entity!(UserQuestion, UserQuestionDto, routes::USER_QUESTIONS, "user questions");

pub struct HttpEntityRepository<T> {
    client: ApiClient,
    _entity: PhantomData<fn() -> T>,
}

impl<T: RemoteEntity> HttpEntityRepository<T> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    async fn fetch_all(&self) -> AppResult<Vec<T>> {
        let dtos: Vec<T::Dto> = self.client.get_json(T::RESOURCE, &[]).await?;
        dtos.into_iter().map(T::from_dto).collect()
    }

    async fn fetch_one(&self, id: i32) -> AppResult<T> {
        let path = format!("{}/{}", T::RESOURCE, id);
        let dto: T::Dto = self.client.get_json(&path, &[]).await?;
        T::from_dto(dto)
    }
}

#[async_trait]
impl<T: RemoteEntity> EntityRepository<T> for HttpEntityRepository<T> {
    async fn get_all(&self) -> FetchResult<Vec<T>> {
        into_fetch_result(self.fetch_all().await, || format!("Failed to load {}", T::LABEL))
    }

    async fn get_by_id(&self, id: i32) -> FetchResult<T> {
        into_fetch_result(self.fetch_one(id).await, || {
            format!("Failed to load {} with id {}", T::LABEL, id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::errors::AppError;

    fn unreachable_client() -> ApiClient {
        let config = Config {
            api_base_url: "http://127.0.0.1:1/".to_string(),
            ..Config::test_config()
        };
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn every_entity_has_a_distinct_route() {
        let mut resources = vec![
            Topic::RESOURCE,
            Status::RESOURCE,
            Difficulty::RESOURCE,
            Question::RESOURCE,
            Answer::RESOURCE,
            User::RESOURCE,
            UserRole::RESOURCE,
            UserQuestion::RESOURCE,
        ];
        resources.sort_unstable();
        resources.dedup();

        assert_eq!(resources.len(), 8);
    }

    #[test]
    fn from_dto_is_total_for_catalog_records() {
        let topic = Topic::from_dto(TopicDto {
            topic_id: 3,
            topic: "Geography".to_string(),
        })
        .unwrap();

        assert_eq!(topic.topic_id, 3);
        assert_eq!(topic.topic, "Geography");
    }

    #[tokio::test]
    async fn transport_failure_becomes_fetch_error() {
        let repository = HttpEntityRepository::<Topic>::new(unreachable_client());

        let err = repository.get_all().await.unwrap_err();

        assert!(err.message().starts_with("Failed to load topics: "));
        assert!(matches!(err.cause(), Some(AppError::Transport(_))));
    }

    #[tokio::test]
    async fn get_by_id_failure_names_the_record() {
        let repository = HttpEntityRepository::<UserRole>::new(unreachable_client());

        let err = repository.get_by_id(4).await.unwrap_err();

        assert!(err.message().starts_with("Failed to load user roles with id 4: "));
    }
}
