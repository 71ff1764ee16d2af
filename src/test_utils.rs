use crate::models::domain::{QuizQuestion, Topic};

pub mod fixtures {
    use super::*;

    /// Four-option question whose correct answer sits at `correct_index`.
    pub fn sample_question(id: i64, correct_index: usize) -> QuizQuestion {
        QuizQuestion::new(
            id,
            &format!("Question {}?", id),
            vec![
                "Option A".to_string(),
                "Option B".to_string(),
                "Option C".to_string(),
                "Option D".to_string(),
            ],
            correct_index,
            "general",
            "EASY",
        )
        .expect("sample question is well formed")
    }

    /// `count` questions with ids starting at 1, all answered correctly by option 0.
    pub fn sample_questions(count: usize) -> Vec<QuizQuestion> {
        (1..=count as i64).map(|id| sample_question(id, 0)).collect()
    }

    pub fn sample_topics() -> Vec<Topic> {
        vec![
            Topic {
                topic_id: 1,
                topic: "Mathematics".to_string(),
            },
            Topic {
                topic_id: 2,
                topic: "Geography".to_string(),
            },
        ]
    }
}

pub mod fakes {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use crate::{
        errors::{FetchError, FetchResult},
        repositories::EntityRepository,
    };

    /// In-memory entity source that can be switched into a failing mode.
    pub struct FakeEntityRepository<T> {
        items: Arc<RwLock<Vec<T>>>,
        error_message: Arc<RwLock<Option<String>>>,
    }

    impl<T: Clone + Send + Sync> FakeEntityRepository<T> {
        pub fn new(items: Vec<T>) -> Self {
            Self {
                items: Arc::new(RwLock::new(items)),
                error_message: Arc::new(RwLock::new(None)),
            }
        }

        pub async fn set_items(&self, items: Vec<T>) {
            *self.items.write().await = items;
        }

        pub async fn fail_with(&self, message: &str) {
            *self.error_message.write().await = Some(message.to_string());
        }

        pub async fn succeed(&self) {
            *self.error_message.write().await = None;
        }

        async fn check(&self) -> FetchResult<()> {
            match self.error_message.read().await.as_ref() {
                Some(message) => Err(FetchError::new(message.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl<T: Clone + Send + Sync> EntityRepository<T> for FakeEntityRepository<T> {
        async fn get_all(&self) -> FetchResult<Vec<T>> {
            self.check().await?;
            Ok(self.items.read().await.clone())
        }

        async fn get_by_id(&self, id: i32) -> FetchResult<T> {
            self.check().await?;
            let items = self.items.read().await;
            usize::try_from(id - 1)
                .ok()
                .and_then(|index| items.get(index).cloned())
                .ok_or_else(|| FetchError::new(format!("No record with id {}", id)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fakes::FakeEntityRepository;
    use super::fixtures::*;
    use crate::repositories::EntityRepository;

    #[test]
    fn test_fixtures_sample_questions() {
        let questions = sample_questions(3);

        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].id(), 1);
        assert_eq!(questions[2].id(), 3);
        assert!(questions.iter().all(|q| q.correct_option_index() == 0));
    }

    #[test]
    fn test_fixtures_sample_question_correct_index() {
        let question = sample_question(8, 3);

        assert_eq!(question.correct_option(), "Option D");
        assert_eq!(question.option_count(), 4);
    }

    #[tokio::test]
    async fn fake_repository_switches_between_modes() {
        let repository = FakeEntityRepository::new(sample_topics());
        assert_eq!(repository.get_by_id(2).await.unwrap().topic, "Geography");
        assert!(repository.get_by_id(3).await.is_err());

        repository.fail_with("Network error").await;
        assert_eq!(
            repository.get_all().await.unwrap_err().message(),
            "Network error"
        );

        repository.succeed().await;
        assert_eq!(repository.get_all().await.unwrap().len(), 2);
    }
}
