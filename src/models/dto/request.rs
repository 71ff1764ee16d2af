use validator::Validate;

use crate::config::DEFAULT_QUESTION_COUNT;

/// Parameters for a random question draw.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct QuestionQuery {
    #[validate(range(min = 1, message = "At least one question must be requested"))]
    pub count: u32,

    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub difficulty: Option<String>,
}

impl Default for QuestionQuery {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTION_COUNT)
    }
}

impl QuestionQuery {
    pub fn new(count: u32) -> Self {
        Self {
            count,
            category: None,
            difficulty: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    /// Query string pairs; absent filters are left out entirely.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("count", self.count.to_string())];
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(difficulty) = &self.difficulty {
            pairs.push(("difficulty", difficulty.clone()));
        }
        pairs
    }
}
