/// A playable question: ordered options with exactly one correct index.
///
/// Instances are only built through `TryFrom<QuizQuestionDto>` or
/// [`QuizQuestion::new`], both of which guarantee at least two options and a
/// `correct_option_index` that points at one of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizQuestion {
    id: i64,
    prompt_text: String,
    answer_options: Vec<String>,
    correct_option_index: usize,
    category: String,
    difficulty_label: String,
}

impl QuizQuestion {
    pub const MIN_OPTIONS: usize = 2;

    pub fn new(
        id: i64,
        prompt_text: &str,
        answer_options: Vec<String>,
        correct_option_index: usize,
        category: &str,
        difficulty_label: &str,
    ) -> crate::errors::AppResult<Self> {
        use crate::errors::AppError;

        if answer_options.len() < Self::MIN_OPTIONS {
            return Err(AppError::DataIntegrity(format!(
                "Question {} has {} answer options, at least {} are required",
                id,
                answer_options.len(),
                Self::MIN_OPTIONS
            )));
        }

        if correct_option_index >= answer_options.len() {
            return Err(AppError::DataIntegrity(format!(
                "Question {} marks option {} as correct but only has {} options",
                id,
                correct_option_index,
                answer_options.len()
            )));
        }

        Ok(Self {
            id,
            prompt_text: prompt_text.to_string(),
            answer_options,
            correct_option_index,
            category: category.to_string(),
            difficulty_label: difficulty_label.to_string(),
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn answer_options(&self) -> &[String] {
        &self.answer_options
    }

    pub fn correct_option_index(&self) -> usize {
        self.correct_option_index
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn difficulty_label(&self) -> &str {
        &self.difficulty_label
    }

    pub fn option_count(&self) -> usize {
        self.answer_options.len()
    }

    pub fn is_correct(&self, selected_option_index: usize) -> bool {
        selected_option_index == self.correct_option_index
    }

    pub fn correct_option(&self) -> &str {
        &self.answer_options[self.correct_option_index]
    }
}
