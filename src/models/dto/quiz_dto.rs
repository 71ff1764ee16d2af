use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::domain::{Quiz, QuizQuestion};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionDto {
	pub id: i64,
	pub text: String,
	pub answers: Vec<String>,
	pub correct_answer_index: i64,
	pub category: String,
	pub difficulty: String,
}

impl From<QuizQuestion> for QuizQuestionDto {
	fn from(question: QuizQuestion) -> Self {
		QuizQuestionDto {
			id: question.id(),
			text: question.prompt_text().to_string(),
			answers: question.answer_options().to_vec(),
			correct_answer_index: question.correct_option_index() as i64,
			category: question.category().to_string(),
			difficulty: question.difficulty_label().to_string(),
		}
	}
}

impl TryFrom<QuizQuestionDto> for QuizQuestion {
	type Error = AppError;

	fn try_from(dto: QuizQuestionDto) -> Result<Self, Self::Error> {
		let correct_option_index = usize::try_from(dto.correct_answer_index).map_err(|_| {
			AppError::DataIntegrity(format!(
				"Question {} has negative correctAnswerIndex {}",
				dto.id, dto.correct_answer_index
			))
		})?;

		QuizQuestion::new(
			dto.id,
			&dto.text,
			dto.answers,
			correct_option_index,
			&dto.category,
			&dto.difficulty,
		)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizDto {
	pub id: i64,
	pub title: String,
	pub questions: Vec<QuizQuestionDto>,
}

impl From<Quiz> for QuizDto {
	fn from(quiz: Quiz) -> Self {
		QuizDto {
			id: quiz.id,
			title: quiz.title,
			questions: quiz
				.questions
				.into_iter()
				.map(QuizQuestionDto::from)
				.collect(),
		}
	}
}

impl TryFrom<QuizDto> for Quiz {
	type Error = AppError;

	fn try_from(dto: QuizDto) -> Result<Self, Self::Error> {
		let questions = dto
			.questions
			.into_iter()
			.map(QuizQuestion::try_from)
			.collect::<Result<Vec<_>, AppError>>()?;

		Ok(Quiz {
			id: dto.id,
			title: dto.title,
			questions,
		})
	}
}

/// All-or-nothing conversion of a question list.
pub fn questions_from_dtos(dtos: Vec<QuizQuestionDto>) -> Result<Vec<QuizQuestion>, AppError> {
	dtos.into_iter().map(QuizQuestion::try_from).collect()
}
