pub mod entity_repository;
pub mod quiz_repository;

pub use entity_repository::{EntityRepository, HttpEntityRepository, RemoteEntity};
pub use quiz_repository::{HttpQuizRepository, QuizRepository};

use crate::errors::{AppResult, FetchError, FetchResult};

/// Repository boundary: every fault becomes a [`FetchError`] carrying `context`.
pub(crate) fn into_fetch_result<T>(
    result: AppResult<T>,
    context: impl FnOnce() -> String,
) -> FetchResult<T> {
    result.map_err(|err| {
        let context = context();
        log::warn!("{}: {}", context, err);
        FetchError::from_cause(&context, err)
    })
}
