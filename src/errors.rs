use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Transport(_) => "TRANSPORT_ERROR",
            AppError::Status { .. } => "STATUS_ERROR",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::DataIntegrity(_) => "DATA_INTEGRITY_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Transport(err.to_string())
        }
    }
}
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Failure half of a data fetch: a message fit for display plus the fault behind it.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FetchError {
    message: String,
    #[source]
    cause: Option<AppError>,
}

impl FetchError {
    const FALLBACK_MESSAGE: &'static str = "An unknown error occurred";

    /// Blank messages are replaced so the UI always has something to show.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            Self::FALLBACK_MESSAGE.to_string()
        } else {
            message
        };
        Self {
            message,
            cause: None,
        }
    }

    pub fn with_cause(message: impl Into<String>, cause: AppError) -> Self {
        Self {
            cause: Some(cause),
            ..Self::new(message)
        }
    }

    /// Wraps `cause` as `"<context>: <cause>"`.
    pub fn from_cause(context: &str, cause: AppError) -> Self {
        Self::with_cause(format!("{}: {}", context, cause), cause)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&AppError> {
        self.cause.as_ref()
    }
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Rejected engine intents. None of these change session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No question is awaiting an answer")]
    NoActiveQuestion,

    #[error("Option {selected} is out of range for a question with {available} options")]
    OptionOutOfRange { selected: usize, available: usize },

    #[error("There is no loaded quiz to restart")]
    NothingToRestart,

    #[error("There is no previous load to retry")]
    NothingToRetry,

    #[error("Invalid question request: {0}")]
    InvalidQuery(String),

    #[error("The quiz session has been shut down")]
    Disposed,
}
