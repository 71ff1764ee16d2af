use std::{env, time::Duration};

use reqwest::Url;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_API_BASE_URL: &str = "http://10.0.2.2:8080/";
pub const DEFAULT_QUESTION_COUNT: u32 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub default_question_count: u32,
    pub default_category: Option<String>,
    pub default_difficulty: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("QUIZ_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            request_timeout_secs: env::var("QUIZ_API_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),
            default_question_count: env::var("QUIZ_DEFAULT_QUESTION_COUNT")
                .ok()
                .and_then(|c| c.parse().ok())
                .unwrap_or(DEFAULT_QUESTION_COUNT),
            default_category: non_blank_var("QUIZ_CATEGORY"),
            default_difficulty: non_blank_var("QUIZ_DIFFICULTY"),
        }
    }

    /// Check the values the client cannot run without
    pub fn validate(&self) -> AppResult<()> {
        self.base_url()?;

        if self.request_timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "QUIZ_API_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        if self.default_question_count == 0 {
            return Err(AppError::InvalidConfig(
                "QUIZ_DEFAULT_QUESTION_COUNT must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Base URL with a trailing slash so relative routes join under it.
    pub fn base_url(&self) -> AppResult<Url> {
        let mut raw = self.api_base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|e| {
            AppError::InvalidConfig(format!(
                "QUIZ_API_BASE_URL '{}' is not a valid URL: {}",
                self.api_base_url, e
            ))
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080/".to_string(),
            request_timeout_secs: 2,
            default_question_count: 10,
            default_category: None,
            default_difficulty: None,
        }
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.api_base_url.is_empty());
        assert!(config.request_timeout_secs > 0);
        assert!(config.default_question_count > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.api_base_url, "http://127.0.0.1:8080/");
        assert_eq!(config.request_timeout(), Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let config = Config {
            api_base_url: "http://localhost:9000/backend".to_string(),
            ..Config::test_config()
        };

        let url = config.base_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/backend/");
        assert_eq!(
            url.join("api/quiz/3").unwrap().as_str(),
            "http://localhost:9000/backend/api/quiz/3"
        );
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad_url = Config {
            api_base_url: "not a url".to_string(),
            ..Config::test_config()
        };
        assert!(matches!(bad_url.validate(), Err(AppError::InvalidConfig(_))));

        let zero_timeout = Config {
            request_timeout_secs: 0,
            ..Config::test_config()
        };
        assert!(matches!(zero_timeout.validate(), Err(AppError::InvalidConfig(_))));

        let zero_count = Config {
            default_question_count: 0,
            ..Config::test_config()
        };
        assert!(matches!(zero_count.validate(), Err(AppError::InvalidConfig(_))));
    }
}
