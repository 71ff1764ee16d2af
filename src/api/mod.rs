use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

pub mod routes {
    pub const RANDOM_QUESTIONS: &str = "api/questions/random";
    pub const QUIZZES: &str = "api/quiz";
    pub const CATEGORIES: &str = "api/categories";

    pub const TOPICS: &str = "topics";
    pub const STATUSES: &str = "status";
    pub const DIFFICULTIES: &str = "difficulties";
    pub const QUESTIONS: &str = "questions";
    pub const ANSWERS: &str = "answers";
    pub const USERS: &str = "users";
    pub const USER_ROLES: &str = "userRoles";
    pub const USER_QUESTIONS: &str = "userQuestions";
}

/// Longest response body echoed back inside an error.
const MAX_ERROR_BODY: usize = 512;

/// Thin JSON-over-HTTP client for the quiz backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let base_url = config.base_url()?;
        let http = reqwest::Client::builder()
            .connect_timeout(config.request_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::InvalidConfig(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::ValidationError(format!("Invalid route '{}': {}", path, e)))
    }

    /// GET `path` with the given query pairs and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let url = self.url_for(path)?;
        log::debug!("GET {}", url);

        let response = self.http.get(url.clone()).query(query).send().await.map_err(|e| {
            log::warn!("Request to {} failed: {}", url, e);
            AppError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await?;

        decode_response(status, &body)
    }
}

/// Map an HTTP status and raw body onto a decoded value or an [`AppError`].
pub fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> AppResult<T> {
    if status == StatusCode::NOT_FOUND {
        return Err(AppError::NotFound(truncate(body)));
    }

    if !status.is_success() {
        return Err(AppError::Status {
            status: status.as_u16(),
            body: truncate(body),
        });
    }

    serde_json::from_str(body).map_err(|e| {
        log::warn!("Failed to decode response body: {}", e);
        AppError::Decode(e.to_string())
    })
}

fn truncate(body: &str) -> String {
    let body = body.trim();
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Payload {
        value: u32,
    }

    #[test]
    fn test_api_client_is_cloneable() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<ApiClient>();
    }

    #[test]
    fn routes_join_under_base_url() {
        let client = ApiClient::new(&Config::test_config()).unwrap();

        assert_eq!(
            client.url_for(routes::RANDOM_QUESTIONS).unwrap().as_str(),
            "http://127.0.0.1:8080/api/questions/random"
        );
        assert_eq!(
            client.url_for("/topics/3").unwrap().as_str(),
            "http://127.0.0.1:8080/topics/3"
        );
    }

    #[test]
    fn decode_success_body() {
        let payload: Payload = decode_response(StatusCode::OK, r#"{"value": 7}"#).unwrap();
        assert_eq!(payload, Payload { value: 7 });
    }

    #[test]
    fn decode_non_success_status() {
        let result = decode_response::<Payload>(StatusCode::INTERNAL_SERVER_ERROR, "boom");

        match result {
            Err(AppError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn decode_not_found_status() {
        let result = decode_response::<Payload>(StatusCode::NOT_FOUND, "no such quiz");

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn decode_malformed_body() {
        let result = decode_response::<Payload>(StatusCode::OK, r#"{"other": 1}"#);

        assert!(matches!(result, Err(AppError::Decode(_))));
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(MAX_ERROR_BODY * 2);
        let result = decode_response::<Payload>(StatusCode::BAD_GATEWAY, &body);

        match result {
            Err(AppError::Status { body, .. }) => assert_eq!(body.len(), MAX_ERROR_BODY + 3),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        let config = Config {
            api_base_url: "http://127.0.0.1:1/".to_string(),
            ..Config::test_config()
        };
        let client = ApiClient::new(&config).unwrap();

        let result = client.get_json::<Payload>(routes::TOPICS, &[]).await;

        assert!(matches!(result, Err(AppError::Transport(_))));
    }
}
