//! # grandpy_client
//!
//! HTTP client for the GrandPy `/question` endpoint.
//!
//! Posts the chat form as `application/x-www-form-urlencoded` and decodes
//! the JSON answer. Runs on native targets and in the browser (`wasm32`)
//! through reqwest's fetch backend. There is no retry, timeout or
//! cancellation: one question, one request.

use async_trait::async_trait;
use grandpy_core::models::{AnswerResponse, QuestionForm};
use grandpy_core::widget::QuestionSender;
use log::debug;
use reqwest::Client;
use reqwest::header::ACCEPT;
use thiserror::Error;
use url::Url;

/// Default path of the question endpoint.
pub const DEFAULT_ENDPOINT: &str = "/question";

/// Convenience alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while asking a question.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Answer is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client bound to one question endpoint.
#[derive(Debug, Clone)]
pub struct QuestionClient {
    client: Client,
    endpoint: Url,
}

impl QuestionClient {
    /// Resolve `endpoint` against `base_url` (e.g. the page origin).
    pub fn new(base_url: &str, endpoint: &str) -> ClientResult<Self> {
        Self::with_client(Client::new(), base_url, endpoint)
    }

    pub fn with_client(client: Client, base_url: &str, endpoint: &str) -> ClientResult<Self> {
        let endpoint = Url::parse(base_url)?.join(endpoint)?;
        Ok(Self { client, endpoint })
    }

    /// Fully resolved endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST the form and decode the answer.
    pub async fn post_question(&self, form: &QuestionForm) -> ClientResult<AnswerResponse> {
        debug!("POST {} ({} fields)", self.endpoint, form.fields().len());

        let resp = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .form(form)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(AnswerResponse::from_json(&body)?)
    }
}

#[async_trait(?Send)]
impl QuestionSender for QuestionClient {
    type Error = ClientError;

    async fn send(&self, form: &QuestionForm) -> Result<AnswerResponse, ClientError> {
        self.post_question(form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_resolved_against_base() {
        let client = QuestionClient::new("http://localhost:5000/chat/", DEFAULT_ENDPOINT)
            .expect("client");
        assert_eq!(client.endpoint().as_str(), "http://localhost:5000/question");
    }

    #[test]
    fn relative_endpoint_keeps_base_path() {
        let client = QuestionClient::new("https://grandpy.example/app/", "question")
            .expect("client");
        assert_eq!(
            client.endpoint().as_str(),
            "https://grandpy.example/app/question"
        );
    }

    #[test]
    fn base_must_be_absolute() {
        assert!(matches!(
            QuestionClient::new("/only/a/path", DEFAULT_ENDPOINT),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
