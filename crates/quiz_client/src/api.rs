use quiz_core::{GeneratedQuiz, HistoryEntry, QuizDetail};
use quiz_logging::{quiz_info, quiz_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{ApiError, ClientSettings};

/// The three backend endpoints the client talks to.
#[async_trait::async_trait]
pub trait QuizApi: Send + Sync {
    /// `GET /history`
    async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError>;

    /// `POST /generate_quiz` with `{"url": ...}`
    async fn generate_quiz(&self, url: &str) -> Result<GeneratedQuiz, ApiError>;

    /// `GET /quiz/{id}`
    async fn quiz(&self, id: &str) -> Result<QuizDetail, ApiError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Clone)]
pub struct ReqwestQuizApi {
    base: Url,
    client: reqwest::Client,
}

impl ReqwestQuizApi {
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let base = Url::parse(settings.api_base.trim())
            .map_err(|err| ApiError::InvalidUrl(format!("{}: {err}", settings.api_base)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(settings.api_base.clone()));
        }

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        Ok(Self { base, client })
    }

    /// Appends path segments to the base, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let url = response.url().to_string();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            quiz_warn!("{} answered {} ({} bytes)", url, status, bytes.len());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: parse_error_body(&bytes),
            });
        }

        quiz_info!("{} answered {} ({} bytes)", url, status, bytes.len());
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl QuizApi for ReqwestQuizApi {
    async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        let url = self.endpoint(&["history"])?;
        quiz_info!("GET {}", url);
        self.send(self.client.get(url)).await
    }

    async fn generate_quiz(&self, article_url: &str) -> Result<GeneratedQuiz, ApiError> {
        let url = self.endpoint(&["generate_quiz"])?;
        quiz_info!("POST {} article_url={}", url, article_url);
        let body = serde_json::to_vec(&GenerateRequest { url: article_url })
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        self.send(request).await
    }

    async fn quiz(&self, id: &str) -> Result<QuizDetail, ApiError> {
        let url = self.endpoint(&["quiz", id])?;
        quiz_info!("GET {}", url);
        self.send(self.client.get(url)).await
    }
}

fn parse_error_body(bytes: &[u8]) -> serde_json::Value {
    if bytes.is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(bytes).unwrap_or_else(|_| {
        serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
    })
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_builder() {
        return ApiError::InvalidUrl(err.to_string());
    }
    ApiError::Transport(err.to_string())
}
