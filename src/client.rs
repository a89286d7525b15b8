//! Typed client for the banner studio JSON API.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::models::{
    BannerSnapshot, HtmlResponse, ImageResult, SearchRequest, SearchResponse,
    SuggestRequest, SuggestResponse,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    /// The body carried an `error` field.
    #[error("{0}")]
    Service(String),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

/// The remote operations the editor depends on.
#[allow(async_fn_in_trait)]
pub trait StudioApi {
    async fn suggest(&self, location: &str) -> Result<Vec<String>, ClientError>;
    async fn search(&self, query: &str) -> Result<Vec<ImageResult>, ClientError>;
    /// Full email document for a snapshot.
    async fn render(&self, snapshot: &BannerSnapshot) -> Result<String, ClientError>;
    /// Preview fragment for a snapshot.
    async fn preview(&self, snapshot: &BannerSnapshot) -> Result<String, ClientError>;
}

#[derive(Debug, Clone)]
pub struct StudioClient {
    base: Url,
    http: reqwest::Client,
}

impl StudioClient {
    pub fn new(base: &str) -> Result<Self, ClientError> {
        Ok(Self {
            base: Url::parse(base)?,
            http: reqwest::Client::new(),
        })
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.base.join(path)?;
        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        // Error bodies are JSON `{ "error": ... }` whatever the status code.
        let value: Option<Value> = serde_json::from_str(&text).ok();
        if let Some(message) = value
            .as_ref()
            .and_then(|v| v.get("error"))
            .and_then(|e| e.as_str())
        {
            return Err(ClientError::Service(message.to_string()));
        }
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        let value = value.ok_or_else(|| ClientError::Decode("body is not JSON".to_string()))?;
        serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl StudioApi for StudioClient {
    async fn suggest(&self, location: &str) -> Result<Vec<String>, ClientError> {
        let request = SuggestRequest {
            location: location.to_string(),
        };
        let response: SuggestResponse = self.post_json("/api/suggest-image", &request).await?;
        Ok(response.suggestions)
    }

    async fn search(&self, query: &str) -> Result<Vec<ImageResult>, ClientError> {
        let request = SearchRequest {
            query: query.to_string(),
        };
        let response: SearchResponse = self.post_json("/api/search-images", &request).await?;
        Ok(response.images)
    }

    async fn render(&self, snapshot: &BannerSnapshot) -> Result<String, ClientError> {
        let response: HtmlResponse = self.post_json("/api/render", &snapshot.to_form()).await?;
        Ok(response.html)
    }

    async fn preview(&self, snapshot: &BannerSnapshot) -> Result<String, ClientError> {
        let response: HtmlResponse = self.post_json("/api/preview", &snapshot.to_form()).await?;
        Ok(response.html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(StudioClient::new("not a url"), Err(ClientError::BaseUrl(_))));
    }

    #[test]
    fn test_service_error_displays_message_only() {
        let err = ClientError::Service("ANTHROPIC_API_KEY not configured".to_string());
        assert_eq!(err.to_string(), "ANTHROPIC_API_KEY not configured");
    }
}
