use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::error::TransportError;

/// Performs one JSON POST against the generation API
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url` authenticated with `api_key`.
    /// Returns the response body of a 2xx response.
    async fn post_json(&self, url: &str, api_key: &str, body: String)
    -> Result<String, TransportError>;
}

#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: String,
    ) -> Result<String, TransportError> {
        // reqwest errors carry the request URL, and the URL carries the key
        let response = self
            .client
            .post(url)
            .query(&[("key", api_key)])
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(redact)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.text().await.map_err(redact)
    }
}

fn redact(error: reqwest::Error) -> TransportError {
    TransportError::Network(error.without_url())
}
