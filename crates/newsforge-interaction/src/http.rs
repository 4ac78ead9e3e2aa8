//! Thin JSON-over-HTTP helper for the same-origin backend routes.

use std::time::Duration;

use newsforge_core::config::BackendSettings;
use newsforge_core::error::{NewsforgeError, Result};
use reqwest::header::{HeaderValue, RETRY_AFTER};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Shared reqwest client plus the request/response conventions of the backend.
#[derive(Clone, Default)]
pub struct BackendHttp {
    client: Client,
}

impl BackendHttp {
    pub fn new() -> Self {
        Self::default()
    }

    /// POSTs `body` as JSON and parses the JSON response.
    pub async fn post_json<B, R>(
        &self,
        backend: &BackendSettings,
        route: &str,
        api_key: Option<&str>,
        body: &B,
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut request = self.client.post(backend.endpoint(route)).json(body);
        if let Some(key) = api_key {
            request = request.header("x-api-key", key);
        }
        let response = self.execute(backend, request).await?;
        parse_json(response, route).await
    }

    /// POSTs `body` and ignores the response body.
    pub async fn post_unit<B>(&self, backend: &BackendSettings, route: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self.client.post(backend.endpoint(route)).json(body);
        self.execute(backend, request).await.map(|_| ())
    }

    /// GETs `route` with `query` appended as URL-encoded parameters.
    pub async fn get_json<R>(
        &self,
        backend: &BackendSettings,
        route: &str,
        query: &[(&str, String)],
    ) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let request = self.client.get(backend.endpoint(route)).query(query);
        let response = self.execute(backend, request).await?;
        parse_json(response, route).await
    }

    async fn execute(&self, backend: &BackendSettings, request: RequestBuilder) -> Result<Response> {
        let request = match backend.timeout_secs {
            Some(secs) => request.timeout(Duration::from_secs(secs)),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|err| NewsforgeError::http(None, format!("Backend request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            // Requests are single-attempt; the hint is only reported.
            if let Some(delay) = parse_retry_after(response.headers().get(RETRY_AFTER)) {
                tracing::debug!(
                    "Backend returned {} with Retry-After {:?} (informational, not retried)",
                    status,
                    delay
                );
            }
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read backend error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        Ok(response)
    }
}

async fn parse_json<R: DeserializeOwned>(response: Response, route: &str) -> Result<R> {
    let text = response
        .text()
        .await
        .map_err(|err| NewsforgeError::http(None, format!("Failed to read response from {route}: {err}")))?;
    serde_json::from_str(&text).map_err(|err| NewsforgeError::Serialization {
        format: "JSON".to_string(),
        message: format!("Unexpected response from {route}: {err}"),
    })
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ErrorResponse {
    Nested { error: ErrorBody },
    Flat { error: String },
    Message { message: String },
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    message: String,
}

pub(crate) fn map_http_error(status: StatusCode, body: String) -> NewsforgeError {
    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(ErrorResponse::Nested { error }) => error.message,
        Ok(ErrorResponse::Flat { error }) => error,
        Ok(ErrorResponse::Message { message }) => message,
        Err(_) => body,
    };
    NewsforgeError::http(Some(status.as_u16()), message)
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    // HTTP-date form is not handled
    value.parse::<u64>().ok().map(Duration::from_secs)
}
