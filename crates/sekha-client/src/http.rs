//! HTTP dispatch and error translation.
//!
//! This is the only place transport-level failures are caught and turned
//! into [`SekhaError`]; everything above just propagates.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;

use sekha_core::config::ClientConfig;
use sekha_core::error::{SekhaError, SekhaResult};

use crate::limiter::RateLimiter;

const SDK_USER_AGENT: &str = concat!("sekha-rust-sdk/", env!("CARGO_PKG_VERSION"));

/// Authenticated HTTP dispatcher shared by all client operations.
///
/// Every request first acquires a slot from the rate limiter, so outbound
/// pacing holds across concurrent operations on the same client.
#[derive(Debug, Clone)]
pub(crate) struct Http {
    client: Client,
    base_url: String,
    limiter: Arc<RateLimiter>,
}

impl Http {
    pub(crate) fn new(config: &ClientConfig) -> SekhaResult<Self> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| SekhaError::Configuration("API key contains invalid characters".to_string()))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(USER_AGENT, HeaderValue::from_static(SDK_USER_AGENT));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| SekhaError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limiter: Arc::new(RateLimiter::new(
                config.rate_limit_requests,
                config.rate_limit_window,
            )),
        })
    }

    /// Issue a request and decode the JSON response body.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> SekhaResult<T> {
        let response = self.dispatch(method, path, query, body).await?;
        response
            .json()
            .await
            .map_err(|e| SekhaError::Generic(format!("Failed to decode response: {}", e)))
    }

    /// Issue a request, discarding any response body.
    pub(crate) async fn send_empty(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> SekhaResult<()> {
        self.dispatch(method, path, query, body).await.map(|_| ())
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> SekhaResult<reqwest::Response> {
        self.limiter.acquire().await;

        tracing::debug!(%method, path, "dispatching request");

        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(translate_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(translate_status(status, &body));
        }

        Ok(response)
    }
}

/// Map a reqwest transport failure onto the error taxonomy.
fn translate_transport_error(err: reqwest::Error) -> SekhaError {
    if err.is_timeout() {
        SekhaError::connection("Request timed out")
    } else if err.is_connect() {
        SekhaError::connection(format!("Connection failed: {}", err))
    } else {
        SekhaError::Generic(format!("Unexpected error: {}", err))
    }
}

/// Map an HTTP error status onto the error taxonomy.
fn translate_status(status: StatusCode, body: &str) -> SekhaError {
    SekhaError::from_http_status(status.as_u16(), body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_translation_kinds() {
        assert!(matches!(
            translate_status(StatusCode::BAD_REQUEST, "bad"),
            SekhaError::Validation { .. }
        ));
        assert!(matches!(
            translate_status(StatusCode::UNAUTHORIZED, ""),
            SekhaError::Auth { .. }
        ));
        assert!(matches!(
            translate_status(StatusCode::NOT_FOUND, "missing"),
            SekhaError::NotFound { .. }
        ));
        assert!(matches!(
            translate_status(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            SekhaError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = ClientConfig::new("sk-test-0123456789abc")
            .with_base_url("http://localhost:8080/");
        let http = Http::new(&config).unwrap();
        assert_eq!(http.base_url, "http://localhost:8080");
    }
}
