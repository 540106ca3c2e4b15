//! Upstream HTTP client
//!
//! One GET per call. Failures are classified into transport, HTTP status
//! and malformed-body errors; nothing is retried.

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use std::error::Error as _;
use tracing::debug;

use crate::envelope::UpstreamPayload;
use crate::error::{Result, SourceError};
use crate::request::UpstreamRequest;

/// Client for the GlobalData APIs
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    /// Create a client; timeouts are applied per request
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("gd-sources/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Perform the request and parse the body
    pub async fn fetch(&self, request: &UpstreamRequest) -> Result<UpstreamPayload> {
        debug!("GET {}", request.redacted_url);

        let mut builder = self
            .client
            .get(&request.url)
            .header(ACCEPT, "application/json");

        if let Some(token) = &request.bearer {
            builder = builder.header(AUTHORIZATION, format!("bearer {}", token.expose()));
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SourceError::UpstreamTransportFailure(describe(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UpstreamHttpError {
                status,
                url: request.redacted_url.clone(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::UpstreamTransportFailure(describe(e)))?;

        let value: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|e| SourceError::UpstreamMalformedPayload(e.to_string()))?;

        debug!("Upstream returned {} bytes", body.len());
        Ok(UpstreamPayload::from(value))
    }
}

/// Error text with its cause chain, without the URL (it carries the token)
fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credential;
    use axum::{Router, http::HeaderMap, http::StatusCode, routing::get};
    use std::time::Duration;
    use tokio::net::TcpListener;

    async fn spawn(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn request(url: String) -> UpstreamRequest {
        UpstreamRequest {
            redacted_url: url.clone(),
            url,
            bearer: None,
            timeout: Some(Duration::from_secs(5)),
        }
    }

    #[tokio::test]
    async fn test_fetch_parses_json() {
        let base = spawn(Router::new().route("/ok", get(|| async { r#"{"a":[1,2]}"# }))).await;
        let client = UpstreamClient::new().unwrap();

        let payload = client.fetch(&request(format!("{base}/ok"))).await.unwrap();
        assert_eq!(payload.into_value(), serde_json::json!({"a": [1, 2]}));
    }

    #[tokio::test]
    async fn test_fetch_sends_bearer_header() {
        let router = Router::new().route(
            "/auth",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let accept = headers
                    .get("accept")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                serde_json::json!({ "auth": auth, "accept": accept }).to_string()
            }),
        );
        let base = spawn(router).await;
        let client = UpstreamClient::new().unwrap();

        let mut req = request(format!("{base}/auth"));
        req.bearer = Some(Credential::new("s3cret"));
        let value = client.fetch(&req).await.unwrap().into_value();

        assert_eq!(value["auth"], "bearer s3cret");
        assert_eq!(value["accept"], "application/json");
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        let router = Router::new().route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, "nope") }),
        );
        let base = spawn(router).await;
        let client = UpstreamClient::new().unwrap();

        let err = client
            .fetch(&request(format!("{base}/missing")))
            .await
            .unwrap_err();
        match err {
            SourceError::UpstreamHttpError { status, url } => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert!(url.ends_with("/missing"));
            }
            other => panic!("Expected UpstreamHttpError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let base = spawn(Router::new().route("/html", get(|| async { "<html>oops</html>" }))).await;
        let client = UpstreamClient::new().unwrap();

        let err = client
            .fetch(&request(format!("{base}/html")))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::UpstreamMalformedPayload(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = UpstreamClient::new().unwrap();
        let err = client
            .fetch(&request(format!("http://{addr}/GetTopThemes?TokenID=secret")))
            .await
            .unwrap_err();

        match err {
            SourceError::UpstreamTransportFailure(msg) => {
                assert!(!msg.is_empty());
                assert!(!msg.contains("secret"));
            }
            other => panic!("Expected UpstreamTransportFailure, got {other:?}"),
        }
    }
}
