//! Network access for `apiRequest` actions.

use crate::error::{NetworkError, Result};
use async_trait::async_trait;
use orion_core::HttpMethod;
use std::time::Duration;

/// A completed HTTP exchange. Any status counts as a response; only
/// transport failures are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Performs HTTP requests on behalf of the interpreter.
#[async_trait(?Send)]
pub trait HttpClient {
    async fn fetch(&self, method: HttpMethod, url: &str) -> Result<HttpResponse>;
}

/// Options for the HTTP client.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Per-request timeout.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: format!("orion/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// [`HttpClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(options: &HttpOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait(?Send)]
impl HttpClient for ReqwestClient {
    async fn fetch(&self, method: HttpMethod, url: &str) -> Result<HttpResponse> {
        let parsed = reqwest::Url::parse(url).map_err(|err| NetworkError::InvalidUrl {
            url: url.to_string(),
            reason: err.to_string(),
        })?;
        let method = match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let response = self
            .client
            .request(method, parsed)
            .send()
            .await
            .map_err(|err| classify(url, err))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| classify(url, err))?;
        tracing::debug!(url, status, bytes = body.len(), "http response");
        Ok(HttpResponse { status, body })
    }
}

fn classify(url: &str, err: reqwest::Error) -> NetworkError {
    if err.is_timeout() {
        NetworkError::Timeout { url: url.to_string() }
    } else if err.is_connect() {
        NetworkError::Connect { url: url.to_string() }
    } else {
        NetworkError::Transport(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = HttpOptions::new()
            .with_timeout(Duration::from_secs(3))
            .with_user_agent("test-agent");
        assert_eq!(options.timeout, Duration::from_secs(3));
        assert_eq!(options.user_agent, "test-agent");
        assert!(HttpOptions::default().user_agent.starts_with("orion/"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_an_error() {
        let client = ReqwestClient::new(&HttpOptions::default()).unwrap();
        let err = client.fetch(HttpMethod::Get, "not a url").await.unwrap_err();
        assert!(matches!(err, NetworkError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_refused_connection_is_classified() {
        let client = ReqwestClient::new(&HttpOptions::new().with_timeout(Duration::from_secs(5))).unwrap();
        let url = "http://127.0.0.1:1/";
        let err = client.fetch(HttpMethod::Get, url).await.unwrap_err();
        match err {
            NetworkError::Connect { url: failed } => assert_eq!(failed, url),
            other => panic!("expected a connect error, got {other:?}"),
        }
    }
}
