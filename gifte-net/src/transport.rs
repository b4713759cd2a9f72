//! HTTP transport for provider calls
//!
//! The [`Transport`] trait is the seam between the provider client and the
//! network. [`HttpTransport`] is the reqwest implementation.

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::sync::Arc;
use thiserror::Error;

use crate::{HttpMethod, ProviderConfig, ProviderSpec};

/// Errors from a provider call
#[derive(Debug, Error)]
pub enum NetError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Carries no URL: provider credentials travel in query strings
    #[error("request failed: {0}")]
    Request(reqwest::Error),

    #[error("timeout after {0}ms")]
    Timeout(u64),

    #[error("HTTP {status}{}", status_detail(.body))]
    Status { status: u16, body: String },

    #[error("invalid JSON: {0}")]
    Decode(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl NetError {
    /// Wrap a reqwest error with the request URL stripped
    pub fn request(err: reqwest::Error) -> Self {
        NetError::Request(err.without_url())
    }
}

fn status_detail(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}

/// Raw status and body of a provider response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one outbound provider call
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, spec: &ProviderSpec) -> Result<RawResponse, NetError>;
}

/// Thread-safe reference to a transport
pub type SharedTransport = Arc<dyn Transport>;

/// Create the HTTP client used for provider calls
///
/// No client-level timeout is set; `ProviderClient` bounds each call.
pub fn create_http_client(config: &ProviderConfig) -> Result<Client, NetError> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| NetError::ClientBuild(e.to_string()))
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ProviderConfig) -> Result<Self, NetError> {
        Ok(Self {
            client: create_http_client(config)?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, spec: &ProviderSpec) -> Result<RawResponse, NetError> {
        let url = Url::parse(&spec.url).map_err(|e| NetError::InvalidUrl(e.to_string()))?;

        let mut request = match spec.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };

        for (name, value) in &spec.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        if let (HttpMethod::Post, Some(body)) = (spec.method, &spec.body) {
            request = request.json(body);
        }

        let response = request.send().await.map_err(NetError::request)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(NetError::request)?;

        Ok(RawResponse { status, body })
    }
}

/// Create a shared reqwest-backed transport
pub fn create_transport(config: &ProviderConfig) -> Result<SharedTransport, NetError> {
    Ok(Arc::new(HttpTransport::new(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gifte_core::ProviderKind;

    #[test]
    fn test_create_http_client() {
        assert!(create_http_client(&ProviderConfig::default()).is_ok());
    }

    #[test]
    fn test_raw_response_success() {
        assert!(RawResponse::new(200, "{}").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(302, "").is_success());
        assert!(!RawResponse::new(500, "").is_success());
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_sending() {
        let transport = HttpTransport::new(&ProviderConfig::default()).unwrap();
        let spec = ProviderSpec::get(ProviderKind::SelfIp, "not a url".to_string());

        let err = transport.send(&spec).await.unwrap_err();
        assert!(matches!(err, NetError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_request_error_hides_url() {
        // Bind then drop to get a port nothing listens on
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let transport = HttpTransport::new(&ProviderConfig::default()).unwrap();
        let spec = ProviderSpec::get(
            ProviderKind::EmailValidityA,
            format!("http://{}/v1/?api_key=SUPERSECRET&email=a%40b.com", addr),
        );

        let err = transport.send(&spec).await.unwrap_err();
        assert!(matches!(err, NetError::Request(_)));
        let message = err.to_string();
        assert!(message.starts_with("request failed"));
        assert!(!message.contains("SUPERSECRET"), "leaked: {}", message);
        assert!(!message.contains("api_key"), "leaked: {}", message);
    }

    #[test]
    fn test_status_display() {
        let bare = NetError::Status {
            status: 500,
            body: String::new(),
        };
        assert_eq!(bare.to_string(), "HTTP 500");

        let detailed = NetError::Status {
            status: 429,
            body: "quota exceeded".to_string(),
        };
        assert_eq!(detailed.to_string(), "HTTP 429: quota exceeded");
    }
}
