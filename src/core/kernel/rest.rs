use crate::core::errors::ExchangeError;
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::{debug, instrument, trace};

/// A fully-built HTTP request, ready to hand to a `RestClient`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RestRequest {
    pub fn get(url: String) -> Self {
        Self {
            method: Method::GET,
            url,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: String, body: String) -> Self {
        Self {
            method: Method::POST,
            url,
            query: Vec::new(),
            headers: Vec::new(),
            body: Some(body),
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw HTTP response: status and undecoded body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    pub status: u16,
    pub body: String,
}

impl RestResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// REST transport trait
///
/// Implementations send exactly one request and resolve exactly once, either
/// with the raw response or with a transport error. Body decoding is left to
/// the caller.
#[async_trait]
pub trait RestClient: Send + Sync {
    async fn execute(&self, request: RestRequest) -> Result<RestResponse, ExchangeError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Overall request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(exchange_name: String) -> Self {
        Self {
            exchange_name,
            timeout_seconds: 30,
            user_agent: concat!("cryptopia-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| ExchangeError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(ReqwestRest {
            client,
            config: self.config,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone, Debug)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
}

impl ReqwestRest {
    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, request), fields(exchange = %self.config.exchange_name, method = %request.method, url = %request.url))]
    async fn execute(&self, request: RestRequest) -> Result<RestResponse, ExchangeError> {
        let mut builder = self.client.request(request.method.clone(), &request.url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        debug!(param_count = request.query.len(), "sending request");

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        trace!(status, "Response body: {}", body);

        Ok(RestResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = RestRequest::get("https://example.com".to_string())
            .with_header("Content-Type", "application/json");
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("Authorization"), None);
    }

    #[test]
    fn test_response_success_range() {
        let ok = RestResponse {
            status: 200,
            body: String::new(),
        };
        let not_found = RestResponse {
            status: 404,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!not_found.is_success());
    }

    #[test]
    fn test_builder_applies_config() {
        let rest = RestClientBuilder::new(
            RestClientConfig::new("cryptopia".to_string())
                .with_timeout(5)
                .with_user_agent("test-agent".to_string()),
        )
        .build()
        .unwrap();
        assert_eq!(rest.config().timeout_seconds, 5);
        assert_eq!(rest.config().user_agent, "test-agent");
    }
}
