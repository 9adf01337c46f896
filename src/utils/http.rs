//! HTTP client utilities.

use reqwest::{Client, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;

use crate::config::HttpConfig;

/// Shared HTTP client with sensible defaults
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::from_config(&HttpConfig::default())
    }

    /// Create a client honouring the configured timeout and user agent
    ///
    /// A `timeout_secs` of 0 disables the whole-request timeout.
    pub fn from_config(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(Duration::from_secs(10));
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Start a GET request
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_config() {
        let config = HttpConfig {
            timeout_secs: 3,
            user_agent: "tester/0.0".to_string(),
        };
        assert!(HttpClient::from_config(&config).is_ok());
    }

    #[tokio::test]
    async fn test_zero_timeout_still_completes_requests() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/esearch.fcgi")
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let config = HttpConfig {
            timeout_secs: 0,
            ..HttpConfig::default()
        };
        let client = HttpClient::from_config(&config).unwrap();
        let response = client
            .get(&format!("{}/esearch.fcgi", server.url()))
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");
        mock.assert_async().await;
    }

    #[test]
    fn test_get_builds_request() {
        let client = HttpClient::new().unwrap();
        let request = client
            .get("https://example.com/esearch.fcgi")
            .query(&[("db", "pubmed")])
            .build()
            .unwrap();
        assert_eq!(request.url().query(), Some("db=pubmed"));
    }
}
