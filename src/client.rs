use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::WeatherConfig;
use crate::constants::GEO_JSON;
use crate::error::FetchError;

/// Thin wrapper around `reqwest` for the NWS API.
///
/// Every request carries the configured `User-Agent` and asks for GeoJSON.
/// Failures come back as [`FetchError`] and are logged here, so callers only
/// decide what to tell the user.
#[derive(Debug, Clone)]
pub struct NwsClient {
    client: Client,
}

impl NwsClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GEO_JSON));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let result = self.send(url).await;
        if let Err(e) = &result {
            tracing::error!(url, error = %e, "Error making NWS request");
        }
        result
    }

    async fn send<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct Probe {
        value: i32,
    }

    fn client_for(server: &MockServer) -> (NwsClient, String) {
        let config = WeatherConfig::default().with_base_url(server.uri());
        let client = NwsClient::new(&config).unwrap();
        (client, config.base_url)
    }

    #[tokio::test]
    async fn test_fetch_json_sends_fixed_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/probe"))
            .and(header("User-Agent", "weather-app/1.0"))
            .and(header("Accept", "application/geo+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "value": 7 })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let (client, base) = client_for(&mock_server);
        let probe: Probe = client.fetch_json(&format!("{}/probe", base)).await.unwrap();

        assert_eq!(probe.value, 7);
    }

    #[tokio::test]
    async fn test_fetch_json_status_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let (client, base) = client_for(&mock_server);
        let result = client.fetch_json::<Probe>(&format!("{}/down", base)).await;

        match result {
            Err(FetchError::Status(status)) => assert_eq!(status.as_u16(), 503),
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_json_network_error() {
        // Nothing listens on port 1
        let config = WeatherConfig::default().with_base_url("http://127.0.0.1:1");
        let client = NwsClient::new(&config).unwrap();

        let result = client
            .fetch_json::<Probe>(&format!("{}/probe", config.base_url))
            .await;

        assert!(matches!(result, Err(FetchError::Network(_))));
    }

    #[tokio::test]
    async fn test_fetch_json_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "value": 1 }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let config = WeatherConfig::default()
            .with_base_url(mock_server.uri())
            .with_request_timeout(Duration::from_millis(100));
        let client = NwsClient::new(&config).unwrap();

        let result = client
            .fetch_json::<Probe>(&format!("{}/slow", config.base_url))
            .await;

        assert!(matches!(result, Err(FetchError::Timeout)));
    }

    #[tokio::test]
    async fn test_fetch_json_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let (client, base) = client_for(&mock_server);
        let result = client.fetch_json::<Probe>(&format!("{}/garbage", base)).await;

        assert!(matches!(result, Err(FetchError::Decode(_))));
    }
}
