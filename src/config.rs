use std::time::Duration;

use crate::constants::{DEFAULT_REQUEST_TIMEOUT, NWS_API_BASE, USER_AGENT};

/// Settings shared by the HTTP client and the tool handlers.
///
/// Built once at startup and handed to [`crate::service::Weather::with_config`].
/// Tests point `base_url` at a local mock origin.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub base_url: String,
    pub user_agent: String,
    pub request_timeout: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: NWS_API_BASE.to_string(),
            user_agent: USER_AGENT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl WeatherConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Active alerts query for an already normalized state code
    pub fn alerts_url(&self, state_code: &str) -> String {
        format!("{}/alerts?area={}", self.base_url, state_code)
    }

    /// Grid point lookup. The NWS API accepts the space after the comma.
    pub fn points_url(&self, latitude: f64, longitude: f64) -> String {
        format!("{}/points/{:.4}, {:.4}", self.base_url, latitude, longitude)
    }
}
