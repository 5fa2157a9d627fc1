use anyhow::Result;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use std::sync::Arc;

use crate::client::NwsClient;
use crate::config::WeatherConfig;
use crate::constants::SERVER_NAME;
use crate::formatters::{format_alerts, format_forecast};
use crate::models::{AlertsResponse, ForecastResponse, GetAlertsRequest, GetForecastRequest, PointsResponse};

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    client: Arc<NwsClient>,
    config: Arc<WeatherConfig>,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service against the public NWS API
    pub fn new() -> Result<Self> {
        Self::with_config(WeatherConfig::default())
    }

    pub fn with_config(config: WeatherConfig) -> Result<Self> {
        let client = NwsClient::new(&config)?;

        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        })
    }

    /// Normalizes a state code, rejecting anything that is not two characters.
    ///
    /// Length is counted in UTF-16 code units, the unit JSON Schema validators
    /// in JavaScript clients use, so a single astral character counts as two.
    fn parse_state_code(state: &str) -> Result<String, McpError> {
        if state.encode_utf16().count() != 2 {
            return Err(McpError::invalid_params(
                format!("state must be exactly 2 characters, got {:?}", state),
                None,
            ));
        }
        Ok(state.to_uppercase())
    }

    fn check_coordinates(latitude: f64, longitude: f64) -> Result<(), McpError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(McpError::invalid_params(
                format!("latitude must be between -90 and 90, got {}", latitude),
                None,
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(McpError::invalid_params(
                format!("longitude must be between -180 and 180, got {}", longitude),
                None,
            ));
        }
        Ok(())
    }
}

fn text_result(text: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text.into())]))
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "A weather information service powered by the National Weather Service API. \
                Provides active alerts for US states and forecasts for US coordinates."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Gets active weather alerts for a US state
    #[tool(name = "get-alerts", description = "Get weather alerts for a state")]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let state_code = Self::parse_state_code(&request.state)?;
        tracing::info!("Getting alerts for state: {}", state_code);

        let url = self.config.alerts_url(&state_code);
        let Ok(alerts) = self.client.fetch_json::<AlertsResponse>(&url).await else {
            return text_result("Failed to retrieve alerts data");
        };

        let features = alerts.features();
        if features.is_empty() {
            return text_result(format!("No active alerts for {}", state_code));
        }

        text_result(format_alerts(&state_code, features))
    }

    /// Gets the multi-period forecast for a coordinate
    #[tool(name = "get-forecast", description = "Get weather forecast for a location")]
    async fn get_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        let GetForecastRequest {
            latitude,
            longitude,
        } = request;
        Self::check_coordinates(latitude, longitude)?;
        tracing::info!("Getting forecast for coordinates: {}, {}", latitude, longitude);

        let points_url = self.config.points_url(latitude, longitude);
        let Ok(points) = self.client.fetch_json::<PointsResponse>(&points_url).await else {
            return text_result(format!(
                "Failed to retrieve grid point data for coordinates: {}, {}",
                latitude, longitude
            ));
        };

        let Some(forecast_url) = points.forecast_url() else {
            return text_result("Failed to get forecast URL from grid point data");
        };

        let Ok(forecast) = self.client.fetch_json::<ForecastResponse>(forecast_url).await else {
            return text_result("Failed to retrieve forecast data");
        };

        let periods = forecast.periods();
        if periods.is_empty() {
            return text_result("No forecast periods available");
        }

        text_result(format_forecast(latitude, longitude, periods))
    }
}
