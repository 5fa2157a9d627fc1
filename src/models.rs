use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// National Weather Service API Models
// ============================================================================
//
// Upstream records are not guaranteed complete, so every field is optional.

#[derive(Debug, Default, Deserialize)]
pub struct AlertsResponse {
    #[serde(default)]
    pub features: Option<Vec<AlertFeature>>,
}

impl AlertsResponse {
    /// A missing feature list means the same as an empty one: no alerts.
    pub fn features(&self) -> &[AlertFeature] {
        self.features.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertFeature {
    #[serde(default)]
    pub properties: Option<AlertProperties>,
}

impl AlertFeature {
    pub fn new(properties: AlertProperties) -> Self {
        Self {
            properties: Some(properties),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertProperties {
    pub event: Option<String>,
    #[serde(rename = "areaDesc")]
    pub area_desc: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub headline: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PointsResponse {
    #[serde(default)]
    pub properties: Option<PointsProperties>,
}

impl PointsResponse {
    pub fn forecast_url(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|props| props.forecast.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PointsProperties {
    pub forecast: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub properties: Option<ForecastProperties>,
}

impl ForecastResponse {
    /// Periods in the order the API returned them (chronological).
    pub fn periods(&self) -> &[ForecastPeriod] {
        self.properties
            .as_ref()
            .and_then(|props| props.periods.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub periods: Option<Vec<ForecastPeriod>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastPeriod {
    pub name: Option<String>,
    pub temperature: Option<f64>,
    #[serde(rename = "temperatureUnit")]
    pub temperature_unit: Option<String>,
    #[serde(rename = "windSpeed")]
    pub wind_speed: Option<String>,
    #[serde(rename = "windDirection")]
    pub wind_direction: Option<String>,
    #[serde(rename = "shortForecast")]
    pub short_forecast: Option<String>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAlertsRequest {
    /// Two-letter state code (e.g. CA, NY)
    #[schemars(length(min = 2, max = 2))]
    pub state: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetForecastRequest {
    /// Latitude of a location
    #[schemars(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    /// Longitude of a location
    #[schemars(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}
