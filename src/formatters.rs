use crate::models::{AlertFeature, AlertProperties, ForecastPeriod};

const UNKNOWN: &str = "Unknown";

/// Formats one alert into a fixed-layout block
pub fn format_alert(feature: &AlertFeature) -> String {
    let fallback = AlertProperties::default();
    let props = feature.properties.as_ref().unwrap_or(&fallback);
    [
        format!("Event: {}", props.event.as_deref().unwrap_or(UNKNOWN)),
        format!("Area: {}", props.area_desc.as_deref().unwrap_or(UNKNOWN)),
        format!("Severity: {}", props.severity.as_deref().unwrap_or(UNKNOWN)),
        format!("Status: {}", props.status.as_deref().unwrap_or(UNKNOWN)),
        format!(
            "Headline: {}",
            props.headline.as_deref().unwrap_or("No description available")
        ),
        "---".to_string(),
    ]
    .join("\n")
}

/// Formats one forecast period into a fixed-layout block
pub fn format_forecast_period(period: &ForecastPeriod) -> String {
    let temperature = match period.temperature {
        Some(value) => format!(
            "Temperature: {}\u{00b0}{}",
            value,
            period.temperature_unit.as_deref().unwrap_or("F")
        ),
        None => format!("Temperature: {}", UNKNOWN),
    };

    [
        format!("{}:", period.name.as_deref().unwrap_or(UNKNOWN)),
        temperature,
        format!(
            "Wind: {} {}",
            period.wind_speed.as_deref().unwrap_or(UNKNOWN),
            period.wind_direction.as_deref().unwrap_or(UNKNOWN)
        ),
        period
            .short_forecast
            .as_deref()
            .unwrap_or("No forecast available")
            .to_string(),
        "---".to_string(),
    ]
    .join("\n")
}

/// Formats the full alerts reply for a state
pub fn format_alerts(state_code: &str, features: &[AlertFeature]) -> String {
    let blocks: Vec<String> = features.iter().map(format_alert).collect();
    format!("Active alerts for {}:\n\n{}", state_code, blocks.join("\n"))
}

/// Formats the full forecast reply, keeping period order
pub fn format_forecast(latitude: f64, longitude: f64, periods: &[ForecastPeriod]) -> String {
    let blocks: Vec<String> = periods.iter().map(format_forecast_period).collect();
    format!(
        "Forecast for {}, {}:\n\n{}",
        latitude,
        longitude,
        blocks.join("\n")
    )
}
