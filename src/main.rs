use anyhow::Result;
use nws_weather_mcp::Weather;
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nws_weather_mcp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        tracing::error!("Fatal error in main(): {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let weather = Weather::new()?;
    let server = weather.serve(rmcp::transport::stdio()).await?;
    tracing::info!("Weather MCP Server running on stdio...");

    server.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
