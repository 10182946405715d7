use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use rmcp::ServiceExt;
use std::future::IntoFuture;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mcp_qweather_server::constants::{DEFAULT_BIND_ADDRESS, DEFAULT_CONFIG_PATH};
use mcp_qweather_server::{TokenSigner, Weather, WeatherConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    Stdio,
    /// Streamable HTTP with SSE responses
    Sse,
}

#[derive(Debug, Parser)]
#[command(version, about = "MCP server for current weather lookups")]
struct Cli {
    /// Transport type
    #[arg(short, long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Listen address for the sse transport
    #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcp_qweather_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    tracing::info!("Starting MCP weather server");

    let config = WeatherConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    let signer = Arc::new(TokenSigner::new(&config).context("Failed to parse private key")?);
    // Sign once up front so an unusable key stops startup.
    signer.token().context("Failed to sign token")?;

    let weather = Weather::with_signer(&config, signer)?;

    match cli.transport {
        Transport::Stdio => serve_stdio(weather).await?,
        Transport::Sse => serve_http(weather, &cli.bind).await?,
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn serve_stdio(weather: Weather) -> Result<()> {
    tracing::info!("Serving on stdio");

    let fatal = weather.fatal_signal();
    let server = weather.serve(rmcp::transport::stdio()).await?;
    let cancel = server.cancellation_token();

    tokio::select! {
        result = server.waiting() => {
            result?;
        }
        _ = fatal.notified() => {
            cancel.cancel();
            bail!("Stopped after an unrecoverable signing error");
        }
    }
    Ok(())
}

async fn serve_http(weather: Weather, bind: &str) -> Result<()> {
    let fatal = weather.fatal_signal();
    let service = StreamableHttpService::new(
        move || Ok(weather.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );
    let router = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    tracing::info!("Serving streamable HTTP on http://{}/mcp", bind);

    let server = axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .into_future();

    tokio::select! {
        result = server => {
            result?;
        }
        _ = fatal.notified() => {
            bail!("Stopped after an unrecoverable signing error");
        }
    }
    Ok(())
}
