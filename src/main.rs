//! serverless-api binary

use anyhow::{anyhow, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use serverless_api::config::{AppConfig, LogFormat, RunMode};
use serverless_api::{api, create_app, lambda};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config)?;

    let app = create_app(&config).context("failed to compose application")?;

    let mode = config.server.mode.resolve();
    tracing::info!(?mode, version = env!("CARGO_PKG_VERSION"), "Starting serverless-api");

    match mode {
        RunMode::Lambda => lambda::run(app)
            .await
            .map_err(|err| anyhow!("function runtime failed: {}", err))?,
        RunMode::Http | RunMode::Auto => {
            api::serve(app, &config.server.host, config.server.port)
                .await
                .with_context(|| {
                    format!(
                        "HTTP server on {}:{} failed",
                        config.server.host, config.server.port
                    )
                })?;
        }
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.logging.level.clone()))
        .unwrap_or_else(|_| EnvFilter::new("serverless_api=info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }

    Ok(())
}
