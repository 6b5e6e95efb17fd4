use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use transit_api::{config::TransitApiConfig, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = TransitApiConfig::parse();

    if config.dump_openapi {
        let json = server::openapi().to_pretty_json()?;
        print!("{}", json);
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or("transit_api=info,transit_db=info,tower_http=info".into()),
        )
        .pretty()
        .init();

    let router = server::make(&config)?;

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!("Listening on http://{:?}", config.bind_addr);

    axum::serve(listener, router)
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}
