use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use apks_hub_api::{
    app,
    config::Config,
    middleware,
    services::{DefaultSite, HttpConfigFetcher, SiteConfigService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics()?;

    info!("Starting APKS Hub v{}", env!("CARGO_PKG_VERSION"));

    // The fallback tenant must be valid before anything is served
    let default_site = DefaultSite::load(&config.site.default_config_path)?;

    let fetcher = HttpConfigFetcher::new(&config.remote)?;
    info!(
        endpoint = %fetcher.endpoint(),
        timeout_ms = config.remote.timeout_ms,
        "Remote site config API configured"
    );

    let sites = SiteConfigService::new(Arc::new(fetcher), default_site);

    let addr = config.socket_addr()?;
    let app = app::create_app(config, sites);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
