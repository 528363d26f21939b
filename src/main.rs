use std::sync::Arc;

use anyhow::Context;
use log::info;
use tokio::net::TcpListener;

use bizgpt::config::AppConfig;
use bizgpt::server::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    config.log_warnings();
    info!("[server] Starting with {:?}", config);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let state = AppState::from_config(&config)?;
    let app = router(Arc::new(state));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Bind {} failed", addr))?;
    info!("[server] Backend running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
