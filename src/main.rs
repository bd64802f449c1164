mod app;
mod config;
mod db;
mod error;
mod pages;
mod registrations;
mod state;

use anyhow::Context;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "signup=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env().context("load configuration")?;
    tracing::debug!(
        static_root = %config.static_root.display(),
        tls = ?config.database.tls,
        fail_fast = config.database.fail_fast_on_storage_init,
        "configuration loaded"
    );
    if config.database.tls == config::DatabaseTls::Require {
        tracing::warn!("postgres TLS is on but the server certificate is not verified");
    }

    let app_state = AppState::init(config).await?;
    let app = app::build_app(app_state.clone());
    app::serve(app, &app_state.config).await
}
