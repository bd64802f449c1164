use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use tracing::{error, info};

use crate::config::{DatabaseConfig, DatabaseTls};
use crate::registrations::repo::{PgRegistrationStore, RegistrationStore, UnavailableStore};

/// Open the shared storage handle and make sure the `registrations` table exists.
///
/// Unless `fail_fast_on_storage_init` is set, the schema check runs in the
/// background and failures are only logged: the server starts right away and
/// the registration routes answer 500 until the database becomes reachable.
pub async fn bootstrap(cfg: &DatabaseConfig) -> anyhow::Result<Arc<dyn RegistrationStore>> {
    let pool = match open_pool(cfg) {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "postgres is not configured; registrations are unavailable");
            if cfg.fail_fast_on_storage_init {
                return Err(e);
            }
            let store: Arc<dyn RegistrationStore> =
                Arc::new(UnavailableStore::new(e.to_string()));
            return Ok(store);
        }
    };

    let store: Arc<dyn RegistrationStore> = Arc::new(PgRegistrationStore::new(pool));
    if cfg.fail_fast_on_storage_init {
        store
            .ensure_schema()
            .await
            .inspect_err(|e| error!(error = %e, "postgres connection or table creation error"))
            .context("initialise registrations storage")?;
        info!("postgres connected; registrations table checked/created");
    } else {
        // Off the startup path so the listener binds immediately.
        let background = store.clone();
        tokio::spawn(async move {
            match background.ensure_schema().await {
                Ok(()) => info!("postgres connected; registrations table checked/created"),
                Err(e) => error!(error = %e, "postgres connection or table creation error"),
            }
        });
    }
    Ok(store)
}

/// Connections are opened on first use, so this never touches the network.
fn open_pool(cfg: &DatabaseConfig) -> anyhow::Result<sqlx::PgPool> {
    let url = cfg.url.as_deref().context("DATABASE_URL is not set")?;
    let options = PgConnectOptions::from_str(url)
        .context("parse DATABASE_URL")?
        .ssl_mode(ssl_mode(cfg.tls));
    Ok(PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .connect_lazy_with(options))
}

fn ssl_mode(tls: DatabaseTls) -> PgSslMode {
    match tls {
        DatabaseTls::Disable => PgSslMode::Disable,
        DatabaseTls::Prefer => PgSslMode::Prefer,
        DatabaseTls::Require => PgSslMode::Require,
        DatabaseTls::VerifyFull => PgSslMode::VerifyFull,
    }
}
