use crate::config::AppConfig;
use crate::db;
use crate::registrations::repo::RegistrationStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RegistrationStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let store = db::bootstrap(&config.database).await?;
        Ok(Self::from_parts(store, Arc::new(config)))
    }

    pub fn from_parts(store: Arc<dyn RegistrationStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    #[cfg(test)]
    pub fn with_store(store: Arc<dyn RegistrationStore>) -> Self {
        let config = AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            static_root: "public".into(),
            landing_page: "intro.html".into(),
            database: crate::config::DatabaseConfig {
                url: None,
                tls: crate::config::DatabaseTls::Disable,
                max_connections: 1,
                fail_fast_on_storage_init: false,
            },
        };
        Self::from_parts(store, Arc::new(config))
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::with_store(Arc::new(
            crate::registrations::memory::MemoryRegistrationStore::new(),
        ))
    }
}
