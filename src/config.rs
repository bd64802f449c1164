use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;

/// How the connection to Postgres is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseTls {
    Disable,
    Prefer,
    /// Encrypted, but the server certificate is not verified.
    Require,
    VerifyFull,
}

impl FromStr for DatabaseTls {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disable" => Ok(Self::Disable),
            "prefer" => Ok(Self::Prefer),
            "require" => Ok(Self::Require),
            "verify-full" => Ok(Self::VerifyFull),
            other => anyhow::bail!("unknown DATABASE_TLS mode: {other}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub tls: DatabaseTls,
    pub max_connections: u32,
    /// Abort startup when the store cannot be reached or the schema cannot be created.
    pub fail_fast_on_storage_init: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub static_root: PathBuf,
    pub landing_page: String,
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database = DatabaseConfig {
            url: var("DATABASE_URL").filter(|v| !v.trim().is_empty()),
            tls: var("DATABASE_TLS")
                .map(|v| v.parse::<DatabaseTls>())
                .transpose()?
                .unwrap_or(DatabaseTls::Require),
            max_connections: var("DATABASE_MAX_CONNECTIONS")
                .map(|v| parse_pool_size(&v))
                .transpose()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?
                .unwrap_or(1),
            fail_fast_on_storage_init: var("STORAGE_FAIL_FAST")
                .map(|v| parse_flag(&v))
                .transpose()
                .context("STORAGE_FAIL_FAST must be a boolean")?
                .unwrap_or(false),
        };

        let port = var("PORT")
            .or_else(|| var("APP_PORT"))
            .map(|v| v.parse::<u16>())
            .transpose()
            .context("PORT must be a valid port number")?
            .unwrap_or(3000);

        Ok(Self {
            host: var("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            static_root: var("STATIC_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            landing_page: var("LANDING_PAGE").unwrap_or_else(|| "intro.html".into()),
            database,
        })
    }

    pub fn landing_page_path(&self) -> PathBuf {
        self.static_root.join(&self.landing_page)
    }
}

fn parse_pool_size(raw: &str) -> anyhow::Result<u32> {
    let size = raw.trim().parse::<u32>()?;
    anyhow::ensure!(size > 0, "pool size cannot be zero");
    Ok(size)
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("not a boolean: {other}"),
    }
}
