use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{InsertOutcome, NewRegistration, Registration};

pub const CREATE_REGISTRATIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS registrations (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) UNIQUE NOT NULL,
        registered_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for registration records.
///
/// Implementations must make `insert` a single atomic insert-or-detect-conflict step:
/// two concurrent inserts of the same email can never both return `Created`.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Create the backing table if it does not exist yet.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    async fn insert(&self, new: &NewRegistration) -> Result<InsertOutcome, StoreError>;

    /// All records, most recent first.
    async fn list_newest_first(&self) -> Result<Vec<Registration>, StoreError>;
}

#[derive(Clone)]
pub struct PgRegistrationStore {
    db: PgPool,
}

impl PgRegistrationStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RegistrationStore for PgRegistrationStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_REGISTRATIONS_TABLE)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn insert(&self, new: &NewRegistration) -> Result<InsertOutcome, StoreError> {
        let row = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (name, email)
            VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, name, email, registered_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .fetch_optional(&self.db)
        .await?;

        Ok(match row {
            Some(created) => InsertOutcome::Created(created),
            None => InsertOutcome::Duplicate,
        })
    }

    async fn list_newest_first(&self) -> Result<Vec<Registration>, StoreError> {
        let rows = sqlx::query_as::<_, Registration>(
            r#"
            SELECT id, name, email, registered_at
              FROM registrations
             ORDER BY registered_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}

/// Stand-in used when no database could be configured at startup.
/// Every call fails, so the HTTP layer answers 500 while static pages keep working.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> StoreError {
        StoreError::Unavailable(self.reason.clone())
    }
}

#[async_trait]
impl RegistrationStore for UnavailableStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        Err(self.error())
    }

    async fn insert(&self, _new: &NewRegistration) -> Result<InsertOutcome, StoreError> {
        Err(self.error())
    }

    async fn list_newest_first(&self) -> Result<Vec<Registration>, StoreError> {
        Err(self.error())
    }
}
