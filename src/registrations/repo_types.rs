use sqlx::FromRow;
use time::PrimitiveDateTime;

/// Registration record in the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Registration {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub registered_at: PrimitiveDateTime, // CURRENT_TIMESTAMP in the session time zone, no offset stored
}

/// A validated name/email pair ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub name: String,
    pub email: String,
}

/// Result of an insert that did not fail at the storage level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Created(Registration),
    /// The email is already taken; nothing was written.
    Duplicate,
}
