use tracing::{error, info, warn};

use super::dto::RegisterRequest;
use super::repo::RegistrationStore;
use super::repo_types::{InsertOutcome, NewRegistration, Registration};
use crate::error::ApiError;

/// Trim both fields; `None` when either is blank or absent.
pub fn validate(req: RegisterRequest) -> Option<NewRegistration> {
    let name = req.name.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
    let email = req.email.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
    Some(NewRegistration {
        name: name.to_string(),
        email: email.to_string(),
    })
}

/// Validate, then insert. Duplicate detection is left to the store's
/// single insert-or-conflict statement.
pub async fn submit(
    store: &dyn RegistrationStore,
    req: RegisterRequest,
) -> Result<Registration, ApiError> {
    let Some(new) = validate(req) else {
        warn!("registration attempt with missing name or email");
        return Err(ApiError::MissingFields);
    };

    match store.insert(&new).await {
        Ok(InsertOutcome::Created(reg)) => {
            info!(id = reg.id, name = %reg.name, email = %reg.email, "registration stored");
            Ok(reg)
        }
        Ok(InsertOutcome::Duplicate) => {
            warn!(email = %new.email, "attempt to register duplicate email");
            Err(ApiError::DuplicateEmail)
        }
        Err(e) => {
            error!(error = %e, email = %new.email, "saving registration failed");
            Err(ApiError::Registration(e))
        }
    }
}

pub async fn list(store: &dyn RegistrationStore) -> Result<Vec<Registration>, ApiError> {
    store.list_newest_first().await.map_err(|e| {
        error!(error = %e, "fetching registrations failed");
        ApiError::Listing(e)
    })
}
