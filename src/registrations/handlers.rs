use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use tracing::instrument;

use super::{
    dto::RegistrationForm,
    services,
    views::{RegisteredTemplate, RegistrationsTemplate},
};
use crate::{error::ApiError, state::AppState};

pub fn registration_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/view-registrations", get(view_registrations))
}

#[instrument(skip(state, form))]
pub async fn register(
    State(state): State<AppState>,
    RegistrationForm(form): RegistrationForm,
) -> Result<RegisteredTemplate, ApiError> {
    services::submit(state.store.as_ref(), form).await?;
    Ok(RegisteredTemplate {})
}

#[instrument(skip(state))]
pub async fn view_registrations(
    State(state): State<AppState>,
) -> Result<RegistrationsTemplate, ApiError> {
    let rows = services::list(state.store.as_ref()).await?;
    Ok(RegistrationsTemplate::new(&rows))
}
