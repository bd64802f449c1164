use axum::{
    extract::State,
    response::Html,
    routing::get,
    Router,
};
use tower_http::services::ServeDir;
use tracing::{debug, error, instrument};

use crate::{error::ApiError, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(landing))
        .route("/health", get(|| async { "ok" }))
}

/// Everything not routed explicitly is looked up under the static root.
pub fn static_assets(state: &AppState) -> ServeDir {
    ServeDir::new(&state.config.static_root)
}

#[instrument(skip(state))]
pub async fn landing(State(state): State<AppState>) -> Result<Html<Vec<u8>>, ApiError> {
    let path = state.config.landing_page_path();
    match tokio::fs::read(&path).await {
        Ok(body) => {
            debug!(path = %path.display(), "serving landing page");
            Ok(Html(body))
        }
        Err(e) => {
            error!(error = %e, path = %path.display(), "error sending landing page");
            Err(ApiError::LandingPage(e))
        }
    }
}
