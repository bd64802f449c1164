use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::registrations::repo::StoreError;

pub const LANDING_PAGE_ERROR: &str = "<h1>Error loading page.</h1><p>Please try again later.</p>";

/// Everything a request can fail with. Detail stays in the server logs;
/// clients only see the short message for each status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("name and email are required")]
    MissingFields,
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("email already registered")]
    DuplicateEmail,
    #[error("saving registration failed: {0}")]
    Registration(#[source] StoreError),
    #[error("fetching registrations failed: {0}")]
    Listing(#[source] StoreError),
    #[error("landing page unreadable: {0}")]
    LandingPage(#[source] std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateEmail => StatusCode::CONFLICT,
            Self::Registration(_) | Self::Listing(_) | Self::LandingPage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::MissingFields => (status, "Name and Email are required.").into_response(),
            Self::MalformedBody(_) => (status, "Malformed registration request.").into_response(),
            Self::DuplicateEmail => (status, "Email already registered.").into_response(),
            Self::Registration(_) => {
                (status, "Internal Server Error during registration.").into_response()
            }
            Self::Listing(_) => {
                (status, "Error fetching registrations from database.").into_response()
            }
            Self::LandingPage(_) => (status, Html(LANDING_PAGE_ERROR)).into_response(),
        }
    }
}
