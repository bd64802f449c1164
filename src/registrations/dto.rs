use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::error::ApiError;

/// Raw body of `POST /register`. Fields are optional so that a missing field
/// surfaces as our own 400 instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Accepts the registration either as `application/x-www-form-urlencoded`
/// or as JSON, picked by `Content-Type`.
#[derive(Debug)]
pub struct RegistrationForm(pub RegisterRequest);

#[derive(Debug, PartialEq, Eq)]
enum BodyKind {
    Json,
    UrlEncoded,
    Other,
}

fn body_kind(content_type: Option<&str>) -> BodyKind {
    let Some(ct) = content_type else {
        return BodyKind::Other;
    };
    let mime = ct.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else if mime == "application/x-www-form-urlencoded" {
        BodyKind::UrlEncoded
    } else {
        BodyKind::Other
    }
}

#[async_trait]
impl<S> FromRequest<S> for RegistrationForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());

        match body_kind(content_type) {
            BodyKind::Json => {
                let Json(body) = Json::<RegisterRequest>::from_request(req, state)
                    .await
                    .map_err(|e| {
                        warn!(error = %e, "rejected JSON registration body");
                        ApiError::MalformedBody(e.body_text())
                    })?;
                Ok(Self(body))
            }
            BodyKind::UrlEncoded => {
                let Form(body) = Form::<RegisterRequest>::from_request(req, state)
                    .await
                    .map_err(|e| {
                        warn!(error = %e, "rejected form registration body");
                        ApiError::MalformedBody(e.body_text())
                    })?;
                Ok(Self(body))
            }
            // Nothing we can read fields from: same as submitting an empty form.
            BodyKind::Other => Ok(Self(RegisterRequest::default())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    async fn extract(content_type: Option<&str>, body: &'static str) -> Result<RegisterRequest, ApiError> {
        let mut builder = axum::http::Request::builder()
            .method("POST")
            .uri("/register");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        let req = builder.body(Body::from(body)).unwrap();
        RegistrationForm::from_request(req, &()).await.map(|RegistrationForm(r)| r)
    }

    #[test]
    fn content_type_selects_decoder() {
        assert_eq!(body_kind(Some("application/json")), BodyKind::Json);
        assert_eq!(body_kind(Some("application/json; charset=utf-8")), BodyKind::Json);
        assert_eq!(body_kind(Some("application/ld+json")), BodyKind::Json);
        assert_eq!(
            body_kind(Some("application/x-www-form-urlencoded")),
            BodyKind::UrlEncoded
        );
        assert_eq!(body_kind(Some("text/plain")), BodyKind::Other);
        assert_eq!(body_kind(None), BodyKind::Other);
    }

    #[tokio::test]
    async fn reads_urlencoded_form() {
        let req = extract(
            Some("application/x-www-form-urlencoded"),
            "name=Alice+Smith&email=a%40example.com",
        )
        .await
        .unwrap();
        assert_eq!(req.name.as_deref(), Some("Alice Smith"));
        assert_eq!(req.email.as_deref(), Some("a@example.com"));
    }

    #[tokio::test]
    async fn reads_json_and_tolerates_missing_fields() {
        let req = extract(Some("application/json"), r#"{"email":"a@example.com"}"#)
            .await
            .unwrap();
        assert!(req.name.is_none());
        assert_eq!(req.email.as_deref(), Some("a@example.com"));
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let err = extract(Some("application/json"), "{not json").await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));
    }

    #[tokio::test]
    async fn unknown_content_type_yields_empty_request() {
        let req = extract(Some("text/plain"), "name=Alice").await.unwrap();
        assert!(req.name.is_none() && req.email.is_none());
    }
}
