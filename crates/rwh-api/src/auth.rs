//! # Owner Identification
//!
//! Every record-touching endpoint identifies the caller through the
//! `x-owner-id` header, a UUID issued out of band. A missing or malformed
//! header is 401; reads and deletes of records owned by someone else are
//! 403 (enforced in the handlers, which know the record).

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::AppError;

/// Header carrying the caller's owner UUID.
pub const OWNER_ID_HEADER: &str = "x-owner-id";

/// The authenticated owner, extracted from [`OWNER_ID_HEADER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerId(pub Uuid);

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OwnerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(OWNER_ID_HEADER).ok_or_else(|| {
            AppError::Unauthorized(format!("{OWNER_ID_HEADER} header is required"))
        })?;
        let raw = value.to_str().map_err(|_| {
            AppError::Unauthorized(format!("{OWNER_ID_HEADER} header is not valid UTF-8"))
        })?;
        let id = Uuid::parse_str(raw.trim()).map_err(|_| {
            AppError::Unauthorized(format!("{OWNER_ID_HEADER} header must be a UUID"))
        })?;
        Ok(Self(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn whoami(owner: OwnerId) -> String {
        owner.to_string()
    }

    fn app() -> Router {
        Router::new().route("/whoami", get(whoami))
    }

    #[tokio::test]
    async fn valid_header_extracts_owner() {
        let owner = Uuid::new_v4();
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(OWNER_ID_HEADER, owner.to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), owner.to_string());
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let resp = app()
            .oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert_eq!(body["error"], "x-owner-id header is required");
    }

    #[tokio::test]
    async fn malformed_header_is_unauthorized() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(OWNER_ID_HEADER, "not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn header_value_is_trimmed() {
        let owner = Uuid::new_v4();
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(OWNER_ID_HEADER, format!(" {owner} "))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
