//! Custom Axum extractors.
//!
//! - `CorrelationId`: the request's correlation ID
//! - `BearerToken`: the token from `Authorization: Bearer <token>`
//! - `LenientJson`: a JSON body that falls back to `T::default()`

use crate::error::AppError;
use crate::middleware::CORRELATION_ID_HEADER;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header, request::Parts},
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Prefers the ID recorded by [`crate::middleware::correlation_id_layer`],
/// then a valid `X-Correlation-ID` header, then a fresh UUID v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Self>() {
            return Ok(*id);
        }

        let id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(id))
    }
}

/// Bearer token extracted from `Authorization: Bearer <token>` header.
///
/// Rejects with 401 when the header is missing, uses another scheme or
/// carries an empty token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| {
                AppError::unauthorized("Invalid authorization format. Expected 'Bearer <token>'")
            })?;

        if token.is_empty() {
            return Err(AppError::unauthorized("Empty bearer token"));
        }

        Ok(Self(token.to_string()))
    }
}

/// JSON body that never rejects.
///
/// A missing, empty or malformed body yields `T::default()`, so handlers can
/// apply their own validation to absent fields.
#[derive(Debug, Clone, Default)]
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for LenientJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = std::convert::Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(body) = Bytes::from_request(req, state).await else {
            return Ok(Self(T::default()));
        };

        match serde_json::from_slice(&body) {
            Ok(value) => Ok(Self(value)),
            Err(err) => {
                if !body.is_empty() {
                    tracing::debug!(error = %err, "Ignoring unparsable JSON body");
                }
                Ok(Self(T::default()))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde::Deserialize;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder();
        if let Some(value) = header {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).expect("Valid request").into_parts().0
    }

    #[tokio::test]
    async fn test_correlation_id_from_header() {
        let uuid = Uuid::new_v4();
        let req = Request::builder()
            .header(CORRELATION_ID_HEADER, uuid.to_string())
            .body(())
            .expect("Valid request");

        let (mut parts, _) = req.into_parts();
        let Ok(correlation_id) = CorrelationId::from_request_parts(&mut parts, &()).await;

        assert_eq!(correlation_id.0, uuid);
    }

    #[tokio::test]
    async fn test_correlation_id_prefers_extension() {
        let recorded = CorrelationId(Uuid::new_v4());
        let mut parts = parts(None);
        parts.extensions.insert(recorded);

        let Ok(correlation_id) = CorrelationId::from_request_parts(&mut parts, &()).await;
        assert_eq!(correlation_id, recorded);
    }

    #[tokio::test]
    async fn test_bearer_token_extracted() {
        let token = BearerToken::from_request_parts(&mut parts(Some("Bearer abc123")), &()).await;
        assert_eq!(token.ok(), Some(BearerToken("abc123".to_string())));
    }

    #[tokio::test]
    async fn test_bearer_token_rejections_are_401() {
        for header in [None, Some("Basic abc123"), Some("Bearer "), Some("abc123")] {
            let err = BearerToken::from_request_parts(&mut parts(header), &())
                .await
                .expect_err("should reject");
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED, "{header:?}");
        }
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Body1 {
        room_id: Option<i64>,
    }

    async fn lenient(body: &'static str) -> Body1 {
        let req = Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("Valid request");
        let Ok(LenientJson(value)) = LenientJson::<Body1>::from_request(req, &()).await;
        value
    }

    #[tokio::test]
    async fn test_lenient_json_parses_valid_body() {
        assert_eq!(lenient(r#"{"roomId": 4}"#).await, Body1 { room_id: Some(4) });
    }

    #[tokio::test]
    async fn test_lenient_json_defaults_on_bad_body() {
        assert_eq!(lenient("").await, Body1::default());
        assert_eq!(lenient("{not json").await, Body1::default());
        assert_eq!(lenient(r#"{"roomId": "x"}"#).await, Body1::default());
    }
}
