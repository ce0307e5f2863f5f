//! Session authentication.
//!
//! ```rust,ignore
//! async fn list(user: SessionUser) -> WebResult<Json<...>> {
//!     // user.user_id belongs to a live session
//! }
//! ```

use crate::state::{AppState, BookingStore};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use booking_core::UserId;
use booking_web::{AppError, BearerToken};

/// Authenticated session user.
///
/// Resolves the bearer token against the session table. Missing, malformed
/// or unknown tokens are rejected with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUser {
    /// The authenticated user ID
    pub user_id: UserId,
}

#[async_trait]
impl<R: BookingStore> FromRequestParts<AppState<R>> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<R>,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;

        let session = state
            .store
            .find_by_token(&token)
            .await
            .map_err(|err| AppError::internal("Failed to validate session").with_source(err))?
            .ok_or_else(|| {
                tracing::debug!("Rejected unknown session token");
                AppError::unauthorized("Invalid or expired session")
            })?;

        Ok(Self {
            user_id: session.user_id,
        })
    }
}
