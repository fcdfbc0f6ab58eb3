//! Request extractors for the authenticated caller.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::common::{ApiError, AuthError};
use crate::domains::users::User;
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

/// The caller's profile. Rejects with 401 when the token is missing or
/// invalid, or when no profile row exists for it.
pub struct CurrentUser {
    pub user: User,
    pub auth: AuthUser,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth = parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AuthError::AuthenticationRequired)?;

        let state = parts
            .extensions
            .get::<AppState>()
            .cloned()
            .ok_or_else(|| ApiError::internal("Application state missing"))?;

        let user = User::find_by_id(auth.user_id, &state.deps.db_pool)
            .await?
            .ok_or(AuthError::ProfileNotFound)?;

        Ok(Self { user, auth })
    }
}

/// The caller's profile when a valid token is present, `None` otherwise.
pub struct MaybeUser(pub Option<User>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if parts.extensions.get::<AuthUser>().is_none() {
            return Ok(Self(None));
        }

        match CurrentUser::from_request_parts(parts, state).await {
            Ok(current) => Ok(Self(Some(current.user))),
            Err(ApiError::Unauthorized(_)) => Ok(Self(None)),
            Err(e) => Err(e),
        }
    }
}
