//! Login / logout actions

use tracing::{info, warn};

use crate::common::{ApiError, ApiResult, UserId};
use crate::domains::auth::data::{LoginRequest, TokenResponse};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// Exchange credentials for an access token plus the caller's profile.
pub async fn login(request: LoginRequest, deps: &ServerDeps) -> ApiResult<TokenResponse> {
    let session = deps
        .auth_provider
        .sign_in(request.email.trim(), &request.password)
        .await
        .map_err(|e| {
            info!(error = %e, "Login rejected");
            ApiError::Unauthorized("Invalid email or password".into())
        })?;

    let user_id = UserId::parse(&session.user_id)
        .map_err(|_| ApiError::Unauthorized("Invalid email or password".into()))?;

    let user = User::find_by_id(user_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("User profile not found"))?;

    info!(user_id = %user.id, "User logged in");
    Ok(TokenResponse {
        access_token: session.access_token,
        token_type: "bearer".to_string(),
        user,
    })
}

/// Revoke the token at the auth service. Never fails.
pub async fn logout(access_token: Option<&str>, deps: &ServerDeps) {
    let Some(token) = access_token else {
        return;
    };

    if let Err(e) = deps.auth_provider.sign_out(token).await {
        warn!(error = %e, "Sign-out failed");
    }
}
