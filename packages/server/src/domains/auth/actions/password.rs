//! Password recovery and change actions

use tracing::{error, info, warn};

use crate::common::utils::require_len;
use crate::common::{ApiError, ApiResult};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

use super::MIN_PASSWORD_LEN;

pub const PASSWORD_RESET_MESSAGE: &str =
    "If an account exists with this email, a password reset link has been sent";

/// Ask the auth service to email a recovery link.
///
/// The outcome is never revealed, so callers cannot probe for accounts.
pub async fn request_password_reset(email: &str, deps: &ServerDeps) -> &'static str {
    if let Err(e) = deps.auth_provider.send_password_reset(email.trim()).await {
        warn!(error = %e, "Password reset request failed");
    }
    PASSWORD_RESET_MESSAGE
}

/// Change the caller's password using their own access token.
pub async fn update_password(
    user: &User,
    access_token: &str,
    new_password: &str,
    deps: &ServerDeps,
) -> ApiResult<()> {
    require_len("new_password", new_password, MIN_PASSWORD_LEN, None)?;

    deps.auth_provider
        .update_password(access_token, new_password)
        .await
        .map_err(|e| {
            error!(user_id = %user.id, error = %e, "Password update failed");
            ApiError::internal("Failed to update password")
        })?;

    info!(user_id = %user.id, "Password updated");
    Ok(())
}
