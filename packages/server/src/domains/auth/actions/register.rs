//! Register action

use tracing::{error, info};

use crate::common::utils::{require_email, require_len};
use crate::common::{ApiError, ApiResult, UserId, UserRole};
use crate::domains::auth::data::RegisterRequest;
use crate::domains::users::User;
use crate::kernel::ServerDeps;

use super::MIN_PASSWORD_LEN;

/// Create the auth account, then the profile row that carries the role.
pub async fn register(request: RegisterRequest, deps: &ServerDeps) -> ApiResult<User> {
    require_email("email", &request.email)?;
    require_len("password", &request.password, MIN_PASSWORD_LEN, None)?;
    require_len("display_name", &request.display_name, 2, Some(100))?;
    let role: UserRole = request
        .role
        .parse()
        .map_err(|_| ApiError::unprocessable("role must be one of: creator, buyer, admin"))?;

    let email = request.email.trim().to_string();
    let metadata = serde_json::json!({
        "display_name": request.display_name,
        "role": role.as_str(),
    });

    let auth_user_id = deps
        .auth_provider
        .sign_up(&email, &request.password, metadata)
        .await
        .map_err(|e| {
            let message = e.to_string();
            let lower = message.to_lowercase();
            if lower.contains("already registered") || lower.contains("already exists") {
                ApiError::Conflict("User with this email already exists".into())
            } else {
                error!(error = %message, "Sign-up failed");
                ApiError::internal(format!("Registration failed: {}", message))
            }
        })?;

    let user_id = UserId::parse(&auth_user_id).map_err(|_| {
        error!(auth_user_id = %auth_user_id, "Auth service returned a non-UUID user id");
        ApiError::internal("Failed to create user account")
    })?;

    let user = User::create(
        user_id,
        &email,
        role.as_str(),
        request.display_name.trim(),
        &deps.db_pool,
    )
    .await
    .map_err(|e| {
        error!(user_id = %user_id, error = %e, "Failed to insert profile");
        ApiError::internal(format!("Registration failed: {}", e))
    })?;

    info!(user_id = %user.id, role = %user.role, "User registered");
    Ok(user)
}
