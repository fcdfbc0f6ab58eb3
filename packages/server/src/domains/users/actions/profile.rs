use tracing::info;

use crate::common::utils::require_opt_len;
use crate::common::{ApiError, ApiResult, UserId};
use crate::domains::users::data::{PublicProfile, UpdateProfileRequest};
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

/// Apply a partial profile update for the caller.
pub async fn update_profile(
    user: &User,
    request: UpdateProfileRequest,
    deps: &ServerDeps,
) -> ApiResult<User> {
    if request.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    require_opt_len("display_name", request.display_name.as_deref(), 2, Some(100))?;
    require_opt_len("bio", request.bio.as_deref(), 0, Some(500))?;

    let updated = User::update_profile(
        user.id,
        request.display_name.as_deref(),
        request.bio.as_deref(),
        request.avatar_url.as_deref(),
        request.company_name.as_deref(),
        &deps.db_pool,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("User not found"))?;

    info!(user_id = %user.id, "Profile updated");
    Ok(updated)
}

pub async fn get_public_profile(user_id: UserId, deps: &ServerDeps) -> ApiResult<PublicProfile> {
    User::find_by_id(user_id, &deps.db_pool)
        .await?
        .map(PublicProfile::from)
        .ok_or_else(|| ApiError::not_found("User not found"))
}
