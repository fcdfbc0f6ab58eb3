use tracing::{error, info};

use crate::common::{ApiError, ApiResult};
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_AVATAR_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

fn avatar_extension(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Store the caller's avatar at `avatars/{user_id}.{ext}` and point the
/// profile at its public URL.
pub async fn upload_avatar(
    user: &User,
    content_type: &str,
    bytes: Vec<u8>,
    deps: &ServerDeps,
) -> ApiResult<User> {
    let ext = avatar_extension(content_type).ok_or_else(|| {
        ApiError::bad_request(format!(
            "Invalid file type. Allowed: {}",
            ALLOWED_AVATAR_TYPES.join(", ")
        ))
    })?;

    if bytes.len() > MAX_AVATAR_BYTES {
        return Err(ApiError::bad_request("File too large. Maximum size: 5MB"));
    }

    let path = format!("avatars/{}.{}", user.id, ext);
    deps.storage
        .upload(&path, bytes, content_type)
        .await
        .map_err(|e| {
            error!(user_id = %user.id, error = %e, "Avatar upload failed");
            ApiError::internal("Failed to upload avatar")
        })?;

    let url = deps.storage.public_url(&path);
    let updated = User::set_avatar_url(user.id, Some(&url), &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    info!(user_id = %user.id, path = %path, "Avatar uploaded");
    Ok(updated)
}

/// Clear the caller's avatar. The stored object is removed best-effort.
pub async fn delete_avatar(user: &User, deps: &ServerDeps) -> ApiResult<()> {
    if let Some(path) = user
        .avatar_url
        .as_deref()
        .and_then(|url| deps.storage.path_from_url(url))
    {
        if let Err(e) = deps.storage.remove(&[path]).await {
            error!(user_id = %user.id, error = %e, "Failed to remove avatar object");
        }
    }

    User::set_avatar_url(user.id, None, &deps.db_pool)
        .await
        .map_err(|e| {
            error!(user_id = %user.id, error = %e, "Failed to clear avatar");
            ApiError::internal("Failed to delete avatar")
        })?;

    info!(user_id = %user.id, "Avatar deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_extension() {
        assert_eq!(avatar_extension("image/jpeg"), Some("jpg"));
        assert_eq!(avatar_extension("image/webp"), Some("webp"));
        assert_eq!(avatar_extension("image/gif"), None);
        assert_eq!(avatar_extension("application/pdf"), None);
    }
}
