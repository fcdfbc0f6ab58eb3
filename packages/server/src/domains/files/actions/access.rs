use tracing::{info, warn};

use crate::common::{ApiError, ApiResult, ListingId, UserRole};
use crate::domains::files::data::{FileKind, SignedUrlResponse};
use crate::domains::listings::actions::find_owned_listing;
use crate::domains::listings::Listing;
use crate::domains::users::User;
use crate::kernel::{ServerDeps, StorageObject};

use super::{parse_kind, SIGNED_URL_TTL_SECS};

/// Time-limited URL for a listing's script or poster.
///
/// Open to the listing's creator and to buyers with an active subscription.
pub async fn create_signed_url(
    user: &User,
    listing_id: ListingId,
    file_type: &str,
    deps: &ServerDeps,
) -> ApiResult<SignedUrlResponse> {
    let kind = parse_kind(file_type)?;
    let listing = Listing::find_by_id(listing_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Listing not found"))?;

    let actor = user.actor();
    let is_creator = actor.owns(listing.creator_id);
    let is_subscribed_buyer = actor.is(UserRole::Buyer) && user.has_active_subscription();
    if !(is_creator || is_subscribed_buyer) {
        return Err(ApiError::forbidden(
            "You need an active subscription to access this file",
        ));
    }

    let url = match kind {
        FileKind::Script => listing.script_url,
        FileKind::Poster => listing.poster_url,
        FileKind::ConceptArt => {
            return Err(ApiError::bad_request(
                "Signed URLs only available for script and poster",
            ))
        }
    }
    .ok_or_else(|| ApiError::not_found(format!("No {} file found for this listing", kind)))?;

    let path = storage_path(&url, deps)?;
    let signed_url = deps
        .storage
        .signed_url(&path, SIGNED_URL_TTL_SECS)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to generate signed URL: {}", e)))?;

    Ok(SignedUrlResponse {
        signed_url,
        expires_in: SIGNED_URL_TTL_SECS,
    })
}

/// Remove a listing's script or poster and clear its URL.
pub async fn delete_file(
    user: &User,
    listing_id: ListingId,
    file_type: &str,
    deps: &ServerDeps,
) -> ApiResult<String> {
    user.actor()
        .require_role(UserRole::Creator, "Only creators can delete files")?;
    let kind = parse_kind(file_type)?;

    let listing = find_owned_listing(
        user,
        listing_id,
        "You don't have permission to delete files for this listing",
        deps,
    )
    .await?;

    let url = match kind {
        FileKind::Script => listing.script_url,
        FileKind::Poster => listing.poster_url,
        FileKind::ConceptArt => {
            return Err(ApiError::bad_request(
                "Can only delete script or poster files individually",
            ))
        }
    }
    .ok_or_else(|| ApiError::not_found(format!("No {} file found", kind)))?;

    let path = storage_path(&url, deps)?;
    deps.storage
        .remove(&[path.clone()])
        .await
        .map_err(|e| ApiError::internal(format!("Failed to delete file: {}", e)))?;

    let pool = &deps.db_pool;
    match kind {
        FileKind::Script => Listing::set_script_url(listing_id, None, pool).await?,
        _ => Listing::set_poster_url(listing_id, None, pool).await?,
    };

    info!(listing_id = %listing_id, file_type = %kind, path = %path, "File deleted");
    Ok(format!("{} file deleted successfully", kind))
}

/// Objects stored under the listing's folder.
pub async fn list_files(
    user: &User,
    listing_id: ListingId,
    deps: &ServerDeps,
) -> ApiResult<Vec<StorageObject>> {
    let listing = find_owned_listing(
        user,
        listing_id,
        "You don't have permission to view files for this listing",
        deps,
    )
    .await?;

    let prefix = format!("{}/{}/", listing.creator_id, listing.id);
    deps.storage.list(&prefix).await.map_err(|e| {
        warn!(listing_id = %listing_id, error = %e, "Listing files failed");
        ApiError::internal(format!("Failed to list files: {}", e))
    })
}

fn storage_path(url: &str, deps: &ServerDeps) -> ApiResult<String> {
    deps.storage.path_from_url(url).ok_or_else(|| {
        warn!(url = %url, "Stored file URL is outside the bucket");
        ApiError::internal("Stored file URL is not in the storage bucket")
    })
}
