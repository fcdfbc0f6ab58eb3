use tracing::{error, info, warn};

use crate::common::{ApiError, ApiResult, ListingId, UserId, UserRole};
use crate::domains::files::data::{FileKind, FileUploadResponse, UploadFile};
use crate::domains::files::validation::{content_type_for, validate_file};
use crate::domains::listings::actions::find_owned_listing;
use crate::domains::listings::Listing;
use crate::domains::users::User;
use crate::kernel::ServerDeps;

use super::{parse_kind, SIGNED_URL_TTL_SECS};

/// Store a listing file and point the listing at it.
///
/// Scripts and posters replace the previous object; concept art accumulates.
pub async fn upload_file(
    user: &User,
    upload: UploadFile,
    deps: &ServerDeps,
) -> ApiResult<FileUploadResponse> {
    user.actor()
        .require_role(UserRole::Creator, "Only creators can upload files")?;
    let kind = parse_kind(&upload.file_type)?;

    let listing = find_owned_listing(
        user,
        upload.listing_id,
        "You don't have permission to upload files for this listing",
        deps,
    )
    .await?;

    let ext = validate_file(
        kind,
        &upload.file_name,
        upload.bytes.len(),
        deps.max_upload_bytes,
    )?;

    let path = object_path(user.id, upload.listing_id, kind, &ext);
    let size = upload.bytes.len();

    deps.storage
        .upload(&path, upload.bytes, &content_type_for(&ext))
        .await
        .map_err(|e| {
            error!(path = %path, error = %e, "Upload failed");
            ApiError::internal(format!("File upload failed: {}", e))
        })?;

    let url = deps.storage.public_url(&path);
    let signed_url = deps
        .storage
        .signed_url(&path, SIGNED_URL_TTL_SECS)
        .await
        .map_err(|e| ApiError::internal(format!("File upload failed: {}", e)))?;

    let pool = &deps.db_pool;
    match kind {
        FileKind::Script => Listing::set_script_url(upload.listing_id, Some(&url), pool).await?,
        FileKind::Poster => Listing::set_poster_url(upload.listing_id, Some(&url), pool).await?,
        FileKind::ConceptArt => Listing::add_concept_art_url(upload.listing_id, &url, pool).await?,
    };

    let previous_url = match kind {
        FileKind::Script => listing.script_url.as_deref(),
        FileKind::Poster => listing.poster_url.as_deref(),
        FileKind::ConceptArt => None,
    };
    if let Some(previous) = previous_url.and_then(|url| deps.storage.path_from_url(url)) {
        remove_replaced(&previous, &path, deps).await;
    }

    info!(listing_id = %upload.listing_id, file_type = %kind, path = %path, bytes = size, "File uploaded");

    Ok(FileUploadResponse {
        path,
        url,
        signed_url,
        file_name: upload.file_name,
        file_type: kind.to_string(),
    })
}

/// Drop the object a new upload replaced under a different name. Best effort.
async fn remove_replaced(previous: &str, current: &str, deps: &ServerDeps) {
    if previous == current {
        return;
    }
    if let Err(e) = deps.storage.remove(&[previous.to_string()]).await {
        warn!(path = %previous, error = %e, "Failed to remove replaced file");
    }
}

/// `{creator}/{listing}/{kind}{ext}`, with a random suffix for concept art
fn object_path(user_id: UserId, listing_id: ListingId, kind: FileKind, ext: &str) -> String {
    match kind {
        FileKind::ConceptArt => {
            let suffix = uuid::Uuid::new_v4().simple().to_string();
            format!("{}/{}/{}-{}{}", user_id, listing_id, kind, &suffix[..8], ext)
        }
        _ => format!("{}/{}/{}{}", user_id, listing_id, kind, ext),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_paths() {
        let user_id = UserId::new();
        let listing_id = ListingId::new();

        assert_eq!(
            object_path(user_id, listing_id, FileKind::Script, ".pdf"),
            format!("{}/{}/script.pdf", user_id, listing_id)
        );

        let first = object_path(user_id, listing_id, FileKind::ConceptArt, ".png");
        let second = object_path(user_id, listing_id, FileKind::ConceptArt, ".png");
        assert!(first.starts_with(&format!("{}/{}/concept_art-", user_id, listing_id)));
        assert!(first.ends_with(".png"));
        assert_ne!(first, second);
    }
}
