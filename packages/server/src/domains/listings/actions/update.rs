use tracing::info;

use crate::common::utils::require_opt_len;
use crate::common::{ApiError, ApiResult, ListingId};
use crate::domains::listings::data::UpdateListingRequest;
use crate::domains::listings::models::{Listing, ListingStatus};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

use super::create::parse_tier;
use super::find_owned_listing;

/// Partial update by the listing's owner.
///
/// Owners move a listing between draft, pending and archived; publishing is
/// an admin decision.
pub async fn update_listing(
    user: &User,
    listing_id: ListingId,
    mut request: UpdateListingRequest,
    deps: &ServerDeps,
) -> ApiResult<Listing> {
    find_owned_listing(
        user,
        listing_id,
        "You don't have permission to update this listing",
        deps,
    )
    .await?;

    if request.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    // Stored trimmed, as on create
    request.title = request.title.map(|title| title.trim().to_string());
    require_opt_len("title", request.title.as_deref(), 1, Some(200))?;
    require_opt_len("tagline", request.tagline.as_deref(), 0, Some(300))?;
    require_opt_len("description", request.description.as_deref(), 10, None)?;
    if request.tier.is_some() {
        parse_tier(request.tier.as_deref())?;
    }
    if let Some(status) = request.status.as_deref() {
        let status: ListingStatus = status.parse().map_err(|_| {
            ApiError::unprocessable("status must be one of: draft, pending, published, archived")
        })?;
        if status == ListingStatus::Published && !user.actor().is_admin() {
            return Err(ApiError::forbidden("Only admins can publish listings"));
        }
    }

    let listing = Listing::update(listing_id, &request, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Listing not found"))?;

    info!(listing_id = %listing.id, "Listing updated");
    Ok(listing)
}

pub async fn delete_listing(
    user: &User,
    listing_id: ListingId,
    deps: &ServerDeps,
) -> ApiResult<()> {
    find_owned_listing(
        user,
        listing_id,
        "You don't have permission to delete this listing",
        deps,
    )
    .await?;

    Listing::delete(listing_id, &deps.db_pool).await?;
    info!(listing_id = %listing_id, user_id = %user.id, "Listing deleted");
    Ok(())
}
