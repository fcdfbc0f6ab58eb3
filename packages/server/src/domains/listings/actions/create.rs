use tracing::info;

use crate::common::utils::{require_len, require_opt_len, unique_slug};
use crate::common::{ApiError, ApiResult, UserRole};
use crate::domains::listings::data::CreateListingRequest;
use crate::domains::listings::models::{Listing, ListingTier};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// Create a draft listing owned by the calling creator.
pub async fn create_listing(
    user: &User,
    request: CreateListingRequest,
    deps: &ServerDeps,
) -> ApiResult<Listing> {
    user.actor()
        .require_role(UserRole::Creator, "Only creators can create IP listings")?;

    require_len("title", request.title.trim(), 1, Some(200))?;
    require_opt_len("tagline", request.tagline.as_deref(), 0, Some(300))?;
    require_len("description", &request.description, 10, None)?;
    let tier = parse_tier(request.tier.as_deref())?;

    let slug = unique_slug(&request.title);
    let listing = Listing::create(user.id, &slug, tier, &request, &deps.db_pool).await?;

    info!(listing_id = %listing.id, creator_id = %user.id, slug = %listing.slug, "Listing created");
    Ok(listing)
}

pub(super) fn parse_tier(tier: Option<&str>) -> ApiResult<ListingTier> {
    match tier {
        None => Ok(ListingTier::default()),
        Some(value) => value.parse().map_err(|_| {
            ApiError::unprocessable("tier must be one of: flagship, strong, hidden-gem")
        }),
    }
}
