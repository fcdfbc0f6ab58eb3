//! Listings domain actions - business logic functions

mod create;
mod query;
mod update;

pub use create::create_listing;
pub use query::{get_featured, get_published_by_id, get_published_by_slug, list_listings, my_listings};
pub use update::{delete_listing, update_listing};

use crate::common::{ApiError, ApiResult, ListingId};
use crate::domains::listings::models::Listing;
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// Load a listing the caller must own (404 when absent, 403 otherwise).
pub async fn find_owned_listing(
    user: &User,
    listing_id: ListingId,
    denied_message: &str,
    deps: &ServerDeps,
) -> ApiResult<Listing> {
    let listing = Listing::find_by_id(listing_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Listing not found"))?;

    user.actor()
        .require_owner(listing.creator_id, denied_message)?;
    Ok(listing)
}

/// Load a listing the caller must own or moderate.
pub async fn find_managed_listing(
    user: &User,
    listing_id: ListingId,
    deps: &ServerDeps,
) -> ApiResult<Listing> {
    let listing = Listing::find_by_id(listing_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Listing not found"))?;

    user.actor()
        .require_owner_or_admin(listing.creator_id, "Not authorized")?;
    Ok(listing)
}
