//! Favorites actions
//!
//! Saving is idempotent and only the insert or delete that actually changed
//! a row touches the listing's `save_count`.

use tracing::info;

use crate::common::{ApiError, ApiResult, ListingId};
use crate::domains::favorites::data::FavoriteResponse;
use crate::domains::favorites::models::Favorite;
use crate::domains::listings::Listing;
use crate::domains::users::User;
use crate::kernel::ServerDeps;

pub async fn saved_listing_ids(user: &User, deps: &ServerDeps) -> ApiResult<Vec<ListingId>> {
    Ok(Favorite::listing_ids_for(user.id, &deps.db_pool).await?)
}

pub async fn saved_listings(user: &User, deps: &ServerDeps) -> ApiResult<Vec<Listing>> {
    Ok(Listing::find_saved_by(user.id, &deps.db_pool).await?)
}

pub async fn save_listing(
    user: &User,
    listing_id: ListingId,
    deps: &ServerDeps,
) -> ApiResult<FavoriteResponse> {
    Listing::find_published_by_id(listing_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Listing not found"))?;

    if Favorite::add(user.id, listing_id, &deps.db_pool).await? {
        Listing::increment_save_count(listing_id, &deps.db_pool).await?;
        info!(listing_id = %listing_id, user_id = %user.id, "Listing saved");
    }

    Ok(FavoriteResponse {
        listing_id,
        saved: true,
    })
}

pub async fn unsave_listing(
    user: &User,
    listing_id: ListingId,
    deps: &ServerDeps,
) -> ApiResult<FavoriteResponse> {
    if Favorite::remove(user.id, listing_id, &deps.db_pool).await? {
        Listing::decrement_save_count(listing_id, &deps.db_pool).await?;
        info!(listing_id = %listing_id, user_id = %user.id, "Listing unsaved");
    }

    Ok(FavoriteResponse {
        listing_id,
        saved: false,
    })
}
