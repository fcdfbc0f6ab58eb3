//! Admin actions. Every action checks the admin role first.

use tracing::info;

use crate::common::{ApiError, ApiResult, ListingId};
use crate::domains::admin::data::{
    AdminListingsQuery, FeaturedChange, PlatformStats, StatusChange,
};
use crate::domains::inquiries::{Inquiry, InquiryWithListing};
use crate::domains::listings::{Listing, ListingStatus};
use crate::domains::users::{User, UserSummary};
use crate::kernel::ServerDeps;

pub async fn all_listings(
    admin: &User,
    query: AdminListingsQuery,
    deps: &ServerDeps,
) -> ApiResult<Vec<Listing>> {
    admin.actor().require_admin()?;
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<ListingStatus>().map_err(|_| {
                ApiError::unprocessable(
                    "status must be one of: draft, pending, published, archived",
                )
            })
        })
        .transpose()?;

    Ok(Listing::find_all(status, &deps.db_pool).await?)
}

pub async fn approve_listing(
    admin: &User,
    listing_id: ListingId,
    deps: &ServerDeps,
) -> ApiResult<StatusChange> {
    change_status(admin, listing_id, ListingStatus::Published, deps).await
}

pub async fn reject_listing(
    admin: &User,
    listing_id: ListingId,
    deps: &ServerDeps,
) -> ApiResult<StatusChange> {
    change_status(admin, listing_id, ListingStatus::Archived, deps).await
}

async fn change_status(
    admin: &User,
    listing_id: ListingId,
    status: ListingStatus,
    deps: &ServerDeps,
) -> ApiResult<StatusChange> {
    admin.actor().require_admin()?;
    let listing = Listing::set_status(listing_id, status, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Listing not found"))?;

    info!(listing_id = %listing_id, status = %status, admin_id = %admin.id, "Listing moderated");
    Ok(StatusChange {
        id: listing.id,
        status: listing.status,
    })
}

pub async fn set_featured(
    admin: &User,
    listing_id: ListingId,
    featured: bool,
    deps: &ServerDeps,
) -> ApiResult<FeaturedChange> {
    admin.actor().require_admin()?;
    let listing = Listing::set_featured(listing_id, featured, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Listing not found"))?;

    info!(listing_id = %listing_id, featured, admin_id = %admin.id, "Listing featured flag changed");
    Ok(FeaturedChange {
        id: listing.id,
        featured: listing.featured,
    })
}

pub async fn all_users(admin: &User, deps: &ServerDeps) -> ApiResult<Vec<UserSummary>> {
    admin.actor().require_admin()?;
    Ok(User::find_all(&deps.db_pool)
        .await?
        .into_iter()
        .map(UserSummary::from)
        .collect())
}

pub async fn all_inquiries(
    admin: &User,
    deps: &ServerDeps,
) -> ApiResult<Vec<InquiryWithListing>> {
    admin.actor().require_admin()?;
    Ok(Inquiry::find_all_with_listing(&deps.db_pool).await?)
}

pub async fn platform_stats(admin: &User, deps: &ServerDeps) -> ApiResult<PlatformStats> {
    admin.actor().require_admin()?;
    let pool = &deps.db_pool;

    let listing_counts = Listing::count_by_status(pool).await?;
    let user_counts = User::count_by_role(pool).await?;
    let total_inquiries = Inquiry::count(pool).await?;

    Ok(PlatformStats::from_counts(
        listing_counts,
        user_counts,
        total_inquiries,
    ))
}
