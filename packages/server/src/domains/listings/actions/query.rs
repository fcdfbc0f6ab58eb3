use tracing::debug;

use crate::common::{ApiError, ApiResult, ListingId, PageArgs, UserRole};
use crate::domains::listings::data::{FeaturedQuery, ListListingsQuery};
use crate::domains::listings::models::{Listing, ListingFilter, ListingStatus};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

pub async fn get_featured(query: FeaturedQuery, deps: &ServerDeps) -> ApiResult<Vec<Listing>> {
    let page = PageArgs {
        limit: query.limit,
        offset: None,
    }
    .validate(6, 12)?;

    Ok(Listing::find_featured(page.limit, &deps.db_pool).await?)
}

/// Published listing by id; counts a view.
pub async fn get_published_by_id(listing_id: ListingId, deps: &ServerDeps) -> ApiResult<Listing> {
    Listing::record_view_by_id(listing_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Listing not found"))
}

/// Published listing by slug; counts a view.
pub async fn get_published_by_slug(slug: &str, deps: &ServerDeps) -> ApiResult<Listing> {
    Listing::record_view_by_slug(slug, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Listing not found"))
}

/// Catalogue page. Anyone may list `published`; other statuses are admin-only.
pub async fn list_listings(
    viewer: Option<&User>,
    query: ListListingsQuery,
    deps: &ServerDeps,
) -> ApiResult<Vec<Listing>> {
    let page = PageArgs {
        limit: query.limit,
        offset: query.offset,
    }
    .validate(50, 100)?;

    let filter = build_filter(&query)?;
    if filter.status != Some(ListingStatus::Published) {
        let is_admin = viewer.map(|u| u.actor().is_admin()).unwrap_or(false);
        if !is_admin {
            return Err(ApiError::forbidden(
                "Only admins can list unpublished listings",
            ));
        }
    }

    debug!(?filter, limit = page.limit, offset = page.offset, "Listing search");
    Ok(Listing::search(&filter, page.limit, page.offset, &deps.db_pool).await?)
}

pub async fn my_listings(user: &User, deps: &ServerDeps) -> ApiResult<Vec<Listing>> {
    user.actor()
        .require_role(UserRole::Creator, "Only creators have listings")?;
    Ok(Listing::find_by_creator(user.id, &deps.db_pool).await?)
}

fn build_filter(query: &ListListingsQuery) -> ApiResult<ListingFilter> {
    let status = query
        .status
        .as_deref()
        .unwrap_or("published")
        .parse::<ListingStatus>()
        .map_err(|_| {
            ApiError::unprocessable("status must be one of: draft, pending, published, archived")
        })?;
    let sort = query
        .sort_by
        .as_deref()
        .unwrap_or("created_at")
        .parse()
        .map_err(|_| {
            ApiError::unprocessable(
                "sort_by must be one of: created_at, view_count, save_count, title",
            )
        })?;
    let order = query
        .order
        .as_deref()
        .unwrap_or("desc")
        .parse()
        .map_err(|_| ApiError::unprocessable("order must be one of: asc, desc"))?;

    Ok(ListingFilter {
        status: Some(status),
        genre: query.genre.clone().filter(|g| !g.is_empty()),
        tier: query.tier.clone().filter(|t| !t.is_empty()),
        search: query.search.clone(),
        sort,
        order,
    })
}
