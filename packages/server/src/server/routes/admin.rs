use axum::{
    extract::{Extension, Path, Query},
    routing::{get, put},
    Json, Router,
};

use crate::common::{ApiResult, ListingId};
use crate::domains::admin::{
    actions, AdminListingsQuery, FeatureQuery, FeaturedChange, PlatformStats, StatusChange,
};
use crate::domains::inquiries::InquiryWithListing;
use crate::domains::listings::Listing;
use crate::domains::users::UserSummary;
use crate::server::app::AppState;
use crate::server::extractors::CurrentUser;

pub fn admin_routes() -> Router {
    Router::new()
        .route("/listings", get(listings))
        .route("/listings/:id/approve", put(approve))
        .route("/listings/:id/reject", put(reject))
        .route("/listings/:id/feature", put(feature))
        .route("/users", get(users))
        .route("/inquiries", get(inquiries))
        .route("/stats", get(stats))
}

async fn listings(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Query(query): Query<AdminListingsQuery>,
) -> ApiResult<Json<Vec<Listing>>> {
    Ok(Json(
        actions::all_listings(&current.user, query, &state.deps).await?,
    ))
}

async fn approve(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Path(id): Path<ListingId>,
) -> ApiResult<Json<StatusChange>> {
    Ok(Json(
        actions::approve_listing(&current.user, id, &state.deps).await?,
    ))
}

async fn reject(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Path(id): Path<ListingId>,
) -> ApiResult<Json<StatusChange>> {
    Ok(Json(
        actions::reject_listing(&current.user, id, &state.deps).await?,
    ))
}

async fn feature(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Path(id): Path<ListingId>,
    Query(query): Query<FeatureQuery>,
) -> ApiResult<Json<FeaturedChange>> {
    Ok(Json(
        actions::set_featured(&current.user, id, query.featured, &state.deps).await?,
    ))
}

async fn users(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<Vec<UserSummary>>> {
    Ok(Json(actions::all_users(&current.user, &state.deps).await?))
}

async fn inquiries(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<Vec<InquiryWithListing>>> {
    Ok(Json(actions::all_inquiries(&current.user, &state.deps).await?))
}

async fn stats(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<PlatformStats>> {
    Ok(Json(actions::platform_stats(&current.user, &state.deps).await?))
}
