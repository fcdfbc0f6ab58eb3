use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::common::{ApiResult, ListingId};
use crate::domains::listings::actions;
use crate::domains::listings::data::FeaturedQuery;
use crate::domains::listings::{
    CreateListingRequest, ListListingsQuery, Listing, UpdateListingRequest,
};
use crate::server::app::AppState;
use crate::server::extractors::{CurrentUser, MaybeUser};

pub fn listings_routes() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/featured", get(featured))
        .route("/by-slug/:slug", get(by_slug))
        .route("/my-listings", get(my_listings))
        .route("/:id", get(by_id).put(update).delete(delete))
}

async fn create(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Json(request): Json<CreateListingRequest>,
) -> ApiResult<(StatusCode, Json<Listing>)> {
    let listing = actions::create_listing(&current.user, request, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

async fn list(
    Extension(state): Extension<AppState>,
    MaybeUser(viewer): MaybeUser,
    Query(query): Query<ListListingsQuery>,
) -> ApiResult<Json<Vec<Listing>>> {
    Ok(Json(
        actions::list_listings(viewer.as_ref(), query, &state.deps).await?,
    ))
}

async fn featured(
    Extension(state): Extension<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> ApiResult<Json<Vec<Listing>>> {
    Ok(Json(actions::get_featured(query, &state.deps).await?))
}

async fn by_slug(
    Extension(state): Extension<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Listing>> {
    Ok(Json(actions::get_published_by_slug(&slug, &state.deps).await?))
}

async fn my_listings(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<Vec<Listing>>> {
    Ok(Json(actions::my_listings(&current.user, &state.deps).await?))
}

async fn by_id(
    Extension(state): Extension<AppState>,
    Path(id): Path<ListingId>,
) -> ApiResult<Json<Listing>> {
    Ok(Json(actions::get_published_by_id(id, &state.deps).await?))
}

async fn update(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Path(id): Path<ListingId>,
    Json(request): Json<UpdateListingRequest>,
) -> ApiResult<Json<Listing>> {
    Ok(Json(
        actions::update_listing(&current.user, id, request, &state.deps).await?,
    ))
}

async fn delete(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Path(id): Path<ListingId>,
) -> ApiResult<StatusCode> {
    actions::delete_listing(&current.user, id, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
