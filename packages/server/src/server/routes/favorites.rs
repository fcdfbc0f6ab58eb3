use axum::{
    extract::{Extension, Path},
    routing::{get, post},
    Json, Router,
};

use crate::common::{ApiResult, ListingId};
use crate::domains::favorites::{actions, FavoriteResponse};
use crate::domains::listings::Listing;
use crate::server::app::AppState;
use crate::server::extractors::CurrentUser;

pub fn favorites_routes() -> Router {
    Router::new()
        .route("/", get(saved_ids))
        .route("/listings", get(saved_listings))
        .route("/:listing_id", post(save).delete(unsave))
}

async fn saved_ids(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<Vec<ListingId>>> {
    Ok(Json(
        actions::saved_listing_ids(&current.user, &state.deps).await?,
    ))
}

async fn saved_listings(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<Vec<Listing>>> {
    Ok(Json(actions::saved_listings(&current.user, &state.deps).await?))
}

async fn save(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Path(listing_id): Path<ListingId>,
) -> ApiResult<Json<FavoriteResponse>> {
    Ok(Json(
        actions::save_listing(&current.user, listing_id, &state.deps).await?,
    ))
}

async fn unsave(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Path(listing_id): Path<ListingId>,
) -> ApiResult<Json<FavoriteResponse>> {
    Ok(Json(
        actions::unsave_listing(&current.user, listing_id, &state.deps).await?,
    ))
}
