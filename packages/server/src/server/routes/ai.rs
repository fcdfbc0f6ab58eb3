use axum::{
    extract::{Extension, Path},
    routing::{get, post},
    Json, Router,
};

use crate::common::{ApiResult, ListingId};
use crate::domains::ai::{actions, AnalysisResponse, OnePagerResponse, PitchDeckResponse};
use crate::server::app::AppState;
use crate::server::extractors::CurrentUser;

pub fn ai_routes() -> Router {
    Router::new()
        .route("/listings/:id/analyze", post(analyze))
        .route("/listings/:id/analysis", get(analysis))
        .route("/listings/:id/generate-onepager", post(generate_one_pager))
        .route("/listings/:id/onepager", get(one_pager))
        .route("/listings/:id/generate-pitch-deck", post(generate_pitch_deck))
        .route("/listings/:id/pitch-deck", get(pitch_deck))
}

async fn analyze(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Path(id): Path<ListingId>,
) -> ApiResult<Json<AnalysisResponse>> {
    Ok(Json(
        actions::start_analysis(&current.user, id, &state.deps).await?,
    ))
}

// Reads only need a signed-in caller
async fn analysis(
    Extension(state): Extension<AppState>,
    _current: CurrentUser,
    Path(id): Path<ListingId>,
) -> ApiResult<Json<AnalysisResponse>> {
    Ok(Json(actions::get_analysis(id, &state.deps).await?))
}

async fn generate_one_pager(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Path(id): Path<ListingId>,
) -> ApiResult<Json<OnePagerResponse>> {
    Ok(Json(
        actions::generate_one_pager(&current.user, id, &state.deps).await?,
    ))
}

async fn one_pager(
    Extension(state): Extension<AppState>,
    _current: CurrentUser,
    Path(id): Path<ListingId>,
) -> ApiResult<Json<OnePagerResponse>> {
    Ok(Json(actions::get_one_pager(id, &state.deps).await?))
}

async fn generate_pitch_deck(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Path(id): Path<ListingId>,
) -> ApiResult<Json<PitchDeckResponse>> {
    Ok(Json(
        actions::generate_pitch_deck(&current.user, id, &state.deps).await?,
    ))
}

async fn pitch_deck(
    Extension(state): Extension<AppState>,
    _current: CurrentUser,
    Path(id): Path<ListingId>,
) -> ApiResult<Json<PitchDeckResponse>> {
    Ok(Json(actions::get_pitch_deck(id, &state.deps).await?))
}
