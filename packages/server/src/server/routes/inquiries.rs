use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::common::{ApiResult, InquiryId};
use crate::domains::inquiries::{
    actions, CreateInquiryRequest, Inquiry, InquiryWithListing, UpdateInquiryStatusRequest,
};
use crate::server::app::AppState;
use crate::server::extractors::CurrentUser;

pub fn inquiries_routes() -> Router {
    Router::new()
        .route("/", post(create))
        .route("/sent", get(sent))
        .route("/received", get(received))
        .route("/:id/status", put(update_status))
}

async fn create(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Json(request): Json<CreateInquiryRequest>,
) -> ApiResult<(StatusCode, Json<Inquiry>)> {
    let inquiry = actions::create_inquiry(&current.user, request, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(inquiry)))
}

async fn sent(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<Vec<Inquiry>>> {
    Ok(Json(actions::sent_inquiries(&current.user, &state.deps).await?))
}

async fn received(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<Vec<InquiryWithListing>>> {
    Ok(Json(
        actions::received_inquiries(&current.user, &state.deps).await?,
    ))
}

async fn update_status(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Path(id): Path<InquiryId>,
    Json(request): Json<UpdateInquiryStatusRequest>,
) -> ApiResult<Json<Inquiry>> {
    Ok(Json(
        actions::update_inquiry_status(&current.user, id, request, &state.deps).await?,
    ))
}
