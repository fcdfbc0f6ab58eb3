use axum::{
    extract::{DefaultBodyLimit, Extension, Multipart, Path},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::common::{ApiError, ApiResult, UserId};
use crate::domains::users::actions::{self, MAX_AVATAR_BYTES};
use crate::domains::users::{PublicProfile, UpdateProfileRequest, User};
use crate::server::app::AppState;
use crate::server::extractors::CurrentUser;
use crate::server::routes::multipart::UploadForm;
use crate::server::routes::MULTIPART_OVERHEAD_BYTES;

pub fn users_routes() -> Router {
    Router::new()
        .route("/me", get(me).put(update_me))
        .route(
            "/me/avatar",
            post(upload_avatar)
                .delete(delete_avatar)
                .layer(DefaultBodyLimit::max(MAX_AVATAR_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        .route("/:user_id", get(public_profile))
}

async fn me(current: CurrentUser) -> Json<User> {
    Json(current.user)
}

async fn update_me(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Json(request): Json<UpdateProfileRequest>,
) -> ApiResult<Json<User>> {
    Ok(Json(
        actions::update_profile(&current.user, request, &state.deps).await?,
    ))
}

async fn upload_avatar(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    multipart: Multipart,
) -> ApiResult<Json<User>> {
    let mut form = UploadForm::read(multipart).await?;
    let file = form.take_file()?;
    let content_type = file
        .content_type
        .ok_or_else(|| ApiError::bad_request("File content type is required"))?;

    Ok(Json(
        actions::upload_avatar(&current.user, &content_type, file.bytes, &state.deps).await?,
    ))
}

async fn delete_avatar(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
) -> ApiResult<StatusCode> {
    actions::delete_avatar(&current.user, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn public_profile(
    Extension(state): Extension<AppState>,
    Path(user_id): Path<UserId>,
) -> ApiResult<Json<PublicProfile>> {
    Ok(Json(actions::get_public_profile(user_id, &state.deps).await?))
}
