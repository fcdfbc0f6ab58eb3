use axum::{
    extract::{DefaultBodyLimit, Extension, Multipart, Path},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};

use crate::common::{ApiError, ApiResult, ListingId};
use crate::domains::auth::data::MessageResponse;
use crate::domains::files::actions;
use crate::domains::files::data::FileTypeRequest;
use crate::domains::files::{FileUploadResponse, SignedUrlResponse, UploadFile};
use crate::kernel::StorageObject;
use crate::server::app::AppState;
use crate::server::extractors::CurrentUser;
use crate::server::routes::multipart::UploadForm;

/// `body_limit` bounds the whole multipart request, not just the file
pub fn files_routes(body_limit: usize) -> Router {
    Router::new()
        .route(
            "/upload",
            post(upload).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/:listing_id/signed-url", post(signed_url))
        .route("/:listing_id/file", delete(delete_file))
        .route("/:listing_id", get(list_files))
}

async fn upload(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<FileUploadResponse>)> {
    let mut form = UploadForm::read(multipart).await?;
    let file = form.take_file()?;
    let listing_id = ListingId::parse(form.field("listing_id")?)
        .map_err(|_| ApiError::unprocessable("listing_id must be a valid UUID"))?;
    let file_type = form.field("file_type")?.to_string();

    let response = actions::upload_file(
        &current.user,
        UploadFile {
            listing_id,
            file_type,
            file_name: file.file_name,
            bytes: file.bytes,
        },
        &state.deps,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

async fn signed_url(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Path(listing_id): Path<ListingId>,
    Json(request): Json<FileTypeRequest>,
) -> ApiResult<Json<SignedUrlResponse>> {
    Ok(Json(
        actions::create_signed_url(&current.user, listing_id, &request.file_type, &state.deps)
            .await?,
    ))
}

async fn delete_file(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Path(listing_id): Path<ListingId>,
    Json(request): Json<FileTypeRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let message =
        actions::delete_file(&current.user, listing_id, &request.file_type, &state.deps).await?;
    Ok(Json(MessageResponse::new(message)))
}

async fn list_files(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Path(listing_id): Path<ListingId>,
) -> ApiResult<Json<Vec<StorageObject>>> {
    Ok(Json(
        actions::list_files(&current.user, listing_id, &state.deps).await?,
    ))
}
