use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};

use crate::common::ApiResult;
use crate::domains::auth::actions;
use crate::domains::auth::data::{
    LoginRequest, MessageResponse, RegisterRequest, ResetPasswordRequest, TokenResponse,
    UpdatePasswordRequest,
};
use crate::domains::users::User;
use crate::server::app::AppState;
use crate::server::extractors::CurrentUser;
use crate::server::middleware::bearer_token;

pub fn auth_routes() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/verify-email", get(verify_email))
        .route("/reset-password", post(reset_password))
        .route("/update-password", post(update_password))
}

async fn register(
    Extension(state): Extension<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = actions::register(request, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(
    Extension(state): Extension<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    Ok(Json(actions::login(request, &state.deps).await?))
}

async fn logout(Extension(state): Extension<AppState>, headers: HeaderMap) -> StatusCode {
    actions::logout(bearer_token(&headers), &state.deps).await;
    StatusCode::NO_CONTENT
}

async fn me(current: CurrentUser) -> Json<User> {
    Json(current.user)
}

async fn verify_email() -> Json<MessageResponse> {
    Json(MessageResponse::new(
        "Email verification is handled by the authentication provider. Please check your inbox.",
    ))
}

async fn reset_password(
    Extension(state): Extension<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Json<MessageResponse> {
    Json(MessageResponse::new(
        actions::request_password_reset(&request.email, &state.deps).await,
    ))
}

async fn update_password(
    Extension(state): Extension<AppState>,
    current: CurrentUser,
    Json(request): Json<UpdatePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    actions::update_password(
        &current.user,
        &current.auth.access_token,
        &request.new_password,
        &state.deps,
    )
    .await?;
    Ok(Json(MessageResponse::new("Password updated successfully")))
}
