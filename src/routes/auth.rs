use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension,
};

use crate::{
    dto::{
        auth_dto::{LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, RegisterResponse},
        common_dto::ApiResponse,
    },
    error::Result,
    models::user::Principal,
    routes::extract::ApiJson,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Invalid payload, role or duplicate email")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let user_id = state.auth_service.register(payload).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(RegisterResponse { user_id }, "User registered successfully."),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse> {
    let response = state.auth_service.login(payload).await?;
    Ok(ApiResponse::with_message(response, "Login successful."))
}

#[utoipa::path(
    get,
    path = "/api/profile/me",
    responses(
        (status = 200, description = "Current user", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let profile = state.auth_service.profile(&principal).await?;
    Ok(ApiResponse::ok(profile))
}
