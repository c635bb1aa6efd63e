use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension,
};
use validator::Validate;

use crate::{
    dto::{
        common_dto::ApiResponse,
        job_dto::{CreateSkillRequest, SkillResponse},
    },
    error::Result,
    models::user::Principal,
    routes::extract::ApiJson,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/skills",
    responses((status = 200, description = "Skills ordered by name", body = [SkillResponse])),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_skills(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let skills = state.catalog_service.skills(&principal).await?;
    let items: Vec<SkillResponse> = skills.into_iter().map(SkillResponse::from).collect();
    Ok(ApiResponse::ok(items))
}

#[utoipa::path(
    post,
    path = "/api/skills",
    request_body = CreateSkillRequest,
    responses(
        (status = 201, description = "Skill created", body = SkillResponse),
        (status = 400, description = "Blank or duplicate name")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn create_skill(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(payload): ApiJson<CreateSkillRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let skill = state
        .catalog_service
        .create_skill(&principal, &payload.name)
        .await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(SkillResponse::from(skill), "Skill created successfully."),
    ))
}
