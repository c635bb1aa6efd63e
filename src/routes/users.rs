use axum::{extract::State, response::IntoResponse, Extension};

use crate::{
    dto::{auth_dto::StaffMemberResponse, common_dto::ApiResponse},
    error::Result,
    models::{job::AssignmentKind, user::Principal},
    AppState,
};

async fn staff(state: &AppState, principal: &Principal, kind: AssignmentKind) -> Result<Vec<StaffMemberResponse>> {
    let users = state.catalog_service.available_staff(principal, kind).await?;
    Ok(users.into_iter().map(StaffMemberResponse::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/users/reviewers",
    responses((status = 200, description = "Users with the Reviewer role", body = [StaffMemberResponse])),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_reviewers(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let items = staff(&state, &principal, AssignmentKind::Reviewer).await?;
    Ok(ApiResponse::ok(items))
}

#[utoipa::path(
    get,
    path = "/api/users/interviewers",
    responses((status = 200, description = "Users with the Interviewer role", body = [StaffMemberResponse])),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_interviewers(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let items = staff(&state, &principal, AssignmentKind::Interviewer).await?;
    Ok(ApiResponse::ok(items))
}
