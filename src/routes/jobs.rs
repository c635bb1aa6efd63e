use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        common_dto::ApiResponse,
        job_dto::{ApplyRequest, AssignUserRequest, CreateJobRequest, JobResponse},
    },
    error::Result,
    models::{
        job::AssignmentKind,
        user::{Principal, Role},
    },
    routes::extract::{ApiJson, ApiPath},
    services::ensure_role,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    responses(
        (status = 200, description = "Open jobs", body = [JobResponse]),
        (status = 403, description = "Caller is not a recruiter")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    ensure_role(&principal, &[Role::Recruiter])?;
    let jobs = state.catalog_service.open_jobs(&principal).await?;
    let items: Vec<JobResponse> = jobs.into_iter().map(JobResponse::from).collect();
    Ok(ApiResponse::ok(items))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created", body = JobResponse),
        (status = 400, description = "Invalid payload or unknown skill"),
        (status = 403, description = "Caller is not a recruiter")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(payload): ApiJson<CreateJobRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.catalog_service.create_job(&principal, payload).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(job, "Job created successfully."),
    ))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job with skills", body = JobResponse),
        (status = 404, description = "Job not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.catalog_service.get_job(&principal, id).await?;
    Ok(ApiResponse::ok(job))
}

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/apply",
    params(("id" = Uuid, Path, description = "Job ID")),
    request_body = ApplyRequest,
    responses(
        (status = 201, description = "Candidate linked to job"),
        (status = 400, description = "Candidate already applied"),
        (status = 404, description = "Job or candidate not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn apply_to_job(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<ApplyRequest>,
) -> Result<impl IntoResponse> {
    let application = state
        .catalog_service
        .link_candidate(&principal, id, payload.candidate_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(
            serde_json::json!({
                "applicationId": application.id,
                "status": application.status,
            }),
            "Candidate successfully linked to job.",
        ),
    ))
}

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/reviewers",
    params(("id" = Uuid, Path, description = "Job ID")),
    request_body = AssignUserRequest,
    responses(
        (status = 200, description = "Reviewer assigned"),
        (status = 400, description = "User is not a reviewer or already assigned"),
        (status = 404, description = "Job or user not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn assign_reviewer(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<AssignUserRequest>,
) -> Result<impl IntoResponse> {
    state
        .catalog_service
        .assign_staff(&principal, AssignmentKind::Reviewer, id, payload.user_id)
        .await?;
    Ok(ApiResponse::message("Reviewer assigned successfully."))
}

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/interviewers",
    params(("id" = Uuid, Path, description = "Job ID")),
    request_body = AssignUserRequest,
    responses(
        (status = 200, description = "Interviewer assigned"),
        (status = 400, description = "User is not an interviewer or already assigned"),
        (status = 404, description = "Job or user not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn assign_interviewer(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<AssignUserRequest>,
) -> Result<impl IntoResponse> {
    state
        .catalog_service
        .assign_staff(&principal, AssignmentKind::Interviewer, id, payload.user_id)
        .await?;
    Ok(ApiResponse::message("Interviewer assigned successfully."))
}
