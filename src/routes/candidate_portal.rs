use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Extension,
};

use crate::{
    dto::{
        application_dto::MyApplicationResponse, candidate_dto::CandidateResponse,
        common_dto::ApiResponse, job_dto::JobResponse,
    },
    error::Result,
    models::user::{Principal, Role},
    routes::form::MultipartForm,
    services::ensure_role,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/candidate/me",
    responses((status = 200, description = "Own candidate profile", body = CandidateResponse)),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.my_profile(&principal).await?;
    Ok(ApiResponse::ok(CandidateResponse::from(candidate)))
}

#[utoipa::path(
    get,
    path = "/api/candidate/jobs",
    responses((status = 200, description = "Open jobs", body = [JobResponse])),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn open_jobs(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    ensure_role(&principal, &[Role::Candidate])?;
    let jobs = state.catalog_service.open_jobs(&principal).await?;
    let items: Vec<JobResponse> = jobs.into_iter().map(JobResponse::from).collect();
    Ok(ApiResponse::ok(items))
}

#[utoipa::path(
    get,
    path = "/api/candidate/my-applications",
    responses((status = 200, description = "Own applications with next step", body = [MyApplicationResponse])),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn my_applications(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let items = state
        .application_service
        .my_applications(&principal)
        .await?;
    Ok(ApiResponse::ok(items))
}

/// Multipart field `cv`.
#[utoipa::path(
    post,
    path = "/api/candidate/cv-upload",
    responses(
        (status = 200, description = "CV replaced", body = CandidateResponse),
        (status = 400, description = "Missing or invalid file")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn upload_cv(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut form = MultipartForm::read(multipart).await?;
    let file = form.required_file("cv")?;
    let candidate = state.candidate_service.update_cv(&principal, file).await?;
    Ok(ApiResponse::with_message(
        CandidateResponse::from(candidate),
        "CV uploaded successfully.",
    ))
}
