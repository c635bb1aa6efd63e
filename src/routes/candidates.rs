use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Extension,
};

use crate::{
    dto::{
        candidate_dto::{BulkUploadResponse, CandidateResponse},
        common_dto::ApiResponse,
    },
    error::Result,
    models::user::Principal,
    routes::form::MultipartForm,
    services::candidate_service::NewCandidate,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/candidates",
    responses((status = 200, description = "The 20 most recently created candidates", body = [CandidateResponse])),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let candidates = state.candidate_service.recent(&principal).await?;
    let items: Vec<CandidateResponse> =
        candidates.into_iter().map(CandidateResponse::from).collect();
    Ok(ApiResponse::ok(items))
}

/// Multipart fields: `firstName`, `lastName`, `email`, optional `phone` and `cv`.
#[utoipa::path(
    post,
    path = "/api/candidates",
    responses(
        (status = 201, description = "Candidate and login account created", body = CandidateResponse),
        (status = 400, description = "Missing fields, bad file or email already registered")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut form = MultipartForm::read(multipart).await?;
    let input = NewCandidate {
        first_name: form.required_text("firstName")?.to_string(),
        last_name: form.required_text("lastName")?.to_string(),
        email: form.required_text("email")?.to_string(),
        phone: form.text("phone").map(str::to_string),
        cv: form.take_file("cv"),
    };
    let candidate = state.candidate_service.create(&principal, input).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(
            CandidateResponse::from(candidate),
            "Candidate created successfully.",
        ),
    ))
}

/// Multipart field `file`: an `.xlsx` or `.csv` roster.
#[utoipa::path(
    post,
    path = "/api/candidates/bulk-upload",
    responses(
        (status = 200, description = "Import counts", body = BulkUploadResponse),
        (status = 400, description = "Missing or unreadable file"),
        (status = 500, description = "Import rolled back")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn bulk_upload(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut form = MultipartForm::read(multipart).await?;
    let file = form.required_file("file")?;
    let summary = state
        .candidate_service
        .bulk_create(&principal, &file.filename, &file.data)
        .await?;
    let message = format!("{} candidates created successfully.", summary.created);
    Ok(ApiResponse::with_message(BulkUploadResponse::from(summary), message))
}
