use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        application_dto::{
            AddCommentRequest, ApplicationDetailsResponse, ApplicationSummaryResponse,
            UpdateStatusRequest,
        },
        common_dto::ApiResponse,
        document_dto::DocumentResponse,
    },
    error::Result,
    models::user::Principal,
    routes::form::MultipartForm,
    routes::extract::{ApiJson, ApiPath},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/applications",
    responses((status = 200, description = "Every application", body = [ApplicationSummaryResponse])),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let rows = state.application_service.all(&principal).await?;
    let items: Vec<ApplicationSummaryResponse> =
        rows.into_iter().map(ApplicationSummaryResponse::from).collect();
    Ok(ApiResponse::ok(items))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application details", body = ApplicationDetailsResponse),
        (status = 403, description = "Reviewer not assigned to the job"),
        (status = 404, description = "Application not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let details = state.application_service.details(&principal, id).await?;
    Ok(ApiResponse::ok(details))
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/comments",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = AddCommentRequest,
    responses(
        (status = 201, description = "Comment added"),
        (status = 400, description = "Blank comment"),
        (status = 403, description = "Reviewer not assigned to the job")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<AddCommentRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let comment = state
        .application_service
        .add_comment(&principal, id, &payload.comment_text)
        .await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(
            serde_json::json!({ "commentId": comment.id, "createdAt": comment.created_at }),
            "Comment added successfully.",
        ),
    ))
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}/status",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Unknown status or illegal transition"),
        (status = 403, description = "Reviewer not assigned to the job"),
        (status = 404, description = "Application not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateStatusRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let status = state
        .application_service
        .update_status(&principal, id, &payload.new_status)
        .await?;
    Ok(ApiResponse::with_message(
        serde_json::json!({ "applicationId": id, "status": status }),
        "Application status updated successfully.",
    ))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}/documents",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Documents ordered by upload time", body = [DocumentResponse]),
        (status = 403, description = "Candidate does not own the application")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn list_documents(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let documents = state
        .document_service
        .list_for_application(&principal, id)
        .await?;
    let items: Vec<DocumentResponse> = documents.into_iter().map(DocumentResponse::from).collect();
    Ok(ApiResponse::ok(items))
}

/// Multipart fields: `documentType` and `file`.
#[utoipa::path(
    post,
    path = "/api/applications/{id}/documents",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 201, description = "Document stored as Pending", body = DocumentResponse),
        (status = 400, description = "Missing type or invalid file"),
        (status = 403, description = "Candidate does not own the application")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn upload_document(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut form = MultipartForm::read(multipart).await?;
    let document_type = form.required_text("documentType")?.to_string();
    let file = form.required_file("file")?;
    let document = state
        .document_service
        .upload(&principal, id, &document_type, file)
        .await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(
            DocumentResponse::from(document),
            "Document uploaded successfully.",
        ),
    ))
}

/// Multipart field `file`.
#[utoipa::path(
    post,
    path = "/api/applications/{id}/documents/offer-letter",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 201, description = "Offer letter stored", body = DocumentResponse),
        (status = 404, description = "Application not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn upload_offer_letter(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut form = MultipartForm::read(multipart).await?;
    let file = form.required_file("file")?;
    let document = state
        .document_service
        .upload_offer_letter(&principal, id, file)
        .await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(
            DocumentResponse::from(document),
            "Offer letter uploaded successfully.",
        ),
    ))
}

#[utoipa::path(
    get,
    path = "/api/reviewer/assigned-applications",
    responses((status = 200, description = "Applications on jobs assigned to the reviewer", body = [ApplicationSummaryResponse])),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn reviewer_assigned(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let rows = state
        .application_service
        .assigned_to_reviewer(&principal)
        .await?;
    let items: Vec<ApplicationSummaryResponse> =
        rows.into_iter().map(ApplicationSummaryResponse::from).collect();
    Ok(ApiResponse::ok(items))
}
