use axum::{
    extract::State,
    response::IntoResponse,
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::{
        application_dto::{ApplicationSummaryResponse, FinalizeSelectionRequest},
        common_dto::ApiResponse,
    },
    error::Result,
    models::user::Principal,
    routes::extract::{ApiJson, ApiPath},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/hr/dashboard",
    responses((status = 200, description = "Shortlisted, offered, hired and on-hold applications", body = [ApplicationSummaryResponse])),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let rows = state.document_service.hr_dashboard(&principal).await?;
    let items: Vec<ApplicationSummaryResponse> =
        rows.into_iter().map(ApplicationSummaryResponse::from).collect();
    Ok(ApiResponse::ok(items))
}

async fn set_verification(
    state: &AppState,
    principal: &Principal,
    id: Uuid,
    is_verified: bool,
) -> Result<ApiResponse<serde_json::Value>> {
    let status = state
        .document_service
        .verify(principal, id, is_verified)
        .await?;
    Ok(ApiResponse::with_message(
        serde_json::json!({ "documentId": id, "verificationStatus": status }),
        format!("Document marked as {}.", status),
    ))
}

#[utoipa::path(
    put,
    path = "/api/hr/documents/{id}/verify",
    params(("id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document verified"),
        (status = 404, description = "Document not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn verify_document(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    set_verification(&state, &principal, id, true).await
}

#[utoipa::path(
    put,
    path = "/api/hr/documents/{id}/reject",
    params(("id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document rejected"),
        (status = 404, description = "Document not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn reject_document(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    set_verification(&state, &principal, id, false).await
}

#[utoipa::path(
    put,
    path = "/api/hr/applications/{id}/select",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = FinalizeSelectionRequest,
    responses(
        (status = 200, description = "Candidate hired"),
        (status = 404, description = "Application not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn finalize_selection(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<FinalizeSelectionRequest>,
) -> Result<impl IntoResponse> {
    let application = state
        .document_service
        .finalize_selection(&principal, id, payload.joining_date)
        .await?;
    Ok(ApiResponse::with_message(
        serde_json::json!({
            "applicationId": application.id,
            "status": application.status,
            "joiningDate": application.joining_date,
        }),
        "Candidate selection finalized.",
    ))
}
