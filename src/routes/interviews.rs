use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::{
        common_dto::ApiResponse,
        interview_dto::{
            InterviewDetailsResponse, InterviewerDashboardItem, ScheduleInterviewRequest,
            ScheduleInterviewResponse, SubmitFeedbackRequest,
        },
    },
    error::Result,
    models::user::Principal,
    routes::extract::{ApiJson, ApiPath},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/interviews",
    request_body = ScheduleInterviewRequest,
    responses(
        (status = 201, description = "Interview scheduled", body = ScheduleInterviewResponse),
        (status = 400, description = "Missing type or interviewers"),
        (status = 404, description = "Application not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn schedule_interview(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(payload): ApiJson<ScheduleInterviewRequest>,
) -> Result<impl IntoResponse> {
    let scheduled = state.interview_service.schedule(&principal, payload).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(scheduled, "Interview scheduled successfully."),
    ))
}

#[utoipa::path(
    get,
    path = "/api/interviews/{id}",
    params(("id" = Uuid, Path, description = "Interview ID")),
    responses(
        (status = 200, description = "Interview details", body = InterviewDetailsResponse),
        (status = 403, description = "Caller is not on the panel"),
        (status = 404, description = "Interview not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn get_interview(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let details = state.interview_service.details(&principal, id).await?;
    Ok(ApiResponse::ok(details))
}

#[utoipa::path(
    post,
    path = "/api/interviews/{id}/feedback",
    params(("id" = Uuid, Path, description = "Interview ID")),
    request_body = SubmitFeedbackRequest,
    responses(
        (status = 201, description = "Feedback recorded"),
        (status = 400, description = "Already submitted or invalid recommendation"),
        (status = 403, description = "Caller is not on the panel"),
        (status = 404, description = "Interview not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn submit_feedback(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<SubmitFeedbackRequest>,
) -> Result<impl IntoResponse> {
    let feedback = state
        .interview_service
        .submit_feedback(&principal, id, payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(
            serde_json::json!({
                "feedbackId": feedback.id,
                "interviewId": feedback.interview_id,
                "recommendation": feedback.recommendation,
            }),
            "Feedback submitted successfully.",
        ),
    ))
}

#[utoipa::path(
    get,
    path = "/api/interviewer/assigned-interviews",
    responses((status = 200, description = "Interviews on the caller's panels", body = [InterviewerDashboardItem])),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn assigned_interviews(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let rows = state
        .interview_service
        .assigned_to_interviewer(&principal)
        .await?;
    let items: Vec<InterviewerDashboardItem> =
        rows.into_iter().map(InterviewerDashboardItem::from).collect();
    Ok(ApiResponse::ok(items))
}
