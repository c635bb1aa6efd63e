use axum::{response::IntoResponse, Json};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::{
    dto::{
        application_dto::{
            AddCommentRequest, ApplicationDetailsResponse, ApplicationSummaryResponse,
            CommentResponse, FinalizeSelectionRequest, InterviewSlotResponse,
            MyApplicationResponse, UpdateStatusRequest,
        },
        auth_dto::{
            LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, RegisterResponse,
            StaffMemberResponse,
        },
        candidate_dto::{BulkUploadResponse, CandidateResponse},
        document_dto::DocumentResponse,
        interview_dto::{
            FeedbackResponse, InterviewDetailsResponse, InterviewerDashboardItem,
            PanelMemberResponse, ScheduleInterviewRequest, ScheduleInterviewResponse,
            SubmitFeedbackRequest,
        },
        job_dto::{
            ApplyRequest, AssignUserRequest, CreateJobRequest, CreateSkillRequest, JobResponse,
            SkillResponse,
        },
    },
    models::{
        application::ApplicationStatus,
        document::VerificationStatus,
        interview::{InterviewStatus, Recommendation},
        job::JobStatus,
        user::Role,
    },
    routes,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health,
        routes::auth::register,
        routes::auth::login,
        routes::auth::me,
        routes::jobs::list_jobs,
        routes::jobs::create_job,
        routes::jobs::get_job,
        routes::jobs::apply_to_job,
        routes::jobs::assign_reviewer,
        routes::jobs::assign_interviewer,
        routes::users::list_reviewers,
        routes::users::list_interviewers,
        routes::skills::list_skills,
        routes::skills::create_skill,
        routes::candidates::list_candidates,
        routes::candidates::create_candidate,
        routes::candidates::bulk_upload,
        routes::candidate_portal::me,
        routes::candidate_portal::open_jobs,
        routes::candidate_portal::my_applications,
        routes::candidate_portal::upload_cv,
        routes::applications::list_applications,
        routes::applications::get_application,
        routes::applications::add_comment,
        routes::applications::update_status,
        routes::applications::list_documents,
        routes::applications::upload_document,
        routes::applications::upload_offer_letter,
        routes::applications::reviewer_assigned,
        routes::interviews::schedule_interview,
        routes::interviews::get_interview,
        routes::interviews::submit_feedback,
        routes::interviews::assigned_interviews,
        routes::hr::dashboard,
        routes::hr::verify_document,
        routes::hr::reject_document,
        routes::hr::finalize_selection,
    ),
    components(schemas(
        Role,
        JobStatus,
        ApplicationStatus,
        InterviewStatus,
        Recommendation,
        VerificationStatus,
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        LoginResponse,
        ProfileResponse,
        StaffMemberResponse,
        CreateJobRequest,
        JobResponse,
        CreateSkillRequest,
        SkillResponse,
        ApplyRequest,
        AssignUserRequest,
        CandidateResponse,
        BulkUploadResponse,
        UpdateStatusRequest,
        AddCommentRequest,
        ApplicationSummaryResponse,
        CommentResponse,
        InterviewSlotResponse,
        ApplicationDetailsResponse,
        MyApplicationResponse,
        FinalizeSelectionRequest,
        ScheduleInterviewRequest,
        PanelMemberResponse,
        ScheduleInterviewResponse,
        SubmitFeedbackRequest,
        FeedbackResponse,
        InterviewDetailsResponse,
        InterviewerDashboardItem,
        DocumentResponse,
    )),
    modifiers(&SecurityAddon),
    tags((name = "recruitment-tracker", description = "Recruitment pipeline API"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
