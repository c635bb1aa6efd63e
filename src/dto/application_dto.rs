use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::interview_dto::FeedbackResponse;
use crate::models::application::{ApplicationOverview, ApplicationStatus, CommentView};
use crate::models::interview::{Interview, InterviewStatus};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1))]
    pub new_status: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    #[validate(length(max = 4000))]
    pub comment_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummaryResponse {
    pub application_id: Uuid,
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub candidate_email: String,
    pub job_id: Uuid,
    pub job_title: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub joining_date: Option<NaiveDate>,
}

impl From<ApplicationOverview> for ApplicationSummaryResponse {
    fn from(overview: ApplicationOverview) -> Self {
        Self {
            application_id: overview.id,
            candidate_id: overview.candidate_id,
            candidate_name: overview.candidate_name(),
            candidate_email: overview.candidate_email,
            job_id: overview.job_id,
            job_title: overview.job_title,
            status: overview.status,
            applied_at: overview.applied_at,
            joining_date: overview.joining_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub author_name: String,
    pub comment_text: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentView> for CommentResponse {
    fn from(comment: CommentView) -> Self {
        Self {
            id: comment.id,
            user_id: comment.user_id,
            author_name: comment.author_name,
            comment_text: comment.comment_text,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSlotResponse {
    pub interview_id: Uuid,
    pub interview_type: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: InterviewStatus,
}

impl From<Interview> for InterviewSlotResponse {
    fn from(interview: Interview) -> Self {
        Self {
            interview_id: interview.id,
            interview_type: interview.interview_type,
            scheduled_at: interview.scheduled_at,
            status: interview.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetailsResponse {
    pub application_id: Uuid,
    pub application_status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub joining_date: Option<NaiveDate>,
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_cv_path: Option<String>,
    pub job_id: Uuid,
    pub job_title: String,
    pub comments: Vec<CommentResponse>,
    pub past_applications: Vec<ApplicationSummaryResponse>,
    pub submitted_feedback: Vec<FeedbackResponse>,
    pub latest_interview: Option<InterviewSlotResponse>,
    pub current_user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MyApplicationResponse {
    pub application_id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub application_status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub joining_date: Option<NaiveDate>,
    pub next_step: Option<InterviewSlotResponse>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeSelectionRequest {
    pub joining_date: NaiveDate,
}
