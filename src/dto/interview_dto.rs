use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::interview::{
    FeedbackView, InterviewOverview, InterviewStatus, PanelMember, Recommendation,
};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInterviewRequest {
    pub application_id: Uuid,
    #[validate(range(min = 1, max = 50))]
    pub round_number: i32,
    pub interview_type: String,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub interviewer_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PanelMemberResponse {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<PanelMember> for PanelMemberResponse {
    fn from(member: PanelMember) -> Self {
        Self {
            user_id: member.user_id,
            name: member.full_name(),
            email: member.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInterviewResponse {
    pub interview_id: Uuid,
    pub application_id: Uuid,
    pub status: InterviewStatus,
    pub panel: Vec<PanelMemberResponse>,
    pub skipped_interviewer_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub comments: String,
    #[validate(length(min = 1))]
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub feedback_id: Uuid,
    pub interview_id: Uuid,
    pub round_number: i32,
    pub interviewer_user_id: Uuid,
    pub interviewer_name: String,
    pub rating: Option<i32>,
    pub comments: String,
    pub recommendation: Recommendation,
    pub submitted_at: DateTime<Utc>,
}

impl From<FeedbackView> for FeedbackResponse {
    fn from(feedback: FeedbackView) -> Self {
        Self {
            feedback_id: feedback.id,
            interview_id: feedback.interview_id,
            round_number: feedback.round_number,
            interviewer_user_id: feedback.interviewer_user_id,
            interviewer_name: feedback.interviewer_name,
            rating: feedback.rating,
            comments: feedback.comments,
            recommendation: feedback.recommendation,
            submitted_at: feedback.submitted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterviewDetailsResponse {
    pub interview_id: Uuid,
    pub application_id: Uuid,
    pub candidate_name: String,
    pub candidate_cv_path: Option<String>,
    pub job_title: String,
    pub round_number: i32,
    pub interview_type: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: InterviewStatus,
    pub panel_interviewer_names: Vec<String>,
    pub current_user_id: Uuid,
    pub submitted_feedback: Vec<FeedbackResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterviewerDashboardItem {
    pub interview_id: Uuid,
    pub application_id: Uuid,
    pub candidate_name: String,
    pub job_title: String,
    pub round_number: i32,
    pub interview_type: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: InterviewStatus,
}

impl From<InterviewOverview> for InterviewerDashboardItem {
    fn from(interview: InterviewOverview) -> Self {
        Self {
            interview_id: interview.id,
            application_id: interview.application_id,
            candidate_name: interview.candidate_name,
            job_title: interview.job_title,
            round_number: interview.round_number,
            interview_type: interview.interview_type,
            scheduled_at: interview.scheduled_at,
            status: interview.status,
        }
    }
}
