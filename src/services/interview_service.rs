use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::database::Store;
use crate::dto::interview_dto::{
    FeedbackResponse, InterviewDetailsResponse, PanelMemberResponse, ScheduleInterviewRequest,
    ScheduleInterviewResponse, SubmitFeedbackRequest,
};
use crate::error::{Error, Result};
use crate::models::{
    application::ApplicationStatus,
    interview::{Interview, InterviewFeedback, InterviewOverview, InterviewStatus, Recommendation},
    user::{Principal, Role},
};
use crate::services::{ensure_role, workflow::TransitionPolicy};
use crate::utils::time::now;

#[derive(Clone)]
pub struct InterviewService {
    store: Arc<dyn Store>,
    policy: TransitionPolicy,
}

impl InterviewService {
    pub fn new(store: Arc<dyn Store>, policy: TransitionPolicy) -> Self {
        Self { store, policy }
    }

    pub async fn schedule(
        &self,
        principal: &Principal,
        payload: ScheduleInterviewRequest,
    ) -> Result<ScheduleInterviewResponse> {
        ensure_role(principal, &[Role::Recruiter])?;
        payload.validate()?;
        let interview_type = payload.interview_type.trim();
        if interview_type.is_empty() {
            return Err(Error::BadRequest("Interview type is required.".to_string()));
        }
        if payload.interviewer_ids.is_empty() {
            return Err(Error::BadRequest(
                "At least one interviewer is required.".to_string(),
            ));
        }

        let application = self
            .store
            .find_application(payload.application_id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found.".to_string()))?;
        self.policy.check_schedule(application.status)?;

        let mut panel: Vec<Uuid> = Vec::new();
        let mut skipped: Vec<Uuid> = Vec::new();
        for user_id in payload.interviewer_ids {
            if panel.contains(&user_id) || skipped.contains(&user_id) {
                continue;
            }
            match self.store.find_user(user_id).await? {
                Some(user) if user.role == Role::Interviewer => panel.push(user_id),
                _ => {
                    tracing::warn!(%user_id, "skipping panel member that is not an interviewer");
                    skipped.push(user_id);
                }
            }
        }

        let interview = Interview {
            id: Uuid::new_v4(),
            application_id: application.id,
            round_number: payload.round_number,
            interview_type: interview_type.to_string(),
            scheduled_at: payload.scheduled_at,
            status: InterviewStatus::Scheduled,
            created_at: now(),
        };
        self.store.insert_interview(&interview, &panel).await?;

        if application.status == ApplicationStatus::Shortlisted {
            self.store
                .update_application_status(application.id, ApplicationStatus::Interview)
                .await?;
        }
        tracing::info!(
            interview_id = %interview.id,
            application_id = %application.id,
            panel = panel.len(),
            skipped = skipped.len(),
            "interview scheduled"
        );

        let panel = self.store.list_panel(interview.id).await?;
        Ok(ScheduleInterviewResponse {
            interview_id: interview.id,
            application_id: interview.application_id,
            status: interview.status,
            panel: panel.into_iter().map(PanelMemberResponse::from).collect(),
            skipped_interviewer_ids: skipped,
        })
    }

    pub async fn submit_feedback(
        &self,
        principal: &Principal,
        interview_id: Uuid,
        payload: SubmitFeedbackRequest,
    ) -> Result<InterviewFeedback> {
        ensure_role(principal, &[Role::Interviewer])?;
        payload.validate()?;
        let recommendation: Recommendation =
            payload.recommendation.parse().map_err(Error::BadRequest)?;

        let interview = self
            .store
            .find_interview(interview_id)
            .await?
            .ok_or_else(|| Error::NotFound("Interview not found.".to_string()))?;
        if !self.store.is_panelist(interview_id, principal.user_id).await? {
            return Err(Error::Forbidden(
                "You are not assigned to this interview.".to_string(),
            ));
        }
        if self
            .store
            .feedback_exists(interview_id, principal.user_id)
            .await?
        {
            return Err(Error::Duplicate(
                "Feedback already submitted for this interview.".to_string(),
            ));
        }

        let application = self
            .store
            .find_application(interview.application_id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found.".to_string()))?;
        let cascade = self
            .policy
            .cascade(application.status, recommendation.cascade_status())
            .map(|status| (application.id, status));

        let feedback = InterviewFeedback {
            id: Uuid::new_v4(),
            interview_id,
            interviewer_user_id: principal.user_id,
            rating: payload.rating,
            comments: payload.comments.trim().to_string(),
            recommendation,
            submitted_at: now(),
        };
        self.store.record_feedback(&feedback, cascade).await?;

        tracing::info!(
            %interview_id,
            interviewer = %principal.user_id,
            %recommendation,
            cascade = ?cascade.map(|(_, status)| status),
            "interview feedback recorded"
        );
        Ok(feedback)
    }

    pub async fn details(
        &self,
        principal: &Principal,
        interview_id: Uuid,
    ) -> Result<InterviewDetailsResponse> {
        ensure_role(principal, &[Role::Recruiter, Role::Interviewer])?;
        let overview = self
            .store
            .find_interview_overview(interview_id)
            .await?
            .ok_or_else(|| Error::NotFound("Interview not found.".to_string()))?;

        if principal.role != Role::Recruiter
            && !self.store.is_panelist(interview_id, principal.user_id).await?
        {
            tracing::warn!(
                user_id = %principal.user_id,
                %interview_id,
                "unauthorized attempt to view interview details"
            );
            return Err(Error::Forbidden("forbidden".to_string()));
        }

        let panel = self.store.list_panel(interview_id).await?;
        let feedback = self.store.list_feedback_for_interview(interview_id).await?;
        Ok(InterviewDetailsResponse {
            interview_id: overview.id,
            application_id: overview.application_id,
            candidate_name: overview.candidate_name,
            candidate_cv_path: overview.candidate_cv_path,
            job_title: overview.job_title,
            round_number: overview.round_number,
            interview_type: overview.interview_type,
            scheduled_at: overview.scheduled_at,
            status: overview.status,
            panel_interviewer_names: panel.iter().map(|m| m.full_name()).collect(),
            current_user_id: principal.user_id,
            submitted_feedback: feedback.into_iter().map(FeedbackResponse::from).collect(),
        })
    }

    pub async fn assigned_to_interviewer(
        &self,
        principal: &Principal,
    ) -> Result<Vec<InterviewOverview>> {
        ensure_role(principal, &[Role::Interviewer])?;
        self.store
            .list_interviews_for_panelist(principal.user_id)
            .await
    }
}
