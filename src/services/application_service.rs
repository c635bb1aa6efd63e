use std::sync::Arc;

use uuid::Uuid;

use crate::database::Store;
use crate::dto::{
    application_dto::{
        ApplicationDetailsResponse, ApplicationSummaryResponse, CommentResponse,
        InterviewSlotResponse, MyApplicationResponse,
    },
    interview_dto::FeedbackResponse,
};
use crate::error::{Error, Result};
use crate::models::{
    application::{
        Application, ApplicationComment, ApplicationFilter, ApplicationOverview,
        ApplicationStatus,
    },
    job::AssignmentKind,
    user::{Principal, Role},
};
use crate::services::{ensure_role, workflow::TransitionPolicy};
use crate::utils::time::now;

#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn Store>,
    policy: TransitionPolicy,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn Store>, policy: TransitionPolicy) -> Self {
        Self { store, policy }
    }

    pub async fn update_status(
        &self,
        principal: &Principal,
        application_id: Uuid,
        new_status: &str,
    ) -> Result<ApplicationStatus> {
        ensure_role(principal, &[Role::Recruiter, Role::Reviewer])?;
        let next: ApplicationStatus = new_status.parse().map_err(Error::BadRequest)?;

        let application = self.require_application(application_id).await?;
        self.ensure_can_review(principal, &application).await?;
        self.policy.check_status_update(application.status, next)?;

        self.store
            .update_application_status(application_id, next)
            .await?;
        tracing::info!(
            %application_id,
            from = %application.status,
            to = %next,
            actor = %principal.user_id,
            "application status updated"
        );
        Ok(next)
    }

    pub async fn details(
        &self,
        principal: &Principal,
        application_id: Uuid,
    ) -> Result<ApplicationDetailsResponse> {
        ensure_role(principal, &[Role::Recruiter, Role::Reviewer])?;
        let overview = self
            .store
            .find_application_overview(application_id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found.".to_string()))?;
        self.ensure_can_review_job(principal, overview.job_id).await?;

        let comments = self.store.list_comments(application_id).await?;
        let past_applications = self
            .store
            .list_applications(ApplicationFilter::Candidate(overview.candidate_id))
            .await?
            .into_iter()
            .filter(|a| a.id != application_id)
            .map(ApplicationSummaryResponse::from)
            .collect();
        let feedback = self
            .store
            .list_feedback_for_application(application_id)
            .await?;
        let latest_interview = self.store.find_latest_interview(application_id).await?;

        Ok(ApplicationDetailsResponse {
            application_id: overview.id,
            application_status: overview.status,
            applied_at: overview.applied_at,
            joining_date: overview.joining_date,
            candidate_id: overview.candidate_id,
            candidate_name: overview.candidate_name(),
            candidate_email: overview.candidate_email,
            candidate_cv_path: overview.candidate_cv_path,
            job_id: overview.job_id,
            job_title: overview.job_title,
            comments: comments.into_iter().map(CommentResponse::from).collect(),
            past_applications,
            submitted_feedback: feedback.into_iter().map(FeedbackResponse::from).collect(),
            latest_interview: latest_interview.map(InterviewSlotResponse::from),
            current_user_id: principal.user_id,
        })
    }

    pub async fn all(&self, principal: &Principal) -> Result<Vec<ApplicationOverview>> {
        ensure_role(principal, &[Role::Recruiter])?;
        self.store.list_applications(ApplicationFilter::All).await
    }

    pub async fn assigned_to_reviewer(
        &self,
        principal: &Principal,
    ) -> Result<Vec<ApplicationOverview>> {
        ensure_role(principal, &[Role::Reviewer])?;
        self.store
            .list_applications(ApplicationFilter::AssignedToReviewer(principal.user_id))
            .await
    }

    pub async fn my_applications(&self, principal: &Principal) -> Result<Vec<MyApplicationResponse>> {
        ensure_role(principal, &[Role::Candidate])?;
        let candidate = self
            .store
            .find_candidate_by_user(principal.user_id)
            .await?
            .ok_or_else(|| Error::NotFound("Candidate profile not found.".to_string()))?;

        let applications = self
            .store
            .list_applications(ApplicationFilter::Candidate(candidate.id))
            .await?;
        let mut items = Vec::with_capacity(applications.len());
        for application in applications {
            let next_step = self.store.find_latest_interview(application.id).await?;
            items.push(MyApplicationResponse {
                application_id: application.id,
                job_id: application.job_id,
                job_title: application.job_title,
                application_status: application.status,
                applied_at: application.applied_at,
                joining_date: application.joining_date,
                next_step: next_step.map(InterviewSlotResponse::from),
            });
        }
        Ok(items)
    }

    pub async fn add_comment(
        &self,
        principal: &Principal,
        application_id: Uuid,
        text: &str,
    ) -> Result<ApplicationComment> {
        ensure_role(principal, &[Role::Recruiter, Role::Reviewer])?;
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::BadRequest("Comment text is required.".to_string()));
        }
        let application = self.require_application(application_id).await?;
        self.ensure_can_review(principal, &application).await?;

        let comment = ApplicationComment {
            id: Uuid::new_v4(),
            application_id,
            user_id: principal.user_id,
            comment_text: text.to_string(),
            created_at: now(),
        };
        self.store.insert_comment(&comment).await?;
        Ok(comment)
    }

    async fn require_application(&self, application_id: Uuid) -> Result<Application> {
        self.store
            .find_application(application_id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found.".to_string()))
    }

    async fn ensure_can_review(&self, principal: &Principal, application: &Application) -> Result<()> {
        self.ensure_can_review_job(principal, application.job_id).await
    }

    /// Recruiters see every job; reviewers only jobs they are assigned to.
    async fn ensure_can_review_job(&self, principal: &Principal, job_id: Uuid) -> Result<()> {
        if principal.role == Role::Recruiter {
            return Ok(());
        }
        if principal.role == Role::Reviewer
            && self
                .store
                .assignment_exists(AssignmentKind::Reviewer, job_id, principal.user_id)
                .await?
        {
            return Ok(());
        }
        tracing::warn!(user_id = %principal.user_id, %job_id, "reviewer not assigned to job");
        Err(Error::Forbidden("forbidden".to_string()))
    }
}
