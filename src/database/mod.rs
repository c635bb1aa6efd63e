pub mod memory;
pub mod pool;
pub mod postgres;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    application::{
        Application, ApplicationComment, ApplicationFilter, ApplicationOverview,
        ApplicationStatus, CommentView,
    },
    candidate::Candidate,
    document::{CandidateDocument, DocumentView, VerificationStatus},
    interview::{
        FeedbackView, Interview, InterviewFeedback, InterviewOverview, PanelMember,
    },
    job::{AssignmentKind, Job, JobSkill, JobSkillView, JobStatus, Skill},
    user::{Role, User},
};

/// Persistence operations used by the services. Every multi-row write that
/// must be atomic is a single method here.
#[async_trait]
pub trait Store: Send + Sync {
    // Users
    async fn insert_user(&self, user: &User) -> Result<()>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>>;
    /// Case-insensitive lookup.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>>;

    // Candidates
    async fn insert_candidate_with_account(&self, user: &User, candidate: &Candidate)
        -> Result<()>;
    /// All pairs are written or none are.
    async fn insert_candidates_with_accounts(&self, pairs: &[(User, Candidate)]) -> Result<()>;
    async fn find_candidate(&self, id: Uuid) -> Result<Option<Candidate>>;
    async fn find_candidate_by_user(&self, user_id: Uuid) -> Result<Option<Candidate>>;
    async fn list_recent_candidates(&self, limit: i64) -> Result<Vec<Candidate>>;
    async fn update_candidate_cv(&self, candidate_id: Uuid, cv_path: &str) -> Result<()>;

    // Jobs and skills
    async fn insert_job(&self, job: &Job) -> Result<()>;
    async fn attach_job_skills(&self, skills: &[JobSkill]) -> Result<()>;
    async fn find_job(&self, id: Uuid) -> Result<Option<Job>>;
    async fn list_jobs_by_status(&self, status: JobStatus) -> Result<Vec<Job>>;
    async fn list_job_skills(&self, job_id: Uuid) -> Result<Vec<JobSkillView>>;
    async fn insert_skill(&self, skill: &Skill) -> Result<()>;
    async fn find_skill_by_name(&self, name: &str) -> Result<Option<Skill>>;
    async fn list_skills(&self) -> Result<Vec<Skill>>;
    async fn insert_assignment(&self, kind: AssignmentKind, job_id: Uuid, user_id: Uuid)
        -> Result<()>;
    async fn assignment_exists(&self, kind: AssignmentKind, job_id: Uuid, user_id: Uuid)
        -> Result<bool>;

    // Applications
    async fn insert_application(&self, application: &Application) -> Result<()>;
    async fn find_application(&self, id: Uuid) -> Result<Option<Application>>;
    async fn find_application_by_pair(&self, candidate_id: Uuid, job_id: Uuid)
        -> Result<Option<Application>>;
    async fn find_application_overview(&self, id: Uuid) -> Result<Option<ApplicationOverview>>;
    async fn list_applications(&self, filter: ApplicationFilter)
        -> Result<Vec<ApplicationOverview>>;
    async fn update_application_status(&self, id: Uuid, status: ApplicationStatus) -> Result<()>;
    /// Sets Hired together with the joining date.
    async fn finalize_application(&self, id: Uuid, joining_date: NaiveDate) -> Result<()>;
    async fn insert_comment(&self, comment: &ApplicationComment) -> Result<()>;
    /// Newest first.
    async fn list_comments(&self, application_id: Uuid) -> Result<Vec<CommentView>>;

    // Interviews
    async fn insert_interview(&self, interview: &Interview, panel: &[Uuid]) -> Result<()>;
    async fn find_interview(&self, id: Uuid) -> Result<Option<Interview>>;
    async fn find_interview_overview(&self, id: Uuid) -> Result<Option<InterviewOverview>>;
    async fn list_panel(&self, interview_id: Uuid) -> Result<Vec<PanelMember>>;
    async fn is_panelist(&self, interview_id: Uuid, user_id: Uuid) -> Result<bool>;
    /// The interview with the latest `scheduled_at` for an application.
    async fn find_latest_interview(&self, application_id: Uuid) -> Result<Option<Interview>>;
    /// Ordered by scheduled time.
    async fn list_interviews_for_panelist(&self, user_id: Uuid)
        -> Result<Vec<InterviewOverview>>;

    // Feedback
    async fn feedback_exists(&self, interview_id: Uuid, interviewer_user_id: Uuid)
        -> Result<bool>;
    /// Inserts the feedback, completes the interview and, when `cascade` is
    /// set, moves the application, all in one unit of work.
    async fn record_feedback(
        &self,
        feedback: &InterviewFeedback,
        cascade: Option<(Uuid, ApplicationStatus)>,
    ) -> Result<()>;
    /// Ordered by submission time.
    async fn list_feedback_for_interview(&self, interview_id: Uuid) -> Result<Vec<FeedbackView>>;
    /// Ordered by submission time.
    async fn list_feedback_for_application(&self, application_id: Uuid)
        -> Result<Vec<FeedbackView>>;

    // Documents
    async fn insert_document(&self, document: &CandidateDocument) -> Result<()>;
    async fn find_document(&self, id: Uuid) -> Result<Option<CandidateDocument>>;
    async fn set_document_verification(&self, id: Uuid, status: VerificationStatus)
        -> Result<()>;
    /// Ordered by upload time.
    async fn list_documents(&self, application_id: Uuid) -> Result<Vec<DocumentView>>;
}
