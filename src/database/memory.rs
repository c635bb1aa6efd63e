use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::database::Store;
use crate::error::{Error, Result};
use crate::models::{
    application::{
        Application, ApplicationComment, ApplicationFilter, ApplicationOverview,
        ApplicationStatus, CommentView,
    },
    candidate::Candidate,
    document::{CandidateDocument, DocumentView, VerificationStatus},
    interview::{
        FeedbackView, Interview, InterviewFeedback, InterviewOverview, InterviewStatus,
        PanelMember,
    },
    job::{AssignmentKind, Job, JobSkill, JobSkillView, JobStatus, Skill},
    user::{Role, User},
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    candidates: Vec<Candidate>,
    jobs: Vec<Job>,
    skills: Vec<Skill>,
    job_skills: Vec<JobSkill>,
    assignments: Vec<(AssignmentKind, Uuid, Uuid)>,
    applications: Vec<Application>,
    comments: Vec<ApplicationComment>,
    interviews: Vec<Interview>,
    panel: Vec<(Uuid, Uuid)>,
    feedback: Vec<InterviewFeedback>,
    documents: Vec<CandidateDocument>,
    failing_account_emails: HashSet<String>,
}

impl Tables {
    fn user_name(&self, id: Uuid) -> String {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(User::full_name)
            .unwrap_or_default()
    }

    fn email_taken(&self, email: &str) -> bool {
        self.users.iter().any(|u| u.email.eq_ignore_ascii_case(email))
    }

    fn check_account(&self, user: &User) -> Result<()> {
        let email = user.email.to_lowercase();
        if self.failing_account_emails.contains(&email) {
            return Err(Error::Internal(format!(
                "injected account failure for {}",
                user.email
            )));
        }
        if self.email_taken(&user.email) {
            return Err(Error::Duplicate(
                "A user with this email already exists.".to_string(),
            ));
        }
        Ok(())
    }

    fn overview(&self, application: &Application) -> Option<ApplicationOverview> {
        let candidate = self
            .candidates
            .iter()
            .find(|c| c.id == application.candidate_id)?;
        let job = self.jobs.iter().find(|j| j.id == application.job_id)?;
        Some(ApplicationOverview {
            id: application.id,
            candidate_id: candidate.id,
            candidate_user_id: candidate.user_id,
            candidate_first_name: candidate.first_name.clone(),
            candidate_last_name: candidate.last_name.clone(),
            candidate_email: candidate.email.clone(),
            candidate_cv_path: candidate.cv_path.clone(),
            job_id: job.id,
            job_title: job.title.clone(),
            status: application.status,
            applied_at: application.applied_at,
            joining_date: application.joining_date,
        })
    }

    fn interview_overview(&self, interview: &Interview) -> Option<InterviewOverview> {
        let application = self
            .applications
            .iter()
            .find(|a| a.id == interview.application_id)?;
        let overview = self.overview(application)?;
        Some(InterviewOverview {
            id: interview.id,
            application_id: interview.application_id,
            round_number: interview.round_number,
            interview_type: interview.interview_type.clone(),
            scheduled_at: interview.scheduled_at,
            status: interview.status,
            candidate_name: overview.candidate_name(),
            candidate_cv_path: overview.candidate_cv_path,
            job_title: overview.job_title,
        })
    }

    fn feedback_view(&self, feedback: &InterviewFeedback) -> FeedbackView {
        let round_number = self
            .interviews
            .iter()
            .find(|i| i.id == feedback.interview_id)
            .map(|i| i.round_number)
            .unwrap_or_default();
        FeedbackView {
            id: feedback.id,
            interview_id: feedback.interview_id,
            round_number,
            interviewer_user_id: feedback.interviewer_user_id,
            interviewer_name: self.user_name(feedback.interviewer_user_id),
            rating: feedback.rating,
            comments: feedback.comments.clone(),
            recommendation: feedback.recommendation,
            submitted_at: feedback.submitted_at,
        }
    }

    fn application_mut(&mut self, id: Uuid) -> Result<&mut Application> {
        self.applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::NotFound("Application not found.".to_string()))
    }
}

/// In-process `Store` used by the test-suite and by `DATABASE_URL=memory://`.
/// Listings with equal timestamps order later insertions as newer.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later attempt to create an account for `email` fail,
    /// so callers can observe rollback behaviour.
    pub fn fail_account_creation_for(&self, email: &str) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.failing_account_emails.insert(email.to_lowercase());
        }
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().map(|t| t.users.len()).unwrap_or_default()
    }

    pub fn candidate_count(&self) -> usize {
        self.tables
            .lock()
            .map(|t| t.candidates.len())
            .unwrap_or_default()
    }

    pub fn application_count(&self) -> usize {
        self.tables
            .lock()
            .map(|t| t.applications.len())
            .unwrap_or_default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| Error::Internal("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<()> {
        let mut tables = self.tables()?;
        tables.check_account(user)?;
        tables.users.push(user.clone());
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.tables()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.trim();
        Ok(self
            .tables()?
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>> {
        let mut users: Vec<User> = self
            .tables()?
            .users
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect();
        users.sort_by(|a, b| {
            (a.first_name.as_str(), a.last_name.as_str())
                .cmp(&(b.first_name.as_str(), b.last_name.as_str()))
        });
        Ok(users)
    }

    async fn insert_candidate_with_account(
        &self,
        user: &User,
        candidate: &Candidate,
    ) -> Result<()> {
        let mut tables = self.tables()?;
        tables.check_account(user)?;
        tables.users.push(user.clone());
        tables.candidates.push(candidate.clone());
        Ok(())
    }

    async fn insert_candidates_with_accounts(&self, pairs: &[(User, Candidate)]) -> Result<()> {
        let mut tables = self.tables()?;
        let mut batch_emails = HashSet::new();
        for (user, _) in pairs {
            tables.check_account(user)?;
            if !batch_emails.insert(user.email.to_lowercase()) {
                return Err(Error::Duplicate(
                    "A user with this email already exists.".to_string(),
                ));
            }
        }
        for (user, candidate) in pairs {
            tables.users.push(user.clone());
            tables.candidates.push(candidate.clone());
        }
        Ok(())
    }

    async fn find_candidate(&self, id: Uuid) -> Result<Option<Candidate>> {
        Ok(self.tables()?.candidates.iter().find(|c| c.id == id).cloned())
    }

    async fn find_candidate_by_user(&self, user_id: Uuid) -> Result<Option<Candidate>> {
        Ok(self
            .tables()?
            .candidates
            .iter()
            .find(|c| c.user_id == Some(user_id))
            .cloned())
    }

    async fn list_recent_candidates(&self, limit: i64) -> Result<Vec<Candidate>> {
        let mut candidates: Vec<Candidate> =
            self.tables()?.candidates.iter().rev().cloned().collect();
        candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        candidates.truncate(usize::try_from(limit).unwrap_or_default());
        Ok(candidates)
    }

    async fn update_candidate_cv(&self, candidate_id: Uuid, cv_path: &str) -> Result<()> {
        let mut tables = self.tables()?;
        let candidate = tables
            .candidates
            .iter_mut()
            .find(|c| c.id == candidate_id)
            .ok_or_else(|| Error::NotFound("Candidate not found.".to_string()))?;
        candidate.cv_path = Some(cv_path.to_string());
        Ok(())
    }

    async fn insert_job(&self, job: &Job) -> Result<()> {
        self.tables()?.jobs.push(job.clone());
        Ok(())
    }

    async fn attach_job_skills(&self, skills: &[JobSkill]) -> Result<()> {
        let mut tables = self.tables()?;
        for skill in skills {
            let exists = tables
                .job_skills
                .iter()
                .any(|js| js.job_id == skill.job_id && js.skill_id == skill.skill_id);
            if !exists {
                tables.job_skills.push(skill.clone());
            }
        }
        Ok(())
    }

    async fn find_job(&self, id: Uuid) -> Result<Option<Job>> {
        Ok(self.tables()?.jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn list_jobs_by_status(&self, status: JobStatus) -> Result<Vec<Job>> {
        let mut jobs: Vec<Job> = self
            .tables()?
            .jobs
            .iter()
            .rev()
            .filter(|j| j.status == status)
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }

    async fn list_job_skills(&self, job_id: Uuid) -> Result<Vec<JobSkillView>> {
        let tables = self.tables()?;
        let mut skills: Vec<JobSkillView> = tables
            .job_skills
            .iter()
            .filter(|js| js.job_id == job_id)
            .filter_map(|js| {
                let skill = tables.skills.iter().find(|s| s.id == js.skill_id)?;
                Some(JobSkillView {
                    skill_id: skill.id,
                    name: skill.name.clone(),
                    is_required: js.is_required,
                })
            })
            .collect();
        skills.sort_by(|a, b| b.is_required.cmp(&a.is_required).then(a.name.cmp(&b.name)));
        Ok(skills)
    }

    async fn insert_skill(&self, skill: &Skill) -> Result<()> {
        let mut tables = self.tables()?;
        if tables
            .skills
            .iter()
            .any(|s| s.name.eq_ignore_ascii_case(skill.name.trim()))
        {
            return Err(Error::Duplicate("This skill already exists.".to_string()));
        }
        tables.skills.push(skill.clone());
        Ok(())
    }

    async fn find_skill_by_name(&self, name: &str) -> Result<Option<Skill>> {
        let name = name.trim();
        Ok(self
            .tables()?
            .skills
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn list_skills(&self) -> Result<Vec<Skill>> {
        let mut skills = self.tables()?.skills.clone();
        skills.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(skills)
    }

    async fn insert_assignment(
        &self,
        kind: AssignmentKind,
        job_id: Uuid,
        user_id: Uuid,
    ) -> Result<()> {
        let mut tables = self.tables()?;
        let row = (kind, job_id, user_id);
        if tables.assignments.contains(&row) {
            return Err(Error::Duplicate(
                "This user is already assigned to the job.".to_string(),
            ));
        }
        tables.assignments.push(row);
        Ok(())
    }

    async fn assignment_exists(
        &self,
        kind: AssignmentKind,
        job_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool> {
        Ok(self.tables()?.assignments.contains(&(kind, job_id, user_id)))
    }

    async fn insert_application(&self, application: &Application) -> Result<()> {
        let mut tables = self.tables()?;
        if tables.applications.iter().any(|a| {
            a.candidate_id == application.candidate_id && a.job_id == application.job_id
        }) {
            return Err(Error::Duplicate(
                "This candidate has already applied to this job.".to_string(),
            ));
        }
        tables.applications.push(application.clone());
        Ok(())
    }

    async fn find_application(&self, id: Uuid) -> Result<Option<Application>> {
        Ok(self
            .tables()?
            .applications
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_application_by_pair(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<Application>> {
        Ok(self
            .tables()?
            .applications
            .iter()
            .find(|a| a.candidate_id == candidate_id && a.job_id == job_id)
            .cloned())
    }

    async fn find_application_overview(&self, id: Uuid) -> Result<Option<ApplicationOverview>> {
        let tables = self.tables()?;
        Ok(tables
            .applications
            .iter()
            .find(|a| a.id == id)
            .and_then(|a| tables.overview(a)))
    }

    async fn list_applications(
        &self,
        filter: ApplicationFilter,
    ) -> Result<Vec<ApplicationOverview>> {
        let tables = self.tables()?;
        let mut rows: Vec<ApplicationOverview> = tables
            .applications
            .iter()
            .rev()
            .filter(|a| match &filter {
                ApplicationFilter::All => true,
                ApplicationFilter::AssignedToReviewer(user_id) => tables
                    .assignments
                    .contains(&(AssignmentKind::Reviewer, a.job_id, *user_id)),
                ApplicationFilter::Candidate(candidate_id) => a.candidate_id == *candidate_id,
                ApplicationFilter::Statuses(statuses) => statuses.contains(&a.status),
            })
            .filter_map(|a| tables.overview(a))
            .collect();
        rows.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
        Ok(rows)
    }

    async fn update_application_status(&self, id: Uuid, status: ApplicationStatus) -> Result<()> {
        self.tables()?.application_mut(id)?.status = status;
        Ok(())
    }

    async fn finalize_application(&self, id: Uuid, joining_date: NaiveDate) -> Result<()> {
        let mut tables = self.tables()?;
        let application = tables.application_mut(id)?;
        application.status = ApplicationStatus::Hired;
        application.joining_date = Some(joining_date);
        Ok(())
    }

    async fn insert_comment(&self, comment: &ApplicationComment) -> Result<()> {
        self.tables()?.comments.push(comment.clone());
        Ok(())
    }

    async fn list_comments(&self, application_id: Uuid) -> Result<Vec<CommentView>> {
        let tables = self.tables()?;
        let mut comments: Vec<CommentView> = tables
            .comments
            .iter()
            .rev()
            .filter(|c| c.application_id == application_id)
            .map(|c| CommentView {
                id: c.id,
                user_id: c.user_id,
                author_name: tables.user_name(c.user_id),
                comment_text: c.comment_text.clone(),
                created_at: c.created_at,
            })
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    async fn insert_interview(&self, interview: &Interview, panel: &[Uuid]) -> Result<()> {
        let mut tables = self.tables()?;
        tables.interviews.push(interview.clone());
        for user_id in panel {
            let row = (interview.id, *user_id);
            if !tables.panel.contains(&row) {
                tables.panel.push(row);
            }
        }
        Ok(())
    }

    async fn find_interview(&self, id: Uuid) -> Result<Option<Interview>> {
        Ok(self.tables()?.interviews.iter().find(|i| i.id == id).cloned())
    }

    async fn find_interview_overview(&self, id: Uuid) -> Result<Option<InterviewOverview>> {
        let tables = self.tables()?;
        Ok(tables
            .interviews
            .iter()
            .find(|i| i.id == id)
            .and_then(|i| tables.interview_overview(i)))
    }

    async fn list_panel(&self, interview_id: Uuid) -> Result<Vec<PanelMember>> {
        let tables = self.tables()?;
        let mut panel: Vec<PanelMember> = tables
            .panel
            .iter()
            .filter(|(iid, _)| *iid == interview_id)
            .filter_map(|(_, uid)| tables.users.iter().find(|u| u.id == *uid))
            .map(|u| PanelMember {
                user_id: u.id,
                first_name: u.first_name.clone(),
                last_name: u.last_name.clone(),
                email: u.email.clone(),
            })
            .collect();
        panel.sort_by(|a, b| {
            (a.first_name.as_str(), a.last_name.as_str())
                .cmp(&(b.first_name.as_str(), b.last_name.as_str()))
        });
        Ok(panel)
    }

    async fn is_panelist(&self, interview_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self.tables()?.panel.contains(&(interview_id, user_id)))
    }

    async fn find_latest_interview(&self, application_id: Uuid) -> Result<Option<Interview>> {
        Ok(self
            .tables()?
            .interviews
            .iter()
            .filter(|i| i.application_id == application_id)
            .max_by_key(|i| i.scheduled_at)
            .cloned())
    }

    async fn list_interviews_for_panelist(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<InterviewOverview>> {
        let tables = self.tables()?;
        let mut interviews: Vec<InterviewOverview> = tables
            .interviews
            .iter()
            .filter(|i| tables.panel.contains(&(i.id, user_id)))
            .filter_map(|i| tables.interview_overview(i))
            .collect();
        interviews.sort_by_key(|i| i.scheduled_at);
        Ok(interviews)
    }

    async fn feedback_exists(&self, interview_id: Uuid, interviewer_user_id: Uuid) -> Result<bool> {
        Ok(self.tables()?.feedback.iter().any(|f| {
            f.interview_id == interview_id && f.interviewer_user_id == interviewer_user_id
        }))
    }

    async fn record_feedback(
        &self,
        feedback: &InterviewFeedback,
        cascade: Option<(Uuid, ApplicationStatus)>,
    ) -> Result<()> {
        let mut tables = self.tables()?;
        if tables.feedback.iter().any(|f| {
            f.interview_id == feedback.interview_id
                && f.interviewer_user_id == feedback.interviewer_user_id
        }) {
            return Err(Error::Duplicate(
                "Feedback already submitted for this interview.".to_string(),
            ));
        }
        if let Some((application_id, _)) = cascade {
            tables.application_mut(application_id)?;
        }
        let interview = tables
            .interviews
            .iter_mut()
            .find(|i| i.id == feedback.interview_id)
            .ok_or_else(|| Error::NotFound("Interview not found.".to_string()))?;
        interview.status = InterviewStatus::Completed;

        if let Some((application_id, status)) = cascade {
            tables.application_mut(application_id)?.status = status;
        }
        tables.feedback.push(feedback.clone());
        Ok(())
    }

    async fn list_feedback_for_interview(&self, interview_id: Uuid) -> Result<Vec<FeedbackView>> {
        let tables = self.tables()?;
        let mut feedback: Vec<FeedbackView> = tables
            .feedback
            .iter()
            .filter(|f| f.interview_id == interview_id)
            .map(|f| tables.feedback_view(f))
            .collect();
        feedback.sort_by_key(|f| f.submitted_at);
        Ok(feedback)
    }

    async fn list_feedback_for_application(
        &self,
        application_id: Uuid,
    ) -> Result<Vec<FeedbackView>> {
        let tables = self.tables()?;
        let interview_ids: HashSet<Uuid> = tables
            .interviews
            .iter()
            .filter(|i| i.application_id == application_id)
            .map(|i| i.id)
            .collect();
        let mut feedback: Vec<FeedbackView> = tables
            .feedback
            .iter()
            .filter(|f| interview_ids.contains(&f.interview_id))
            .map(|f| tables.feedback_view(f))
            .collect();
        feedback.sort_by_key(|f| f.submitted_at);
        Ok(feedback)
    }

    async fn insert_document(&self, document: &CandidateDocument) -> Result<()> {
        self.tables()?.documents.push(document.clone());
        Ok(())
    }

    async fn find_document(&self, id: Uuid) -> Result<Option<CandidateDocument>> {
        Ok(self.tables()?.documents.iter().find(|d| d.id == id).cloned())
    }

    async fn set_document_verification(
        &self,
        id: Uuid,
        status: VerificationStatus,
    ) -> Result<()> {
        let mut tables = self.tables()?;
        let document = tables
            .documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::NotFound("Document not found.".to_string()))?;
        document.verification_status = status;
        Ok(())
    }

    async fn list_documents(&self, application_id: Uuid) -> Result<Vec<DocumentView>> {
        let tables = self.tables()?;
        let mut documents: Vec<DocumentView> = tables
            .documents
            .iter()
            .filter(|d| d.application_id == application_id)
            .map(|d| DocumentView {
                id: d.id,
                application_id: d.application_id,
                document_type: d.document_type.clone(),
                file_path: d.file_path.clone(),
                verification_status: d.verification_status,
                uploaded_by_user_id: d.uploaded_by_user_id,
                uploader_name: tables.user_name(d.uploaded_by_user_id),
                uploaded_at: d.uploaded_at,
            })
            .collect();
        documents.sort_by_key(|d| d.uploaded_at);
        Ok(documents)
    }
}
