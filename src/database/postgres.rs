use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};
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

const USER_SELECT: &str = r#"
    SELECT u.id, u.first_name, u.last_name, u.email, u.password_hash,
           r.role_name AS role, u.created_at
    FROM users u
    JOIN roles r ON r.id = u.role_id
"#;

const CANDIDATE_SELECT: &str = r#"
    SELECT id, user_id, first_name, last_name, email, phone, cv_path,
           created_by_user_id, created_at
    FROM candidates
"#;

const JOB_SELECT: &str = r#"
    SELECT id, title, description, status, status_reason, created_by_user_id, created_at
    FROM jobs
"#;

const APPLICATION_OVERVIEW_SELECT: &str = r#"
    SELECT a.id, a.candidate_id, c.user_id AS candidate_user_id,
           c.first_name AS candidate_first_name, c.last_name AS candidate_last_name,
           c.email AS candidate_email, c.cv_path AS candidate_cv_path,
           a.job_id, j.title AS job_title, a.status, a.applied_at, a.joining_date
    FROM applications a
    JOIN candidates c ON c.id = a.candidate_id
    JOIN jobs j ON j.id = a.job_id
"#;

const INTERVIEW_SELECT: &str = r#"
    SELECT id, application_id, round_number, interview_type, scheduled_at, status, created_at
    FROM interviews
"#;

const INTERVIEW_OVERVIEW_SELECT: &str = r#"
    SELECT i.id, i.application_id, i.round_number, i.interview_type, i.scheduled_at, i.status,
           c.first_name || ' ' || c.last_name AS candidate_name,
           c.cv_path AS candidate_cv_path, j.title AS job_title
    FROM interviews i
    JOIN applications a ON a.id = i.application_id
    JOIN candidates c ON c.id = a.candidate_id
    JOIN jobs j ON j.id = a.job_id
"#;

const FEEDBACK_SELECT: &str = r#"
    SELECT f.id, f.interview_id, i.round_number, f.interviewer_user_id,
           u.first_name || ' ' || u.last_name AS interviewer_name,
           f.rating, f.comments, f.recommendation, f.submitted_at
    FROM interview_feedback f
    JOIN interviews i ON i.id = f.interview_id
    JOIN users u ON u.id = f.interviewer_user_id
"#;

const DOCUMENT_SELECT: &str = r#"
    SELECT id, application_id, document_type, file_path, verification_status,
           uploaded_by_user_id, uploaded_at
    FROM candidate_documents
"#;

/// `Store` backed by Postgres through sqlx.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn on_unique_violation(err: sqlx::Error, message: &str) -> Error {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return Error::Duplicate(message.to_string());
        }
    }
    err.into()
}

fn assignment_table(kind: AssignmentKind) -> &'static str {
    match kind {
        AssignmentKind::Reviewer => "job_reviewers",
        AssignmentKind::Interviewer => "job_interviewers",
    }
}

async fn insert_user_tx(tx: &mut Transaction<'_, Postgres>, user: &User) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (id, first_name, last_name, email, password_hash, role_id, created_at)
        SELECT $1, $2, $3, $4, $5, r.id, $7
        FROM roles r
        WHERE r.role_name = $6
        "#,
    )
    .bind(user.id)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.role.as_str())
    .bind(user.created_at)
    .execute(&mut **tx)
    .await
    .map_err(|e| on_unique_violation(e, "A user with this email already exists."))?;
    Ok(())
}

async fn insert_candidate_tx(
    tx: &mut Transaction<'_, Postgres>,
    candidate: &Candidate,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO candidates
            (id, user_id, first_name, last_name, email, phone, cv_path, created_by_user_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(candidate.id)
    .bind(candidate.user_id)
    .bind(&candidate.first_name)
    .bind(&candidate.last_name)
    .bind(&candidate.email)
    .bind(&candidate.phone)
    .bind(&candidate.cv_path)
    .bind(candidate.created_by_user_id)
    .bind(candidate.created_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: &User) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        insert_user_tx(&mut tx, user).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!("{USER_SELECT} WHERE u.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "{USER_SELECT} WHERE LOWER(u.email) = LOWER($1)"
        ))
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "{USER_SELECT} WHERE r.role_name = $1 ORDER BY u.first_name, u.last_name"
        ))
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn insert_candidate_with_account(
        &self,
        user: &User,
        candidate: &Candidate,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        insert_user_tx(&mut tx, user).await?;
        insert_candidate_tx(&mut tx, candidate).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn insert_candidates_with_accounts(&self, pairs: &[(User, Candidate)]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for (user, candidate) in pairs {
            insert_user_tx(&mut tx, user).await?;
            insert_candidate_tx(&mut tx, candidate).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn find_candidate(&self, id: Uuid) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!("{CANDIDATE_SELECT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(candidate)
    }

    async fn find_candidate_by_user(&self, user_id: Uuid) -> Result<Option<Candidate>> {
        let candidate =
            sqlx::query_as::<_, Candidate>(&format!("{CANDIDATE_SELECT} WHERE user_id = $1"))
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(candidate)
    }

    async fn list_recent_candidates(&self, limit: i64) -> Result<Vec<Candidate>> {
        let candidates = sqlx::query_as::<_, Candidate>(&format!(
            "{CANDIDATE_SELECT} ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }

    async fn update_candidate_cv(&self, candidate_id: Uuid, cv_path: &str) -> Result<()> {
        let result = sqlx::query("UPDATE candidates SET cv_path = $2 WHERE id = $1")
            .bind(candidate_id)
            .bind(cv_path)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Candidate not found.".to_string()));
        }
        Ok(())
    }

    async fn insert_job(&self, job: &Job) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO jobs (id, title, description, status, status_reason, created_by_user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(job.status.as_str())
        .bind(&job.status_reason)
        .bind(job.created_by_user_id)
        .bind(job.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn attach_job_skills(&self, skills: &[JobSkill]) -> Result<()> {
        for skill in skills {
            sqlx::query(
                r#"
                INSERT INTO job_skills (job_id, skill_id, is_required)
                VALUES ($1, $2, $3)
                ON CONFLICT (job_id, skill_id) DO NOTHING
                "#,
            )
            .bind(skill.job_id)
            .bind(skill.skill_id)
            .bind(skill.is_required)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    async fn find_job(&self, id: Uuid) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!("{JOB_SELECT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn list_jobs_by_status(&self, status: JobStatus) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "{JOB_SELECT} WHERE status = $1 ORDER BY created_at DESC"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    async fn list_job_skills(&self, job_id: Uuid) -> Result<Vec<JobSkillView>> {
        let skills = sqlx::query_as::<_, JobSkillView>(
            r#"
            SELECT js.skill_id, s.name, js.is_required
            FROM job_skills js
            JOIN skills s ON s.id = js.skill_id
            WHERE js.job_id = $1
            ORDER BY js.is_required DESC, s.name
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(skills)
    }

    async fn insert_skill(&self, skill: &Skill) -> Result<()> {
        sqlx::query("INSERT INTO skills (id, name) VALUES ($1, $2)")
            .bind(skill.id)
            .bind(&skill.name)
            .execute(&self.pool)
            .await
            .map_err(|e| on_unique_violation(e, "This skill already exists."))?;
        Ok(())
    }

    async fn find_skill_by_name(&self, name: &str) -> Result<Option<Skill>> {
        let skill = sqlx::query_as::<_, Skill>(
            "SELECT id, name FROM skills WHERE LOWER(name) = LOWER($1)",
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;
        Ok(skill)
    }

    async fn list_skills(&self) -> Result<Vec<Skill>> {
        let skills = sqlx::query_as::<_, Skill>("SELECT id, name FROM skills ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(skills)
    }

    async fn insert_assignment(
        &self,
        kind: AssignmentKind,
        job_id: Uuid,
        user_id: Uuid,
    ) -> Result<()> {
        let sql = format!(
            "INSERT INTO {} (job_id, user_id) VALUES ($1, $2)",
            assignment_table(kind)
        );
        sqlx::query(&sql)
            .bind(job_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| on_unique_violation(e, "This user is already assigned to the job."))?;
        Ok(())
    }

    async fn assignment_exists(
        &self,
        kind: AssignmentKind,
        job_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE job_id = $1 AND user_id = $2)",
            assignment_table(kind)
        );
        let exists: bool = sqlx::query_scalar(&sql)
            .bind(job_id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert_application(&self, application: &Application) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO applications (id, candidate_id, job_id, status, applied_at, joining_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(application.id)
        .bind(application.candidate_id)
        .bind(application.job_id)
        .bind(application.status.as_str())
        .bind(application.applied_at)
        .bind(application.joining_date)
        .execute(&self.pool)
        .await
        .map_err(|e| on_unique_violation(e, "This candidate has already applied to this job."))?;
        Ok(())
    }

    async fn find_application(&self, id: Uuid) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(
            r#"
            SELECT id, candidate_id, job_id, status, applied_at, joining_date
            FROM applications
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    async fn find_application_by_pair(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(
            r#"
            SELECT id, candidate_id, job_id, status, applied_at, joining_date
            FROM applications
            WHERE candidate_id = $1 AND job_id = $2
            "#,
        )
        .bind(candidate_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    async fn find_application_overview(&self, id: Uuid) -> Result<Option<ApplicationOverview>> {
        let overview = sqlx::query_as::<_, ApplicationOverview>(&format!(
            "{APPLICATION_OVERVIEW_SELECT} WHERE a.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(overview)
    }

    async fn list_applications(
        &self,
        filter: ApplicationFilter,
    ) -> Result<Vec<ApplicationOverview>> {
        const ORDER: &str = "ORDER BY a.applied_at DESC";
        let rows = match filter {
            ApplicationFilter::All => {
                sqlx::query_as::<_, ApplicationOverview>(&format!(
                    "{APPLICATION_OVERVIEW_SELECT} {ORDER}"
                ))
                .fetch_all(&self.pool)
                .await?
            }
            ApplicationFilter::AssignedToReviewer(user_id) => {
                sqlx::query_as::<_, ApplicationOverview>(&format!(
                    r#"{APPLICATION_OVERVIEW_SELECT}
                    WHERE EXISTS (
                        SELECT 1 FROM job_reviewers jr
                        WHERE jr.job_id = a.job_id AND jr.user_id = $1
                    )
                    {ORDER}"#
                ))
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
            ApplicationFilter::Candidate(candidate_id) => {
                sqlx::query_as::<_, ApplicationOverview>(&format!(
                    "{APPLICATION_OVERVIEW_SELECT} WHERE a.candidate_id = $1 {ORDER}"
                ))
                .bind(candidate_id)
                .fetch_all(&self.pool)
                .await?
            }
            ApplicationFilter::Statuses(statuses) => {
                let names: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();
                sqlx::query_as::<_, ApplicationOverview>(&format!(
                    "{APPLICATION_OVERVIEW_SELECT} WHERE a.status = ANY($1) {ORDER}"
                ))
                .bind(names)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    async fn update_application_status(&self, id: Uuid, status: ApplicationStatus) -> Result<()> {
        let result = sqlx::query("UPDATE applications SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Application not found.".to_string()));
        }
        Ok(())
    }

    async fn finalize_application(&self, id: Uuid, joining_date: NaiveDate) -> Result<()> {
        let result =
            sqlx::query("UPDATE applications SET status = $2, joining_date = $3 WHERE id = $1")
                .bind(id)
                .bind(ApplicationStatus::Hired.as_str())
                .bind(joining_date)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Application not found.".to_string()));
        }
        Ok(())
    }

    async fn insert_comment(&self, comment: &ApplicationComment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO application_comments (id, application_id, user_id, comment_text, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.id)
        .bind(comment.application_id)
        .bind(comment.user_id)
        .bind(&comment.comment_text)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_comments(&self, application_id: Uuid) -> Result<Vec<CommentView>> {
        let comments = sqlx::query_as::<_, CommentView>(
            r#"
            SELECT c.id, c.user_id, u.first_name || ' ' || u.last_name AS author_name,
                   c.comment_text, c.created_at
            FROM application_comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.application_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(application_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    async fn insert_interview(&self, interview: &Interview, panel: &[Uuid]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO interviews
                (id, application_id, round_number, interview_type, scheduled_at, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(interview.id)
        .bind(interview.application_id)
        .bind(interview.round_number)
        .bind(&interview.interview_type)
        .bind(interview.scheduled_at)
        .bind(interview.status.as_str())
        .bind(interview.created_at)
        .execute(&mut *tx)
        .await?;

        for user_id in panel {
            sqlx::query(
                r#"
                INSERT INTO interview_panel (interview_id, user_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(interview.id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn find_interview(&self, id: Uuid) -> Result<Option<Interview>> {
        let interview = sqlx::query_as::<_, Interview>(&format!("{INTERVIEW_SELECT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(interview)
    }

    async fn find_interview_overview(&self, id: Uuid) -> Result<Option<InterviewOverview>> {
        let overview = sqlx::query_as::<_, InterviewOverview>(&format!(
            "{INTERVIEW_OVERVIEW_SELECT} WHERE i.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(overview)
    }

    async fn list_panel(&self, interview_id: Uuid) -> Result<Vec<PanelMember>> {
        let panel = sqlx::query_as::<_, PanelMember>(
            r#"
            SELECT u.id AS user_id, u.first_name, u.last_name, u.email
            FROM interview_panel p
            JOIN users u ON u.id = p.user_id
            WHERE p.interview_id = $1
            ORDER BY u.first_name, u.last_name
            "#,
        )
        .bind(interview_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(panel)
    }

    async fn is_panelist(&self, interview_id: Uuid, user_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM interview_panel WHERE interview_id = $1 AND user_id = $2)",
        )
        .bind(interview_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_latest_interview(&self, application_id: Uuid) -> Result<Option<Interview>> {
        let interview = sqlx::query_as::<_, Interview>(&format!(
            "{INTERVIEW_SELECT} WHERE application_id = $1 ORDER BY scheduled_at DESC LIMIT 1"
        ))
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(interview)
    }

    async fn list_interviews_for_panelist(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<InterviewOverview>> {
        let interviews = sqlx::query_as::<_, InterviewOverview>(&format!(
            r#"{INTERVIEW_OVERVIEW_SELECT}
            JOIN interview_panel p ON p.interview_id = i.id
            WHERE p.user_id = $1
            ORDER BY i.scheduled_at"#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(interviews)
    }

    async fn feedback_exists(&self, interview_id: Uuid, interviewer_user_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM interview_feedback
                WHERE interview_id = $1 AND interviewer_user_id = $2
            )
            "#,
        )
        .bind(interview_id)
        .bind(interviewer_user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn record_feedback(
        &self,
        feedback: &InterviewFeedback,
        cascade: Option<(Uuid, ApplicationStatus)>,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO interview_feedback
                (id, interview_id, interviewer_user_id, rating, comments, recommendation, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(feedback.id)
        .bind(feedback.interview_id)
        .bind(feedback.interviewer_user_id)
        .bind(feedback.rating)
        .bind(&feedback.comments)
        .bind(feedback.recommendation.as_str())
        .bind(feedback.submitted_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| on_unique_violation(e, "Feedback already submitted for this interview."))?;

        sqlx::query("UPDATE interviews SET status = $2 WHERE id = $1")
            .bind(feedback.interview_id)
            .bind(InterviewStatus::Completed.as_str())
            .execute(&mut *tx)
            .await?;

        if let Some((application_id, status)) = cascade {
            sqlx::query("UPDATE applications SET status = $2 WHERE id = $1")
                .bind(application_id)
                .bind(status.as_str())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn list_feedback_for_interview(&self, interview_id: Uuid) -> Result<Vec<FeedbackView>> {
        let feedback = sqlx::query_as::<_, FeedbackView>(&format!(
            "{FEEDBACK_SELECT} WHERE f.interview_id = $1 ORDER BY f.submitted_at"
        ))
        .bind(interview_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(feedback)
    }

    async fn list_feedback_for_application(
        &self,
        application_id: Uuid,
    ) -> Result<Vec<FeedbackView>> {
        let feedback = sqlx::query_as::<_, FeedbackView>(&format!(
            "{FEEDBACK_SELECT} WHERE i.application_id = $1 ORDER BY f.submitted_at"
        ))
        .bind(application_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(feedback)
    }

    async fn insert_document(&self, document: &CandidateDocument) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO candidate_documents
                (id, application_id, document_type, file_path, verification_status,
                 uploaded_by_user_id, uploaded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(document.id)
        .bind(document.application_id)
        .bind(&document.document_type)
        .bind(&document.file_path)
        .bind(document.verification_status.as_str())
        .bind(document.uploaded_by_user_id)
        .bind(document.uploaded_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_document(&self, id: Uuid) -> Result<Option<CandidateDocument>> {
        let document =
            sqlx::query_as::<_, CandidateDocument>(&format!("{DOCUMENT_SELECT} WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(document)
    }

    async fn set_document_verification(
        &self,
        id: Uuid,
        status: VerificationStatus,
    ) -> Result<()> {
        let result =
            sqlx::query("UPDATE candidate_documents SET verification_status = $2 WHERE id = $1")
                .bind(id)
                .bind(status.as_str())
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Document not found.".to_string()));
        }
        Ok(())
    }

    async fn list_documents(&self, application_id: Uuid) -> Result<Vec<DocumentView>> {
        let documents = sqlx::query_as::<_, DocumentView>(
            r#"
            SELECT d.id, d.application_id, d.document_type, d.file_path, d.verification_status,
                   d.uploaded_by_user_id, u.first_name || ' ' || u.last_name AS uploader_name,
                   d.uploaded_at
            FROM candidate_documents d
            JOIN users u ON u.id = d.uploaded_by_user_id
            WHERE d.application_id = $1
            ORDER BY d.uploaded_at
            "#,
        )
        .bind(application_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(documents)
    }
}
