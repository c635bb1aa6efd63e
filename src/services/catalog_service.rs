use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::database::Store;
use crate::dto::job_dto::{CreateJobRequest, JobResponse};
use crate::error::{Error, Result};
use crate::models::{
    application::{Application, ApplicationStatus},
    job::{AssignmentKind, Job, JobSkill, JobStatus, Skill},
    user::{Principal, Role, User},
};
use crate::services::ensure_role;
use crate::utils::time::now;

/// Jobs, skills, staff assignment and candidate-to-job linking.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn Store>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create_job(&self, principal: &Principal, payload: CreateJobRequest) -> Result<JobResponse> {
        ensure_role(principal, &[Role::Recruiter])?;
        let title = payload.title.trim();
        let description = payload.description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(Error::BadRequest(
                "Job title and description are required.".to_string(),
            ));
        }

        let known: HashSet<Uuid> = self.store.list_skills().await?.into_iter().map(|s| s.id).collect();
        if let Some(unknown) = payload
            .required_skill_ids
            .iter()
            .chain(payload.preferred_skill_ids.iter())
            .find(|id| !known.contains(id))
        {
            return Err(Error::BadRequest(format!("Unknown skill id: {}", unknown)));
        }

        let job = Job {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            status: JobStatus::Open,
            status_reason: None,
            created_by_user_id: principal.user_id,
            created_at: now(),
        };
        self.store.insert_job(&job).await?;

        let required: HashSet<Uuid> = payload.required_skill_ids.iter().copied().collect();
        let mut links: Vec<JobSkill> = required
            .iter()
            .map(|skill_id| JobSkill {
                job_id: job.id,
                skill_id: *skill_id,
                is_required: true,
            })
            .collect();
        links.extend(
            payload
                .preferred_skill_ids
                .iter()
                .filter(|id| !required.contains(id))
                .collect::<HashSet<_>>()
                .into_iter()
                .map(|skill_id| JobSkill {
                    job_id: job.id,
                    skill_id: *skill_id,
                    is_required: false,
                }),
        );
        // Separate write from the job insert; a failure here leaves the job without skills.
        self.store.attach_job_skills(&links).await?;

        tracing::info!(job_id = %job.id, skills = links.len(), "job created");
        let skills = self.store.list_job_skills(job.id).await?;
        Ok(JobResponse::with_skills(job, skills))
    }

    pub async fn open_jobs(&self, principal: &Principal) -> Result<Vec<Job>> {
        ensure_role(principal, &[Role::Recruiter, Role::Candidate])?;
        self.store.list_jobs_by_status(JobStatus::Open).await
    }

    pub async fn get_job(&self, principal: &Principal, job_id: Uuid) -> Result<JobResponse> {
        ensure_role(principal, &[Role::Recruiter])?;
        let job = self.require_job(job_id).await?;
        let skills = self.store.list_job_skills(job.id).await?;
        Ok(JobResponse::with_skills(job, skills))
    }

    pub async fn create_skill(&self, principal: &Principal, name: &str) -> Result<Skill> {
        ensure_role(principal, &[Role::Recruiter])?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::BadRequest("Skill name is required.".to_string()));
        }
        if self.store.find_skill_by_name(name).await?.is_some() {
            return Err(Error::Duplicate("This skill already exists.".to_string()));
        }
        let skill = Skill {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        self.store.insert_skill(&skill).await?;
        Ok(skill)
    }

    pub async fn skills(&self, principal: &Principal) -> Result<Vec<Skill>> {
        ensure_role(principal, &[Role::Recruiter])?;
        self.store.list_skills().await
    }

    pub async fn link_candidate(
        &self,
        principal: &Principal,
        job_id: Uuid,
        candidate_id: Uuid,
    ) -> Result<Application> {
        ensure_role(principal, &[Role::Recruiter])?;
        self.require_job(job_id).await?;
        if self.store.find_candidate(candidate_id).await?.is_none() {
            return Err(Error::NotFound("Candidate not found.".to_string()));
        }
        if self
            .store
            .find_application_by_pair(candidate_id, job_id)
            .await?
            .is_some()
        {
            return Err(Error::Duplicate(
                "This candidate has already applied to this job.".to_string(),
            ));
        }

        let application = Application {
            id: Uuid::new_v4(),
            candidate_id,
            job_id,
            status: ApplicationStatus::Applied,
            applied_at: now(),
            joining_date: None,
        };
        self.store.insert_application(&application).await?;
        tracing::info!(application_id = %application.id, %job_id, %candidate_id, "candidate linked to job");
        Ok(application)
    }

    pub async fn available_staff(&self, principal: &Principal, kind: AssignmentKind) -> Result<Vec<User>> {
        ensure_role(principal, &[Role::Recruiter])?;
        self.store.list_users_by_role(kind.required_role()).await
    }

    pub async fn assign_staff(
        &self,
        principal: &Principal,
        kind: AssignmentKind,
        job_id: Uuid,
        user_id: Uuid,
    ) -> Result<()> {
        ensure_role(principal, &[Role::Recruiter])?;
        self.require_job(job_id).await?;

        let required = kind.required_role();
        let user = self
            .store
            .find_user(user_id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found.".to_string()))?;
        if user.role != required {
            return Err(Error::BadRequest(format!("User is not a {}.", required)));
        }
        if self.store.assignment_exists(kind, job_id, user_id).await? {
            return Err(Error::Duplicate(format!(
                "This {} is already assigned to the job.",
                required.as_str().to_lowercase()
            )));
        }
        self.store.insert_assignment(kind, job_id, user_id).await?;
        tracing::info!(%job_id, %user_id, ?kind, "staff assigned to job");
        Ok(())
    }

    async fn require_job(&self, job_id: Uuid) -> Result<Job> {
        self.store
            .find_job(job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found.".to_string()))
    }
}
