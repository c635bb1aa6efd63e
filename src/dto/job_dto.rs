use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::job::{Job, JobSkillView, JobStatus, Skill};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub required_skill_ids: Vec<Uuid>,
    #[serde(default)]
    pub preferred_skill_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: JobStatus,
    pub status_reason: Option<String>,
    pub created_by_user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub required_skills: Vec<SkillResponse>,
    pub preferred_skills: Vec<SkillResponse>,
}

impl JobResponse {
    pub fn with_skills(job: Job, skills: Vec<JobSkillView>) -> Self {
        let (required, preferred): (Vec<_>, Vec<_>) =
            skills.into_iter().partition(|s| s.is_required);
        let mut response = Self::from(job);
        response.required_skills = required.into_iter().map(SkillResponse::from).collect();
        response.preferred_skills = preferred.into_iter().map(SkillResponse::from).collect();
        response
    }
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            status: job.status,
            status_reason: job.status_reason,
            created_by_user_id: job.created_by_user_id,
            created_at: job.created_at,
            required_skills: Vec::new(),
            preferred_skills: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSkillRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<Skill> for SkillResponse {
    fn from(skill: Skill) -> Self {
        Self {
            id: skill.id,
            name: skill.name,
        }
    }
}

impl From<JobSkillView> for SkillResponse {
    fn from(skill: JobSkillView) -> Self {
        Self {
            id: skill.skill_id,
            name: skill.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub candidate_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignUserRequest {
    pub user_id: Uuid,
}
