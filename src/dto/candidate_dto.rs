use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::candidate::Candidate;
use crate::services::candidate_service::BulkImportSummary;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cv_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Candidate> for CandidateResponse {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: candidate.id,
            user_id: candidate.user_id,
            first_name: candidate.first_name,
            last_name: candidate.last_name,
            email: candidate.email,
            phone: candidate.phone,
            cv_path: candidate.cv_path,
            created_at: candidate.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkUploadResponse {
    pub created: usize,
    pub skipped_existing: usize,
    pub skipped_duplicates: usize,
    pub skipped_blank: usize,
}

impl From<BulkImportSummary> for BulkUploadResponse {
    fn from(summary: BulkImportSummary) -> Self {
        Self {
            created: summary.created,
            skipped_existing: summary.skipped_existing,
            skipped_duplicates: summary.skipped_duplicates,
            skipped_blank: summary.skipped_blank,
        }
    }
}
