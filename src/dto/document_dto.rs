use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::document::{CandidateDocument, DocumentView, VerificationStatus};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub id: Uuid,
    pub application_id: Uuid,
    pub document_type: String,
    pub file_path: String,
    pub file_url: String,
    pub verification_status: VerificationStatus,
    pub uploaded_by_user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader_name: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

pub fn file_url(path: &str) -> String {
    format!("/files/{}", path)
}

impl From<CandidateDocument> for DocumentResponse {
    fn from(document: CandidateDocument) -> Self {
        Self {
            id: document.id,
            application_id: document.application_id,
            document_type: document.document_type,
            file_url: file_url(&document.file_path),
            file_path: document.file_path,
            verification_status: document.verification_status,
            uploaded_by_user_id: document.uploaded_by_user_id,
            uploader_name: None,
            uploaded_at: document.uploaded_at,
        }
    }
}

impl From<DocumentView> for DocumentResponse {
    fn from(document: DocumentView) -> Self {
        Self {
            id: document.id,
            application_id: document.application_id,
            document_type: document.document_type,
            file_url: file_url(&document.file_path),
            file_path: document.file_path,
            verification_status: document.verification_status,
            uploaded_by_user_id: document.uploaded_by_user_id,
            uploader_name: Some(document.uploader_name),
            uploaded_at: document.uploaded_at,
        }
    }
}
