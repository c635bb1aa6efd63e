use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::database::Store;
use crate::error::{Error, Result};
use crate::models::{
    application::{Application, ApplicationFilter, ApplicationOverview, ApplicationStatus},
    document::{CandidateDocument, DocumentView, VerificationStatus, OFFER_LETTER},
    user::{Principal, Role},
};
use crate::services::{
    ensure_role,
    file_storage::{FileCategory, FileStorage, UploadedFile},
    workflow::TransitionPolicy,
};
use crate::utils::time::now;

/// Candidate documents, HR verification and the final hiring step.
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn Store>,
    files: FileStorage,
    policy: TransitionPolicy,
}

impl DocumentService {
    pub fn new(store: Arc<dyn Store>, files: FileStorage, policy: TransitionPolicy) -> Self {
        Self {
            store,
            files,
            policy,
        }
    }

    pub async fn upload(
        &self,
        principal: &Principal,
        application_id: Uuid,
        document_type: &str,
        file: UploadedFile,
    ) -> Result<CandidateDocument> {
        ensure_role(principal, &[Role::Candidate])?;
        let document_type = document_type.trim();
        if document_type.is_empty() {
            return Err(Error::BadRequest("Document type is required.".to_string()));
        }
        let application = self.require_application(application_id).await?;
        self.ensure_own_application(principal, &application).await?;

        self.store_document(principal, &application, document_type, &file)
            .await
    }

    pub async fn upload_offer_letter(
        &self,
        principal: &Principal,
        application_id: Uuid,
        file: UploadedFile,
    ) -> Result<CandidateDocument> {
        ensure_role(principal, &[Role::Recruiter, Role::Hr])?;
        let application = self.require_application(application_id).await?;
        self.store_document(principal, &application, OFFER_LETTER, &file)
            .await
    }

    pub async fn list_for_application(
        &self,
        principal: &Principal,
        application_id: Uuid,
    ) -> Result<Vec<DocumentView>> {
        let application = self.require_application(application_id).await?;
        if principal.role == Role::Candidate {
            self.ensure_own_application(principal, &application).await?;
        }
        self.store.list_documents(application_id).await
    }

    pub async fn verify(
        &self,
        principal: &Principal,
        document_id: Uuid,
        is_verified: bool,
    ) -> Result<VerificationStatus> {
        ensure_role(principal, &[Role::Recruiter, Role::Hr])?;
        let document = self
            .store
            .find_document(document_id)
            .await?
            .ok_or_else(|| Error::NotFound("Document not found.".to_string()))?;
        self.policy.check_verification(document.verification_status)?;

        let status = VerificationStatus::from_decision(is_verified);
        self.store
            .set_document_verification(document_id, status)
            .await?;
        tracing::info!(%document_id, %status, actor = %principal.user_id, "document verification set");
        Ok(status)
    }

    pub async fn finalize_selection(
        &self,
        principal: &Principal,
        application_id: Uuid,
        joining_date: NaiveDate,
    ) -> Result<Application> {
        ensure_role(principal, &[Role::Recruiter, Role::Hr])?;
        let mut application = self.require_application(application_id).await?;
        self.policy.check_finalize(application.status)?;

        self.store
            .finalize_application(application_id, joining_date)
            .await?;
        tracing::info!(%application_id, from = %application.status, %joining_date, "candidate hired");
        application.status = ApplicationStatus::Hired;
        application.joining_date = Some(joining_date);
        Ok(application)
    }

    pub async fn hr_dashboard(&self, principal: &Principal) -> Result<Vec<ApplicationOverview>> {
        ensure_role(principal, &[Role::Recruiter, Role::Hr])?;
        self.store
            .list_applications(ApplicationFilter::Statuses(ApplicationStatus::hr_pipeline()))
            .await
    }

    async fn store_document(
        &self,
        principal: &Principal,
        application: &Application,
        document_type: &str,
        file: &UploadedFile,
    ) -> Result<CandidateDocument> {
        let file_path = self.files.store(FileCategory::Documents, file).await?;
        let document = CandidateDocument {
            id: Uuid::new_v4(),
            application_id: application.id,
            document_type: document_type.to_string(),
            file_path,
            verification_status: VerificationStatus::Pending,
            uploaded_by_user_id: principal.user_id,
            uploaded_at: now(),
        };
        self.store.insert_document(&document).await?;
        tracing::info!(
            document_id = %document.id,
            application_id = %application.id,
            document_type,
            "document uploaded"
        );
        Ok(document)
    }

    async fn require_application(&self, application_id: Uuid) -> Result<Application> {
        self.store
            .find_application(application_id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found.".to_string()))
    }

    async fn ensure_own_application(
        &self,
        principal: &Principal,
        application: &Application,
    ) -> Result<()> {
        let owns = self
            .store
            .find_candidate_by_user(principal.user_id)
            .await?
            .is_some_and(|candidate| candidate.id == application.candidate_id);
        if owns {
            Ok(())
        } else {
            tracing::warn!(
                user_id = %principal.user_id,
                application_id = %application.id,
                "candidate attempted to access a foreign application"
            );
            Err(Error::Forbidden("forbidden".to_string()))
        }
    }
}
