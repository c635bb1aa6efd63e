use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::database::Store;
use crate::error::{Error, Result};
use crate::models::{
    candidate::Candidate,
    user::{Principal, Role, User},
};
use crate::services::{
    candidate_import::{parse_roster, RosterRow},
    ensure_role,
    file_storage::{FileCategory, FileStorage, UploadedFile},
};
use crate::utils::{
    crypto::{default_candidate_password, hash_password},
    time::now,
};

const RECENT_CANDIDATES: i64 = 20;

#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cv: Option<UploadedFile>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkImportSummary {
    pub created: usize,
    pub skipped_existing: usize,
    pub skipped_duplicates: usize,
    pub skipped_blank: usize,
}

#[derive(Clone)]
pub struct CandidateService {
    store: Arc<dyn Store>,
    files: FileStorage,
}

impl CandidateService {
    pub fn new(store: Arc<dyn Store>, files: FileStorage) -> Self {
        Self { store, files }
    }

    pub async fn create(&self, principal: &Principal, input: NewCandidate) -> Result<Candidate> {
        ensure_role(principal, &[Role::Recruiter])?;

        let first_name = input.first_name.trim().to_string();
        let last_name = input.last_name.trim().to_string();
        let email = input.email.trim().to_string();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(Error::BadRequest("First and last name are required.".to_string()));
        }
        if !email.contains('@') {
            return Err(Error::BadRequest("A valid email is required.".to_string()));
        }
        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(Error::Duplicate(
                "A user with this email already exists.".to_string(),
            ));
        }

        let cv_path = match &input.cv {
            Some(file) => Some(self.files.store(FileCategory::Cvs, file).await?),
            None => None,
        };
        let phone = input.phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
        let (user, candidate) = self.provision(principal, first_name, last_name, email, phone, cv_path)?;

        self.store.insert_candidate_with_account(&user, &candidate).await?;
        tracing::info!(candidate_id = %candidate.id, user_id = %user.id, "candidate created");
        Ok(candidate)
    }

    pub async fn bulk_create(
        &self,
        principal: &Principal,
        filename: &str,
        data: &[u8],
    ) -> Result<BulkImportSummary> {
        ensure_role(principal, &[Role::Recruiter])?;
        let rows = parse_roster(filename, data)?;

        let mut summary = BulkImportSummary::default();
        let mut seen = HashSet::new();
        let mut accepted: Vec<RosterRow> = Vec::new();
        for row in rows {
            if row.email.is_empty() {
                summary.skipped_blank += 1;
                continue;
            }
            if self.store.find_user_by_email(&row.email).await?.is_some() {
                summary.skipped_existing += 1;
                continue;
            }
            if !seen.insert(row.email.to_lowercase()) {
                summary.skipped_duplicates += 1;
                continue;
            }
            accepted.push(row);
        }

        let mut pairs = Vec::with_capacity(accepted.len());
        for row in accepted {
            pairs.push(self.provision(
                principal,
                row.first_name,
                row.last_name,
                row.email,
                row.phone,
                None,
            )?);
        }

        if let Err(e) = self.store.insert_candidates_with_accounts(&pairs).await {
            tracing::error!(error = %e, rows = pairs.len(), "bulk candidate import rolled back");
            return Err(Error::Internal(
                "An error occurred during bulk creation.".to_string(),
            ));
        }
        summary.created = pairs.len();
        tracing::info!(?summary, "bulk candidate import finished");
        Ok(summary)
    }

    pub async fn recent(&self, principal: &Principal) -> Result<Vec<Candidate>> {
        ensure_role(principal, &[Role::Recruiter])?;
        self.store.list_recent_candidates(RECENT_CANDIDATES).await
    }

    pub async fn my_profile(&self, principal: &Principal) -> Result<Candidate> {
        ensure_role(principal, &[Role::Candidate])?;
        self.store
            .find_candidate_by_user(principal.user_id)
            .await?
            .ok_or_else(|| Error::NotFound("Candidate profile not found.".to_string()))
    }

    pub async fn update_cv(&self, principal: &Principal, file: UploadedFile) -> Result<Candidate> {
        let mut candidate = self.my_profile(principal).await?;
        let path = self.files.store(FileCategory::Cvs, &file).await?;
        self.store.update_candidate_cv(candidate.id, &path).await?;
        tracing::info!(candidate_id = %candidate.id, "candidate CV replaced");
        candidate.cv_path = Some(path);
        Ok(candidate)
    }

    /// Builds a candidate together with its linked login account.
    fn provision(
        &self,
        principal: &Principal,
        first_name: String,
        last_name: String,
        email: String,
        phone: Option<String>,
        cv_path: Option<String>,
    ) -> Result<(User, Candidate)> {
        let created_at = now();
        let password = default_candidate_password(&first_name, &last_name);
        let user = User {
            id: Uuid::new_v4(),
            first_name: first_name.clone(),
            last_name: last_name.clone(),
            email: email.clone(),
            password_hash: hash_password(&password)?,
            role: Role::Candidate,
            created_at,
        };
        let candidate = Candidate {
            id: Uuid::new_v4(),
            user_id: Some(user.id),
            first_name,
            last_name,
            email,
            phone,
            cv_path,
            created_by_user_id: principal.user_id,
            created_at,
        };
        Ok((user, candidate))
    }
}
