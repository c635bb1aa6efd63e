pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::database::Store;
use crate::services::{
    application_service::ApplicationService, auth_service::AuthService,
    candidate_service::CandidateService, catalog_service::CatalogService,
    document_service::DocumentService, file_storage::FileStorage,
    interview_service::InterviewService,
};
use crate::utils::token::TokenKeys;

#[derive(Clone)]
pub struct AppState {
    pub tokens: TokenKeys,
    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub candidate_service: CandidateService,
    pub application_service: ApplicationService,
    pub interview_service: InterviewService,
    pub document_service: DocumentService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: &Config) -> crate::error::Result<Self> {
        let tokens = TokenKeys::new(
            &config.jwt_secret,
            &config.jwt_issuer,
            &config.jwt_audience,
            config.token_ttl_hours,
        )?;
        let files = FileStorage::new(&config.uploads_dir);
        let policy = config.transition_policy;

        let auth_service = AuthService::new(store.clone(), tokens.clone());
        let catalog_service = CatalogService::new(store.clone());
        let candidate_service = CandidateService::new(store.clone(), files.clone());
        let application_service = ApplicationService::new(store.clone(), policy);
        let interview_service = InterviewService::new(store.clone(), policy);
        let document_service = DocumentService::new(store.clone(), files, policy);

        Ok(Self {
            tokens,
            auth_service,
            catalog_service,
            candidate_service,
            application_service,
            interview_service,
            document_service,
        })
    }
}
