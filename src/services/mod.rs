pub mod application_service;
pub mod auth_service;
pub mod candidate_import;
pub mod candidate_service;
pub mod catalog_service;
pub mod document_service;
pub mod file_storage;
pub mod interview_service;
pub mod workflow;

use crate::error::{Error, Result};
use crate::models::user::{Principal, Role};

pub(crate) fn ensure_role(principal: &Principal, allowed: &[Role]) -> Result<()> {
    if principal.has_role(allowed) {
        Ok(())
    } else {
        Err(Error::Forbidden("forbidden".to_string()))
    }
}
