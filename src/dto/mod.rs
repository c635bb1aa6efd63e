pub mod application_dto;
pub mod auth_dto;
pub mod candidate_dto;
pub mod common_dto;
pub mod document_dto;
pub mod interview_dto;
pub mod job_dto;
