use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use uuid::Uuid;

pub const OFFER_LETTER: &str = "Offer Letter";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "Pending",
            VerificationStatus::Verified => "Verified",
            VerificationStatus::Rejected => "Rejected",
        }
    }

    pub fn from_decision(is_verified: bool) -> Self {
        if is_verified {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Rejected
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(VerificationStatus::Pending),
            "verified" => Ok(VerificationStatus::Verified),
            "rejected" => Ok(VerificationStatus::Rejected),
            other => Err(format!("Unknown verification status: {}", other)),
        }
    }
}

impl TryFrom<String> for VerificationStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CandidateDocument {
    pub id: Uuid,
    pub application_id: Uuid,
    pub document_type: String,
    pub file_path: String,
    #[sqlx(try_from = "String")]
    pub verification_status: VerificationStatus,
    pub uploaded_by_user_id: Uuid,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DocumentView {
    pub id: Uuid,
    pub application_id: Uuid,
    pub document_type: String,
    pub file_path: String,
    #[sqlx(try_from = "String")]
    pub verification_status: VerificationStatus,
    pub uploaded_by_user_id: Uuid,
    pub uploader_name: String,
    pub uploaded_at: DateTime<Utc>,
}
