use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::models::application::ApplicationStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "Scheduled",
            InterviewStatus::Completed => "Completed",
            InterviewStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Ok(InterviewStatus::Scheduled),
            "completed" => Ok(InterviewStatus::Completed),
            "cancelled" | "canceled" => Ok(InterviewStatus::Cancelled),
            other => Err(format!("Unknown interview status: {}", other)),
        }
    }
}

impl TryFrom<String> for InterviewStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Recommendation {
    Proceed,
    Hold,
    Reject,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Proceed => "Proceed",
            Recommendation::Hold => "Hold",
            Recommendation::Reject => "Reject",
        }
    }

    /// Application status a recommendation pushes the application into, if any.
    pub fn cascade_status(&self) -> Option<ApplicationStatus> {
        match self {
            Recommendation::Proceed => None,
            Recommendation::Hold => Some(ApplicationStatus::OnHold),
            Recommendation::Reject => Some(ApplicationStatus::Rejected),
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recommendation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proceed" => Ok(Recommendation::Proceed),
            "hold" => Ok(Recommendation::Hold),
            "reject" => Ok(Recommendation::Reject),
            other => Err(format!("Unknown recommendation: {}", other)),
        }
    }
}

impl TryFrom<String> for Recommendation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Interview {
    pub id: Uuid,
    pub application_id: Uuid,
    pub round_number: i32,
    pub interview_type: String,
    pub scheduled_at: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: InterviewStatus,
    pub created_at: DateTime<Utc>,
}

/// An interview joined with the candidate and job behind its application.
#[derive(Debug, Clone, FromRow)]
pub struct InterviewOverview {
    pub id: Uuid,
    pub application_id: Uuid,
    pub round_number: i32,
    pub interview_type: String,
    pub scheduled_at: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: InterviewStatus,
    pub candidate_name: String,
    pub candidate_cv_path: Option<String>,
    pub job_title: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct PanelMember {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl PanelMember {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct InterviewFeedback {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub interviewer_user_id: Uuid,
    pub rating: Option<i32>,
    pub comments: String,
    #[sqlx(try_from = "String")]
    pub recommendation: Recommendation,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct FeedbackView {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub round_number: i32,
    pub interviewer_user_id: Uuid,
    pub interviewer_name: String,
    pub rating: Option<i32>,
    pub comments: String,
    #[sqlx(try_from = "String")]
    pub recommendation: Recommendation,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_negative_recommendations_cascade() {
        assert_eq!(Recommendation::Proceed.cascade_status(), None);
        assert_eq!(
            Recommendation::Hold.cascade_status(),
            Some(ApplicationStatus::OnHold)
        );
        assert_eq!(
            Recommendation::Reject.cascade_status(),
            Some(ApplicationStatus::Rejected)
        );
    }
}
