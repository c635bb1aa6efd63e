use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub enum ApplicationStatus {
    Applied,
    Screening,
    Shortlisted,
    #[serde(rename = "On Hold")]
    OnHold,
    Interview,
    Rejected,
    Offered,
    Hired,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 8] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Screening,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::OnHold,
        ApplicationStatus::Interview,
        ApplicationStatus::Rejected,
        ApplicationStatus::Offered,
        ApplicationStatus::Hired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Screening => "Screening",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::OnHold => "On Hold",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Offered => "Offered",
            ApplicationStatus::Hired => "Hired",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Rejected | ApplicationStatus::Hired)
    }

    /// Edges of the hiring workflow. Applied -> Screening and the manual
    /// Interview -> Offered step are recruiter bookkeeping moves.
    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (*self, next),
            (Applied, Screening)
                | (Applied | Screening, Shortlisted | OnHold | Rejected)
                | (OnHold, Shortlisted | Rejected)
                | (Shortlisted, Interview)
                | (Interview, Rejected | OnHold | Offered)
                | (Shortlisted | Interview | Offered, Hired)
        )
    }

    /// Statuses shown on the HR dashboard.
    pub fn hr_pipeline() -> Vec<ApplicationStatus> {
        vec![
            ApplicationStatus::Shortlisted,
            ApplicationStatus::Offered,
            ApplicationStatus::Hired,
            ApplicationStatus::OnHold,
        ]
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().replace(' ', "").to_ascii_lowercase() == normalized)
            .ok_or_else(|| format!("Invalid status value: {}", s))
    }
}

impl TryFrom<String> for ApplicationStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub joining_date: Option<NaiveDate>,
}

/// An application joined with the candidate and job it links.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationOverview {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub candidate_user_id: Option<Uuid>,
    pub candidate_first_name: String,
    pub candidate_last_name: String,
    pub candidate_email: String,
    pub candidate_cv_path: Option<String>,
    pub job_id: Uuid,
    pub job_title: String,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub joining_date: Option<NaiveDate>,
}

impl ApplicationOverview {
    pub fn candidate_name(&self) -> String {
        format!("{} {}", self.candidate_first_name, self.candidate_last_name)
    }
}

/// Row filter for application listings. Listings are newest applied first.
#[derive(Debug, Clone)]
pub enum ApplicationFilter {
    All,
    AssignedToReviewer(Uuid),
    Candidate(Uuid),
    Statuses(Vec<ApplicationStatus>),
}

#[derive(Debug, Clone, FromRow)]
pub struct ApplicationComment {
    pub id: Uuid,
    pub application_id: Uuid,
    pub user_id: Uuid,
    pub comment_text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CommentView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub author_name: String,
    pub comment_text: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::ApplicationStatus::*;
    use super::*;

    #[test]
    fn parses_display_and_legacy_spellings() {
        assert_eq!("On Hold".parse::<ApplicationStatus>().unwrap(), OnHold);
        assert_eq!("On-Hold".parse::<ApplicationStatus>().unwrap(), OnHold);
        assert_eq!("onhold".parse::<ApplicationStatus>().unwrap(), OnHold);
        assert_eq!("shortlisted".parse::<ApplicationStatus>().unwrap(), Shortlisted);
        assert!("Archived".parse::<ApplicationStatus>().is_err());
        assert!("".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn wire_name_matches_display() {
        let json = serde_json::to_string(&OnHold).unwrap();
        assert_eq!(json, "\"On Hold\"");
        for status in ApplicationStatus::ALL {
            assert_eq!(status.as_str().parse::<ApplicationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn reviewer_decisions_from_intake_states() {
        for from in [Applied, Screening] {
            assert!(from.can_transition_to(Shortlisted));
            assert!(from.can_transition_to(OnHold));
            assert!(from.can_transition_to(Rejected));
            assert!(!from.can_transition_to(Hired));
        }
        assert!(OnHold.can_transition_to(Shortlisted));
        assert!(OnHold.can_transition_to(Rejected));
        assert!(!OnHold.can_transition_to(Interview));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for from in [Rejected, Hired] {
            assert!(from.is_terminal());
            for to in ApplicationStatus::ALL {
                assert!(!from.can_transition_to(to), "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn hiring_only_after_shortlist() {
        assert!(Shortlisted.can_transition_to(Hired));
        assert!(Interview.can_transition_to(Hired));
        assert!(Offered.can_transition_to(Hired));
        assert!(!Applied.can_transition_to(Hired));
        assert!(!OnHold.can_transition_to(Hired));
    }
}
