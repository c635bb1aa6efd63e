use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Role {
    Recruiter,
    Candidate,
    Interviewer,
    Reviewer,
    #[serde(rename = "HR")]
    Hr,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Recruiter => "Recruiter",
            Role::Candidate => "Candidate",
            Role::Interviewer => "Interviewer",
            Role::Reviewer => "Reviewer",
            Role::Hr => "HR",
        }
    }

    /// Roles that may be chosen through self-registration.
    pub fn is_self_registrable(&self) -> bool {
        matches!(self, Role::Recruiter | Role::Interviewer | Role::Reviewer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recruiter" => Ok(Role::Recruiter),
            "candidate" => Ok(Role::Candidate),
            "interviewer" => Ok(Role::Interviewer),
            "reviewer" => Ok(Role::Reviewer),
            "hr" => Ok(Role::Hr),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The authenticated caller, decoded from the bearer token and passed into
/// every service operation that needs authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl Principal {
    pub fn has_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_ignores_case() {
        assert_eq!("hr".parse::<Role>().unwrap(), Role::Hr);
        assert_eq!("REVIEWER".parse::<Role>().unwrap(), Role::Reviewer);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn only_staff_roles_self_register() {
        assert!(Role::Recruiter.is_self_registrable());
        assert!(Role::Reviewer.is_self_registrable());
        assert!(!Role::Candidate.is_self_registrable());
        assert!(!Role::Hr.is_self_registrable());
    }
}
