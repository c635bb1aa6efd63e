use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::application::ApplicationStatus;
use crate::models::document::VerificationStatus;

/// How strictly application and document state changes are checked.
///
/// `Permissive` accepts any parsed status, finalizes from any status, lets a
/// document be re-verified and always applies feedback cascades. `Enforced`
/// restricts all of these to the edges of [`ApplicationStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Enforced,
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(TransitionPolicy::Permissive),
            "enforced" | "strict" => Ok(TransitionPolicy::Enforced),
            other => Err(format!(
                "expected `permissive` or `enforced`, got `{}`",
                other
            )),
        }
    }
}

impl TransitionPolicy {
    pub fn check_status_update(
        &self,
        current: ApplicationStatus,
        next: ApplicationStatus,
    ) -> Result<()> {
        match self {
            TransitionPolicy::Permissive => Ok(()),
            TransitionPolicy::Enforced if current.can_transition_to(next) => Ok(()),
            TransitionPolicy::Enforced if current.is_terminal() => Err(Error::InvalidTransition(
                format!("Application is already {} and cannot change.", current),
            )),
            TransitionPolicy::Enforced => Err(Error::InvalidTransition(format!(
                "Cannot move an application from {} to {}.",
                current, next
            ))),
        }
    }

    pub fn check_schedule(&self, current: ApplicationStatus) -> Result<()> {
        match (self, current) {
            (TransitionPolicy::Permissive, _) => Ok(()),
            (_, ApplicationStatus::Shortlisted | ApplicationStatus::Interview) => Ok(()),
            _ => Err(Error::InvalidTransition(format!(
                "Cannot schedule an interview for an application in status {}.",
                current
            ))),
        }
    }

    pub fn check_finalize(&self, current: ApplicationStatus) -> Result<()> {
        self.check_status_update(current, ApplicationStatus::Hired)
            .map_err(|_| {
                Error::InvalidTransition(format!(
                    "Cannot finalize an application in status {}.",
                    current
                ))
            })
    }

    pub fn check_verification(&self, current: VerificationStatus) -> Result<()> {
        match (self, current) {
            (TransitionPolicy::Permissive, _) | (_, VerificationStatus::Pending) => Ok(()),
            _ => Err(Error::InvalidTransition(format!(
                "Document has already been {}.",
                current.as_str().to_lowercase()
            ))),
        }
    }

    /// Status a feedback cascade should write, if any.
    pub fn cascade(
        &self,
        current: ApplicationStatus,
        target: Option<ApplicationStatus>,
    ) -> Option<ApplicationStatus> {
        let target = target?;
        match self {
            TransitionPolicy::Permissive => Some(target),
            TransitionPolicy::Enforced => current.can_transition_to(target).then_some(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ApplicationStatus::*;

    #[test]
    fn permissive_accepts_anything() {
        let policy = TransitionPolicy::Permissive;
        assert!(policy.check_status_update(Hired, Applied).is_ok());
        assert!(policy.check_finalize(Rejected).is_ok());
        assert!(policy.check_schedule(Applied).is_ok());
        assert!(policy.check_verification(VerificationStatus::Verified).is_ok());
        assert_eq!(policy.cascade(Hired, Some(Rejected)), Some(Rejected));
    }

    #[test]
    fn enforced_follows_the_table() {
        let policy = TransitionPolicy::Enforced;
        assert!(policy.check_status_update(Applied, Shortlisted).is_ok());
        assert!(matches!(
            policy.check_status_update(Rejected, Shortlisted),
            Err(Error::InvalidTransition(msg)) if msg.contains("already Rejected")
        ));
        assert!(matches!(
            policy.check_status_update(Applied, Hired),
            Err(Error::InvalidTransition(msg)) if msg.contains("from Applied to Hired")
        ));
        assert!(policy.check_finalize(Offered).is_ok());
        assert!(policy.check_finalize(Applied).is_err());
        assert!(policy.check_schedule(Shortlisted).is_ok());
        assert!(policy.check_schedule(OnHold).is_err());
    }

    #[test]
    fn enforced_verification_is_one_shot() {
        let policy = TransitionPolicy::Enforced;
        assert!(policy.check_verification(VerificationStatus::Pending).is_ok());
        assert!(policy.check_verification(VerificationStatus::Rejected).is_err());
    }

    #[test]
    fn enforced_cascade_skips_illegal_edges() {
        let policy = TransitionPolicy::Enforced;
        assert_eq!(policy.cascade(Interview, Some(OnHold)), Some(OnHold));
        assert_eq!(policy.cascade(Hired, Some(Rejected)), None);
        assert_eq!(policy.cascade(Interview, None), None);
    }

    #[test]
    fn parses_from_config_values() {
        assert_eq!(
            "Enforced".parse::<TransitionPolicy>().unwrap(),
            TransitionPolicy::Enforced
        );
        assert!("lenient".parse::<TransitionPolicy>().is_err());
    }
}
