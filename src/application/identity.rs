// The authenticated caller, supplied by whoever terminated authentication.
//
// Purpose
// - Passed explicitly into every operation that depends on who is asking.
//   The core never authenticates and never reads ambient session state.

use crate::application::errors::ApplicationError;
use crate::core::user::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

impl Identity {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    pub fn require_reviewer(&self) -> Result<(), ApplicationError> {
        if self.role.can_review_entries() {
            Ok(())
        } else {
            Err(ApplicationError::Forbidden(format!(
                "{} may not review time entries",
                self.role
            )))
        }
    }
}

#[cfg(test)]
mod identity_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_let_a_manager_review() {
        assert_eq!(Identity::new("marek", Role::Manager).require_reviewer(), Ok(()));
    }

    #[rstest]
    fn it_should_forbid_an_employee_from_reviewing() {
        let result = Identity::new("anna", Role::Employee).require_reviewer();
        assert_eq!(
            result,
            Err(ApplicationError::Forbidden(
                "EMPLOYEE may not review time entries".into()
            ))
        );
    }
}
