use crate::core::cost::calculator::CostError;
use crate::core::parse::ParseEnumError;
use crate::core::ports::StoreError;
use crate::core::project::BillingError;
use crate::core::task_number::TaskNumberError;
use crate::core::time_entry::decider::create::decide::DecideError;
use crate::core::time_entry::transitions::PatchError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("unexpected: {0}")]
    Unexpected(String),
}

impl ApplicationError {
    /// Stable tag that lets callers tell user-fixable input apart from system faults.
    pub fn kind(&self) -> &'static str {
        match self {
            ApplicationError::Validation(_) => "validation_error",
            ApplicationError::NotFound(_) => "not_found",
            ApplicationError::Conflict(_) => "conflict",
            ApplicationError::Forbidden(_) => "forbidden",
            ApplicationError::Unexpected(_) => "internal_error",
        }
    }
}

impl From<StoreError> for ApplicationError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Conflict(rule) => ApplicationError::Conflict(rule),
            StoreError::Backend(message) => ApplicationError::Unexpected(message),
        }
    }
}

impl From<DecideError> for ApplicationError {
    fn from(error: DecideError) -> Self {
        ApplicationError::Validation(error.to_string())
    }
}

impl From<PatchError> for ApplicationError {
    fn from(error: PatchError) -> Self {
        ApplicationError::Validation(error.to_string())
    }
}

impl From<TaskNumberError> for ApplicationError {
    fn from(error: TaskNumberError) -> Self {
        ApplicationError::Validation(error.to_string())
    }
}

impl From<BillingError> for ApplicationError {
    fn from(error: BillingError) -> Self {
        ApplicationError::Validation(error.to_string())
    }
}

impl From<CostError> for ApplicationError {
    fn from(error: CostError) -> Self {
        ApplicationError::Validation(error.to_string())
    }
}

impl From<ParseEnumError> for ApplicationError {
    fn from(error: ParseEnumError) -> Self {
        ApplicationError::Validation(error.to_string())
    }
}
