// Task numbers are scoped by the first segment of their project number.
//
// Rules
// - Required prefix: project number up to (not including) its first '-', plus '-'.
//   Without a '-' (or with a leading one) the whole project number is used.
// - Candidate must be non-blank, start with the prefix, and carry a suffix of 1 to 5 characters.
//
// Boundaries
// - Pure. Runs identically for task creation and task update.

use thiserror::Error;

pub const MAX_SUFFIX_LEN: usize = 5;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskNumberError {
    #[error("task number is required")]
    Missing,

    #[error("task number must start with {required_prefix}")]
    WrongPrefix { required_prefix: String },

    #[error("task number suffix is required after {required_prefix}")]
    EmptySuffix { required_prefix: String },

    #[error("task number suffix must be at most 5 characters")]
    SuffixTooLong { suffix: String },
}

pub fn required_prefix(project_number: &str) -> String {
    let head = match project_number.find('-') {
        Some(index) if index > 0 => &project_number[..index],
        _ => project_number,
    };
    format!("{head}-")
}

pub fn validate_task_number(project_number: &str, candidate: &str) -> Result<(), TaskNumberError> {
    if candidate.trim().is_empty() {
        return Err(TaskNumberError::Missing);
    }
    let required_prefix = required_prefix(project_number);
    let Some(suffix) = candidate.strip_prefix(required_prefix.as_str()) else {
        return Err(TaskNumberError::WrongPrefix { required_prefix });
    };
    if suffix.is_empty() {
        return Err(TaskNumberError::EmptySuffix { required_prefix });
    }
    if suffix.chars().count() > MAX_SUFFIX_LEN {
        return Err(TaskNumberError::SuffixTooLong {
            suffix: suffix.to_string(),
        });
    }
    Ok(())
}
