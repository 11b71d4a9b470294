// Pure decision function for entry creation.
//
// Purpose
// - Validate the command against the referenced task and produce the new entry on success.
//
// Responsibilities
// - Enforce rules: user, date and (project or task) are mandatory.
// - A given project must be the task's own project. Without one, the task's project is recorded.
// - Hourly task or no task: total hours required and positive, quantity cleared.
// - Unit task: quantity required and positive, total hours cleared.
// - New entries start Submitted with no approver.
// - Never perform input or output.

use crate::core::project::{BillingMode, Task};
use crate::core::time_entry::{
    decider::create::command::CreateTimeEntry,
    legacy_hours::hours_between,
    model::{EntryStatus, TimeEntry},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("user id is required")]
    MissingUserId,

    #[error("date is required")]
    MissingDate,

    #[error("project id or task id is required")]
    MissingProjectOrTask,

    #[error("total hours is required")]
    MissingHours,

    #[error("total hours must be positive")]
    NonPositiveHours,

    #[error("hours to must be after hours from")]
    InvalidHoursRange,

    #[error("quantity is required for unit billed tasks")]
    MissingQuantity,

    #[error("quantity must be positive")]
    NonPositiveQuantity,

    #[error("project {given} does not own task {task_id}, which belongs to project {owner}")]
    ProjectTaskMismatch {
        given: String,
        task_id: String,
        owner: String,
    },
}

pub fn decide_create(
    time_entry_id: String,
    command: CreateTimeEntry,
    task: Option<&Task>,
    now: DateTime<Utc>,
) -> Result<TimeEntry, DecideError> {
    let user_id = command
        .user_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .ok_or(DecideError::MissingUserId)?;
    let date = command.date.ok_or(DecideError::MissingDate)?;
    if command.project_id.is_none() && command.task_id.is_none() {
        return Err(DecideError::MissingProjectOrTask);
    }

    let (total_hours, quantity) = match task.map(|t| t.billing_mode) {
        Some(BillingMode::Unit) => (None, Some(positive_quantity(command.quantity)?)),
        Some(BillingMode::Hourly) | None => (Some(positive_hours(&command)?), None),
    };
    let project_id = match (command.project_id, task) {
        (Some(given), Some(task)) if given != task.project_id => {
            return Err(DecideError::ProjectTaskMismatch {
                given,
                task_id: task.id.clone(),
                owner: task.project_id.clone(),
            });
        }
        (Some(given), _) => Some(given),
        (None, task) => task.map(|t| t.project_id.clone()),
    };

    Ok(TimeEntry {
        id: time_entry_id,
        user_id,
        project_id,
        subproject_id: command.subproject_id,
        task_id: command.task_id,
        date,
        total_hours,
        quantity,
        description: command.description,
        status: EntryStatus::Submitted,
        approved_by: None,
        approved_at: None,
        created_at: now,
        updated_at: now,
    })
}

fn positive_hours(command: &CreateTimeEntry) -> Result<Decimal, DecideError> {
    let hours = match (command.total_hours, command.hours_from, command.hours_to) {
        (Some(hours), _, _) => hours,
        (None, Some(from), Some(to)) => {
            hours_between(from, to).ok_or(DecideError::InvalidHoursRange)?
        }
        _ => return Err(DecideError::MissingHours),
    };
    if hours <= Decimal::ZERO {
        return Err(DecideError::NonPositiveHours);
    }
    Ok(hours)
}

fn positive_quantity(quantity: Option<Decimal>) -> Result<Decimal, DecideError> {
    let quantity = quantity.ok_or(DecideError::MissingQuantity)?;
    if quantity <= Decimal::ZERO {
        return Err(DecideError::NonPositiveQuantity);
    }
    Ok(quantity)
}
