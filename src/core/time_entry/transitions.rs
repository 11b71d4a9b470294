// Review transitions and field edits for a stored entry.
//
// State machine
// - Submitted -> Approved (approve), Submitted -> Rejected (reject)
// - Approved -> Rejected (reject overrides an approval, approver fields are kept)
// - Approved -> Approved re-stamps approver and time; Rejected -> Rejected is allowed
// - Nothing returns to Submitted. A rejected entry is resubmitted as a new entry.
//
// Boundaries
// - Pure. The handler loads, applies, and persists.

use crate::core::time_entry::model::{EntryStatus, TimeEntry};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Editable fields. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryPatch {
    #[serde(default)]
    pub total_hours: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PatchError {
    #[error("total hours must be positive")]
    NonPositiveHours,
}

pub fn approve(mut entry: TimeEntry, approver_id: &str, now: DateTime<Utc>) -> TimeEntry {
    entry.status = EntryStatus::Approved;
    entry.approved_by = Some(approver_id.to_string());
    entry.approved_at = Some(now);
    entry.updated_at = now;
    entry
}

pub fn reject(mut entry: TimeEntry, now: DateTime<Utc>) -> TimeEntry {
    entry.status = EntryStatus::Rejected;
    entry.updated_at = now;
    entry
}

pub fn apply_patch(
    mut entry: TimeEntry,
    patch: TimeEntryPatch,
    now: DateTime<Utc>,
) -> Result<TimeEntry, PatchError> {
    if let Some(hours) = patch.total_hours {
        if hours <= Decimal::ZERO {
            return Err(PatchError::NonPositiveHours);
        }
        entry.total_hours = Some(hours);
    }
    if let Some(quantity) = patch.quantity {
        entry.quantity = Some(quantity);
    }
    if let Some(description) = patch.description {
        entry.description = Some(description);
    }
    entry.updated_at = now;
    Ok(entry)
}
