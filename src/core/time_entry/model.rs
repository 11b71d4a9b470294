// A single unit of reported work and its review status.
//
// Invariants
// - total_hours, when present, is strictly positive.
// - Unit billed entries carry quantity instead of total_hours.
// - approved_by and approved_at are written together, only by the approve transition.
// - Status never returns to Submitted once reviewed.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryStatus {
    Submitted,
    Approved,
    Rejected,
}
crate::string_enum!(EntryStatus, "status", {
    Submitted => "SUBMITTED",
    Approved => "APPROVED",
    Rejected => "REJECTED",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: String,
    pub user_id: String,
    pub project_id: Option<String>,
    pub subproject_id: Option<String>,
    pub task_id: Option<String>,
    pub date: NaiveDate,
    pub total_hours: Option<Decimal>,
    pub quantity: Option<Decimal>,
    pub description: Option<String>,
    pub status: EntryStatus,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimeEntry {
    /// Hours counted by the cost formula; unit billed entries count as zero.
    pub fn billable_hours(&self) -> Decimal {
        self.total_hours.unwrap_or(Decimal::ZERO)
    }
}
