// Command data type for creating a time entry.
//
// Purpose
// - Express user intent to report work on a project or task for a given day.
//
// Responsibilities
// - Carry input exactly as received, including missing fields, for the decider to validate.
// - Be independent of transport layer details (not tied to HTTP).
//
// Notes
// - hours_from/hours_to is the legacy range shape; total_hours wins when both are given.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeEntry {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub subproject_id: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub total_hours: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub hours_from: Option<NaiveTime>,
    #[serde(default)]
    pub hours_to: Option<NaiveTime>,
    #[serde(default)]
    pub description: Option<String>,
}
