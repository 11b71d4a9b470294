// Ports define what the core needs from the outside world, without implementing it.
//
// Purpose
// - Describe persistence and directory capabilities as traits (EntryStore, UserDirectory,
//   ProjectDirectory, TaskDirectory).
//
// Responsibilities
// - Keep the core independent of any database by coding against traits.
//
// Boundaries
// - No concrete input or output here. Adapters implement these traits in the adapters layer.
// - Calls may fail transiently. The core never retries; it surfaces the failure.
//
// Testing guidance
// - In memory implementations live in adapters/in_memory and can be toggled offline.

use crate::core::project::{Project, Task};
use crate::core::time_entry::model::TimeEntry;
use crate::core::user::User;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness rule was violated; the message names the rule.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Inserts a new entry or replaces the stored one with the same id.
    async fn save(&self, entry: TimeEntry) -> Result<TimeEntry, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<TimeEntry>, StoreError>;
    /// Entries dated within the calendar month, in insertion order.
    async fn find_by_user_and_period(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<TimeEntry>, StoreError>;
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<TimeEntry>, StoreError>;
    async fn exists_by_id(&self, id: &str) -> Result<bool, StoreError>;
    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Project>, StoreError>;
}

#[async_trait]
pub trait TaskDirectory: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Task>, StoreError>;
    /// Fails with `StoreError::Conflict` when another task of the same project has the number.
    async fn save(&self, task: Task) -> Result<Task, StoreError>;
}
