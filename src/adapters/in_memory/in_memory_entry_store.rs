// In memory implementation of the EntryStore port.
//
// Purpose
// - Exercise handlers and the HTTP surface without a database.
//
// Responsibilities
// - Keep entries in insertion order so listings come back in the order they were reported.
// - Replace an entry in place when it is saved again under the same id.

use crate::core::ports::{EntryStore, StoreError};
use crate::core::time_entry::model::TimeEntry;
use chrono::Datelike;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryEntryStore {
    entries: RwLock<Vec<TimeEntry>>,
    is_offline: bool,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Backend("Entry store offline".into()));
        }
        Ok(())
    }

    async fn filtered(&self, keep: impl Fn(&TimeEntry) -> bool) -> Result<Vec<TimeEntry>, StoreError> {
        self.ensure_online()?;
        let guard = self.entries.read().await;
        Ok(guard.iter().filter(|entry| keep(entry)).cloned().collect())
    }
}

#[async_trait::async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn save(&self, entry: TimeEntry) -> Result<TimeEntry, StoreError> {
        self.ensure_online()?;
        let mut guard = self.entries.write().await;
        match guard.iter_mut().find(|stored| stored.id == entry.id) {
            Some(stored) => *stored = entry.clone(),
            None => guard.push(entry.clone()),
        }
        Ok(entry)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TimeEntry>, StoreError> {
        self.ensure_online()?;
        let guard = self.entries.read().await;
        Ok(guard.iter().find(|entry| entry.id == id).cloned())
    }

    async fn find_by_user_and_period(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        self.filtered(|entry| {
            entry.user_id == user_id && entry.date.year() == year && entry.date.month() == month
        })
        .await
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<TimeEntry>, StoreError> {
        self.filtered(|entry| entry.user_id == user_id).await
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool, StoreError> {
        self.ensure_online()?;
        let guard = self.entries.read().await;
        Ok(guard.iter().any(|entry| entry.id == id))
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut guard = self.entries.write().await;
        guard.retain(|entry| entry.id != id);
        Ok(())
    }
}
