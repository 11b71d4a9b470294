// Time entry command handler orchestrates the write flow.
//
// Responsibilities
// - Resolve referenced tasks and projects through the directory ports.
// - Call the pure decider or transition with the current time.
// - Persist the result through the entry store. Last write wins; nothing is locked across calls.
//
// Notes
// - approve, reject and update re-stamp timestamps, so they are not safe to blindly retry.

use crate::application::errors::ApplicationError;
use crate::application::identity::Identity;
use crate::application::paging::{Page, PageRequest};
use crate::core::ports::{EntryStore, ProjectDirectory, TaskDirectory, UserDirectory};
use crate::core::time_entry::decider::create::{command::CreateTimeEntry, decide::decide_create};
use crate::core::time_entry::model::TimeEntry;
use crate::core::time_entry::transitions::{TimeEntryPatch, apply_patch, approve, reject};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub fn validate_month(month: u32) -> Result<(), ApplicationError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ApplicationError::Validation(format!(
            "month must be between 1 and 12, got {month}"
        )))
    }
}

pub struct TimeEntryLifecycle<TEntryStore, TUsers, TProjects, TTasks>
where
    TEntryStore: EntryStore + 'static,
    TUsers: UserDirectory + 'static,
    TProjects: ProjectDirectory + 'static,
    TTasks: TaskDirectory + 'static,
{
    entries: Arc<TEntryStore>,
    users: Arc<TUsers>,
    projects: Arc<TProjects>,
    tasks: Arc<TTasks>,
}

impl<TEntryStore, TUsers, TProjects, TTasks> TimeEntryLifecycle<TEntryStore, TUsers, TProjects, TTasks>
where
    TEntryStore: EntryStore + 'static,
    TUsers: UserDirectory + 'static,
    TProjects: ProjectDirectory + 'static,
    TTasks: TaskDirectory + 'static,
{
    pub fn new(
        entries: Arc<TEntryStore>,
        users: Arc<TUsers>,
        projects: Arc<TProjects>,
        tasks: Arc<TTasks>,
    ) -> Self {
        Self {
            entries,
            users,
            projects,
            tasks,
        }
    }

    pub async fn create(&self, command: CreateTimeEntry) -> Result<TimeEntry, ApplicationError> {
        let task = match command.task_id.as_deref() {
            Some(task_id) => Some(
                self.tasks
                    .find_by_id(task_id)
                    .await?
                    .ok_or_else(|| ApplicationError::NotFound(format!("task {task_id}")))?,
            ),
            None => None,
        };
        if let (None, Some(project_id)) = (&task, command.project_id.as_deref()) {
            if self.projects.find_by_id(project_id).await?.is_none() {
                return Err(ApplicationError::NotFound(format!("project {project_id}")));
            }
        }

        let time_entry_id = Uuid::now_v7().to_string();
        let entry = decide_create(time_entry_id, command, task.as_ref(), Utc::now()).inspect_err(|reason| {
            tracing::warn!(%reason, "time entry rejected at creation");
        })?;
        let saved = self.entries.save(entry).await?;
        tracing::info!(time_entry_id = %saved.id, user_id = %saved.user_id, "time entry submitted");
        Ok(saved)
    }

    pub async fn approve(
        &self,
        identity: &Identity,
        id: &str,
        approver_id: &str,
    ) -> Result<TimeEntry, ApplicationError> {
        identity.require_reviewer()?;
        let entry = self.load(id).await?;
        let approved = self.entries.save(approve(entry, approver_id, Utc::now())).await?;
        tracing::info!(time_entry_id = id, approver_id, reviewer = %identity.username, "time entry approved");
        Ok(approved)
    }

    /// Approves on behalf of the acting identity, recording its user id as the approver.
    pub async fn approve_as_current_user(
        &self,
        identity: &Identity,
        id: &str,
    ) -> Result<TimeEntry, ApplicationError> {
        identity.require_reviewer()?;
        let approver = self.current_user_id(identity).await?;
        self.approve(identity, id, &approver).await
    }

    pub async fn reject(&self, identity: &Identity, id: &str) -> Result<TimeEntry, ApplicationError> {
        identity.require_reviewer()?;
        let entry = self.load(id).await?;
        let rejected = self.entries.save(reject(entry, Utc::now())).await?;
        tracing::info!(time_entry_id = id, reviewer = %identity.username, "time entry rejected");
        Ok(rejected)
    }

    pub async fn update(&self, id: &str, patch: TimeEntryPatch) -> Result<TimeEntry, ApplicationError> {
        let entry = self.load(id).await?;
        let updated = apply_patch(entry, patch, Utc::now())?;
        let saved = self.entries.save(updated).await?;
        tracing::info!(time_entry_id = id, "time entry updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApplicationError> {
        if !self.entries.exists_by_id(id).await? {
            return Err(not_found(id));
        }
        self.entries.delete_by_id(id).await?;
        tracing::info!(time_entry_id = id, "time entry deleted");
        Ok(())
    }

    /// Filters to one calendar month only when both month and year are given.
    pub async fn list_for_user(
        &self,
        user_id: &str,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<Vec<TimeEntry>, ApplicationError> {
        let entries = match (month, year) {
            (Some(month), Some(year)) => {
                validate_month(month)?;
                self.entries.find_by_user_and_period(user_id, year, month).await?
            }
            _ => self.entries.find_by_user(user_id).await?,
        };
        tracing::debug!(user_id, count = entries.len(), "listed time entries");
        Ok(entries)
    }

    /// Every entry of the user, one page at a time, in store order.
    pub async fn list_page_for_user(
        &self,
        user_id: &str,
        request: PageRequest,
    ) -> Result<Page<TimeEntry>, ApplicationError> {
        let page = request.slice(self.entries.find_by_user(user_id).await?)?;
        tracing::debug!(user_id, page = page.page, total = page.total, "paged time entries");
        Ok(page)
    }

    pub async fn list_for_current_user(
        &self,
        identity: &Identity,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<Vec<TimeEntry>, ApplicationError> {
        let user_id = self.current_user_id(identity).await?;
        self.list_for_user(&user_id, month, year).await
    }

    async fn current_user_id(&self, identity: &Identity) -> Result<String, ApplicationError> {
        self.users
            .find_by_username(&identity.username)
            .await?
            .map(|user| user.id)
            .ok_or_else(|| ApplicationError::NotFound(format!("user {}", identity.username)))
    }

    async fn load(&self, id: &str) -> Result<TimeEntry, ApplicationError> {
        self.entries.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }
}

fn not_found(id: &str) -> ApplicationError {
    ApplicationError::NotFound(format!("time entry {id}"))
}
