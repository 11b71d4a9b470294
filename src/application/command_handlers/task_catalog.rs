// Task catalog command handler.
//
// Responsibilities
// - Create and update tasks under a project.
// - Run the task number rules against the owning project's number on both paths.
// - Normalize billing fields before the task reaches the store.
//
// Boundaries
// - Uniqueness of (project, number) is the store's job; it answers with a conflict.

use crate::application::errors::ApplicationError;
use crate::core::ports::{ProjectDirectory, TaskDirectory};
use crate::core::project::{BillingMode, Project, Task};
use crate::core::task_number::validate_task_number;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub number: String,
    #[serde(default)]
    pub billing_mode: BillingMode,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub unit_name: Option<String>,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskChanges {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub billing_mode: Option<BillingMode>,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub unit_name: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

pub struct TaskCatalog<TProjects, TTasks>
where
    TProjects: ProjectDirectory + 'static,
    TTasks: TaskDirectory + 'static,
{
    projects: Arc<TProjects>,
    tasks: Arc<TTasks>,
}

impl<TProjects, TTasks> TaskCatalog<TProjects, TTasks>
where
    TProjects: ProjectDirectory + 'static,
    TTasks: TaskDirectory + 'static,
{
    pub fn new(projects: Arc<TProjects>, tasks: Arc<TTasks>) -> Self {
        Self { projects, tasks }
    }

    pub async fn create_task(&self, project_id: &str, new_task: NewTask) -> Result<Task, ApplicationError> {
        let project = self.project(project_id).await?;
        let task = Task {
            id: Uuid::now_v7().to_string(),
            project_id: project.id.clone(),
            title: new_task.title,
            description: new_task.description,
            number: new_task.number.trim().to_string(),
            billing_mode: new_task.billing_mode,
            unit_price: new_task.unit_price,
            unit_name: new_task.unit_name,
            active: true,
        };
        let saved = self.validate_and_save(&project, task).await?;
        tracing::info!(task_id = %saved.id, project_id, number = %saved.number, "task created");
        Ok(saved)
    }

    pub async fn update_task(&self, task_id: &str, changes: TaskChanges) -> Result<Task, ApplicationError> {
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("task {task_id}")))?;
        let project = self.project(&task.project_id).await?;

        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = Some(description);
        }
        if let Some(number) = changes.number {
            task.number = number.trim().to_string();
        }
        if let Some(billing_mode) = changes.billing_mode {
            task.billing_mode = billing_mode;
        }
        if let Some(unit_price) = changes.unit_price {
            task.unit_price = Some(unit_price);
        }
        if let Some(unit_name) = changes.unit_name {
            task.unit_name = Some(unit_name);
        }
        if let Some(active) = changes.active {
            task.active = active;
        }

        let saved = self.validate_and_save(&project, task).await?;
        tracing::info!(task_id, number = %saved.number, "task updated");
        Ok(saved)
    }

    async fn project(&self, project_id: &str) -> Result<Project, ApplicationError> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("project {project_id}")))
    }

    async fn validate_and_save(&self, project: &Project, task: Task) -> Result<Task, ApplicationError> {
        validate_task_number(&project.number, &task.number).inspect_err(|reason| {
            tracing::warn!(%reason, project_number = %project.number, "task number refused");
        })?;
        let task = task.normalize_billing()?;
        self.tasks.save(task).await.map_err(ApplicationError::from)
    }
}
