// In memory implementation of the user, project and task directories.
//
// Purpose
// - Stand in for the surrounding user and project management during tests and local runs.
//
// Responsibilities
// - Resolve users by id or username, projects and tasks by id.
// - Enforce the unique (project, task number) rule when tasks are saved.

use crate::core::ports::{ProjectDirectory, StoreError, TaskDirectory, UserDirectory};
use crate::core::project::{Project, Task};
use crate::core::user::User;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryDirectory {
    users: HashMap<String, User>,
    projects: HashMap<String, Project>,
    tasks: RwLock<Vec<Task>>,
    is_offline: bool,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id.clone(), user);
        self
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.insert(project.id.clone(), project);
        self
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.get_mut().push(task);
        self
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Backend("Directory offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        self.ensure_online()?;
        Ok(self.users.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.ensure_online()?;
        Ok(self
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }
}

#[async_trait::async_trait]
impl ProjectDirectory for InMemoryDirectory {
    async fn find_by_id(&self, id: &str) -> Result<Option<Project>, StoreError> {
        self.ensure_online()?;
        Ok(self.projects.get(id).cloned())
    }
}

#[async_trait::async_trait]
impl TaskDirectory for InMemoryDirectory {
    async fn find_by_id(&self, id: &str) -> Result<Option<Task>, StoreError> {
        self.ensure_online()?;
        let guard = self.tasks.read().await;
        Ok(guard.iter().find(|task| task.id == id).cloned())
    }

    async fn save(&self, task: Task) -> Result<Task, StoreError> {
        self.ensure_online()?;
        let mut guard = self.tasks.write().await;
        let taken = guard.iter().any(|stored| {
            stored.id != task.id && stored.project_id == task.project_id && stored.number == task.number
        });
        if taken {
            return Err(StoreError::Conflict(format!(
                "task number {} already exists in project {}",
                task.number, task.project_id
            )));
        }
        match guard.iter_mut().find(|stored| stored.id == task.id) {
            Some(stored) => *stored = task.clone(),
            None => guard.push(task.clone()),
        }
        Ok(task)
    }
}
