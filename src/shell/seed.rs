// Start-up seed for the in memory directories.
//
// Shape
// - {"users": [...], "projects": [...], "tasks": [...]}, every list optional, camelCase fields.

use crate::adapters::in_memory::in_memory_directory::InMemoryDirectory;
use crate::core::project::{Project, Task};
use crate::core::user::User;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Seed {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading seed file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing seed file {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn into_directory(self) -> InMemoryDirectory {
        let directory = self
            .users
            .into_iter()
            .fold(InMemoryDirectory::new(), InMemoryDirectory::with_user);
        let directory = self
            .projects
            .into_iter()
            .fold(directory, InMemoryDirectory::with_project);
        self.tasks.into_iter().fold(directory, InMemoryDirectory::with_task)
    }
}
