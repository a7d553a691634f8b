//! Backend strategy contract shared by the mock store and the REST client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TaskboardResult;
use crate::model::project::{NewProject, Project, ProjectPatch};
use crate::model::task::{NewTask, Task, TaskPatch, TaskStatus};

/// Project list envelope, matching the REST `GET /projects` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
    pub total: usize,
}

impl From<Vec<Project>> for ProjectsResponse {
    fn from(projects: Vec<Project>) -> Self {
        let total = projects.len();
        Self { projects, total }
    }
}

/// Implementation behind [`crate::api::TaskboardApi`].
#[async_trait]
pub trait TaskboardBackend: Send + Sync {
    /// Short backend name for log lines.
    fn name(&self) -> &'static str;

    async fn list_projects(&self) -> TaskboardResult<Vec<Project>>;
    async fn get_project(&self, id: &str) -> TaskboardResult<Project>;
    async fn create_project(&self, input: NewProject) -> TaskboardResult<Project>;
    async fn update_project(&self, id: &str, patch: ProjectPatch) -> TaskboardResult<Project>;
    /// Also removes every task owned by the project.
    async fn delete_project(&self, id: &str) -> TaskboardResult<()>;

    async fn list_tasks(&self, project_id: &str) -> TaskboardResult<Vec<Task>>;
    async fn get_task(&self, id: &str) -> TaskboardResult<Task>;
    async fn create_task(&self, input: NewTask) -> TaskboardResult<Task>;
    async fn update_task(&self, id: &str, patch: TaskPatch) -> TaskboardResult<Task>;
    async fn delete_task(&self, id: &str) -> TaskboardResult<()>;
    async fn update_task_status(&self, id: &str, status: TaskStatus) -> TaskboardResult<Task>;
}
