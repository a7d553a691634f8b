//! Uniform call surface used by UI and cache layers.

use log::{debug, info};
use std::sync::Arc;

use crate::api::backend::{ProjectsResponse, TaskboardBackend};
use crate::api::mock::MockBackend;
use crate::api::remote::RemoteBackend;
use crate::config::{BackendConfig, ConfigError};
use crate::error::TaskboardResult;
use crate::model::project::{NewProject, Project, ProjectPatch};
use crate::model::task::{NewTask, Task, TaskPatch, TaskStatus};
use crate::query::{query, Page, Pagination, ProjectFilter, TaskFilter};
use crate::store::EntityStore;

/// Async project/task API over a statically selected backend.
///
/// Cheap to clone; clones share the same backend.
#[derive(Clone)]
pub struct TaskboardApi {
    backend: Arc<dyn TaskboardBackend>,
}

impl TaskboardApi {
    /// Builds the backend named by `config`.
    pub fn from_config(config: &BackendConfig) -> Result<Self, ConfigError> {
        let api = match config {
            BackendConfig::Mock(mock) => Self::mock(EntityStore::new(mock.store_options())),
            BackendConfig::Remote(remote) => Self::with_backend(Arc::new(RemoteBackend::new(remote)?)),
        };
        info!(
            "event=api_init module=api status=ok backend={}",
            api.backend_name()
        );
        Ok(api)
    }

    pub fn mock(store: EntityStore) -> Self {
        Self::with_backend(Arc::new(MockBackend::new(store)))
    }

    pub fn with_backend(backend: Arc<dyn TaskboardBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub async fn list_projects(&self) -> TaskboardResult<Vec<Project>> {
        self.backend.list_projects().await
    }

    /// Lists projects wrapped in the `{ projects, total }` envelope.
    pub async fn get_projects(&self) -> TaskboardResult<ProjectsResponse> {
        self.backend.list_projects().await.map(ProjectsResponse::from)
    }

    pub async fn get_project(&self, id: &str) -> TaskboardResult<Project> {
        self.backend.get_project(id).await
    }

    pub async fn create_project(&self, input: NewProject) -> TaskboardResult<Project> {
        self.backend.create_project(input).await
    }

    pub async fn update_project(&self, id: &str, patch: ProjectPatch) -> TaskboardResult<Project> {
        self.backend.update_project(id, patch).await
    }

    pub async fn delete_project(&self, id: &str) -> TaskboardResult<()> {
        self.backend.delete_project(id).await
    }

    pub async fn list_tasks(&self, project_id: &str) -> TaskboardResult<Vec<Task>> {
        self.backend.list_tasks(project_id).await
    }

    pub async fn get_task(&self, id: &str) -> TaskboardResult<Task> {
        self.backend.get_task(id).await
    }

    pub async fn create_task(&self, input: NewTask) -> TaskboardResult<Task> {
        self.backend.create_task(input).await
    }

    pub async fn update_task(&self, id: &str, patch: TaskPatch) -> TaskboardResult<Task> {
        self.backend.update_task(id, patch).await
    }

    pub async fn delete_task(&self, id: &str) -> TaskboardResult<()> {
        self.backend.delete_task(id).await
    }

    pub async fn update_task_status(&self, id: &str, status: TaskStatus) -> TaskboardResult<Task> {
        self.backend.update_task_status(id, status).await
    }

    /// Filters and pages the project list.
    pub async fn query_projects(
        &self,
        filter: &ProjectFilter,
        pagination: Pagination,
    ) -> TaskboardResult<Page<Project>> {
        let projects = self.backend.list_projects().await?;
        let page = query(&projects, filter, pagination);
        debug!(
            "event=project_query module=api status=ok total={} page={} page_size={}",
            page.total, page.page, page.page_size
        );
        Ok(page)
    }

    /// Filters and pages the tasks of one project.
    pub async fn query_tasks(
        &self,
        project_id: &str,
        filter: &TaskFilter,
        pagination: Pagination,
    ) -> TaskboardResult<Page<Task>> {
        let tasks = self.backend.list_tasks(project_id).await?;
        let page = query(&tasks, filter, pagination);
        debug!(
            "event=task_query module=api status=ok project_id={} total={} page={}",
            project_id, page.total, page.page
        );
        Ok(page)
    }
}
