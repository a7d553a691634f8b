//! Backend that serves every call from an [`EntityStore`].

use async_trait::async_trait;

use crate::api::backend::TaskboardBackend;
use crate::error::TaskboardResult;
use crate::model::project::{NewProject, Project, ProjectPatch};
use crate::model::task::{NewTask, Task, TaskPatch, TaskStatus};
use crate::store::EntityStore;

#[derive(Clone)]
pub struct MockBackend {
    store: EntityStore,
}

impl MockBackend {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    /// Handle to the backing store, shared with this backend.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }
}

#[async_trait]
impl TaskboardBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn list_projects(&self) -> TaskboardResult<Vec<Project>> {
        Ok(self.store.list_projects().await)
    }

    async fn get_project(&self, id: &str) -> TaskboardResult<Project> {
        self.store.get_project(id).await
    }

    async fn create_project(&self, input: NewProject) -> TaskboardResult<Project> {
        self.store.create_project(input).await
    }

    async fn update_project(&self, id: &str, patch: ProjectPatch) -> TaskboardResult<Project> {
        self.store.update_project(id, patch).await
    }

    async fn delete_project(&self, id: &str) -> TaskboardResult<()> {
        self.store.delete_project(id).await
    }

    async fn list_tasks(&self, project_id: &str) -> TaskboardResult<Vec<Task>> {
        Ok(self.store.list_tasks(project_id).await)
    }

    async fn get_task(&self, id: &str) -> TaskboardResult<Task> {
        self.store.get_task(id).await
    }

    async fn create_task(&self, input: NewTask) -> TaskboardResult<Task> {
        self.store.create_task(input).await
    }

    async fn update_task(&self, id: &str, patch: TaskPatch) -> TaskboardResult<Task> {
        self.store.update_task(id, patch).await
    }

    async fn delete_task(&self, id: &str) -> TaskboardResult<()> {
        self.store.delete_task(id).await
    }

    async fn update_task_status(&self, id: &str, status: TaskStatus) -> TaskboardResult<Task> {
        self.store.update_task_status(id, status).await
    }
}
