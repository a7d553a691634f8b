//! Entity store implementation.
//!
//! # Responsibility
//! - Provide async CRUD over projects and tasks with simulated latency.
//! - Keep id generation, merge rules and cascade delete in one place.
//!
//! # Invariants
//! - Latency is awaited before the lock is taken, never while holding it.
//! - Validation runs before any mutation; a rejected call changes nothing.
//! - `delete_project` removes the project and its tasks under one write guard.
//! - A write commits once its round trip starts, even if the caller's future
//!   is dropped.

use chrono::Utc;
use log::{debug, info, warn};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::error::{TaskboardError, TaskboardResult};
use crate::model::project::{NewProject, Project, ProjectPatch};
use crate::model::task::{NewTask, Task, TaskPatch, TaskStatus};
use crate::model::EntityKind;
use crate::store::ids::{IdGenerator, IdStrategy};
use crate::store::seed::demo_board;

/// Artificial round-trip applied to every store call unless overridden.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(800);

/// Construction options for [`EntityStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub latency: Duration,
    pub id_strategy: IdStrategy,
    /// Load the demo board on construction.
    pub seed: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
            id_strategy: IdStrategy::Sequential,
            seed: false,
        }
    }
}

impl StoreOptions {
    /// Options with no simulated latency, mostly useful in tests and tools.
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_id_strategy(mut self, id_strategy: IdStrategy) -> Self {
        self.id_strategy = id_strategy;
        self
    }

    pub fn seeded(mut self) -> Self {
        self.seed = true;
        self
    }
}

struct StoreState {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    ids: IdGenerator,
}

impl StoreState {
    fn project_index(&self, id: &str) -> Option<usize> {
        self.projects.iter().position(|project| project.id == id)
    }

    fn task_index(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}

/// Process-wide owner of the Project/Task collections.
///
/// Cloning yields another handle to the same state; the store is meant to be
/// created once and passed to whoever needs it.
#[derive(Clone)]
pub struct EntityStore {
    state: Arc<RwLock<StoreState>>,
    latency: Duration,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new(StoreOptions::default())
    }
}

impl EntityStore {
    pub fn new(options: StoreOptions) -> Self {
        let mut ids = IdGenerator::new(options.id_strategy);
        let (projects, tasks) = if options.seed {
            demo_board(&mut ids)
        } else {
            (Vec::new(), Vec::new())
        };

        info!(
            "event=store_init module=store status=ok seeded={} projects={} tasks={} latency_ms={}",
            options.seed,
            projects.len(),
            tasks.len(),
            options.latency.as_millis()
        );

        Self {
            state: Arc::new(RwLock::new(StoreState {
                projects,
                tasks,
                ids,
            })),
            latency: options.latency,
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Runs a write on its own task so it commits even if the caller stops
    /// waiting once the round trip has started.
    async fn detached<T, F, Fut>(&self, write: F) -> TaskboardResult<T>
    where
        T: Send + 'static,
        F: FnOnce(EntityStore) -> Fut,
        Fut: Future<Output = TaskboardResult<T>> + Send + 'static,
    {
        let store = self.clone();
        let handle = tokio::spawn(write(store));
        match handle.await {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => {
                warn!("event=store_write module=store status=interrupted");
                Err(TaskboardError::Interrupted(err.to_string()))
            }
        }
    }

    pub async fn list_projects(&self) -> Vec<Project> {
        self.round_trip().await;
        self.state.read().await.projects.clone()
    }

    pub async fn get_project(&self, id: &str) -> TaskboardResult<Project> {
        self.round_trip().await;
        let state = self.state.read().await;
        state
            .projects
            .iter()
            .find(|project| project.id == id)
            .cloned()
            .ok_or_else(|| TaskboardError::not_found(EntityKind::Project, id))
    }

    pub async fn create_project(&self, input: NewProject) -> TaskboardResult<Project> {
        self.detached(|store| async move {
            store.round_trip().await;
            store.commit_create_project(input).await
        })
        .await
    }

    pub async fn update_project(&self, id: &str, patch: ProjectPatch) -> TaskboardResult<Project> {
        let id = id.to_string();
        self.detached(|store| async move {
            store.round_trip().await;
            store.commit_update_project(&id, patch).await
        })
        .await
    }

    /// Deletes a project together with every task it owns.
    pub async fn delete_project(&self, id: &str) -> TaskboardResult<()> {
        let id = id.to_string();
        self.detached(|store| async move {
            store.round_trip().await;
            store.commit_delete_project(&id).await
        })
        .await
    }

    /// Lists tasks owned by `project_id`; an unknown project yields an empty list.
    pub async fn list_tasks(&self, project_id: &str) -> Vec<Task> {
        self.round_trip().await;
        let state = self.state.read().await;
        state
            .tasks
            .iter()
            .filter(|task| task.project_id == project_id)
            .cloned()
            .collect()
    }

    pub async fn get_task(&self, id: &str) -> TaskboardResult<Task> {
        self.round_trip().await;
        let state = self.state.read().await;
        state
            .tasks
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or_else(|| TaskboardError::not_found(EntityKind::Task, id))
    }

    /// Creates a task under an existing project.
    ///
    /// # Errors
    /// - `Validation` when `project_id` or `title` is empty.
    /// - `NotFound(project)` when `project_id` names no stored project.
    pub async fn create_task(&self, input: NewTask) -> TaskboardResult<Task> {
        self.detached(|store| async move {
            store.round_trip().await;
            store.commit_create_task(input).await
        })
        .await
    }

    pub async fn update_task(&self, id: &str, patch: TaskPatch) -> TaskboardResult<Task> {
        let id = id.to_string();
        self.detached(|store| async move {
            store.round_trip().await;
            patch.validate()?;
            store.commit_merge_task(&id, patch).await
        })
        .await
    }

    pub async fn update_task_status(&self, id: &str, status: TaskStatus) -> TaskboardResult<Task> {
        let id = id.to_string();
        self.detached(|store| async move {
            store.round_trip().await;
            store.commit_merge_task(&id, TaskPatch::status(status)).await
        })
        .await
    }

    pub async fn delete_task(&self, id: &str) -> TaskboardResult<()> {
        let id = id.to_string();
        self.detached(|store| async move {
            store.round_trip().await;
            store.commit_delete_task(&id).await
        })
        .await
    }

    async fn commit_create_project(&self, input: NewProject) -> TaskboardResult<Project> {
        input.validate()?;

        let mut state = self.state.write().await;
        let id = state.ids.next_project_id();
        let project = input.into_project(id, Utc::now());
        state.projects.push(project.clone());

        debug!(
            "event=project_create module=store status=ok id={}",
            project.id
        );
        Ok(project)
    }

    async fn commit_update_project(&self, id: &str, patch: ProjectPatch) -> TaskboardResult<Project> {
        patch.validate()?;

        let mut state = self.state.write().await;
        let index = state
            .project_index(id)
            .ok_or_else(|| TaskboardError::not_found(EntityKind::Project, id))?;
        let project = &mut state.projects[index];
        patch.apply(project, Utc::now());

        debug!("event=project_update module=store status=ok id={id}");
        Ok(project.clone())
    }

    async fn commit_delete_project(&self, id: &str) -> TaskboardResult<()> {
        let mut state = self.state.write().await;
        let Some(index) = state.project_index(id) else {
            warn!("event=project_delete module=store status=not_found id={id}");
            return Err(TaskboardError::not_found(EntityKind::Project, id));
        };

        state.projects.remove(index);
        let before = state.tasks.len();
        state.tasks.retain(|task| task.project_id != id);
        let cascaded = before - state.tasks.len();

        info!(
            "event=project_delete module=store status=ok id={id} cascaded_tasks={cascaded}"
        );
        Ok(())
    }

    async fn commit_create_task(&self, input: NewTask) -> TaskboardResult<Task> {
        input.validate()?;

        let mut state = self.state.write().await;
        if state.project_index(&input.project_id).is_none() {
            return Err(TaskboardError::not_found(
                EntityKind::Project,
                input.project_id,
            ));
        }

        let id = state.ids.next_task_id();
        let task = input.into_task(id, Utc::now());
        state.tasks.push(task.clone());

        debug!(
            "event=task_create module=store status=ok id={} project_id={}",
            task.id, task.project_id
        );
        Ok(task)
    }

    async fn commit_delete_task(&self, id: &str) -> TaskboardResult<()> {
        let mut state = self.state.write().await;
        let index = state
            .task_index(id)
            .ok_or_else(|| TaskboardError::not_found(EntityKind::Task, id))?;
        state.tasks.remove(index);

        debug!("event=task_delete module=store status=ok id={id}");
        Ok(())
    }

    async fn commit_merge_task(&self, id: &str, patch: TaskPatch) -> TaskboardResult<Task> {
        let mut state = self.state.write().await;
        let index = state
            .task_index(id)
            .ok_or_else(|| TaskboardError::not_found(EntityKind::Task, id))?;
        let task = &mut state.tasks[index];
        patch.apply(task, Utc::now());

        debug!("event=task_update module=store status=ok id={id}");
        Ok(task.clone())
    }
}
