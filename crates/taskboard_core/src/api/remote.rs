//! Backend that forwards calls to a REST service.
//!
//! # Responsibility
//! - Map each facade action onto one HTTP request with a JSON body.
//! - Translate HTTP failures into the shared error taxonomy.
//!
//! # Invariants
//! - 404 means `NotFound` for the entity the request addressed; on a
//!   collection route it is a `Transport` failure.
//! - 400/422 mean `Validation`; any other failure is `Transport`.
//! - Inputs are validated locally before anything is sent.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::backend::{ProjectsResponse, TaskboardBackend};
use crate::config::{ConfigError, RemoteConfig};
use crate::error::{TaskboardError, TaskboardResult};
use crate::model::project::{NewProject, Project, ProjectPatch};
use crate::model::task::{NewTask, Task, TaskPatch, TaskStatus};
use crate::model::validation::ValidationError;
use crate::model::EntityKind;

const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Serialize)]
struct StatusBody {
    status: TaskStatus,
}

pub struct RemoteBackend {
    client: Client,
    base_url: Url,
}

impl RemoteBackend {
    pub fn new(config: &RemoteConfig) -> Result<Self, ConfigError> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|err| {
            ConfigError::InvalidValue {
                key: "baseUrl",
                value: config.base_url.clone(),
                reason: err.to_string(),
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                key: "baseUrl",
                value: config.base_url.clone(),
                reason: "url cannot carry a path".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| ConfigError::Client(err.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `target` names the record a 404 refers to; `None` for collection routes.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
        target: Option<(EntityKind, &str)>,
    ) -> TaskboardResult<String> {
        let url = self.endpoint(segments);
        let path = url.path().to_string();
        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| {
            warn!(
                "event=remote_request module=api status=transport_error method={} path={}",
                method, path
            );
            TaskboardError::Transport(err.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| TaskboardError::Transport(err.to_string()))?;
        debug!(
            "event=remote_request module=api status={} method={} path={}",
            status.as_u16(),
            method,
            path
        );

        if status.is_success() {
            return Ok(text);
        }
        Err(classify_failure(status, target, &text))
    }

    async fn fetch<T, B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
        target: Option<(EntityKind, &str)>,
    ) -> TaskboardResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let text = self.send(method, segments, body, target).await?;
        decode(&text)
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> TaskboardResult<T> {
    serde_json::from_str(text).map_err(|err| TaskboardError::InvalidResponse(err.to_string()))
}

/// Maps a non-success status onto the shared error taxonomy.
fn classify_failure(
    status: StatusCode,
    target: Option<(EntityKind, &str)>,
    body: &str,
) -> TaskboardError {
    match (status, target) {
        (StatusCode::NOT_FOUND, Some((entity, id))) => TaskboardError::not_found(entity, id),
        (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => {
            TaskboardError::Validation(ValidationError::Rejected(truncate(body)))
        }
        (other, _) => TaskboardError::Transport(format!("HTTP {}", other.as_u16())),
    }
}

fn truncate(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    cut.push_str("...");
    cut
}

const NO_BODY: Option<&()> = None;

#[async_trait]
impl TaskboardBackend for RemoteBackend {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn list_projects(&self) -> TaskboardResult<Vec<Project>> {
        let response: ProjectsResponse =
            self.fetch(Method::GET, &["projects"], NO_BODY, None).await?;
        Ok(response.projects)
    }

    async fn get_project(&self, id: &str) -> TaskboardResult<Project> {
        self.fetch(Method::GET, &["projects", id], NO_BODY, Some((EntityKind::Project, id)))
            .await
    }

    async fn create_project(&self, input: NewProject) -> TaskboardResult<Project> {
        input.validate()?;
        self.fetch(Method::POST, &["projects"], Some(&input), None)
            .await
    }

    async fn update_project(&self, id: &str, patch: ProjectPatch) -> TaskboardResult<Project> {
        patch.validate()?;
        self.fetch(
            Method::PUT,
            &["projects", id],
            Some(&patch),
            Some((EntityKind::Project, id)),
        )
        .await
    }

    async fn delete_project(&self, id: &str) -> TaskboardResult<()> {
        self.send(Method::DELETE, &["projects", id], NO_BODY, Some((EntityKind::Project, id)))
            .await
            .map(|_| ())
    }

    async fn list_tasks(&self, project_id: &str) -> TaskboardResult<Vec<Task>> {
        match self
            .fetch(
                Method::GET,
                &["projects", project_id, "tasks"],
                NO_BODY,
                Some((EntityKind::Project, project_id)),
            )
            .await
        {
            // Same as the in-memory store: an unknown project owns no tasks.
            Err(err) if err.is_not_found() => Ok(Vec::new()),
            other => other,
        }
    }

    async fn get_task(&self, id: &str) -> TaskboardResult<Task> {
        self.fetch(Method::GET, &["tasks", id], NO_BODY, Some((EntityKind::Task, id)))
            .await
    }

    async fn create_task(&self, input: NewTask) -> TaskboardResult<Task> {
        input.validate()?;
        let project_id = input.project_id.clone();
        self.fetch(
            Method::POST,
            &["tasks"],
            Some(&input),
            Some((EntityKind::Project, project_id.as_str())),
        )
        .await
    }

    async fn update_task(&self, id: &str, patch: TaskPatch) -> TaskboardResult<Task> {
        patch.validate()?;
        self.fetch(Method::PUT, &["tasks", id], Some(&patch), Some((EntityKind::Task, id)))
            .await
    }

    async fn delete_task(&self, id: &str) -> TaskboardResult<()> {
        self.send(Method::DELETE, &["tasks", id], NO_BODY, Some((EntityKind::Task, id)))
            .await
            .map(|_| ())
    }

    async fn update_task_status(&self, id: &str, status: TaskStatus) -> TaskboardResult<Task> {
        self.fetch(
            Method::PATCH,
            &["tasks", id, "status"],
            Some(&StatusBody { status }),
            Some((EntityKind::Task, id)),
        )
        .await
    }
}
