//! Task record and its create/patch inputs.
//!
//! # Invariants
//! - `project_id` is fixed at creation; patches cannot move a task.
//! - Missing `description`/`status`/`priority` default to `""`/`todo`/`medium`.

use crate::model::validation::{require_text, ValidationError};
use crate::model::{advance_timestamp, Timestamp};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Task workflow column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            _ => Err(ValidationError::UnknownValue {
                field: "status",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ValidationError::UnknownValue {
                field: "priority",
                value: value.to_string(),
            }),
        }
    }
}

/// Canonical task record as stored and returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create input for a task under an existing project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Required; an empty value is a validation error.
    #[serde(default)]
    pub project_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
}

impl NewTask {
    pub fn new(project_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.project_id.trim().is_empty() {
            return Err(ValidationError::MissingField("projectId"));
        }
        require_text("title", &self.title)
    }

    pub(crate) fn into_task(self, id: String, now: Timestamp) -> Task {
        Task {
            id,
            project_id: self.project_id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial task update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.title.as_deref() {
            Some(title) => require_text("title", title),
            None => Ok(()),
        }
    }

    pub(crate) fn apply(self, task: &mut Task, now: Timestamp) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        task.updated_at = advance_timestamp(task.updated_at, now);
    }
}

#[cfg(test)]
mod tests {
    use super::{NewTask, TaskPatch, TaskPriority, TaskStatus};
    use crate::model::validation::ValidationError;
    use chrono::{Duration, Utc};

    #[test]
    fn new_task_fills_defaults() {
        let task = NewTask::new("1", "Write docs").into_task("task-1".to_string(), Utc::now());
        assert_eq!(task.description, "");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
    }

    #[test]
    fn new_task_requires_project_id_and_title() {
        assert_eq!(
            NewTask::new("", "orphan").validate(),
            Err(ValidationError::MissingField("projectId"))
        );
        assert_eq!(
            NewTask::new("1", "   ").validate(),
            Err(ValidationError::EmptyField("title"))
        );
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let created = Utc::now();
        let mut task = NewTask::new("1", "Draft")
            .with_description("keep me")
            .with_priority(TaskPriority::High)
            .into_task("task-9".to_string(), created);

        let later = created + Duration::milliseconds(10);
        TaskPatch::status(TaskStatus::Done).apply(&mut task, later);

        assert_eq!(task.title, "Draft");
        assert_eq!(task.description, "keep me");
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.updated_at, later);
        assert_eq!(task.created_at, created);
    }

    #[test]
    fn task_wire_shape_uses_camel_case_and_lowercase_enums() {
        let task = NewTask::new("1", "Ship")
            .with_status(TaskStatus::Doing)
            .into_task("task-2".to_string(), Utc::now());
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["projectId"], "1");
        assert_eq!(value["status"], "doing");
        assert_eq!(value["priority"], "medium");
        assert!(value["createdAt"].as_str().unwrap().contains('T'));
    }
}
