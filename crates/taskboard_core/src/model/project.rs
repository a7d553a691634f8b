//! Project record and its create/patch inputs.
//!
//! # Invariants
//! - `name` is never empty after validation.
//! - Patches only touch the fields they carry and always refresh `updated_at`.

use crate::model::validation::{require_text, ValidationError};
use crate::model::{advance_timestamp, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Project lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            _ => Err(ValidationError::UnknownValue {
                field: "status",
                value: value.to_string(),
            }),
        }
    }
}

/// Canonical project record as stored and returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create input: everything except the store-assigned id and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Defaults to `active` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

impl NewProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }

    /// Materializes the record. Callers validate first.
    pub(crate) fn into_project(self, id: String, now: Timestamp) -> Project {
        Project {
            id,
            name: self.name,
            description: self.description,
            status: self.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update: `None` leaves the stored field untouched.
///
/// `description` distinguishes an absent key (`None`) from an explicit
/// `null` (`Some(None)`), which clears the stored description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_field"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

fn present_field<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl ProjectPatch {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.name.as_deref() {
            Some(name) => require_text("name", name),
            None => Ok(()),
        }
    }

    pub(crate) fn apply(self, project: &mut Project, now: Timestamp) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        project.updated_at = advance_timestamp(project.updated_at, now);
    }
}

#[cfg(test)]
mod tests {
    use super::{NewProject, ProjectPatch, ProjectStatus};
    use chrono::Utc;

    #[test]
    fn new_project_defaults_to_active() {
        let now = Utc::now();
        let project = NewProject::new("Roadmap").into_project("7".to_string(), now);
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.created_at, project.updated_at);
        assert!(project.description.is_none());
    }

    #[test]
    fn patch_rejects_blank_name_but_allows_absent_name() {
        let blank = ProjectPatch {
            name: Some(" ".to_string()),
            ..ProjectPatch::default()
        };
        assert!(blank.validate().is_err());
        assert!(ProjectPatch::default().validate().is_ok());
    }

    #[test]
    fn project_serializes_with_camel_case_fields() {
        let project = NewProject::new("Docs")
            .with_description("Write the handbook")
            .into_project("1".to_string(), Utc::now());
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["status"], "active");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn patch_can_clear_or_keep_description() {
        let now = Utc::now();
        let mut project = NewProject::new("Docs")
            .with_description("Write the handbook")
            .into_project("1".to_string(), now);

        ProjectPatch::default()
            .with_name("Docs v2")
            .apply(&mut project, now);
        assert_eq!(project.description.as_deref(), Some("Write the handbook"));

        ProjectPatch::default().clear_description().apply(&mut project, now);
        assert!(project.description.is_none());
        assert_eq!(project.name, "Docs v2");
    }

    #[test]
    fn patch_json_tells_null_description_from_missing_key() {
        let cleared: ProjectPatch = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));

        let untouched: ProjectPatch = serde_json::from_str(r#"{"name":"Docs"}"#).unwrap();
        assert_eq!(untouched.description, None);

        let value = serde_json::to_value(ProjectPatch::default().clear_description()).unwrap();
        assert_eq!(value, serde_json::json!({ "description": null }));
        let value = serde_json::to_value(ProjectPatch::default().with_name("Docs")).unwrap();
        assert_eq!(value, serde_json::json!({ "name": "Docs" }));
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Archived".parse::<ProjectStatus>(), Ok(ProjectStatus::Archived));
        assert!("paused".parse::<ProjectStatus>().is_err());
    }
}
