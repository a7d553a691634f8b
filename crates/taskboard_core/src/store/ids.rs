//! Identifier generation for store-created records.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::model::validation::ValidationError;

/// How the store mints new record ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Projects get `1`, `2`, ...; tasks get `task-1`, `task-2`, ...
    #[default]
    Sequential,
    /// Random v4 UUIDs for both entity types.
    Uuid,
}

impl FromStr for IdStrategy {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "uuid" => Ok(Self::Uuid),
            _ => Err(ValidationError::UnknownValue {
                field: "id strategy",
                value: value.to_string(),
            }),
        }
    }
}

/// Per-store id source. Counters only move forward, so ids of deleted
/// records are never handed out again.
#[derive(Debug)]
pub(crate) struct IdGenerator {
    strategy: IdStrategy,
    next_project: u64,
    next_task: u64,
}

impl IdGenerator {
    pub(crate) fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            next_project: 1,
            next_task: 1,
        }
    }

    pub(crate) fn next_project_id(&mut self) -> String {
        match self.strategy {
            IdStrategy::Sequential => {
                let id = self.next_project;
                self.next_project += 1;
                id.to_string()
            }
            IdStrategy::Uuid => Uuid::new_v4().to_string(),
        }
    }

    pub(crate) fn next_task_id(&mut self) -> String {
        match self.strategy {
            IdStrategy::Sequential => {
                let id = self.next_task;
                self.next_task += 1;
                format!("task-{id}")
            }
            IdStrategy::Uuid => Uuid::new_v4().to_string(),
        }
    }
}
