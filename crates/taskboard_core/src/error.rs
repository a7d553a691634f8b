//! Error taxonomy shared by the store, remote backend and facade.
//!
//! # Invariants
//! - `NotFound` and `Validation` mean the same thing regardless of backend.
//! - The facade never wraps or rewrites these values.

use crate::model::validation::ValidationError;
use crate::model::EntityKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TaskboardResult<T> = Result<T, TaskboardError>;

#[derive(Debug)]
pub enum TaskboardError {
    /// Operation targeted an id that does not exist.
    NotFound { entity: EntityKind, id: String },
    Validation(ValidationError),
    /// Remote backend could not complete the request.
    Transport(String),
    /// Remote backend answered with a body that does not decode.
    InvalidResponse(String),
    /// A committed write's task was cancelled before reporting back.
    Interrupted(String),
}

impl TaskboardError {
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for TaskboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Transport(message) => write!(f, "remote request failed: {message}"),
            Self::InvalidResponse(message) => write!(f, "invalid remote response: {message}"),
            Self::Interrupted(message) => write!(f, "store write interrupted: {message}"),
        }
    }
}

impl Error for TaskboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for TaskboardError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
