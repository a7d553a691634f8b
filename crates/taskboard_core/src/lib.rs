//! Core data layer for the taskboard app.
//! Owns the project/task records, the in-memory mock backend, the query
//! engine and the async API facade that callers program against.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod query;
pub mod store;

pub use api::{MockBackend, ProjectsResponse, RemoteBackend, TaskboardApi, TaskboardBackend};
pub use config::{ApiConfig, BackendConfig, ConfigError, MockConfig, RemoteConfig};
pub use error::{TaskboardError, TaskboardResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::project::{NewProject, Project, ProjectPatch, ProjectStatus};
pub use model::task::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
pub use model::validation::ValidationError;
pub use model::{EntityKind, Timestamp};
pub use query::{
    query, EntityFilter, Page, Pagination, ProjectFilter, Searchable, StatusFilter, TaskFilter,
};
pub use store::{EntityStore, IdStrategy, StoreOptions};
