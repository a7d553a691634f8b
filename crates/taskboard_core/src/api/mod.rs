//! API facade and the backends it can sit on.
//!
//! # Responsibility
//! - Define one async call surface for every project/task action.
//! - Hide whether calls land in the in-memory store or a REST service.
//!
//! # Invariants
//! - The backend is chosen once, at construction, from configuration.
//! - Backend errors reach callers unchanged; no retries at this layer.

mod backend;
mod facade;
mod mock;
mod remote;

pub use backend::{ProjectsResponse, TaskboardBackend};
pub use facade::TaskboardApi;
pub use mock::MockBackend;
pub use remote::RemoteBackend;
