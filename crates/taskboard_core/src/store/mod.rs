//! In-memory entity store used as the mock backend.
//!
//! # Responsibility
//! - Own the canonical Project/Task collections for the process lifetime.
//! - Apply CRUD with generated ids, partial merges and cascading delete.
//! - Emulate network latency before every operation.
//!
//! # Invariants
//! - Both collections sit behind one lock; every operation commits or
//!   reads inside a single critical section.
//! - No task references a project that has been deleted.
//! - Callers only ever receive clones of stored records.

mod entity_store;
pub mod ids;
mod seed;

pub use entity_store::{EntityStore, StoreOptions, DEFAULT_LATENCY};
pub use ids::IdStrategy;
