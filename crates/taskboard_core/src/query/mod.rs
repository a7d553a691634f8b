//! Filtering and page slicing over entity collections.
//!
//! # Invariants
//! - Filters always run before pagination.
//! - `total` counts the filtered set, never the page.
//! - Out-of-range pages are empty, not errors.

mod filter;
mod page;

pub use filter::{EntityFilter, ProjectFilter, Searchable, StatusFilter, TaskFilter};
pub use page::{query, Page, Pagination, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
