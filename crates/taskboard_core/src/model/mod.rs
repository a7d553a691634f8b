//! Domain records shared by the store, query engine and API facade.
//!
//! # Responsibility
//! - Define the Project/Task records and their wire shape.
//! - Define create/patch inputs and the validation rules applied to them.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - `updated_at >= created_at` for every record handed out by the store.
//! - Field names serialize as camelCase; enum values as lowercase strings.

pub mod project;
pub mod task;
pub mod validation;

use chrono::{DateTime, Utc};

/// UTC timestamp serialized as an RFC 3339 (ISO-8601) string.
pub type Timestamp = DateTime<Utc>;

/// Entity discriminator used in errors and log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Project,
    Task,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Task => "task",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns a refreshed `updated_at` that never moves backwards.
pub(crate) fn advance_timestamp(previous: Timestamp, now: Timestamp) -> Timestamp {
    if now > previous {
        now
    } else {
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::advance_timestamp;
    use chrono::{Duration, Utc};

    #[test]
    fn advance_timestamp_never_goes_backwards() {
        let previous = Utc::now();
        let earlier = previous - Duration::seconds(5);
        assert_eq!(advance_timestamp(previous, earlier), previous);

        let later = previous + Duration::seconds(5);
        assert_eq!(advance_timestamp(previous, later), later);
    }
}
