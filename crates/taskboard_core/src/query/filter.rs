//! Search and status filters for projects and tasks.

use crate::model::project::{Project, ProjectStatus};
use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::model::validation::ValidationError;
use std::str::FromStr;

/// Exact-match filter where `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> StatusFilter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

impl<T> FromStr for StatusFilter<T>
where
    T: FromStr<Err = ValidationError>,
{
    type Err = ValidationError;

    /// Parses UI filter values: `all` (any case) or a concrete enum value.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

/// Text fields a search term is matched against.
pub trait Searchable {
    fn search_fields(&self) -> [&str; 2];
}

impl Searchable for Project {
    fn search_fields(&self) -> [&str; 2] {
        [self.name.as_str(), self.description.as_deref().unwrap_or("")]
    }
}

impl Searchable for Task {
    fn search_fields(&self) -> [&str; 2] {
        [self.title.as_str(), self.description.as_str()]
    }
}

/// Predicate applied to every record before pagination.
pub trait EntityFilter<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Case-insensitive substring match over any searchable field.
/// A blank term matches everything.
fn search_matches<T: Searchable>(term: Option<&str>, item: &T) -> bool {
    let needle = match term.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_lowercase(),
        _ => return true,
    };
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub search: Option<String>,
    pub status: StatusFilter<ProjectStatus>,
}

impl ProjectFilter {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.status = StatusFilter::Only(status);
        self
    }
}

impl EntityFilter<Project> for ProjectFilter {
    fn matches(&self, item: &Project) -> bool {
        self.status.matches(&item.status) && search_matches(self.search.as_deref(), item)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub search: Option<String>,
    pub status: StatusFilter<TaskStatus>,
    pub priority: StatusFilter<TaskPriority>,
}

impl TaskFilter {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = StatusFilter::Only(status);
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = StatusFilter::Only(priority);
        self
    }
}

impl EntityFilter<Task> for TaskFilter {
    fn matches(&self, item: &Task) -> bool {
        self.status.matches(&item.status)
            && self.priority.matches(&item.priority)
            && search_matches(self.search.as_deref(), item)
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityFilter, ProjectFilter, StatusFilter, TaskFilter};
    use crate::model::project::{NewProject, ProjectStatus};
    use crate::model::task::{NewTask, TaskPriority, TaskStatus};
    use chrono::Utc;

    #[test]
    fn search_is_case_insensitive_across_name_and_description() {
        let project = NewProject::new("Website Redesign")
            .with_description("Modern WEB look")
            .into_project("1".to_string(), Utc::now());

        assert!(ProjectFilter::default().search("redesign").matches(&project));
        assert!(ProjectFilter::default().search("web look").matches(&project));
        assert!(!ProjectFilter::default().search("mobile").matches(&project));
        assert!(ProjectFilter::default().search("   ").matches(&project));
    }

    #[test]
    fn missing_description_only_matches_on_name() {
        let project = NewProject::new("Infra").into_project("2".to_string(), Utc::now());
        assert!(!ProjectFilter::default().search("docs").matches(&project));
    }

    #[test]
    fn task_filters_compose_with_and() {
        let task = NewTask::new("1", "Fix login")
            .with_status(TaskStatus::Doing)
            .with_priority(TaskPriority::High)
            .into_task("task-1".to_string(), Utc::now());

        let filter = TaskFilter::default()
            .search("login")
            .status(TaskStatus::Doing)
            .priority(TaskPriority::High);
        assert!(filter.matches(&task));
        assert!(!filter.clone().priority(TaskPriority::Low).matches(&task));
        assert!(!filter.status(TaskStatus::Done).matches(&task));
    }

    #[test]
    fn status_filter_parses_all_and_concrete_values() {
        assert_eq!(
            "ALL".parse::<StatusFilter<ProjectStatus>>(),
            Ok(StatusFilter::All)
        );
        assert_eq!(
            "active".parse::<StatusFilter<ProjectStatus>>(),
            Ok(StatusFilter::Only(ProjectStatus::Active))
        );
        assert!("someday".parse::<StatusFilter<TaskStatus>>().is_err());
    }
}
