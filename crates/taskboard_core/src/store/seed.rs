//! Demo board loaded into a freshly seeded store.

use chrono::{DateTime, Utc};

use crate::model::project::{Project, ProjectStatus};
use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::model::Timestamp;
use crate::store::ids::IdGenerator;

struct SeedProject {
    name: &'static str,
    description: &'static str,
    created_at: i64,
    updated_at: i64,
}

struct SeedTask {
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
    priority: TaskPriority,
    created_at: i64,
    updated_at: i64,
}

const SEED_PROJECTS: &[SeedProject] = &[
    SeedProject {
        name: "Website Redesign",
        description: "Complete overhaul of company website with modern design",
        created_at: 1_767_225_600,
        updated_at: 1_767_225_600,
    },
    SeedProject {
        name: "Mobile App Development",
        description: "Native mobile app for iOS and Android",
        created_at: 1_765_756_800,
        updated_at: 1_766_188_800,
    },
    SeedProject {
        name: "Marketing Campaign Q1",
        description: "First quarter marketing initiatives",
        created_at: 1_764_547_200,
        updated_at: 1_764_547_200,
    },
];

// Attached to the first seeded project.
const SEED_TASKS: &[SeedTask] = &[
    SeedTask {
        title: "Design homepage mockup",
        description: "Create initial design concepts for the new homepage",
        status: TaskStatus::Done,
        priority: TaskPriority::High,
        created_at: 1_767_261_600,
        updated_at: 1_767_279_600,
    },
    SeedTask {
        title: "Implement authentication system",
        description: "Add login and registration functionality",
        status: TaskStatus::Doing,
        priority: TaskPriority::High,
        created_at: 1_767_265_200,
        updated_at: 1_767_344_400,
    },
    SeedTask {
        title: "Write API documentation",
        description: "Document all REST API endpoints",
        status: TaskStatus::Todo,
        priority: TaskPriority::Medium,
        created_at: 1_767_268_800,
        updated_at: 1_767_268_800,
    },
    SeedTask {
        title: "Setup CI/CD pipeline",
        description: "Configure automated testing and deployment",
        status: TaskStatus::Todo,
        priority: TaskPriority::Low,
        created_at: 1_767_272_400,
        updated_at: 1_767_272_400,
    },
];

fn at(epoch_secs: i64) -> Timestamp {
    DateTime::<Utc>::from_timestamp(epoch_secs, 0).unwrap_or_default()
}

/// Builds the demo projects and tasks, drawing ids from `ids`.
pub(crate) fn demo_board(ids: &mut IdGenerator) -> (Vec<Project>, Vec<Task>) {
    let projects: Vec<Project> = SEED_PROJECTS
        .iter()
        .map(|seed| Project {
            id: ids.next_project_id(),
            name: seed.name.to_string(),
            description: Some(seed.description.to_string()),
            status: ProjectStatus::Active,
            created_at: at(seed.created_at),
            updated_at: at(seed.updated_at),
        })
        .collect();

    let tasks = match projects.first() {
        Some(owner) => SEED_TASKS
            .iter()
            .map(|seed| Task {
                id: ids.next_task_id(),
                project_id: owner.id.clone(),
                title: seed.title.to_string(),
                description: seed.description.to_string(),
                status: seed.status,
                priority: seed.priority,
                created_at: at(seed.created_at),
                updated_at: at(seed.updated_at),
            })
            .collect(),
        None => Vec::new(),
    };

    (projects, tasks)
}

#[cfg(test)]
mod tests {
    use super::demo_board;
    use crate::store::ids::{IdGenerator, IdStrategy};

    #[test]
    fn demo_board_keeps_timestamps_ordered() {
        let mut ids = IdGenerator::new(IdStrategy::Sequential);
        let (projects, tasks) = demo_board(&mut ids);
        assert_eq!(projects.len(), 3);
        assert_eq!(tasks.len(), 4);
        assert!(projects.iter().all(|p| p.updated_at >= p.created_at));
        assert!(tasks.iter().all(|t| t.updated_at >= t.created_at));
        assert!(tasks.iter().all(|t| t.project_id == "1"));
        assert_eq!(
            projects[0].created_at.to_rfc3339(),
            "2026-01-01T00:00:00+00:00"
        );
    }
}
