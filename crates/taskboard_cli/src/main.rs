//! CLI smoke entry point.
//!
//! # Responsibility
//! - Build the API facade from `TASKBOARD_*` environment configuration.
//! - Print the board and one sample query to verify end-to-end wiring.

use std::process::ExitCode;

use taskboard_core::{
    init_logging, ApiConfig, Pagination, ProjectFilter, ProjectStatus, TaskboardApi,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("taskboard: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let config = ApiConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(logging) = config.logging.as_ref() {
        init_logging(logging)?;
    }

    let api = TaskboardApi::from_config(&config.backend).map_err(|err| err.to_string())?;
    println!("backend={}", api.backend_name());

    let board = api.get_projects().await.map_err(|err| err.to_string())?;
    println!("projects total={}", board.total);
    for project in &board.projects {
        let tasks = api
            .list_tasks(&project.id)
            .await
            .map_err(|err| err.to_string())?;
        println!(
            "  [{}] {} status={} tasks={}",
            project.id,
            project.name,
            project.status.as_str(),
            tasks.len()
        );
        for task in tasks {
            println!(
                "    - [{}] {} ({}/{})",
                task.id,
                task.title,
                task.status.as_str(),
                task.priority.as_str()
            );
        }
    }

    let filter = ProjectFilter::default()
        .search("web")
        .status(ProjectStatus::Active);
    let page = api
        .query_projects(&filter, Pagination::new(1, 2))
        .await
        .map_err(|err| err.to_string())?;
    log::info!(
        "event=cli_query module=cli status=ok total={} total_pages={}",
        page.total,
        page.total_pages
    );
    println!(
        "query search=web status=active total={} pages={} shown={}",
        page.total,
        page.total_pages,
        page.items.len()
    );

    Ok(())
}
