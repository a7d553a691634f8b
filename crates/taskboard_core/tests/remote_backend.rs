use serde_json::{json, Value};
use taskboard_core::{
    EntityKind, NewProject, NewTask, ProjectPatch, ProjectStatus, RemoteBackend, RemoteConfig,
    TaskPatch, TaskPriority, TaskStatus, TaskboardBackend, TaskboardError, ValidationError,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> RemoteBackend {
    RemoteBackend::new(&RemoteConfig::new(format!("{}/api", server.uri()))).unwrap()
}

fn project_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "Redesign the company website",
        "status": "active",
        "createdAt": "2024-01-15T10:00:00Z",
        "updatedAt": "2024-01-20T14:30:00Z"
    })
}

fn task_json(id: &str, project_id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "projectId": project_id,
        "title": "Design mockups",
        "description": "Create initial design mockups",
        "status": status,
        "priority": "high",
        "createdAt": "2024-01-15T10:00:00Z",
        "updatedAt": "2024-01-18T16:00:00Z"
    })
}

#[tokio::test]
async fn list_projects_reads_the_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projects": [project_json("1", "Website Redesign"), project_json("2", "Mobile App")],
            "total": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let projects = backend_for(&server).list_projects().await.unwrap();
    let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Website Redesign", "Mobile App"]);
}

#[tokio::test]
async fn missing_projects_route_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = backend_for(&server).list_projects().await.unwrap_err();
    assert!(matches!(err, TaskboardError::Transport(ref message) if message == "HTTP 404"));
}

#[tokio::test]
async fn get_project_addresses_the_record_and_maps_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json("1", "Website Redesign")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/projects/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let project = backend.get_project("1").await.unwrap();
    assert_eq!(project.status, ProjectStatus::Active);

    let err = backend.get_project("99").await.unwrap_err();
    assert_eq!(err.to_string(), "project not found: 99");
}

#[tokio::test]
async fn create_project_posts_the_input_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/projects"))
        .and(body_json(json!({ "name": "Launch", "description": "Go-to-market" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(project_json("4", "Launch")))
        .expect(1)
        .mount(&server)
        .await;

    let created = backend_for(&server)
        .create_project(NewProject::new("Launch").with_description("Go-to-market"))
        .await
        .unwrap();
    assert_eq!(created.id, "4");
}

#[tokio::test]
async fn invalid_input_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = backend.create_project(NewProject::new("  ")).await.unwrap_err();
    assert!(matches!(err, TaskboardError::Validation(ValidationError::EmptyField("name"))));

    let err = backend.create_task(NewTask::new("", "orphan")).await.unwrap_err();
    assert!(matches!(
        err,
        TaskboardError::Validation(ValidationError::MissingField("projectId"))
    ));
}

#[tokio::test]
async fn update_project_puts_patch_with_explicit_null() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/projects/1"))
        .and(body_json(json!({ "description": null, "status": "archived" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json("1", "Website Redesign")))
        .expect(1)
        .mount(&server)
        .await;

    backend_for(&server)
        .update_project(
            "1",
            ProjectPatch::default()
                .clear_description()
                .with_status(ProjectStatus::Archived),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn server_side_rejection_maps_to_validation() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/projects/1"))
        .respond_with(ResponseTemplate::new(422).set_body_string("name already taken"))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .update_project("1", ProjectPatch::default().with_name("Mobile App"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TaskboardError::Validation(ValidationError::Rejected(ref message)) if message == "name already taken"
    ));
}

#[tokio::test]
async fn delete_project_ignores_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/projects/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    backend_for(&server).delete_project("2").await.unwrap();
}

#[tokio::test]
async fn list_tasks_on_unknown_project_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json("task-1", "1", "done"),
            task_json("task-2", "1", "doing")
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/projects/77/tasks"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let tasks = backend.list_tasks("1").await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[1].status, TaskStatus::Doing);
    assert!(backend.list_tasks("77").await.unwrap().is_empty());
}

#[tokio::test]
async fn create_task_against_missing_project_is_project_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .and(body_json(json!({ "projectId": "42", "title": "Orphan" })))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .create_task(NewTask::new("42", "Orphan"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TaskboardError::NotFound { entity: EntityKind::Project, ref id } if id == "42"
    ));
}

#[tokio::test]
async fn task_reads_and_writes_use_task_routes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json("task-1", "1", "todo")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/task-1"))
        .and(body_json(json!({ "title": "Final mockups", "priority": "low" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json("task-1", "1", "todo")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/task-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let task = backend.get_task("task-1").await.unwrap();
    assert_eq!(task.priority, TaskPriority::High);

    let patch = TaskPatch {
        title: Some("Final mockups".to_string()),
        priority: Some(TaskPriority::Low),
        ..TaskPatch::default()
    };
    backend.update_task("task-1", patch).await.unwrap();
    backend.delete_task("task-1").await.unwrap();
}

#[tokio::test]
async fn update_task_status_patches_status_route() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/tasks/task-2/status"))
        .and(body_json(json!({ "status": "done" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json("task-2", "1", "done")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/tasks/task-9/status"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let task = backend.update_task_status("task-2", TaskStatus::Done).await.unwrap();
    assert_eq!(task.status, TaskStatus::Done);

    let err = backend
        .update_task_status("task-9", TaskStatus::Done)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "task not found: task-9");
}

#[tokio::test]
async fn undecodable_success_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = backend_for(&server).get_task("task-1").await.unwrap_err();
    assert!(matches!(err, TaskboardError::InvalidResponse(_)));
}

#[tokio::test]
async fn server_errors_are_transport_failures() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/task-3"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = backend_for(&server).delete_task("task-3").await.unwrap_err();
    assert!(matches!(err, TaskboardError::Transport(ref message) if message == "HTTP 503"));
}
