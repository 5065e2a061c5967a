use tidytask_core::{
    InMemoryTaskRepository, JsonFileTaskRepository, RepoError, TaskItem, TaskRepository,
};

fn sample_tasks() -> Vec<TaskItem> {
    let first = TaskItem::new("Todo 1", "Description 1", "Context 1", 1)
        .unwrap()
        .with_category("work");
    let mut second = TaskItem::new("Todo 2", "Description 2", "Context 2", 2)
        .unwrap()
        .with_category("Xylophones");
    second.mark_completed().unwrap();
    vec![first, second]
}

#[test]
fn missing_file_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileTaskRepository::new(dir.path().join("todos.json"));

    assert!(repo.load_tasks().unwrap().is_empty());
}

#[test]
fn save_then_load_roundtrip_preserves_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileTaskRepository::new(dir.path().join("todos.json"));
    let tasks = sample_tasks();

    repo.save_tasks(&tasks).unwrap();
    let reopened = JsonFileTaskRepository::new(repo.path());
    let loaded = reopened.load_tasks().unwrap();

    assert_eq!(loaded, tasks);
    assert_eq!(loaded[1].completed_at, tasks[1].completed_at);
}

#[test]
fn save_replaces_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileTaskRepository::new(dir.path().join("todos.json"));
    let tasks = sample_tasks();

    repo.save_tasks(&tasks).unwrap();
    repo.save_tasks(&tasks[..1]).unwrap();

    let loaded = repo.load_tasks().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].title, "Todo 1");
    assert!(!dir.path().join("todos.json.tmp").exists());
}

#[test]
fn save_creates_parent_directories_and_pretty_prints() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("data").join("todos.json");
    let repo = JsonFileTaskRepository::new(&path);

    repo.save_tasks(&sample_tasks()).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("[\n  {\n    \"title\": \"Todo 1\""));
}

#[test]
fn loads_files_written_with_sparse_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    std::fs::write(
        &path,
        r#"[{ "title": "Old", "priority": 3, "category": "home" }]"#,
    )
    .unwrap();

    let loaded = JsonFileTaskRepository::new(&path).load_tasks().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].priority, 3);
    assert_eq!(loaded[0].category.as_deref(), Some("home"));
    assert_eq!(loaded[0].description, "");
}

#[test]
fn invalid_records_fail_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    std::fs::write(&path, r#"[{ "title": "", "priority": 1 }]"#).unwrap();

    let err = JsonFileTaskRepository::new(&path).load_tasks().unwrap_err();
    assert!(matches!(err, RepoError::Json { .. }));
    assert!(err.to_string().contains("title cannot be empty"));
}

#[test]
fn corrupt_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    std::fs::write(&path, "not json").unwrap();

    let err = JsonFileTaskRepository::new(&path).load_tasks().unwrap_err();
    assert!(err.to_string().contains("todos.json"));
}

#[test]
fn saving_invalid_task_is_rejected_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");
    let repo = JsonFileTaskRepository::new(&path);
    let mut tasks = sample_tasks();
    tasks[0].completed = true;

    let err = repo.save_tasks(&tasks).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(!path.exists());
}

#[test]
fn in_memory_clones_share_storage() {
    let repo = InMemoryTaskRepository::new();
    let observer = repo.clone();

    repo.save_tasks(&sample_tasks()).unwrap();

    assert_eq!(observer.load_tasks().unwrap().len(), 2);
    assert_eq!(observer.snapshot()[0].title, "Todo 1");
}
