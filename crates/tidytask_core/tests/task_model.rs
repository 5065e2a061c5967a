use chrono::NaiveDateTime;
use tidytask_core::{TaskItem, TaskStateError, TaskValidationError, TIMESTAMP_FORMAT};

#[test]
fn new_task_sets_defaults() {
    let task = TaskItem::new("Test Todo", "Test Description", "Test Context", 2).unwrap();

    assert_eq!(task.title, "Test Todo");
    assert_eq!(task.description, "Test Description");
    assert_eq!(task.context, "Test Context");
    assert_eq!(task.priority, 2);
    assert!(!task.completed);
    assert_eq!(task.category, None);
    assert_eq!(task.completed_at, None);
    assert!(NaiveDateTime::parse_from_str(&task.created_at, TIMESTAMP_FORMAT).is_ok());
}

#[test]
fn blank_title_is_rejected() {
    let err = TaskItem::new("  ", "", "", 1).unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);
}

#[test]
fn priority_is_not_range_checked_by_the_record() {
    let task = TaskItem::new("Odd", "", "", 7).unwrap();
    assert_eq!(task.priority, 7);
}

#[test]
fn mark_completed_sets_both_fields_once() {
    let mut task = TaskItem::new("Ship", "", "", 1).unwrap();

    task.mark_completed_at("2026-10-16T09:30:00.000000").unwrap();
    assert!(task.completed);
    assert_eq!(
        task.completed_at.as_deref(),
        Some("2026-10-16T09:30:00.000000")
    );

    let err = task.mark_completed().unwrap_err();
    assert_eq!(err, TaskStateError::AlreadyCompleted);
    assert_eq!(
        task.completed_at.as_deref(),
        Some("2026-10-16T09:30:00.000000")
    );
}

#[test]
fn validate_detects_completion_mismatch() {
    let mut task = TaskItem::new("Ship", "", "", 1).unwrap();
    task.completed = true;
    assert_eq!(
        task.validate().unwrap_err(),
        TaskValidationError::CompletionMismatch { completed: true }
    );

    task.completed = false;
    task.completed_at = Some("2026-10-16T09:30:00.000000".to_string());
    assert_eq!(
        task.validate().unwrap_err(),
        TaskValidationError::CompletionMismatch { completed: false }
    );
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let mut task = TaskItem::new("Buy groceries", "milk", "running out", 3)
        .unwrap()
        .with_category("shopping");
    task.created_at = "2026-10-16T08:00:00.123456".to_string();
    task.mark_completed_at("2026-10-16T18:00:00.000001").unwrap();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["title"], "Buy groceries");
    assert_eq!(json["description"], "milk");
    assert_eq!(json["context"], "running out");
    assert_eq!(json["priority"], 3);
    assert_eq!(json["completed"], true);
    assert_eq!(json["category"], "shopping");
    assert_eq!(json["created_at"], "2026-10-16T08:00:00.123456");
    assert_eq!(json["completed_at"], "2026-10-16T18:00:00.000001");
    assert_eq!(json.as_object().unwrap().len(), 8);

    let decoded: TaskItem = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn deserialize_fills_missing_optional_fields() {
    let value = serde_json::json!({ "title": "Legacy entry" });
    let task: TaskItem = serde_json::from_value(value).unwrap();

    assert_eq!(task.description, "");
    assert_eq!(task.context, "");
    assert_eq!(task.priority, 1);
    assert!(!task.completed);
    assert_eq!(task.category, None);
    assert!(!task.created_at.is_empty());
    assert_eq!(task.completed_at, None);
}

#[test]
fn deserialize_rejects_completed_without_timestamp() {
    let value = serde_json::json!({
        "title": "Broken",
        "description": "",
        "context": "",
        "priority": 1,
        "completed": true,
        "category": null,
        "created_at": "2026-10-16T08:00:00.000000",
        "completed_at": null
    });

    let err = serde_json::from_value::<TaskItem>(value).unwrap_err();
    assert!(
        err.to_string().contains("missing completed_at"),
        "unexpected error: {err}"
    );
}
