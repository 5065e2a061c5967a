//! Core domain logic for tidytask.
//! This crate owns the task record, category suggestion and persistence.

pub mod classify;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use classify::catalog::{CatalogError, CategoryCatalog, CategoryRule};
pub use classify::keywords::{extract_keywords, is_stop_word, STOP_WORDS};
pub use classify::suggest::{
    suggest_category, CategoryClassifier, CategoryScore, Suggestion, SuggestionSource,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{
    now_timestamp, TaskItem, TaskStateError, TaskValidationError, TIMESTAMP_FORMAT,
};
pub use repo::task_repo::{
    InMemoryTaskRepository, JsonFileTaskRepository, RepoError, RepoResult, TaskRepository,
};
pub use service::task_service::{
    AddedTask, CategoryGroups, NewTask, PositionedTask, ServiceError, ServiceResult, TaskService,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
