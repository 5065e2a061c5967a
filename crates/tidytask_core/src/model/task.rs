//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted todo record and its wire field names.
//! - Provide the completion transition that keeps `completed` and
//!   `completed_at` in sync.
//!
//! # Invariants
//! - `title` is non-blank.
//! - `completed_at.is_some() == completed`.
//! - `category` is an opaque label once assigned; it is never checked
//!   against the category catalog.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Timestamp layout used for `created_at` / `completed_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Priority assigned when a stored record omits the field.
pub const DEFAULT_PRIORITY: i32 = 1;

/// Validation failures for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// `completed` and `completed_at` disagree.
    CompletionMismatch { completed: bool },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::CompletionMismatch { completed: true } => {
                write!(f, "completed task is missing completed_at")
            }
            Self::CompletionMismatch { completed: false } => {
                write!(f, "open task must not carry completed_at")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Invalid state transitions on an existing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStateError {
    AlreadyCompleted,
}

impl Display for TaskStateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyCompleted => write!(f, "task is already completed"),
        }
    }
}

impl Error for TaskStateError {}

/// A single todo entry.
///
/// Deserialization goes through `TaskItemWire` so that defaults for
/// missing fields are applied and invalid records are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskItemWire")]
pub struct TaskItem {
    pub title: String,
    pub description: String,
    /// Why the task matters.
    pub context: String,
    /// 1 (low) to 3 (high) by convention. Not enforced here.
    pub priority: i32,
    pub completed: bool,
    pub category: Option<String>,
    /// Local ISO-8601 timestamp, see [`TIMESTAMP_FORMAT`].
    pub created_at: String,
    pub completed_at: Option<String>,
}

impl TaskItem {
    /// Creates an open, uncategorized task stamped with the current time.
    ///
    /// # Errors
    /// - Returns `EmptyTitle` when `title` is blank.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        context: impl Into<String>,
        priority: i32,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            title: title.into(),
            description: description.into(),
            context: context.into(),
            priority,
            completed: false,
            category: None,
            created_at: now_timestamp(),
            completed_at: None,
        };
        task.validate()?;
        Ok(task)
    }

    /// Builder-style category assignment.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if self.completed != self.completed_at.is_some() {
            return Err(TaskValidationError::CompletionMismatch {
                completed: self.completed,
            });
        }
        Ok(())
    }

    /// Marks the task completed, stamping `completed_at` with now.
    pub fn mark_completed(&mut self) -> Result<(), TaskStateError> {
        self.mark_completed_at(now_timestamp())
    }

    /// Marks the task completed with a caller-provided timestamp.
    ///
    /// Both fields are assigned together; an already completed task is left
    /// untouched.
    pub fn mark_completed_at(
        &mut self,
        timestamp: impl Into<String>,
    ) -> Result<(), TaskStateError> {
        if self.completed {
            return Err(TaskStateError::AlreadyCompleted);
        }
        self.completed = true;
        self.completed_at = Some(timestamp.into());
        Ok(())
    }
}

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    Local::now()
        .naive_local()
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Lenient on-disk shape; older files may omit optional fields.
#[derive(Deserialize)]
struct TaskItemWire {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    context: String,
    #[serde(default = "default_priority")]
    priority: i32,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    completed_at: Option<String>,
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

impl TryFrom<TaskItemWire> for TaskItem {
    type Error = TaskValidationError;

    fn try_from(wire: TaskItemWire) -> Result<Self, Self::Error> {
        let task = Self {
            title: wire.title,
            description: wire.description,
            context: wire.context,
            priority: wire.priority,
            completed: wire.completed,
            category: wire.category,
            created_at: wire.created_at.unwrap_or_else(now_timestamp),
            completed_at: wire.completed_at,
        };
        task.validate()?;
        Ok(task)
    }
}
