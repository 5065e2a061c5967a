//! Task use-case service.
//!
//! # Responsibility
//! - Provide add/list/complete entry points for the CLI.
//! - Assign suggested categories to new tasks.
//! - Persist the full collection after each mutation.
//!
//! # Invariants
//! - Positions are 1-based and follow insertion order.
//! - In-memory state is only changed after a successful save.

use crate::classify::suggest::{CategoryClassifier, Suggestion};
use crate::model::task::{TaskItem, TaskStateError, TaskValidationError};
use crate::repo::task_repo::{RepoError, TaskRepository};
use log::{info, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for task use-cases.
#[derive(Debug)]
pub enum ServiceError {
    InvalidTask(TaskValidationError),
    /// No task at the given 1-based position.
    TaskNotFound(usize),
    AlreadyCompleted(usize),
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTask(err) => write!(f, "invalid task: {err}"),
            Self::TaskNotFound(position) => write!(f, "no task with id {position}"),
            Self::AlreadyCompleted(position) => write!(f, "task {position} is already completed"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTask(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<TaskValidationError> for ServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidTask(value)
    }
}

/// Request model for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub context: String,
    pub priority: i32,
    /// Explicit category. `None` means use the suggestion.
    pub category: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            context: String::new(),
            priority: crate::model::task::DEFAULT_PRIORITY,
            category: None,
        }
    }
}

/// Outcome of [`TaskService::add_task`].
#[derive(Debug, Clone, PartialEq)]
pub struct AddedTask {
    pub position: usize,
    pub task: TaskItem,
    /// Classifier output computed for the new task, even when overridden.
    pub suggestion: Suggestion,
}

/// Task plus its 1-based position in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedTask<'a> {
    pub position: usize,
    pub task: &'a TaskItem,
}

/// Tasks sharing one category label; `None` for uncategorized tasks.
pub type CategoryGroups<'a> = BTreeMap<Option<&'a str>, Vec<PositionedTask<'a>>>;

/// Task service over a repository implementation.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    classifier: CategoryClassifier,
    tasks: Vec<TaskItem>,
}

impl<R: TaskRepository> TaskService<R> {
    /// Loads the task collection with the reference catalog classifier.
    pub fn open(repo: R) -> ServiceResult<Self> {
        Self::with_classifier(repo, CategoryClassifier::default())
    }

    /// Loads the task collection with a caller-provided classifier.
    pub fn with_classifier(repo: R, classifier: CategoryClassifier) -> ServiceResult<Self> {
        let tasks = repo.load_tasks()?;
        Ok(Self {
            repo,
            classifier,
            tasks,
        })
    }

    pub fn classifier(&self) -> &CategoryClassifier {
        &self.classifier
    }

    /// Suggests a category for the given text without storing anything.
    pub fn suggest_category(&self, title: &str, description: &str, context: &str) -> Suggestion {
        self.classifier
            .suggest_detailed(title, description, context)
    }

    /// Creates a task, assigning the suggested category unless one is given.
    ///
    /// # Errors
    /// - `InvalidTask` for a blank title.
    /// - `Repo` when saving fails; the collection is left unchanged.
    pub fn add_task(&mut self, request: NewTask) -> ServiceResult<AddedTask> {
        let suggestion =
            self.classifier
                .suggest_detailed(&request.title, &request.description, &request.context);

        let explicit = request
            .category
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        let category_source = match explicit {
            Some(_) => "user",
            None => suggestion.source.as_str(),
        };
        let category = explicit.unwrap_or_else(|| suggestion.label.clone());

        let task = TaskItem::new(
            request.title,
            request.description,
            request.context,
            request.priority,
        )?
        .with_category(category);

        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.repo.save_tasks(&next)?;
        self.tasks = next;

        let position = self.tasks.len();
        info!(
            "event=task_add module=service status=ok position={} priority={} category_source={}",
            position, task.priority, category_source
        );

        Ok(AddedTask {
            position,
            task,
            suggestion,
        })
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[TaskItem] {
        &self.tasks
    }

    /// Task at a 1-based position.
    pub fn get(&self, position: usize) -> Option<&TaskItem> {
        position
            .checked_sub(1)
            .and_then(|index| self.tasks.get(index))
    }

    /// Groups tasks by category label, ordered by label.
    pub fn grouped_by_category(&self) -> CategoryGroups<'_> {
        let mut groups: CategoryGroups<'_> = BTreeMap::new();
        for (index, task) in self.tasks.iter().enumerate() {
            groups
                .entry(task.category.as_deref())
                .or_default()
                .push(PositionedTask {
                    position: index + 1,
                    task,
                });
        }
        groups
    }

    /// Distinct assigned category labels, sorted.
    pub fn known_categories(&self) -> BTreeSet<&str> {
        self.tasks
            .iter()
            .filter_map(|task| task.category.as_deref())
            .collect()
    }

    /// Marks the task at `position` completed and saves.
    ///
    /// # Errors
    /// - `TaskNotFound` when `position` is 0 or past the end.
    /// - `AlreadyCompleted` when the task is already done.
    /// - `Repo` when saving fails; the collection is left unchanged.
    pub fn complete_task(&mut self, position: usize) -> ServiceResult<&TaskItem> {
        let index = position
            .checked_sub(1)
            .filter(|index| *index < self.tasks.len())
            .ok_or(ServiceError::TaskNotFound(position))?;

        let mut next = self.tasks.clone();
        if let Err(TaskStateError::AlreadyCompleted) = next[index].mark_completed() {
            warn!(
                "event=task_complete module=service status=rejected position={position} \
                 reason=already_completed"
            );
            return Err(ServiceError::AlreadyCompleted(position));
        }

        self.repo.save_tasks(&next)?;
        self.tasks = next;

        info!("event=task_complete module=service status=ok position={position}");
        Ok(&self.tasks[index])
    }
}
