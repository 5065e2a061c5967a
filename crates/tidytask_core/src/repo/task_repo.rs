//! Task repository contracts and JSON file implementation.
//!
//! # Responsibility
//! - Load and save the whole task collection.
//! - Keep file format details inside the persistence boundary.
//!
//! # Invariants
//! - Saves replace the full collection; there are no partial writes.
//! - Loads reject records that fail `TaskItem::validate()`.
//! - A missing data file is an empty collection, not an error.

use crate::model::task::{TaskItem, TaskValidationError};
use log::{error, info};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage error for task persistence.
#[derive(Debug)]
pub enum RepoError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// File content is not a valid task array.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    Validation(TaskValidationError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "task file `{}`: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "invalid task data in `{}`: {source}", path.display())
            }
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for the task collection.
pub trait TaskRepository {
    fn load_tasks(&self) -> RepoResult<Vec<TaskItem>>;
    fn save_tasks(&self, tasks: &[TaskItem]) -> RepoResult<()>;
}

/// JSON-file backed repository. The file holds one pretty-printed array.
#[derive(Debug, Clone)]
pub struct JsonFileTaskRepository {
    path: PathBuf,
}

impl JsonFileTaskRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> RepoError {
        RepoError::Json {
            path: self.path.clone(),
            source,
        }
    }

    fn write_atomically(&self, payload: &str) -> RepoResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, payload).map_err(|err| self.io_error(err))?;
        fs::rename(&tmp_path, &self.path).map_err(|err| self.io_error(err))
    }
}

impl TaskRepository for JsonFileTaskRepository {
    fn load_tasks(&self) -> RepoResult<Vec<TaskItem>> {
        let started_at = Instant::now();

        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("event=tasks_load module=repo status=ok count=0 file_present=false");
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=tasks_load module=repo status=error error_code=read_failed error={}",
                    err
                );
                return Err(self.io_error(err));
            }
        };

        let tasks: Vec<TaskItem> = serde_json::from_str(&json).map_err(|err| {
            error!(
                "event=tasks_load module=repo status=error error_code=decode_failed line={}",
                err.line()
            );
            self.json_error(err)
        })?;

        info!(
            "event=tasks_load module=repo status=ok count={} duration_ms={}",
            tasks.len(),
            started_at.elapsed().as_millis()
        );
        Ok(tasks)
    }

    fn save_tasks(&self, tasks: &[TaskItem]) -> RepoResult<()> {
        let started_at = Instant::now();
        for task in tasks {
            task.validate()?;
        }

        let payload = serde_json::to_string_pretty(tasks).map_err(|err| self.json_error(err))?;
        match self.write_atomically(&payload) {
            Ok(()) => {
                info!(
                    "event=tasks_save module=repo status=ok count={} duration_ms={}",
                    tasks.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=tasks_save module=repo status=error error_code=write_failed error={}",
                    err
                );
                Err(err)
            }
        }
    }
}

/// In-process repository. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Rc<RefCell<Vec<TaskItem>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<TaskItem>) -> Self {
        Self {
            tasks: Rc::new(RefCell::new(tasks)),
        }
    }

    /// Snapshot of the stored collection.
    pub fn snapshot(&self) -> Vec<TaskItem> {
        self.tasks.borrow().clone()
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn load_tasks(&self) -> RepoResult<Vec<TaskItem>> {
        Ok(self.snapshot())
    }

    fn save_tasks(&self, tasks: &[TaskItem]) -> RepoResult<()> {
        for task in tasks {
            task.validate()?;
        }
        *self.tasks.borrow_mut() = tasks.to_vec();
        Ok(())
    }
}
