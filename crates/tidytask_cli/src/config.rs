//! Runtime configuration resolution.
//!
//! Precedence is flag (or its env var, handled by clap) over the platform
//! default. Relative paths are resolved against the working directory.

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tidytask_core::{default_log_level, CategoryCatalog};

const DATA_FILE_NAME: &str = "todos.json";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub catalog_file: Option<PathBuf>,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn resolve(
        data_file: Option<PathBuf>,
        catalog_file: Option<PathBuf>,
        log_level: Option<String>,
        log_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read the working directory.")?;

        let data_file = match data_file {
            Some(path) => absolutize(&cwd, path),
            None => default_data_dir()?.join(DATA_FILE_NAME),
        };
        let log_dir = match log_dir {
            Some(path) => absolutize(&cwd, path),
            None => data_file
                .parent()
                .map(|parent| parent.join(LOG_DIR_NAME))
                .ok_or_else(|| {
                    anyhow!(
                        "Data file `{}` has no parent directory.",
                        data_file.display()
                    )
                })?,
        };

        Ok(Self {
            data_file,
            catalog_file: catalog_file.map(|path| absolutize(&cwd, path)),
            log_level: log_level.unwrap_or_else(|| default_log_level().to_string()),
            log_dir,
        })
    }

    /// Built-in catalog unless a catalog file is configured.
    pub fn load_catalog(&self) -> Result<CategoryCatalog> {
        match &self.catalog_file {
            Some(path) => CategoryCatalog::from_json_file(path)
                .with_context(|| format!("Failed to load category catalog `{}`.", path.display())),
            None => Ok(CategoryCatalog::reference()),
        }
    }
}

fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "tidytask", "tidytask")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| anyhow!("Failed to find a home directory; pass --data-file."))
}

fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;
    use std::path::PathBuf;

    #[test]
    fn explicit_paths_win_and_logs_default_beside_data() {
        let config = AppConfig::resolve(
            Some(PathBuf::from("/srv/todo/todos.json")),
            None,
            Some("warn".to_string()),
            None,
        )
        .unwrap();

        assert_eq!(config.data_file, PathBuf::from("/srv/todo/todos.json"));
        assert_eq!(config.log_dir, PathBuf::from("/srv/todo/logs"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.catalog_file, None);
    }

    #[test]
    fn relative_paths_are_anchored_to_working_directory() {
        let config = AppConfig::resolve(
            Some(PathBuf::from("todos.json")),
            Some(PathBuf::from("catalog.json")),
            None,
            None,
        )
        .unwrap();

        let cwd = std::env::current_dir().unwrap();
        assert_eq!(config.data_file, cwd.join("todos.json"));
        assert_eq!(config.catalog_file, Some(cwd.join("catalog.json")));
        assert!(config.log_dir.is_absolute());
    }

    #[test]
    fn missing_catalog_file_is_reported() {
        let config = AppConfig::resolve(
            Some(PathBuf::from("/srv/todo/todos.json")),
            Some(PathBuf::from("/definitely/not/here.json")),
            None,
            None,
        )
        .unwrap();

        let err = config.load_catalog().unwrap_err();
        assert!(err.to_string().contains("Failed to load category catalog"));
    }
}
