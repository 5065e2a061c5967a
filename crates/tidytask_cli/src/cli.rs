use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "tidytask",
    version,
    about = "Personal todo tracker with automatic category suggestions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Task data file (JSON).
    #[arg(long, global = true, env = "TIDYTASK_DATA_FILE", value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Category catalog file (JSON) replacing the built-in categories.
    #[arg(long, global = true, env = "TIDYTASK_CATALOG", value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true, env = "TIDYTASK_LOG", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_dir: Option<PathBuf>,
}

/// Free-text fields shared by `add` and `suggest`.
#[derive(clap::Args, Debug, Clone)]
pub struct TaskText {
    /// What needs to be done.
    pub title: String,

    /// Details of the task.
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Why this task matters.
    #[arg(short, long, default_value = "")]
    pub context: String,
}

impl TaskText {
    /// Title only; description and context left empty.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            context: String::new(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new todo.
    Add {
        #[command(flatten)]
        text: TaskText,

        /// 1 = low, 2 = medium, 3 = high.
        #[arg(
            short,
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(i32).range(1..=3)
        )]
        priority: i32,

        /// Store this category instead of the suggested one.
        #[arg(long)]
        category: Option<String>,
    },
    /// List todos grouped by category.
    List,
    /// Mark a todo as completed.
    Complete {
        /// Todo id as shown by `list`.
        id: usize,

        /// Add a follow-up todo with this title after completing.
        #[arg(long, value_name = "TITLE")]
        follow_up: Option<String>,
    },
    /// Show the category that would be suggested for a todo.
    Suggest {
        #[command(flatten)]
        text: TaskText,

        /// Print every catalog score.
        #[arg(long)]
        explain: bool,
    },
    /// List categories already in use.
    Categories,
}

impl Command {
    /// Stable name for log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::List => "list",
            Self::Complete { .. } => "complete",
            Self::Suggest { .. } => "suggest",
            Self::Categories => "categories",
        }
    }
}
