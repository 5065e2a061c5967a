//! `tidytask` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments and resolve runtime configuration.
//! - Drive `tidytask_core::TaskService` and print results.
//!
//! # Invariants
//! - Every mutating command saves before printing success.
//! - Logging failures never abort a command.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tidytask_core::{
    init_logging, CategoryClassifier, JsonFileTaskRepository, NewTask, TaskRepository,
    TaskService,
};

mod cli;
mod config;
mod render;

use cli::{Cli, Command, TaskText};
use config::AppConfig;

fn main() -> Result<()> {
    let Cli {
        command,
        data_file,
        catalog,
        log_level,
        log_dir,
    } = Cli::parse();

    let config = AppConfig::resolve(data_file, catalog, log_level, log_dir)?;
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let classifier = CategoryClassifier::new(config.load_catalog()?);
    let repo = JsonFileTaskRepository::new(&config.data_file);
    let mut service = TaskService::with_classifier(repo, classifier).with_context(|| {
        format!("Failed to load tasks from `{}`.", config.data_file.display())
    })?;

    info!("event=command_start module=cli status=start command={}", command.name());
    match command {
        Command::Add {
            text,
            priority,
            category,
        } => add(&mut service, text, priority, category),
        Command::List => list(&service),
        Command::Complete { id, follow_up } => complete(&mut service, id, follow_up),
        Command::Suggest { text, explain } => suggest(&service, &text, explain),
        Command::Categories => categories(&service),
    }
}

fn add<R: TaskRepository>(
    service: &mut TaskService<R>,
    text: TaskText,
    priority: i32,
    category: Option<String>,
) -> Result<()> {
    let added = service
        .add_task(NewTask {
            title: text.title,
            description: text.description,
            context: text.context,
            priority,
            category,
        })
        .context("Failed to add todo.")?;

    println!("Suggested category: {}", added.suggestion.label);
    println!(
        "Added #{}: {} [{}]",
        added.position,
        added.task.title,
        added.task.category.as_deref().unwrap_or_default()
    );
    Ok(())
}

fn list<R: TaskRepository>(service: &TaskService<R>) -> Result<()> {
    if service.tasks().is_empty() {
        println!("No todos yet! Use `tidytask add` to create one.");
        return Ok(());
    }

    for (heading, table) in render::task_tables(&service.grouped_by_category()) {
        println!("{heading}");
        table.printstd();
        println!();
    }
    Ok(())
}

fn complete<R: TaskRepository>(
    service: &mut TaskService<R>,
    id: usize,
    follow_up: Option<String>,
) -> Result<()> {
    let title = service
        .complete_task(id)
        .context("Failed to complete todo.")?
        .title
        .clone();
    println!("Completed: {title}");

    if let Some(follow_up) = follow_up {
        add(service, TaskText::titled(follow_up), 1, None)?;
    }
    Ok(())
}

fn suggest<R: TaskRepository>(
    service: &TaskService<R>,
    text: &TaskText,
    explain: bool,
) -> Result<()> {
    let suggestion = service.suggest_category(&text.title, &text.description, &text.context);
    println!("{}", suggestion.label);

    if explain {
        println!("source: {}", suggestion.source.as_str());
        println!("keywords: {}", suggestion.keywords.join(", "));
        render::score_table(&suggestion).printstd();
    }
    Ok(())
}

fn categories<R: TaskRepository>(service: &TaskService<R>) -> Result<()> {
    let known = service.known_categories();
    if known.is_empty() {
        println!("No categories yet.");
        return Ok(());
    }
    for category in known {
        println!("{category}");
    }
    Ok(())
}
