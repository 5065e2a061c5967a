use chrono::NaiveDateTime;
use prettytable::{format, Cell, Row, Table};
use tidytask_core::{CategoryGroups, Suggestion};

const UNCATEGORIZED: &str = "(none)";
const CREATED_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One `(heading, table)` pair per category, categories in sorted order.
pub fn task_tables(groups: &CategoryGroups<'_>) -> Vec<(String, Table)> {
    let mut tables = Vec::with_capacity(groups.len());
    for (category, entries) in groups {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(Row::new(
            ["ID", "Title", "Priority", "Status", "Created"]
                .iter()
                .map(|title| Cell::new(title).style_spec("bFm"))
                .collect(),
        ));

        for entry in entries {
            let task = entry.task;
            table.add_row(Row::new(vec![
                Cell::new(&entry.position.to_string()),
                Cell::new(&task.title),
                Cell::new(&priority_stars(task.priority)).style_spec(priority_style(task.priority)),
                Cell::new(status_mark(task.completed)),
                Cell::new(&format_created(&task.created_at)),
            ]));
        }

        let heading = format!("Category: {}", category.unwrap_or(UNCATEGORIZED));
        tables.push((heading, table));
    }
    tables
}

/// Per-category scores in catalog order.
pub fn score_table(suggestion: &Suggestion) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(Row::new(vec![
        Cell::new("Category").style_spec("b"),
        Cell::new("Score").style_spec("b"),
    ]));
    for entry in &suggestion.scores {
        let style = if entry.category == suggestion.label {
            "Fg"
        } else {
            ""
        };
        table.add_row(Row::new(vec![
            Cell::new(&entry.category).style_spec(style),
            Cell::new(&format!("{:.1}", entry.score)).style_spec(style),
        ]));
    }
    table
}

const MAX_STARS: i32 = 3;

/// One star per priority level; values outside 1..=3 are shown as numbers.
pub fn priority_stars(priority: i32) -> String {
    match priority {
        1..=MAX_STARS => "⭐".repeat(priority as usize),
        _ => priority.to_string(),
    }
}

fn priority_style(priority: i32) -> &'static str {
    match priority {
        1 => "Fr",
        2 => "Fy",
        3 => "Fg",
        _ => "Fw",
    }
}

pub fn status_mark(completed: bool) -> &'static str {
    if completed {
        "✅"
    } else {
        "❌"
    }
}

/// Short creation time; unparseable values are shown as stored.
pub fn format_created(created_at: &str) -> String {
    NaiveDateTime::parse_from_str(created_at, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|stamp| stamp.format(CREATED_DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|_| created_at.to_string())
}
