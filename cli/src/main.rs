mod fields;
mod tui;

use anyhow::{anyhow, Result};
use clap::Parser;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use taskflow_core::{
    parse_input, FileTaskStorage, Task, TaskStore, MAX_TASKS,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use crate::fields::collect_fields;

#[derive(Parser)]
#[command(name = "taskflow")]
#[command(about = "A five-task to-do list", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a task (usage: add "Title words" desc:... pri:h due:tomorrow)
    Add {
        /// Title words plus optional key:value fields
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List tasks in display order
    List,
    /// Toggle completion of a task by id (prefix is enough)
    Done { id: String },
    /// Edit a task: new title words and/or key:value fields
    Edit {
        id: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Delete a task by id (prefix is enough)
    Delete { id: String },
    /// Open the Terminal User Interface
    Tui,
}

fn main() -> Result<()> {
    // Tracing is opt-in via RUST_LOG; an unset or invalid filter stays quiet.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let cli = Cli::parse();
    let storage = FileTaskStorage::new(None);
    let mut store = TaskStore::new(storage);

    match cli.command {
        Some(Commands::Add { args }) => {
            let parsed = parse_input(&args);
            if parsed.title.trim().is_empty() {
                println!("Error: Task title is required.");
                return Ok(());
            }
            if !store.can_add_more() {
                println!("{}", limit_message());
                return Ok(());
            }

            let values = collect_fields(&parsed);
            for warning in &values.warnings {
                println!("Warning: {}", warning);
            }

            let description = values.description.flatten();
            let priority = values.priority.unwrap_or_default();
            let end_date = values.end_date.flatten();

            if !store.add(&parsed.title, description, priority, end_date) {
                println!("Error: could not add task.");
                return Ok(());
            }
            if let Some(task) = store.tasks().last() {
                println!("Task added: {} (ID: {})", task.title, short_id(&task.id));
                if let Some(due) = task.end_date {
                    println!("  Due: {}", due.format("%Y-%m-%d"));
                }
                println!("  Priority: {:?}", task.priority);
            }
            println!("  Slots used: {}/{}", store.tasks().len(), MAX_TASKS);
        }
        Some(Commands::List) => {
            let tasks = store.sorted_tasks();
            if tasks.is_empty() {
                println!("No tasks yet. Add your first task to get started!");
                return Ok(());
            }

            let completed = tasks.iter().filter(|t| t.completed).count();
            println!(
                "Tasks ({}/{}): {} of {} completed",
                tasks.len(),
                MAX_TASKS,
                completed,
                tasks.len()
            );

            let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from_task).collect();
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{}", table);
        }
        Some(Commands::Done { id }) => {
            let task_id = match resolve_id(store.tasks(), &id) {
                Ok(task_id) => task_id,
                Err(err) => {
                    println!("Error: {}", err);
                    return Ok(());
                }
            };
            store.toggle(&task_id);
            if let Some(task) = store.tasks().iter().find(|t| t.id == task_id) {
                let state = if task.completed { "completed" } else { "reopened" };
                println!("Task {}: {}", state, task.title);
            }
        }
        Some(Commands::Edit { id, args }) => {
            let task_id = match resolve_id(store.tasks(), &id) {
                Ok(task_id) => task_id,
                Err(err) => {
                    println!("Error: {}", err);
                    return Ok(());
                }
            };

            let parsed = parse_input(&args);
            let values = collect_fields(&parsed);
            for warning in &values.warnings {
                println!("Warning: {}", warning);
            }

            let patch = values.into_patch(&parsed.title);
            store.update(&task_id, patch);
            if let Some(task) = store.tasks().iter().find(|t| t.id == task_id) {
                println!("Task updated: {}", task.title);
            }
        }
        Some(Commands::Delete { id }) => {
            let task_id = match resolve_id(store.tasks(), &id) {
                Ok(task_id) => task_id,
                Err(err) => {
                    println!("Error: {}", err);
                    return Ok(());
                }
            };
            let title = store
                .tasks()
                .iter()
                .find(|t| t.id == task_id)
                .map(|t| t.title.clone())
                .unwrap_or_default();
            store.delete(&task_id);
            println!("Task deleted: {}", title);
        }
        Some(Commands::Tui) | None => {
            tui::run(store)?;
        }
    }
    Ok(())
}

pub fn limit_message() -> String {
    format!(
        "Task limit reached ({}/{}). Complete or delete tasks to add more.",
        MAX_TASKS, MAX_TASKS
    )
}

fn short_id(id: &Uuid) -> String {
    id.to_string().chars().take(8).collect()
}

/// Matches a task by unique id prefix, the way ids are shown in `list`.
fn resolve_id(tasks: &[Task], prefix: &str) -> Result<Uuid> {
    let prefix = prefix.to_lowercase();
    let matches: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.id.to_string().starts_with(&prefix))
        .collect();

    match matches.as_slice() {
        [task] => Ok(task.id),
        [] => Err(anyhow!("no task with id '{}'", prefix)),
        _ => Err(anyhow!("id '{}' is ambiguous", prefix)),
    }
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "St")]
    status: &'static str,
    #[tabled(rename = "Pri")]
    priority: &'static str,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Task")]
    title: String,
}

impl TaskRow {
    fn from_task(task: &Task) -> Self {
        use taskflow_core::Priority;

        Self {
            id: short_id(&task.id),
            status: if task.completed { "✔" } else { "☐" },
            priority: match task.priority {
                Priority::High => "H",
                Priority::Medium => "M",
                Priority::Low => "L",
            },
            due: task
                .end_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            title: match &task.description {
                Some(desc) => format!("{} ({})", task.title, desc),
                None => task.title.clone(),
            },
        }
    }
}
