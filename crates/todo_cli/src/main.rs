//! Command-line harness over a file-backed todo collection.
//!
//! # Responsibility
//! - Drive the same `TodoStore` the UI uses, against a SQLite file.
//! - Keep output line-oriented for quick manual checks.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use todo_core::{
    core_version, default_log_level, init_logging, EntityId, EntityStore, SqliteStorage,
    StoreConfig, TodoService, TodoStore,
};

#[derive(Parser, Debug)]
#[command(version, about = "Manage the todo collection stored in a local database")]
struct Cli {
    /// SQLite file holding the key-value store.
    #[arg(long, default_value = "todos.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Print every todo in insertion order.
    List,
    /// Add a new todo.
    Add { text: String },
    /// Flip the done flag of a todo.
    Done { id: String },
    /// Replace the text of a todo.
    Rename { id: String, text: String },
    /// Delete a todo.
    Remove { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    if let Some(log_dir) = args.log_dir.as_deref() {
        init_logging(default_log_level(), log_dir)?;
    }
    log::info!(
        "event=cli_start module=cli status=ok core_version={}",
        core_version()
    );

    let storage = SqliteStorage::open(&args.db)?;
    let service = TodoService::new(EntityStore::with_config(storage, StoreConfig::immediate()));
    let mut store = TodoStore::new(service);
    store.load_todos().await?;

    match args.command {
        Commands::List => {
            if store.state().todos.is_empty() {
                println!("Empty list.");
            }
            for todo in &store.state().todos {
                let mark = if todo.is_done { 'x' } else { ' ' };
                println!("[{mark}] {} {}", todo.id, todo.text);
            }
        }
        Commands::Add { text } => {
            todo_core::validate_todo_text(&text)?;
            let todo = store.add_todo(&text).await?;
            println!("Todo added with ID {}", todo.id);
        }
        Commands::Done { id } => {
            let current = store.api().get_todo(&EntityId::from(id)).await?;
            let todo = store.toggle_done(&current).await?;
            println!("{} is_done={}", todo.id, todo.is_done);
        }
        Commands::Rename { id, text } => {
            todo_core::validate_todo_text(&text)?;
            let current = store.api().get_todo(&EntityId::from(id)).await?;
            let todo = store.update_todo(current.with_text(text)).await?;
            println!("{} renamed", todo.id);
        }
        Commands::Remove { id } => {
            let removed = store.remove_todo(&EntityId::from(id)).await?;
            println!("{removed} removed");
        }
    }

    Ok(())
}
