//! `todos` command-line front end.
//!
//! # Responsibility
//! - Resolve storage and logging settings from flags and environment.
//! - Hydrate the collection once, run one subcommand, exit.
//! - Keep working on an unsaved in-memory list when the store cannot open.

mod commands;
mod error;

use clap::Parser;
use commands::Command;
use error::CliError;
use log::{info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use todos_core::{
    default_log_level, init_logging, KeyValueStore, MemoryKvStore, RepoResult, SqliteKvStore,
    TodoService, TodoStorage,
};

const DATA_DIR_NAME: &str = "todos";
const DB_FILE_NAME: &str = "todos.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "todos", version, about = "Keep a short todo list")]
struct Cli {
    /// SQLite file holding the list [default: <data dir>/todos/todos.sqlite3]
    #[arg(long, env = "TODOS_DB_PATH", global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "TODOS_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "TODOS_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("todos: {err}");
            err.exit_code()
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir.to_string_lossy()).map_err(CliError::Logging)?;
    }

    let db_path = resolve_db_path(cli.db)?;
    let store: Box<dyn KeyValueStore> = match open_store(&db_path) {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!("event=store_open module=cli status=fallback store=memory error={err}");
            eprintln!(
                "todos: warning: cannot open `{}` ({err}); changes in this run will not be saved",
                db_path.display()
            );
            Box::new(MemoryKvStore::new())
        }
    };
    let mut service = TodoService::open(TodoStorage::new(store.as_ref()));

    let command = cli.command.unwrap_or(Command::List);
    info!("event=cli_command module=cli status=start command={}", command.name());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::execute(command, &mut service, &mut out)?;
    out.flush()?;
    Ok(())
}

fn open_store(path: &Path) -> RepoResult<SqliteKvStore> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if let Err(err) = std::fs::create_dir_all(parent) {
            warn!(
                "event=store_dir module=cli status=error dir={} error={err}",
                parent.display()
            );
        }
    }
    SqliteKvStore::open(path)
}

fn resolve_db_path(explicit: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIR_NAME).join(DB_FILE_NAME))
        .ok_or(CliError::NoDataDir)
}
