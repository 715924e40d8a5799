use anyhow::{Context, Result};
use std::io;
use std::path::Path;

mod app;

use app::config::{Config, CONFIG_FILE};
use app::storage::Storage;
use app::task_list::TaskList;
use app::ui::{run_app, App, Console};

// Start the task list: load the saved tasks, run the command loop on stdin/stdout,
// persist on the way out.
pub fn main() -> Result<()> {
    // Logs go to stderr so they never mix with the console dialog.
    // Quiet by default, RUST_LOG=debug shows every step.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let config = Config::load(Path::new(CONFIG_FILE)).context("Failed to read the config file")?;
    let storage = Storage::new(config.file.clone());
    let items = storage
        .load_tasks()
        .with_context(|| format!("Failed to load tasks from {}", config.file.display()))?;

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());
    let mut app = App::new(TaskList::with_items(items, config.max_chars), storage, console);
    run_app(&mut app).context("Failed to save the task list")?;

    Ok(())
}
