// Persistence of the task list as a JSON array in a single file.
// Read once at startup, written once at exit.
use std::path::{Path, PathBuf};

use crate::app::error::Result;
use crate::app::models::Task;

pub struct Storage {
    pub path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Storage {
        Storage { path: path.into() }
    }

    // READ
    // A missing file is an empty list. A file that does not parse is an error,
    // so a broken file is never silently replaced by an empty one.
    pub fn load_tasks(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no task file yet, starting empty");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let tasks: Vec<Task> = serde_json::from_str(&content)?;
        tracing::info!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    // WRITE
    // Goes through a sibling temp file and a rename so a crash never leaves a half written list
    pub fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        let content = serde_json::to_string(tasks)?;
        let tmp_path = temp_path(&self.path);
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, &self.path)?;
        tracing::info!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
