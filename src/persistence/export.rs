use crate::domain::Task;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use super::files::atomic_write;

/// On-demand export document: the full task set plus a timestamp, as a
/// human-readable JSON file. Pure read of the store state.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub exported_at: String,
    pub task_count: usize,
    pub tasks: &'a [Task],
}

impl<'a> ExportDocument<'a> {
    pub fn new(tasks: &'a [Task]) -> Self {
        Self {
            exported_at: chrono::Local::now().to_rfc3339(),
            task_count: tasks.len(),
            tasks,
        }
    }
}

/// Write the export document to `path`.
pub fn write_export<P: AsRef<Path>>(path: P, tasks: &[Task]) -> Result<()> {
    let document = ExportDocument::new(tasks);
    let json =
        serde_json::to_string_pretty(&document).context("Failed to serialize export document")?;
    atomic_write(path, &json)
}
