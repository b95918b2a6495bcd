use crate::domain::Task;
use anyhow::{Context, Result};
use std::path::Path;

use super::files::{atomic_write, read_file};

/// Load the persisted task snapshot. A missing or empty file hydrates to an
/// empty task set; a corrupt file is an error rather than silent data loss.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Vec<Task>> {
    let content = read_file(&path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&content).with_context(|| {
        format!(
            "Failed to parse task snapshot: {}",
            path.as_ref().display()
        )
    })
}

/// Persist the full task set as a pretty-printed JSON array, atomically.
/// Array order is the store's display order, so a reload preserves it.
pub fn save_snapshot<P: AsRef<Path>>(path: P, tasks: &[Task]) -> Result<()> {
    let json = serde_json::to_string_pretty(tasks).context("Failed to serialize tasks")?;
    atomic_write(path, &json)
}
