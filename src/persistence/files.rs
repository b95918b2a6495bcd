use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Get the stint directory - checks for a local .stint first, then falls
/// back to the global ~/.stint
pub fn get_stint_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_stint(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".stint"))
}

/// Find a local .stint directory by walking up the directory tree
fn find_local_stint(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let stint_dir = current.join(".stint");
        if stint_dir.exists() && stint_dir.is_dir() {
            return Some(stint_dir);
        }
        current = current.parent()?;
    }
}

/// Ensure the stint directory exists
pub fn ensure_stint_dir() -> Result<PathBuf> {
    let dir = get_stint_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .stint directory in the current directory
pub fn init_local_stint() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let stint_dir = current_dir.join(".stint");

    if stint_dir.exists() {
        anyhow::bail!("Stint directory already exists: {}", stint_dir.display());
    }

    fs::create_dir_all(&stint_dir)
        .with_context(|| format!("Failed to create directory: {}", stint_dir.display()))?;

    Ok(stint_dir)
}

/// Path to the task snapshot file (tasks.json)
pub fn tasks_file() -> Result<PathBuf> {
    Ok(ensure_stint_dir()?.join("tasks.json"))
}

/// Default path for an on-demand export
pub fn default_export_file() -> Result<PathBuf> {
    let stamp = chrono::Local::now().format("%Y-%m-%d");
    Ok(ensure_stint_dir()?.join(format!("export-{}.json", stamp)))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir).context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, return empty string if file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_stint_dir() {
        let dir = get_stint_dir().unwrap();
        assert!(dir.to_string_lossy().contains(".stint"));
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.txt");

        let content = "Hello, world!";
        atomic_write(&test_file, content).unwrap();

        let read_content = read_file(&test_file).unwrap();
        assert_eq!(read_content, content);
    }

    #[test]
    fn test_read_nonexistent_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("nonexistent.txt");

        let content = read_file(&test_file).unwrap();
        assert_eq!(content, "");
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.txt");

        atomic_write(&test_file, "first").unwrap();
        atomic_write(&test_file, "second").unwrap();

        assert_eq!(read_file(&test_file).unwrap(), "second");
    }
}
