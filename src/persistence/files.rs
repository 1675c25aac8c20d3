use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the data directory, both local and in the home directory
pub const DIR_NAME: &str = ".grove";
/// File holding the persisted application state
pub const STATE_FILE_NAME: &str = "focus-forest-state.json";
/// Log file written while the TUI owns the terminal
pub const LOG_FILE_NAME: &str = "grove.log";

/// Get the grove directory - explicit override first, then a local .grove, then ~/.grove
pub fn get_grove_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }

    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_grove(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DIR_NAME))
}

/// Find local .grove directory by walking up the directory tree
fn find_local_grove(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let grove_dir = current.join(DIR_NAME);
        if grove_dir.is_dir() {
            return Some(grove_dir);
        }
        current = current.parent()?;
    }
}

/// Ensure the grove directory exists
pub fn ensure_grove_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = get_grove_dir(override_dir)?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .grove directory in the current directory
pub fn init_local_grove() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let grove_dir = current_dir.join(DIR_NAME);

    if grove_dir.exists() {
        anyhow::bail!("Grove directory already exists: {}", grove_dir.display());
    }

    fs::create_dir_all(&grove_dir)
        .with_context(|| format!("Failed to create directory: {}", grove_dir.display()))?;

    Ok(grove_dir)
}

/// Path of the state file inside a grove directory
pub fn state_file(dir: &Path) -> PathBuf {
    dir.join(STATE_FILE_NAME)
}

/// Default report path for a date
pub fn report_file(dir: &Path, date: chrono::NaiveDate) -> PathBuf {
    dir.join(format!("report-{}.md", date.format("%Y-%m-%d")))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_grove_dir_default() {
        let dir = get_grove_dir(None).unwrap();
        assert!(dir.to_string_lossy().contains(DIR_NAME));
    }

    #[test]
    fn test_get_grove_dir_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = get_grove_dir(Some(temp_dir.path())).unwrap();
        assert_eq!(dir, temp_dir.path());
    }

    #[test]
    fn test_find_local_grove_walks_up() {
        let temp_dir = tempfile::tempdir().unwrap();
        let grove = temp_dir.path().join(DIR_NAME);
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&grove).unwrap();
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_local_grove(&nested), Some(grove));
    }

    #[test]
    fn test_ensure_grove_dir_creates() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().join("data");
        let dir = ensure_grove_dir(Some(&target)).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.txt");

        atomic_write(&test_file, "Hello, grove!").unwrap();
        assert_eq!(fs::read_to_string(&test_file).unwrap(), "Hello, grove!");

        atomic_write(&test_file, "Overwritten").unwrap();
        assert_eq!(fs::read_to_string(&test_file).unwrap(), "Overwritten");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("reports").join("june.md");
        atomic_write(&nested, "# June").unwrap();
        assert_eq!(fs::read_to_string(&nested).unwrap(), "# June");
    }

    #[test]
    fn test_report_file_name() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let path = report_file(Path::new("/tmp/g"), date);
        assert_eq!(path, PathBuf::from("/tmp/g/report-2024-06-03.md"));
    }
}
