//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "okviz";
const APPLICATION: &str = "smartfilter";

/// Log file of the running session.
const LATEST_LOG: &str = "latest.log";
/// Archived logs kept by rotation.
const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the data directory for persisted properties.
///
/// - Linux: `$XDG_DATA_HOME/smartfilter` or `~/.local/share/smartfilter`
/// - macOS: `~/Library/Application Support/dev.okviz.smartfilter`
/// - Windows: `C:\Users\<User>\AppData\Roaming\okviz\smartfilter\data`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Get the cache directory, home of the logs.
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the property file for a data file: one per data file name.
pub fn properties_file(data_file: &Path) -> Option<PathBuf> {
    let stem = data_file.file_stem()?.to_string_lossy().into_owned();
    data_dir().map(|dir| dir.join(format!("{}.properties.json", stem)))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archive the previous run's log and prune old archives.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    if let Some(cache) = cache_dir() {
        rotate_logs_in(&cache);
    }
}

/// Rename `latest.log` in `dir` after the current time, then delete the
/// oldest archives beyond [`MAX_OLD_LOGS`].
fn rotate_logs_in(dir: &Path) {
    let latest = dir.join(LATEST_LOG);
    if latest.is_file() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let _ = fs::rename(&latest, dir.join(format!("{}.log", stamp)));
    }

    let Ok(entries) = fs::read_dir(dir) else { return };
    let mut archives: Vec<(Option<SystemTime>, PathBuf)> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "log")
                && path.file_name().is_some_and(|name| name != LATEST_LOG)
        })
        .map(|path| {
            let modified = fs::metadata(&path).and_then(|m| m.modified()).ok();
            (modified, path)
        })
        .collect();

    let excess = archives.len().saturating_sub(MAX_OLD_LOGS);
    if excess == 0 {
        return;
    }
    archives.sort();
    for (_, path) in archives.drain(..excess) {
        let _ = fs::remove_file(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".log"))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_rotation_archives_latest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LATEST_LOG), "previous run").unwrap();

        rotate_logs_in(dir.path());

        let names = log_names(dir.path());
        assert_eq!(names.len(), 1);
        assert_ne!(names[0], LATEST_LOG);
    }

    #[test]
    fn test_rotation_prunes_old_archives() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..MAX_OLD_LOGS + 5 {
            fs::write(dir.path().join(format!("old_{:02}.log", i)), "").unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join(LATEST_LOG), "").unwrap();

        rotate_logs_in(dir.path());

        assert_eq!(log_names(dir.path()).len(), MAX_OLD_LOGS);
        assert!(!dir.path().join(LATEST_LOG).exists());
        assert!(dir.path().join("notes.txt").exists());
    }
}
