//! Default log location
//!
//! Follows platform standards for application data:
//! - **macOS**: `~/Library/Application Support/<app>/logs/<app>.log`
//! - **Windows**: `%LOCALAPPDATA%\<app>\logs\<app>.log`
//! - **Linux**: `$XDG_DATA_HOME/<app>/logs/<app>.log` (fallback `~/.local/share/...`)
//!
//! When no platform directory can be found the path is relative to the
//! working directory.

use std::path::PathBuf;

/// Resolves the base directory for an application's data
pub fn get_base_directory(app: &str) -> PathBuf {
    if let Some(dir) = dirs::data_local_dir() {
        return dir.join(app);
    }

    if let Some(dir) = dirs::data_dir() {
        return dir.join(app);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(app);
    }

    PathBuf::from(app)
}

/// Returns the logs directory path
pub fn get_logs_directory(app: &str) -> PathBuf {
    get_base_directory(app).join("logs")
}

/// Returns the default log file path, `<logs>/<app>.log`
pub fn get_default_log_path(app: &str) -> PathBuf {
    get_logs_directory(app).join(format!("{}.log", app))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_directory_not_empty() {
        let base = get_base_directory("microlog");
        assert!(!base.as_os_str().is_empty());
        assert!(base.ends_with("microlog"));
    }

    #[test]
    fn test_log_path_inside_logs_directory() {
        let logs = get_logs_directory("microlog");
        let file = get_default_log_path("microlog");
        assert!(file.starts_with(&logs));
        assert_eq!(file.file_name().unwrap(), "microlog.log");
    }
}
