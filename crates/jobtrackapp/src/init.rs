//! # Context Initialization
//!
//! Builds the long-lived pieces a process needs before serving requests: the
//! data directory, the configuration, the table handle and the API facade.
//! They are created once and then passed by reference into every call.
//!
//! ## Data Directory
//!
//! Resolved in priority order:
//! 1. An explicit override (the binary's `--data` flag)
//! 2. The `JOBTRACK_DATA` environment variable
//! 3. The OS data directory for the application (via `directories`)
//!
//! The directory holds `jobtrack.toml` (optional) and the table file
//! `<table_name>.json`.

use crate::api::TrackerApi;
use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::store::file::FileTable;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DATA_DIR_ENV: &str = "JOBTRACK_DATA";
pub const CONFIG_FILE: &str = "jobtrack.toml";

pub struct TrackerContext {
    pub api: TrackerApi<FileTable>,
    pub data_dir: PathBuf,
}

impl TrackerContext {
    pub fn config(&self) -> &TrackerConfig {
        self.api.config()
    }

    pub fn table(&self) -> &FileTable {
        self.api.store()
    }
}

pub fn resolve_data_dir(data_override: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = data_override {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("io.github", "jlavigueure", "jobtrack")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            TrackerError::Config(format!(
                "Cannot determine a data directory; set {DATA_DIR_ENV} or pass --data"
            ))
        })
}

/// Load `jobtrack.toml` from the data directory, layered under `JOBTRACK__*` env vars.
pub fn load_config(data_dir: &Path) -> Result<TrackerConfig> {
    Clapfig::builder::<TrackerConfig>()
        .app_name("jobtrack")
        .file_name(CONFIG_FILE)
        .search_paths(vec![SearchPath::Path(data_dir.to_path_buf())])
        .search_mode(SearchMode::Merge)
        .load()
        .map_err(|e| TrackerError::Config(e.to_string()))
}

/// Resolve the data directory, load configuration and open the table.
pub fn initialize(data_override: Option<&Path>) -> Result<TrackerContext> {
    let data_dir = resolve_data_dir(data_override)?;
    fs::create_dir_all(&data_dir)?;

    let config = load_config(&data_dir)?;
    let table = FileTable::new(config.table_file(&data_dir), config.key_schema());
    debug!(data_dir = %data_dir.display(), table = %table.path().display(), "context ready");

    Ok(TrackerContext {
        api: TrackerApi::new(table, config),
        data_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn override_wins() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_data_dir(Some(dir.path())).unwrap(), dir.path());
    }

    #[test]
    fn initialize_uses_defaults_without_config_file() {
        let dir = TempDir::new().unwrap();
        let ctx = initialize(Some(dir.path())).unwrap();
        assert_eq!(ctx.config().table_name, "application-tracker-main");
        assert_eq!(
            ctx.table().path(),
            dir.path().join("application-tracker-main.json")
        );
    }

    #[test]
    fn initialize_reads_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "table_name = \"tracker-test\"\ncors_origin = \"https://tracker.example\"\n",
        )
        .unwrap();

        let ctx = initialize(Some(dir.path())).unwrap();
        assert_eq!(ctx.config().table_name, "tracker-test");
        assert_eq!(ctx.config().cors_origin, "https://tracker.example");
        assert_eq!(ctx.config().partition_key, "userId");
        assert_eq!(ctx.table().path(), dir.path().join("tracker-test.json"));
    }

    #[test]
    fn initialize_creates_missing_data_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let ctx = initialize(Some(&nested)).unwrap();
        assert!(nested.is_dir());
        assert_eq!(ctx.data_dir, nested);
    }
}
