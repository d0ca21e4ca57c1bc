// src/config.rs
//
// Library configuration
//
// Defaults target a single-user desktop library. The binary overrides the
// database location from the command line.

use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

const APP_DIR_NAME: &str = "mangashelf";
const DATABASE_FILE_NAME: &str = "library.db";

#[derive(Debug, Clone)]
pub struct LibraryConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Maximum pooled connections
    pub max_connections: u32,

    /// SQLite busy timeout in milliseconds
    pub busy_timeout_ms: u32,

    /// Capacity of the table change channel. Subscribers that fall further
    /// behind than this re-query once instead of replaying every change.
    pub change_buffer: usize,
}

impl LibraryConfig {
    /// Configuration with the database stored at `path`
    pub fn with_database_path(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: path.into(),
            max_connections: 15,
            busy_timeout_ms: 5000,
            change_buffer: 64,
        }
    }

    /// Configuration using the platform data directory.
    ///
    /// Path structure: {APP_DATA}/mangashelf/library.db
    pub fn default_location() -> AppResult<Self> {
        Ok(Self::with_database_path(default_database_path()?))
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Create the parent directory of the database file if missing
    pub fn ensure_parent_dir(&self) -> AppResult<()> {
        if let Some(parent) = self.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

/// Default database file path inside the application data directory
pub fn default_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    Ok(app_data_dir.join(APP_DIR_NAME).join(DATABASE_FILE_NAME))
}
