//! Path management for library-cli
//!
//! ## Path Resolution Order
//!
//! 1. `LIBRARY_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory from `directories`
//!    (`~/.config/library-cli` on Linux, `%APPDATA%\library-cli` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::LibraryError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "LIBRARY_CLI_DATA_DIR";

/// Manages all paths used by library-cli
#[derive(Debug, Clone)]
pub struct LibraryPaths {
    /// Base directory for all library-cli data
    base_dir: PathBuf,
}

impl LibraryPaths {
    /// Create a new LibraryPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, LibraryError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create LibraryPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory holding the CSV tables
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn books_file(&self) -> PathBuf {
        self.data_dir().join("books.csv")
    }

    pub fn members_file(&self) -> PathBuf {
        self.data_dir().join("members.csv")
    }

    pub fn borrowings_file(&self) -> PathBuf {
        self.data_dir().join("borrowings.csv")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), LibraryError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LibraryError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| LibraryError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, LibraryError> {
    ProjectDirs::from("", "", "library-cli")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| LibraryError::Config("Could not determine home directory".into()))
}
