//! Builder for creating and configuring Coordinator instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Coordinator;
use crate::{
    db::Database,
    error::{Result, TimelineError},
};

/// Builder for creating and configuring Coordinator instances.
#[derive(Debug, Clone)]
pub struct CoordinatorBuilder {
    database_path: Option<PathBuf>,
}

impl CoordinatorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/grandjour/grandjour.db` or
    /// `~/.local/share/grandjour/grandjour.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured coordinator instance.
    ///
    /// # Errors
    ///
    /// Returns `TimelineError::FileSystem` if the database path is invalid
    /// Returns `TimelineError::Database` if database initialization fails
    pub async fn build(self) -> Result<Coordinator> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TimelineError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), TimelineError>(())
        })
        .await
        .map_err(|e| TimelineError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Coordinator::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("grandjour")
            .place_data_file("grandjour.db")
            .map_err(|e| TimelineError::XdgDirectory(e.to_string()))
    }
}

impl Default for CoordinatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
