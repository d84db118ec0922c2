//! Database operations and SQLite management for plannings and activities.
//!
//! This module is the persistence collaborator of the coordination system.
//! It handles SQLite connections, schema management, and provides the
//! query interfaces for plannings and timeline activities. The engine
//! itself never touches the database; the coordinator loads activities,
//! runs the pure scheduling code, and saves the result through this
//! module.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod activity_queries;
pub mod migrations;
pub mod planning_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
