//! Local SQLite store: run timestamps and a log of completed items.

pub mod completions;
pub mod schema;
pub mod settings;

use rusqlite::{Connection, Result};
use std::path::Path;

pub use completions::*;
pub use schema::run_migrations;
pub use settings::*;

/// Open (creating if needed) the database at `path` and bring its schema up to date
pub fn open(path: &Path) -> Result<Connection> {
  if let Some(parent) = path.parent() {
    if let Err(e) = std::fs::create_dir_all(parent) {
      tracing::warn!("Could not create {}: {}", parent.display(), e);
    }
  }

  let conn = Connection::open(path)?;
  run_migrations(&conn)?;
  Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
  let conn = Connection::open_in_memory()?;
  run_migrations(&conn)?;
  Ok(conn)
}
