use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS settings (
      key TEXT PRIMARY KEY,
      value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS completions (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      assignment_id INTEGER NOT NULL,
      subject_id INTEGER NOT NULL,
      display TEXT NOT NULL,
      study_mode TEXT NOT NULL,
      incorrect_meaning INTEGER NOT NULL DEFAULT 0,
      incorrect_reading INTEGER NOT NULL DEFAULT 0,
      submitted INTEGER NOT NULL DEFAULT 0,
      completed_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_completions_completed_at ON completions(completed_at);
    CREATE INDEX IF NOT EXISTS idx_completions_assignment_id ON completions(assignment_id);
    "#,
  )?;

  Ok(())
}
