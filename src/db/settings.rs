//! Key/value settings, including the timestamp of the previous run

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, params};

const LAST_EXECUTION_KEY: &str = "last_execution";

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
  conn
    .query_row("SELECT value FROM settings WHERE key = ?1", params![key], |row| row.get(0))
    .optional()
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
  conn.execute(
    "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
    params![key, value],
  )?;
  Ok(())
}

/// Start time of the previous run, if any was recorded
pub fn get_last_execution(conn: &Connection) -> Result<Option<DateTime<Utc>>> {
  let value = get_setting(conn, LAST_EXECUTION_KEY)?;
  Ok(value.and_then(|v| match DateTime::parse_from_rfc3339(&v) {
    Ok(dt) => Some(dt.with_timezone(&Utc)),
    Err(e) => {
      tracing::warn!("Ignoring malformed last_execution {:?}: {}", v, e);
      None
    }
  }))
}

pub fn set_last_execution(conn: &Connection, at: DateTime<Utc>) -> Result<()> {
  set_setting(conn, LAST_EXECUTION_KEY, &at.to_rfc3339())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::open_in_memory;
  use chrono::TimeZone;

  #[test]
  fn test_missing_setting_is_none() {
    let conn = open_in_memory().unwrap();
    assert_eq!(get_setting(&conn, "nope").unwrap(), None);
    assert_eq!(get_last_execution(&conn).unwrap(), None);
  }

  #[test]
  fn test_last_execution_round_trip() {
    let conn = open_in_memory().unwrap();
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
    set_last_execution(&conn, at).unwrap();
    assert_eq!(get_last_execution(&conn).unwrap(), Some(at));

    let later = Utc.with_ymd_and_hms(2024, 3, 2, 8, 30, 0).unwrap();
    set_last_execution(&conn, later).unwrap();
    assert_eq!(get_last_execution(&conn).unwrap(), Some(later));
  }

  #[test]
  fn test_malformed_last_execution_ignored() {
    let conn = open_in_memory().unwrap();
    set_setting(&conn, LAST_EXECUTION_KEY, "yesterday").unwrap();
    assert_eq!(get_last_execution(&conn).unwrap(), None);
  }
}
