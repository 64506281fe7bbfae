//! Local log of items finished in lessons and reviews

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, Error, Result, Row, params};

use crate::domain::{AssignmentId, StudyMode, SubjectId};

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRecord {
  pub assignment_id: AssignmentId,
  pub subject_id: SubjectId,
  pub display: String,
  pub study_mode: StudyMode,
  pub incorrect_meaning: u32,
  pub incorrect_reading: u32,
  /// Whether the service accepted the report
  pub submitted: bool,
  pub completed_at: DateTime<Utc>,
}

fn to_sql_id(id: u64) -> Result<i64> {
  i64::try_from(id).map_err(|e| Error::ToSqlConversionFailure(Box::new(e)))
}

fn id_column(row: &Row, idx: usize) -> Result<u64> {
  let raw: i64 = row.get(idx)?;
  u64::try_from(raw).map_err(|e| Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

fn mode_column(row: &Row, idx: usize) -> Result<StudyMode> {
  let raw: String = row.get(idx)?;
  StudyMode::from_str(&raw).ok_or_else(|| {
    Error::FromSqlConversionFailure(idx, Type::Text, format!("unknown study mode {:?}", raw).into())
  })
}

fn timestamp_column(row: &Row, idx: usize) -> Result<DateTime<Utc>> {
  let raw: String = row.get(idx)?;
  DateTime::parse_from_rfc3339(&raw)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub fn insert_completion(conn: &Connection, record: &CompletionRecord) -> Result<i64> {
  conn.execute(
    r#"
    INSERT INTO completions
      (assignment_id, subject_id, display, study_mode, incorrect_meaning, incorrect_reading, submitted, completed_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
    "#,
    params![
      to_sql_id(record.assignment_id)?,
      to_sql_id(record.subject_id)?,
      record.display,
      record.study_mode.as_str(),
      record.incorrect_meaning,
      record.incorrect_reading,
      if record.submitted { 1 } else { 0 },
      record.completed_at.to_rfc3339(),
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

/// Most recent completions first
pub fn recent_completions(conn: &Connection, limit: i64) -> Result<Vec<CompletionRecord>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT assignment_id, subject_id, display, study_mode, incorrect_meaning, incorrect_reading, submitted, completed_at
    FROM completions
    ORDER BY completed_at DESC, id DESC
    LIMIT ?1
    "#,
  )?;

  let records = stmt
    .query_map(params![limit], |row| {
      Ok(CompletionRecord {
        assignment_id: id_column(row, 0)?,
        subject_id: id_column(row, 1)?,
        display: row.get(2)?,
        study_mode: mode_column(row, 3)?,
        incorrect_meaning: row.get(4)?,
        incorrect_reading: row.get(5)?,
        submitted: row.get::<_, i32>(6)? == 1,
        completed_at: timestamp_column(row, 7)?,
      })
    })?
    .collect::<Result<Vec<_>>>()?;

  Ok(records)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::open_in_memory;
  use chrono::Duration;

  fn record(assignment_id: AssignmentId, minutes_ago: i64) -> CompletionRecord {
    CompletionRecord {
      assignment_id,
      subject_id: assignment_id + 1000,
      display: "空".into(),
      study_mode: StudyMode::Review,
      incorrect_meaning: 1,
      incorrect_reading: 2,
      submitted: true,
      completed_at: Utc::now() - Duration::minutes(minutes_ago),
    }
  }

  #[test]
  fn test_insert_and_read_back() {
    let conn = open_in_memory().unwrap();
    insert_completion(&conn, &record(1, 0)).unwrap();

    let records = recent_completions(&conn, 10).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].assignment_id, 1);
    assert_eq!(records[0].subject_id, 1001);
    assert_eq!(records[0].study_mode, StudyMode::Review);
    assert_eq!(records[0].incorrect_meaning, 1);
    assert_eq!(records[0].incorrect_reading, 2);
    assert!(records[0].submitted);
  }

  #[test]
  fn test_recent_is_newest_first_and_limited() {
    let conn = open_in_memory().unwrap();
    insert_completion(&conn, &record(1, 30)).unwrap();
    insert_completion(&conn, &record(2, 10)).unwrap();
    insert_completion(&conn, &record(3, 20)).unwrap();

    let records = recent_completions(&conn, 2).unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.assignment_id).collect();
    assert_eq!(ids, vec![2, 3]);
  }

  #[test]
  fn test_oversized_id_is_rejected_on_insert() {
    let conn = open_in_memory().unwrap();
    let oversized = CompletionRecord {
      assignment_id: u64::MAX,
      ..record(1, 0)
    };
    let result = insert_completion(&conn, &oversized);
    assert!(matches!(result, Err(Error::ToSqlConversionFailure(_))));
    assert!(recent_completions(&conn, 10).unwrap().is_empty());
  }

  fn insert_raw(conn: &Connection, assignment_id: i64, mode: &str, completed_at: &str) {
    conn
      .execute(
        "INSERT INTO completions
           (assignment_id, subject_id, display, study_mode, incorrect_meaning, incorrect_reading, submitted, completed_at)
         VALUES (?1, 1, '空', ?2, 0, 0, 1, ?3)",
        params![assignment_id, mode, completed_at],
      )
      .unwrap();
  }

  #[test]
  fn test_malformed_rows_are_errors() {
    let conn = open_in_memory().unwrap();
    insert_raw(&conn, 1, "cram", "2024-01-01T00:00:00+00:00");
    assert!(matches!(
      recent_completions(&conn, 10),
      Err(Error::FromSqlConversionFailure(3, Type::Text, _))
    ));

    let conn = open_in_memory().unwrap();
    insert_raw(&conn, 1, "review", "yesterday");
    assert!(matches!(
      recent_completions(&conn, 10),
      Err(Error::FromSqlConversionFailure(7, Type::Text, _))
    ));

    let conn = open_in_memory().unwrap();
    insert_raw(&conn, -1, "review", "2024-01-01T00:00:00+00:00");
    assert!(matches!(
      recent_completions(&conn, 10),
      Err(Error::FromSqlConversionFailure(0, Type::Integer, _))
    ));
  }
}
