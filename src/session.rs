//! Top-level command loop.
//!
//! The session is either at the main prompt or studying lessons or reviews.
//! While studying it owns the fetched assignments and hands them to the quiz
//! engine one batch at a time, dropping each batch from the front once the
//! engine returns.

use std::collections::VecDeque;
use std::io;

use chrono::{DateTime, Local, Utc};
use rusqlite::Connection;

use crate::api::{LessonStarter, ReviewReporter, WaniKani};
use crate::commands::{Command, HELP_TEXT};
use crate::config;
use crate::console::Console;
use crate::db;
use crate::domain::{Assignment, StudyMode};
use crate::error::LogOnError;
use crate::srs::{BatchOutcome, assemble_batch, run_batch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  Normal,
  Study(StudyMode),
}

pub struct Session<'a, A: WaniKani + ?Sized, C: Console + ?Sized> {
  api: &'a A,
  console: &'a mut C,
  conn: Option<&'a Connection>,
  batch_size: usize,
  started_at: DateTime<Utc>,
  mode: Mode,
  /// Assignments fetched for the current study mode
  source: Option<VecDeque<Assignment>>,
}

impl<'a, A: WaniKani + ?Sized, C: Console + ?Sized> Session<'a, A, C> {
  pub fn new(api: &'a A, console: &'a mut C, conn: Option<&'a Connection>, batch_size: usize) -> Self {
    Self {
      api,
      console,
      conn,
      batch_size: batch_size.max(1),
      started_at: Utc::now(),
      mode: Mode::Normal,
      source: None,
    }
  }

  pub fn mode(&self) -> Mode {
    self.mode
  }

  /// Welcome line, previous run, summary and help
  pub fn greet(&mut self) -> io::Result<()> {
    self.console.say("\nおかえりなさい!")?;

    let last = self
      .conn
      .and_then(|conn| db::get_last_execution(conn).log_warn("Failed to read last run"))
      .flatten();
    match last {
      Some(at) => self.console.say(&format!(
        "Last run: {}",
        at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
      ))?,
      None => self.console.say("First run on this machine.")?,
    }

    self.print_summary(self.started_at)?;
    self.console.say(HELP_TEXT)
  }

  /// Run until the user quits or input ends
  pub fn run(&mut self) -> io::Result<()> {
    loop {
      match self.mode {
        Mode::Normal => {
          if !self.step_normal()? {
            return Ok(());
          }
        }
        Mode::Study(mode) => self.step_study(mode)?,
      }
    }
  }

  /// Record this run's start time for the next one
  pub fn finish(&self) {
    if let Some(conn) = self.conn {
      db::set_last_execution(conn, self.started_at).log_warn("Failed to save last run time");
    }
  }

  /// Handle one main-prompt command. Returns false when the session should end.
  fn step_normal(&mut self) -> io::Result<bool> {
    let Some(line) = self.console.read_line("> ")? else {
      return Ok(false);
    };
    if line.trim().is_empty() {
      return Ok(true);
    }

    match Command::parse(&line) {
      Some(Command::Help) => self.console.say(HELP_TEXT)?,
      Some(Command::Lesson) => self.enter(StudyMode::Lesson)?,
      Some(Command::Review) => self.enter(StudyMode::Review)?,
      Some(Command::Summary) => self.print_summary(Utc::now())?,
      Some(Command::History) => self.print_history()?,
      Some(Command::Quit) => return Ok(false),
      None => self.console.say("Unrecognized command")?,
    }
    Ok(true)
  }

  fn enter(&mut self, mode: StudyMode) -> io::Result<()> {
    self.console.say(&format!("starting {}...", mode.plural()))?;
    self.mode = Mode::Study(mode);
    self.source = None;
    Ok(())
  }

  fn leave(&mut self) {
    self.mode = Mode::Normal;
    self.source = None;
  }

  /// Fetch the source if needed, then run one batch from its front
  fn step_study(&mut self, mode: StudyMode) -> io::Result<()> {
    if self.source.is_none() {
      let fetched = match mode {
        StudyMode::Lesson => self.api.lesson_assignments(),
        StudyMode::Review => self.api.review_assignments(),
      };
      match fetched {
        Ok(assignments) => {
          self
            .console
            .say(&format!("Request returned {} assignments.", assignments.len()))?;
          self.source = Some(assignments.into());
        }
        Err(e) => {
          tracing::error!("Failed to fetch {}: {}", mode.plural(), e);
          self
            .console
            .say(&format!("Unable to retrieve {} from API.\n{}", mode.plural(), e))?;
          self.leave();
          return Ok(());
        }
      }
    }

    let Some(source) = self.source.as_mut() else {
      return Ok(());
    };
    if source.is_empty() {
      self
        .console
        .say(&format!("Completed all available {}!", mode.plural()))?;
      self.leave();
      return Ok(());
    }

    let mut batch = match assemble_batch(source.iter(), self.batch_size, self.api) {
      Ok(batch) => batch,
      Err(e) => {
        tracing::error!("Failed to assemble {} batch: {}", mode.as_str(), e);
        self.console.say(&format!("Unable to prepare {}.\n{}", mode.plural(), e))?;
        self.leave();
        return Ok(());
      }
    };

    let mut rng = rand::rng();
    let outcome = match mode {
      StudyMode::Review => {
        let mut handler = ReviewReporter::new(self.api, self.conn);
        run_batch(&mut batch, &mut *self.console, &mut handler, &mut rng)?
      }
      StudyMode::Lesson => {
        let mut handler = LessonStarter::new(self.api, self.conn);
        run_batch(&mut batch, &mut *self.console, &mut handler, &mut rng)?
      }
    };

    // The whole batch leaves the source, finished or not
    if let Some(source) = self.source.as_mut() {
      source.drain(..batch.consumed.min(source.len()));
    }
    if outcome == BatchOutcome::Quit {
      tracing::info!(
        "Quit {} with {} unfinished items in the batch",
        mode.plural(),
        batch.tracker.unfinished()
      );
      self.leave();
    }
    Ok(())
  }

  fn print_summary(&mut self, at: DateTime<Utc>) -> io::Result<()> {
    match self.api.summary() {
      Ok(summary) => {
        self.console.say(&format!(
          "You have {} lessons available.",
          summary.available_lessons(at)
        ))?;
        self.console.say(&format!(
          "You have {} reviews available.",
          summary.available_reviews(at)
        ))
      }
      Err(e) => {
        tracing::error!("Failed to fetch summary: {}", e);
        self.console.say(&format!("Unable to retrieve summary from API.\n{}", e))
      }
    }
  }

  fn print_history(&mut self) -> io::Result<()> {
    let Some(conn) = self.conn else {
      return self.console.say("No local history available.");
    };
    let records = db::recent_completions(conn, config::HISTORY_LIMIT).log_warn_default("Failed to read history");
    if records.is_empty() {
      return self.console.say("Nothing completed yet.");
    }
    for record in records {
      self.console.say(&format!(
        "{}  {:<6}  {}  meaning x{}  reading x{}{}",
        record.completed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        record.study_mode.as_str(),
        record.display,
        record.incorrect_meaning,
        record.incorrect_reading,
        if record.submitted { "" } else { "  (not submitted)" }
      ))?;
    }
    Ok(())
  }
}
