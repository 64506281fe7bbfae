//! Crate error type and helpers for best-effort operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::SubjectId;

#[derive(Error, Debug)]
pub enum WkError {
  #[error("HTTP error: {0}")]
  Http(Box<reqwest::Error>),

  #[error("API responded {status}: {message}")]
  Api { status: u16, message: String },

  #[error("I/O error: {0}")]
  Io(Box<std::io::Error>),

  #[error("Config error: {0}")]
  Config(#[from] toml::de::Error),

  #[error("No API token found (looked for {})", .0.display())]
  MissingToken(PathBuf),

  #[error("API token is not a valid header value")]
  InvalidToken,

  #[error("Unknown subject type: {0}")]
  UnknownSubjectKind(String),

  #[error("Subject {0} has no accepted answers to score against")]
  Unscorable(SubjectId),
}

impl From<std::io::Error> for WkError {
  fn from(error: std::io::Error) -> Self {
    WkError::Io(Box::new(error))
  }
}

impl From<reqwest::Error> for WkError {
  fn from(error: reqwest::Error) -> Self {
    WkError::Http(Box::new(error))
  }
}

pub type Result<T> = std::result::Result<T, WkError>;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
  /// Log the error at warn level and return None
  fn log_warn(self, context: &str) -> Option<T>;
  /// Log the error at warn level and return the default
  fn log_warn_default(self, context: &str) -> T
  where
    T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
  fn log_warn(self, context: &str) -> Option<T> {
    match self {
      Ok(v) => Some(v),
      Err(e) => {
        tracing::warn!("{}: {}", context, e);
        None
      }
    }
  }

  fn log_warn_default(self, context: &str) -> T
  where
    T: Default,
  {
    match self {
      Ok(v) => v,
      Err(e) => {
        tracing::warn!("{}: {}", context, e);
        T::default()
      }
    }
  }
}
