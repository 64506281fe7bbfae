//! Application configuration.
//!
//! Each setting is resolved with priority: command line > config.toml >
//! environment (.env) > default. Command-line overrides are applied by the
//! binary after loading.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, WkError};

// ==================== API Configuration ====================

/// WaniKani API v2 root
pub const DEFAULT_API_URL: &str = "https://api.wanikani.com/v2";

/// Value sent in the Wanikani-Revision header
pub const API_REVISION: &str = "20170710";

/// Per-request timeout
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// File holding the API token when none is set in the environment
pub const DEFAULT_TOKEN_FILE: &str = "token";

// ==================== Study Configuration ====================

/// Items quizzed together before moving on
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Entries shown by the `history` command
pub const HISTORY_LIMIT: i64 = 10;

// ==================== Loading ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
  api: Option<ApiConfig>,
  study: Option<StudyConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiConfig {
  base_url: Option<String>,
  token_file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StudyConfig {
  batch_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
  pub base_url: String,
  pub token_file: PathBuf,
  /// Token given directly through WK_API_TOKEN
  pub token: Option<String>,
  pub batch_size: usize,
}

impl Settings {
  /// Load settings from `config_path` (if it exists), `.env` and the process environment
  pub fn load(config_path: &Path) -> Result<Self> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let contents = match std::fs::read_to_string(config_path) {
      Ok(contents) => {
        tracing::info!("Using config from {}", config_path.display());
        Some(contents)
      }
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
      Err(e) => return Err(e.into()),
    };

    Self::from_sources(contents.as_deref(), |key| std::env::var(key).ok())
  }

  /// Resolve settings from config file contents and an environment lookup
  pub fn from_sources<F>(config_toml: Option<&str>, env: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let file: FileConfig = match config_toml {
      Some(contents) => toml::from_str(contents)?,
      None => FileConfig::default(),
    };
    let api = file.api.unwrap_or_default();
    let study = file.study.unwrap_or_default();

    let base_url = api
      .base_url
      .or_else(|| env("WK_API_URL"))
      .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let token_file = api
      .token_file
      .or_else(|| env("WK_TOKEN_FILE"))
      .map(PathBuf::from)
      .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE));

    let batch_size = match study.batch_size {
      Some(size) => size,
      None => match env("WK_BATCH_SIZE") {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
          tracing::warn!("Ignoring invalid WK_BATCH_SIZE {:?}", raw);
          DEFAULT_BATCH_SIZE
        }),
        None => DEFAULT_BATCH_SIZE,
      },
    };

    let token = env("WK_API_TOKEN").filter(|t| !t.trim().is_empty());

    Ok(Self {
      base_url,
      token_file,
      token,
      batch_size: batch_size.max(1),
    })
  }

  /// API token from the environment, falling back to the token file
  pub fn api_token(&self) -> Result<String> {
    if let Some(token) = &self.token {
      return Ok(token.trim().to_string());
    }
    match std::fs::read_to_string(&self.token_file) {
      Ok(contents) if !contents.trim().is_empty() => Ok(contents.trim().to_string()),
      Ok(_) => Err(WkError::MissingToken(self.token_file.clone())),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(WkError::MissingToken(self.token_file.clone())),
      Err(e) => Err(e.into()),
    }
  }
}
