//! Project path functions - single source of truth for all file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")

use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "config.toml";

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
  DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// Local SQLite store
pub fn db_path() -> PathBuf {
  PathBuf::from(data_dir()).join("wk.db")
}

/// Append-only log file
pub fn log_path() -> PathBuf {
  PathBuf::from(data_dir()).join("error.log")
}
