pub mod api;
pub mod commands;
pub mod config;
pub mod console;
pub mod db;
pub mod domain;
pub mod error;
pub mod paths;
pub mod session;
pub mod srs;
pub mod validation;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
