//! Configuration loading.
//!
//! Configuration lives in a single TOML file; every section and key is
//! optional and falls back to its default.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, DemoConfig, LoggingConfig};
