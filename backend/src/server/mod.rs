//! Server assembly helpers.

pub mod config;

pub use config::{AppConfig, ConfigError};
