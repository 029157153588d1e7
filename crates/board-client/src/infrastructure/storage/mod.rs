//! Storage infrastructure: configuration file loading.
//!
//! The client only reads configuration; it never writes it back.  The
//! `config` sub-module parses an optional TOML file into [`ClientConfig`]
//! and falls back to defaults for anything the file leaves out.

pub mod config;

pub use config::{load_config, ClientConfig, ConfigError};
