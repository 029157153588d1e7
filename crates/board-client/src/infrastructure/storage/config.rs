//! TOML-based configuration for the board client.
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration.  Example:
//!
//! ```toml
//! log_level = "debug"
//!
//! [server]
//! host = "board.example.net"
//! port = 1111
//!
//! [protocol]
//! retries = 5
//! timeout_secs = 0.25
//!
//! [ui]
//! poll_interval_ms = 1000
//! status_hold_ticks = 5
//! max_messages = 20
//! ```
//!
//! Command-line options override values read here; see `main.rs`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::application::board_service::RequestError;
use crate::infrastructure::network::ChannelConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The values parsed but are out of range.
    #[error(transparent)]
    Invalid(#[from] RequestError),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level client configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// `tracing` log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub protocol: ProtocolConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where the board server lives.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Retry policy for the request channel.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProtocolConfig {
    /// Transmissions per request, including the first.
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// Per-attempt wait in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,
}

/// Presentation and polling settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Delay between two GET polls.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Polls a status line stays visible.  `0` keeps it until replaced.
    #[serde(default = "default_status_hold_ticks")]
    pub status_hold_ticks: u32,
    /// Most recent messages the terminal view keeps.
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_host() -> String {
    "localhost".to_string()
}
fn default_port() -> u16 {
    1111
}
fn default_retries() -> u32 {
    3
}
fn default_timeout_secs() -> f64 {
    0.1
}
fn default_poll_interval_ms() -> u64 {
    1000
}
fn default_status_hold_ticks() -> u32 {
    5
}
fn default_max_messages() -> usize {
    20
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            server: ServerConfig::default(),
            protocol: ProtocolConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            status_hold_ticks: default_status_hold_ticks(),
            max_messages: default_max_messages(),
        }
    }
}

impl ClientConfig {
    /// Converts the server and protocol sections into a validated
    /// [`ChannelConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the timeout is not a positive
    /// finite number or any other channel setting is out of range.
    pub fn channel_config(&self) -> Result<ChannelConfig, ConfigError> {
        let timeout = Duration::try_from_secs_f64(self.protocol.timeout_secs).map_err(|_| {
            RequestError::configuration(format!(
                "timeout must be a positive number of seconds, got {}",
                self.protocol.timeout_secs
            ))
        })?;

        let channel = ChannelConfig {
            host: self.server.host.clone(),
            port: self.server.port,
            retry_limit: self.protocol.retries,
            timeout,
        };
        channel.validate()?;
        Ok(channel)
    }

    /// Delay between two polls.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.ui.poll_interval_ms.max(1))
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Loads `ClientConfig` from `path`, returning `ClientConfig::default()` if
/// the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ClientConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
