//! Message board client entry point.
//!
//! Parses the command line, asks for a username, opens the request channel,
//! and runs the poll/post loop until stdin closes or Ctrl+C is pressed.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ Cli::parse() + load_config()      -- CLI overrides the TOML file
//!  └─ prompt_username()                 -- re-asks until the name is valid
//!  └─ ReliableRequestChannel::connect() -- UDP socket on an ephemeral port
//!  └─ run loop (tokio::select!)
//!       ├─ poll tick     -> controller.retrieve_messages()
//!       ├─ stdin line    -> controller.post_message(line)
//!       └─ Ctrl+C / EOF  -> exit
//! ```
//!
//! Logs go to stderr so they do not interleave with the board on stdout.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use board_client::application::board_controller::MessageBoardController;
use board_client::infrastructure::network::ReliableRequestChannel;
use board_client::infrastructure::storage::{load_config, ClientConfig};
use board_client::infrastructure::view::TerminalView;
use board_core::validate_username;

const USERNAME_PROMPT: &str = "What is your user name (max 8 characters)? ";

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Message board client.
///
/// Polls the board server once per poll interval and posts every line typed
/// on stdin as a new message.
#[derive(Debug, Parser)]
#[command(
    name = "board-client",
    about = "Message board client over a stop-and-wait UDP protocol",
    version
)]
struct Cli {
    /// Hostname or IP address of the board server.  Default `localhost`.
    #[arg(long, env = "BOARD_HOST")]
    host: Option<String>,

    /// UDP port of the board server.  Default 1111.
    #[arg(long, env = "BOARD_PORT", value_parser = clap::value_parser!(u16).range(1..))]
    port: Option<u16>,

    /// Transmissions per request, including the first.  Default 3.
    #[arg(long, env = "BOARD_RETRIES")]
    retries: Option<u32>,

    /// Seconds to wait for each acknowledgment.  Default 0.1.
    #[arg(long, env = "BOARD_TIMEOUT")]
    timeout: Option<f64>,

    /// Optional TOML configuration file.
    #[arg(long, env = "BOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Username to post as.  Prompted for when absent.
    #[arg(long, env = "BOARD_USER")]
    user: Option<String>,
}

impl Cli {
    /// Applies command-line values on top of `file`.
    fn apply_to(&self, mut file: ClientConfig) -> ClientConfig {
        if let Some(host) = &self.host {
            file.server.host = host.clone();
        }
        if let Some(port) = self.port {
            file.server.port = port;
        }
        if let Some(retries) = self.retries {
            file.protocol.retries = retries;
        }
        if let Some(timeout) = self.timeout {
            file.protocol.timeout_secs = timeout;
        }
        file
    }
}

// ── Username prompt ───────────────────────────────────────────────────────────

/// Asks on stdin until a non-empty name that passes [`validate_username`]
/// is entered.
async fn prompt_username(
    view: &TerminalView,
    lines: &mut Lines<BufReader<Stdin>>,
) -> anyhow::Result<String> {
    loop {
        view.prompt(USERNAME_PROMPT);
        let Some(line) = lines.next_line().await.context("failed to read username")? else {
            bail!("stdin closed before a username was entered");
        };
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        match validate_username(name) {
            Ok(()) => return Ok(name.to_string()),
            Err(rejection) => view.prompt(&format!("{rejection}\n")),
        }
    }
}

/// The message text of a typed line.  Only a stray carriage return is
/// removed; any other whitespace is part of the message.
fn message_from_line(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ClientConfig::default(),
    };
    let config = cli.apply_to(file_config);

    // RUST_LOG wins; otherwise the configured level.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let channel_config = config
        .channel_config()
        .context("invalid channel configuration")?;

    let view = TerminalView::new(config.ui.max_messages);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let name = match &cli.user {
        Some(user) => {
            if let Err(rejection) = validate_username(user) {
                bail!("--user {user:?}: {rejection}");
            }
            user.clone()
        }
        None => prompt_username(&view, &mut lines).await?,
    };

    let channel = ReliableRequestChannel::connect(channel_config)
        .await
        .context("could not open the datagram channel")?;

    info!(
        user = %name,
        server = %channel.transport().server_addr(),
        retries = channel.config().retry_limit,
        timeout = ?channel.config().timeout,
        "board client starting"
    );

    let mut controller =
        MessageBoardController::new(name, channel, view, config.ui.status_hold_ticks);

    let mut poll = time::interval(config.poll_interval());
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = poll.tick() => controller.retrieve_messages().await,
            line = lines.next_line() => match line {
                Ok(Some(text)) => {
                    controller.post_message(message_from_line(&text)).await;
                }
                Ok(None) => {
                    info!("stdin closed");
                    break;
                }
                Err(e) => {
                    warn!("failed to read stdin: {e}");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
        }
    }

    info!("board client stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
