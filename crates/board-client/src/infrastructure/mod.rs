//! Infrastructure layer for the board client.
//!
//! Contains the OS-facing adapters: datagram I/O, configuration files, and
//! the terminal.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `board_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`network`** – the UDP transport and the stop-and-wait request channel
//!   that implements `BoardService`.
//!
//! - **`storage`** – reads the optional TOML configuration file.
//!
//! - **`view`** – the terminal implementation of `MessageBoardView`.

pub mod network;
pub mod storage;
pub mod view;
