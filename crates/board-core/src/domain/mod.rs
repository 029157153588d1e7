//! Domain rules for the message board.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain** (or "entities" layer).  Domain code:
//!
//! - Contains the core business rules of the application.
//! - Has **no** imports from sockets, async runtimes, or terminal I/O.
//! - Can be compiled and tested on any platform without any external setup.
//! - Defines what makes the system what it is: here, the limits a post must
//!   respect and the shape of a message on the board.
//!
//! Code in outer layers (infrastructure, application, UI) depends on the domain,
//! but the domain never depends on them.

/// Post validation and the user-visible rejection reasons.
pub mod post;

/// A single message as displayed on the board.
pub mod record;
