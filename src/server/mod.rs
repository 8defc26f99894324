//! Control-socket server.
//!
//! # Data Flow
//! ```text
//! Incoming unix-socket connection
//!     → listener.rs (accept loop, connection cap)
//!     → control.rs (line protocol: ping, status)
//! ```
//!
//! # Design Decisions
//! - One task per connection, permit held for the connection lifetime
//! - The line protocol is a liveness/debug surface, not a public API
//! - Stale socket files from a previous run are removed before bind

pub mod control;
pub mod listener;

pub use control::ControlServer;
pub use listener::{ControlListener, ServerError};
