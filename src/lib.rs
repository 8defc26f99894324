//! Background agent daemon.
//!
//! Bootstraps a long-running service: parses startup options, installs
//! the process-wide structured logger (plain text or JSON-lines, chosen
//! at startup), then serves a small control protocol on a unix domain
//! socket until the process is killed.
//!
//! # Architecture Overview
//! ```text
//!               ┌───────────────────────────────────────────┐
//!               │                  agentd                    │
//!               │                                            │
//!   startup ────┼─▶ cli ──▶ logging::init ──▶ server::run    │
//!               │              │                  │          │
//!               │              ▼                  ▼          │
//!               │        ProcessLogger      ControlListener  │
//!               │         (stderr sink)     (unix socket)    │
//!               │                                            │
//!               │   lifecycle: signals ──▶ shutdown ──▶ flush│
//!               └───────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod lifecycle;
pub mod logging;
pub mod server;

pub use cli::Options;
pub use lifecycle::Shutdown;
pub use logging::{FormatterRegistry, Logger, ProcessLogger};
pub use server::{ControlListener, ControlServer};
