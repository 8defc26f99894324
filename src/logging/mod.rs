//! Process logging subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     registry.rs (formatter name → render function)
//!     init.rs (register escaping formatter, pick template, build, install)
//!
//! Per log call:
//!     logger.rs (active Logger)
//!     → format.rs (render function bound at construction time)
//!     → stderr (single console sink, writes serialized)
//! ```
//!
//! # Design Decisions
//! - Exactly two encodings: plain text and JSON-lines
//! - Formatters resolved by name from a registry, not hard-coded
//! - The active logger is an owned object passed by reference, not an
//!   ambient global, so independent instances can exist in tests
//! - Log calls never fail; a record that cannot be encoded degrades to
//!   the raw message text

pub mod format;
pub mod init;
pub mod logger;
pub mod registry;

pub use format::{json_escape_msg, plain_msg, Level, RenderContext, RenderFn, JSON_FORMATTER, PLAIN_FORMATTER};
pub use init::{init, InitError};
pub use logger::{ConstructionError, Encoding, Logger, LoggerTemplate, LoggingConfig, ProcessLogger, Sink};
pub use registry::{FormatterRegistry, RegistryError};
