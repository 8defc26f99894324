//! Process lifecycle.
//!
//! # Responsibilities
//! - Coordinate graceful shutdown across long-running tasks
//! - Translate OS termination signals into the internal shutdown event

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_signal;
