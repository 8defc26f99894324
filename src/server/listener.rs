//! Bounded unix-socket listener.
//!
//! # Responsibilities
//! - Bind the control socket, clearing stale files from a previous run
//! - Accept incoming connections
//! - Enforce the concurrent-connection cap via semaphore

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Maximum concurrent control connections.
const MAX_CONNECTIONS: usize = 64;

/// Errors from the control server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind the control socket.
    #[error("could not bind control socket: {0}")]
    Bind(std::io::Error),

    /// Failed to accept a connection.
    #[error("could not accept connection: {0}")]
    Accept(std::io::Error),
}

/// Unix-socket listener that caps concurrent connections.
///
/// A semaphore enforces the cap: `accept` waits for a free slot before
/// accepting, and the returned permit must be held for the connection's
/// lifetime. Dropping the listener unlinks the socket file.
pub struct ControlListener {
    inner: UnixListener,
    path: PathBuf,
    connection_limit: Arc<Semaphore>,
}

impl ControlListener {
    /// Bind to `path`, removing any stale socket file left by a previous
    /// run.
    pub fn bind(path: &Path) -> Result<Self, ServerError> {
        if path.exists() {
            std::fs::remove_file(path).map_err(ServerError::Bind)?;
        }
        let inner = UnixListener::bind(path).map_err(ServerError::Bind)?;
        Ok(Self {
            inner,
            path: path.to_path_buf(),
            connection_limit: Arc::new(Semaphore::new(MAX_CONNECTIONS)),
        })
    }

    /// Accept the next connection, waiting for a free slot first.
    pub async fn accept(&self) -> Result<(UnixStream, ConnectionPermit), ServerError> {
        // Acquire the permit first so a saturated server stops accepting
        // instead of queueing sockets.
        let permit = self
            .connection_limit
            .clone()
            .acquire_owned()
            .await
            .expect("connection semaphore closed unexpectedly");

        let (stream, _addr) = self.inner.accept().await.map_err(ServerError::Accept)?;
        Ok((stream, ConnectionPermit { _permit: permit }))
    }

    /// Path the socket is bound at.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remaining connection slots.
    pub fn available_permits(&self) -> usize {
        self.connection_limit.available_permits()
    }
}

impl Drop for ControlListener {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// A permit representing one connection slot.
///
/// Dropping it frees the slot for the next connection.
pub struct ConnectionPermit {
    _permit: OwnedSemaphorePermit,
}
