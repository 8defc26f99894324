//! Per-connection line protocol.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::sync::broadcast;

use crate::logging::ProcessLogger;
use crate::server::listener::{ControlListener, ServerError};

/// Reply to the `status` command.
#[derive(Serialize)]
struct StatusReply {
    pid: u32,
    modules_dir: String,
}

/// Control-socket server.
///
/// Accepts connections and serves the line protocol until shutdown is
/// triggered: one command per line, one reply per line.
pub struct ControlServer {
    modules_dir: PathBuf,
    logger: Arc<ProcessLogger>,
}

impl ControlServer {
    pub fn new(modules_dir: PathBuf, logger: Arc<ProcessLogger>) -> Self {
        Self {
            modules_dir,
            logger,
        }
    }

    /// Run the accept loop.
    ///
    /// Only returns when the shutdown signal fires or the listener fails.
    /// The listener is consumed so its socket file is unlinked on return.
    pub async fn run(
        &self,
        listener: ControlListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        self.logger.info(&format!(
            "listening on control socket {}",
            listener.path().display()
        ));

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, permit) = accepted?;
                    let modules_dir = self.modules_dir.clone();
                    let logger = Arc::clone(&self.logger);
                    tokio::spawn(async move {
                        if let Err(err) = serve_connection(stream, &modules_dir, &logger).await {
                            logger.debug(&format!("control connection ended: {}", err));
                        }
                        drop(permit);
                    });
                }
                _ = shutdown.recv() => {
                    self.logger.info("shutdown requested, closing control socket");
                    break;
                }
            }
        }
        Ok(())
    }
}

/// Serve one connection until the peer closes it.
async fn serve_connection(
    stream: UnixStream,
    modules_dir: &Path,
    logger: &ProcessLogger,
) -> std::io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        let reply = match command {
            "ping" => "pong".to_string(),
            "status" => {
                let status = StatusReply {
                    pid: std::process::id(),
                    modules_dir: modules_dir.display().to_string(),
                };
                serde_json::to_string(&status).unwrap_or_else(|_| "{}".to_string())
            }
            other => {
                logger.debug(&format!("unknown control command {:?}", other));
                format!("error: unknown command {:?}", other)
            }
        };
        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }
    Ok(())
}
