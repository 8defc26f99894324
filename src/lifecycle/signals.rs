//! OS signal handling.

use tokio::signal::unix::{signal, SignalKind};

/// Wait for a termination signal (SIGTERM or SIGINT), whichever arrives
/// first.
pub async fn shutdown_signal() {
    let mut term = match signal(SignalKind::terminate()) {
        Ok(term) => term,
        Err(err) => {
            // Without a SIGTERM handler the daemon can still be stopped
            // interactively; fall back to ctrl-c alone.
            eprintln!("could not install SIGTERM handler: {}", err);
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = term.recv() => {}
        _ = tokio::signal::ctrl_c() => {}
    }
}
