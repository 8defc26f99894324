//! Daemon entry point.

use std::process;
use std::sync::Arc;

use clap::Parser;

use agentd::cli::Options;
use agentd::lifecycle::{self, Shutdown};
use agentd::logging::{self, FormatterRegistry, ProcessLogger};
use agentd::server::{ControlListener, ControlServer};

fn main() {
    process::exit(run());
}

/// Startup in dependency order: options, logging, runtime, server.
///
/// Returns the process exit code so `main` stays a thin wrapper and the
/// final flush runs after the server loop is done.
fn run() -> i32 {
    let options = Options::parse();

    let logger = Arc::new(ProcessLogger::new());
    let mut registry = FormatterRegistry::new();
    if let Err(err) = logging::init(&logger, &mut registry, options.use_json) {
        // No logging channel exists yet; the diagnostic goes straight to
        // stderr.
        eprintln!("could not initialize logging: {}", err);
        return 1;
    }

    let code = serve(&options, Arc::clone(&logger));
    logger.flush();
    code
}

/// Run the control server until a termination signal arrives.
fn serve(options: &Options, logger: Arc<ProcessLogger>) -> i32 {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            logger.critical(&format!("could not start runtime: {}", err));
            return 1;
        }
    };

    runtime.block_on(async {
        let listener = match ControlListener::bind(&options.sock) {
            Ok(listener) => listener,
            Err(err) => {
                logger.critical(&err.to_string());
                return 1;
            }
        };

        logger.info(&format!(
            "agent starting, modules dir {}",
            options.modules_dir.display()
        ));

        let shutdown = Shutdown::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            lifecycle::shutdown_signal().await;
            trigger.trigger();
        });

        let server = ControlServer::new(options.modules_dir.clone(), Arc::clone(&logger));
        match server.run(listener, shutdown.subscribe()).await {
            Ok(()) => 0,
            Err(err) => {
                logger.error(&format!("control server failed: {}", err));
                1
            }
        }
    })
}
