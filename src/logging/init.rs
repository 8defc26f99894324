//! One-shot wiring of the logging subsystem.

use thiserror::Error;

use crate::logging::format::{json_escape_msg, JSON_FORMATTER};
use crate::logging::logger::{
    ConstructionError, Encoding, Logger, LoggerTemplate, LoggingConfig, ProcessLogger,
};
use crate::logging::registry::{FormatterRegistry, RegistryError};

/// Fatal logging-setup failures.
///
/// Either variant leaves the process without a usable logging channel;
/// the caller is expected to print the diagnostic to stderr and exit
/// non-zero. The initializer itself never terminates the process.
#[derive(Debug, Error)]
pub enum InitError {
    /// The escaping formatter could not be registered.
    #[error("could not register escaping formatter: {0}")]
    Register(#[source] RegistryError),

    /// The logger could not be built from the selected template.
    #[error("could not initialize logger: {0}")]
    Construction(#[from] ConstructionError),
}

/// Initialize process logging.
///
/// Order matters: the escaping formatter is registered before any
/// template referencing it is used to construct a logger, so lookup
/// during construction cannot miss. `use_json` selects the encoding:
/// JSON-lines when set, plain text otherwise. The constructed logger is
/// installed into `process`, replacing whatever was active. One call per
/// process run; the chosen encoding stays fixed until exit.
pub fn init(
    process: &ProcessLogger,
    registry: &mut FormatterRegistry,
    use_json: bool,
) -> Result<(), InitError> {
    registry
        .register(JSON_FORMATTER, json_escape_msg)
        .map_err(InitError::Register)?;

    let config = LoggingConfig {
        encoding: if use_json {
            Encoding::JsonLines
        } else {
            Encoding::Plain
        },
    };
    let template = LoggerTemplate::for_config(&config);

    let logger = Logger::from_template(registry, &template)?;
    process.install(logger);
    Ok(())
}
