//! Logger construction and the process-wide active slot.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;
use thiserror::Error;

use crate::logging::format::{Level, RenderContext, RenderFn, JSON_FORMATTER, PLAIN_FORMATTER};
use crate::logging::registry::{FormatterRegistry, RegistryError};

/// Output encoding for the process log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// One line per record, message text only.
    Plain,
    /// One JSON object per line: pid, level, message.
    JsonLines,
}

/// Recognized logging options.
///
/// The encoding is the only option: no level filtering, no multiple
/// sinks, no rotation.
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig {
    pub encoding: Encoding,
}

/// Console sink for rendered records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    Stderr,
}

/// One logger configuration: exactly one formatter and one sink.
///
/// There are two fixed templates, one per encoding. Keeping them as
/// separate constructors instead of a single parameterized template keeps
/// each encoding's shape explicit, at the cost of repeating the sink.
#[derive(Debug, Clone, Copy)]
pub struct LoggerTemplate {
    pub formatter: &'static str,
    pub sink: Sink,
}

impl LoggerTemplate {
    /// Plain-text template: builtin message formatter, console sink.
    pub fn plain() -> Self {
        Self {
            formatter: PLAIN_FORMATTER,
            sink: Sink::Stderr,
        }
    }

    /// JSON-lines template: escaping formatter, console sink.
    pub fn json_lines() -> Self {
        Self {
            formatter: JSON_FORMATTER,
            sink: Sink::Stderr,
        }
    }

    /// Template for a configuration's encoding.
    pub fn for_config(config: &LoggingConfig) -> Self {
        match config.encoding {
            Encoding::Plain => Self::plain(),
            Encoding::JsonLines => Self::json_lines(),
        }
    }
}

/// Logger construction failed: the template references a formatter that
/// cannot be resolved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("could not construct logger: {0}")]
pub struct ConstructionError(#[from] pub RegistryError);

/// A logger bound to one render function and one sink.
///
/// Writes go through a mutex so records arriving from concurrent tasks
/// never interleave mid-line. Log calls are fire-and-forget: they never
/// return an error and never panic; a poisoned sink lock is recovered and
/// write errors are discarded.
pub struct Logger {
    render: RenderFn,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

impl Logger {
    /// Construct a logger from a template, resolving the formatter name
    /// through the registry.
    pub fn from_template(
        registry: &FormatterRegistry,
        template: &LoggerTemplate,
    ) -> Result<Self, ConstructionError> {
        let render = registry.lookup(template.formatter)?;
        let writer: Box<dyn Write + Send> = match template.sink {
            Sink::Stderr => Box::new(io::stderr()),
        };
        Ok(Self::with_writer(render, writer))
    }

    /// Logger with an explicit writer. Lets tests capture output.
    pub fn with_writer(render: RenderFn, writer: Box<dyn Write + Send>) -> Self {
        Self {
            render,
            sink: Mutex::new(writer),
        }
    }

    /// Render one record and write it to the sink in a single call.
    pub fn log(&self, level: Level, message: &str) {
        let ctx = RenderContext::current();
        let rendered = (self.render)(message, level, &ctx);
        let mut sink = match self.sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = sink.write_all(rendered.as_bytes());
    }

    pub fn trace(&self, message: &str) {
        self.log(Level::Trace, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    pub fn critical(&self, message: &str) {
        self.log(Level::Critical, message);
    }

    /// Best-effort drain of buffered output. Blocks only for the sink
    /// lock plus one flush call, never indefinitely.
    pub fn flush(&self) {
        let mut sink = match self.sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = sink.flush();
    }
}

/// Process-wide active-logger slot.
///
/// Uninitialized at process start: log calls are no-ops until a
/// constructed `Logger` is installed during startup. Install is an atomic
/// pointer swap with no failure mode, replacing whatever was active. The
/// slot is an owned value passed by reference to whoever logs, so
/// independent instances can exist side by side in tests.
pub struct ProcessLogger {
    active: ArcSwapOption<Logger>,
}

impl ProcessLogger {
    /// New slot with no active logger.
    pub fn new() -> Self {
        Self {
            active: ArcSwapOption::empty(),
        }
    }

    /// Install `logger` as the active logger, replacing any previous one.
    pub fn install(&self, logger: Logger) {
        self.active.store(Some(Arc::new(logger)));
    }

    /// Whether a logger has been installed.
    pub fn is_active(&self) -> bool {
        self.active.load().is_some()
    }

    /// Log through the active logger; no-op while uninitialized.
    pub fn log(&self, level: Level, message: &str) {
        if let Some(logger) = &*self.active.load() {
            logger.log(level, message);
        }
    }

    pub fn trace(&self, message: &str) {
        self.log(Level::Trace, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    pub fn critical(&self, message: &str) {
        self.log(Level::Critical, message);
    }

    /// Flush the active logger's sink; no-op while uninitialized.
    pub fn flush(&self) {
        if let Some(logger) = &*self.active.load() {
            logger.flush();
        }
    }
}

impl Default for ProcessLogger {
    fn default() -> Self {
        Self::new()
    }
}
