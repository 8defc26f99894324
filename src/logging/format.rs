//! Message formatters and the per-record render context.

use serde::Serialize;

/// Severity of one log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl Level {
    /// Canonical lowercase name, stable across calls.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ambient data handed to a render function for one record.
///
/// The pid is captured when the context is created, immediately before
/// rendering, so it reflects the live process id at log time.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub pid: u32,
}

impl RenderContext {
    /// Context for the current process.
    pub fn current() -> Self {
        Self {
            pid: std::process::id(),
        }
    }

    /// Context with a fixed pid, for deterministic rendering in tests.
    pub fn with_pid(pid: u32) -> Self {
        Self { pid }
    }
}

/// Renders one record to its final textual form, line terminator included.
pub type RenderFn = fn(message: &str, level: Level, ctx: &RenderContext) -> String;

/// Name of the builtin plain-message formatter.
pub const PLAIN_FORMATTER: &str = "Msg";

/// Name of the JSON-line escaping formatter.
pub const JSON_FORMATTER: &str = "JSONEscapeMsg";

/// One record of the JSON-lines encoding.
#[derive(Serialize)]
struct LogRecord<'a> {
    pid: u32,
    level: Level,
    message: &'a str,
}

/// Plain encoding: the message text and nothing else.
pub fn plain_msg(message: &str, _level: Level, _ctx: &RenderContext) -> String {
    let mut line = String::with_capacity(message.len() + 1);
    line.push_str(message);
    line.push('\n');
    line
}

/// JSON-lines encoding: one `{"pid":…,"level":…,"message":…}` object per
/// line. The message is JSON-escaped so embedded quotes, backslashes,
/// control characters and newlines cannot break the stream.
///
/// A record that fails to encode is not an error for the caller: a
/// diagnostic goes to stderr and the original message text is returned
/// unrendered, keeping the logging path available.
pub fn json_escape_msg(message: &str, level: Level, ctx: &RenderContext) -> String {
    let record = LogRecord {
        pid: ctx.pid,
        level,
        message,
    };
    match serde_json::to_string(&record) {
        Ok(mut line) => {
            // Turn the object into jsonl by appending a newline.
            line.push('\n');
            line
        }
        Err(err) => {
            eprintln!("could not format log message: {}", err);
            message.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names_stable() {
        let expected = [
            (Level::Trace, "trace"),
            (Level::Debug, "debug"),
            (Level::Info, "info"),
            (Level::Warn, "warn"),
            (Level::Error, "error"),
            (Level::Critical, "critical"),
        ];
        for (level, name) in expected {
            assert_eq!(level.as_str(), name);
            assert_eq!(level.to_string(), name);
        }
    }

    #[test]
    fn test_plain_is_message_and_newline_only() {
        let line = plain_msg("hello", Level::Info, &RenderContext::with_pid(1));
        assert_eq!(line, "hello\n");
    }

    #[test]
    fn test_json_exact_output() {
        let line = json_escape_msg("hello", Level::Info, &RenderContext::with_pid(1234));
        assert_eq!(line, "{\"pid\":1234,\"level\":\"info\",\"message\":\"hello\"}\n");
    }

    #[test]
    fn test_json_escapes_round_trip() {
        let message = "he said \"hi\" \\ path\nsecond line\ttab \u{1} done";
        let line = json_escape_msg(message, Level::Warn, &RenderContext::with_pid(7));

        // Exactly one line: the terminator at the end and nowhere else.
        assert!(line.ends_with('\n'));
        let body = &line[..line.len() - 1];
        assert!(!body.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(value["pid"], 7);
        assert_eq!(value["level"], "warn");
        assert_eq!(value["message"], message);
    }

    #[test]
    fn test_json_render_is_deterministic() {
        let ctx = RenderContext::with_pid(42);
        let first = json_escape_msg("same message", Level::Error, &ctx);
        let second = json_escape_msg("same message", Level::Error, &ctx);
        assert_eq!(first, second);
    }
}
