//! End-to-end checks of the logging subsystem through its public API.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use agentd::logging::{
    self, json_escape_msg, plain_msg, FormatterRegistry, Level, Logger, ProcessLogger,
    RegistryError, JSON_FORMATTER,
};

/// Writer that appends into a shared buffer.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_plain_mode_emits_bare_message_lines() {
    let capture = Capture::default();
    let process = ProcessLogger::new();
    process.install(Logger::with_writer(plain_msg, Box::new(capture.clone())));

    process.info("hello");
    process.error("something failed");
    process.flush();

    assert_eq!(capture.contents(), "hello\nsomething failed\n");
}

#[test]
fn test_json_mode_stream_is_valid_json_lines() {
    let capture = Capture::default();
    let process = ProcessLogger::new();
    process.install(Logger::with_writer(json_escape_msg, Box::new(capture.clone())));

    process.trace("starting up");
    process.warn("disk almost full: \"/var\"");
    process.critical("line1\nline2");
    process.flush();

    let contents = capture.contents();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);

    let expected = [
        ("trace", "starting up"),
        ("warn", "disk almost full: \"/var\""),
        ("critical", "line1\nline2"),
    ];
    for (line, (level, message)) in lines.iter().zip(expected) {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["pid"], std::process::id());
        assert_eq!(value["level"], level);
        assert_eq!(value["message"], message);
    }
}

#[test]
fn test_one_encoding_per_run() {
    // A single initialized slot keeps its encoding for its lifetime:
    // every record in the stream has the same shape.
    let capture = Capture::default();
    let process = ProcessLogger::new();
    process.install(Logger::with_writer(json_escape_msg, Box::new(capture.clone())));

    for i in 0..20 {
        process.info(&format!("record {}", i));
    }

    let contents = capture.contents();
    for line in contents.lines() {
        serde_json::from_str::<serde_json::Value>(line).unwrap();
    }
}

#[test]
fn test_init_wires_registry_and_activates() {
    let process = ProcessLogger::new();
    let mut registry = FormatterRegistry::new();

    assert!(!process.is_active());
    logging::init(&process, &mut registry, true).unwrap();
    assert!(process.is_active());

    // The escaping formatter is now claimed; a second registration under
    // the same name must fail and leave the first in place.
    let err = registry.register(JSON_FORMATTER, plain_msg).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateFormatter(_)));
}

#[test]
fn test_uninitialized_slot_drops_records() {
    let process = ProcessLogger::new();
    // Must not panic, block, or write anywhere.
    process.log(Level::Info, "nobody listening");
    process.flush();
    assert!(!process.is_active());
}
