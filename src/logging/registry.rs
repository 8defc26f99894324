//! Formatter name resolution.

use std::collections::HashMap;

use thiserror::Error;

use crate::logging::format::{plain_msg, RenderFn, PLAIN_FORMATTER};

/// Errors from formatter registration and lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A formatter is already registered under this name.
    #[error("formatter \"{0}\" is already registered")]
    DuplicateFormatter(String),

    /// No formatter is registered under this name.
    #[error("no formatter registered under \"{0}\"")]
    UnknownFormatter(String),
}

/// Table of render functions addressable by name.
///
/// Lets a configuration template reference rendering behavior symbolically
/// instead of embedding code. Names are unique; registration never replaces
/// an existing entry.
pub struct FormatterRegistry {
    entries: HashMap<String, RenderFn>,
}

impl FormatterRegistry {
    /// New registry with the builtin plain-message formatter pre-seeded.
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert(PLAIN_FORMATTER.to_string(), plain_msg as RenderFn);
        Self { entries }
    }

    /// Register `render` under `name`.
    ///
    /// `name` must be non-empty. Fails if the name is already taken; the
    /// existing entry is left untouched.
    pub fn register(&mut self, name: &str, render: RenderFn) -> Result<(), RegistryError> {
        debug_assert!(!name.is_empty(), "formatter name must be non-empty");
        if self.entries.contains_key(name) {
            return Err(RegistryError::DuplicateFormatter(name.to_string()));
        }
        self.entries.insert(name.to_string(), render);
        Ok(())
    }

    /// Resolve a name to its render function.
    pub(crate) fn lookup(&self, name: &str) -> Result<RenderFn, RegistryError> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownFormatter(name.to_string()))
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::format::{json_escape_msg, Level, RenderContext};

    #[test]
    fn test_builtin_plain_formatter_resolves() {
        let registry = FormatterRegistry::new();
        let render = registry.lookup(PLAIN_FORMATTER).unwrap();
        let line = render("hello", Level::Info, &RenderContext::with_pid(1));
        assert_eq!(line, "hello\n");
    }

    #[test]
    fn test_register_then_lookup() {
        let mut registry = FormatterRegistry::new();
        registry.register("JSONEscapeMsg", json_escape_msg).unwrap();
        assert!(registry.lookup("JSONEscapeMsg").is_ok());
    }

    #[test]
    fn test_duplicate_registration_fails_and_keeps_original() {
        let mut registry = FormatterRegistry::new();
        let err = registry.register(PLAIN_FORMATTER, json_escape_msg).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateFormatter(PLAIN_FORMATTER.to_string())
        );

        // The original entry must still render plain text.
        let render = registry.lookup(PLAIN_FORMATTER).unwrap();
        let line = render("hello", Level::Info, &RenderContext::with_pid(1));
        assert_eq!(line, "hello\n");
    }

    #[test]
    fn test_unknown_lookup_fails() {
        let registry = FormatterRegistry::new();
        let err = registry.lookup("NoSuchFormatter").unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownFormatter("NoSuchFormatter".to_string())
        );
    }
}
