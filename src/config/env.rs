//! Environment abstraction for testability.
//!
//! This module provides an [`Environment`] trait so the credential lookup can
//! be simulated in tests without touching real process state.

use std::collections::HashMap;

/// Read-only access to environment variables.
pub trait Environment: Send + Sync {
    /// Returns the value of `key`, or `None` if it is unset or not valid UTF-8.
    fn var(&self, key: &str) -> Option<String>;
}

/// Production environment backed by the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
