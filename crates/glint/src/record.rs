//! The record type consumed by handlers.

use crate::{Attr, Level};
use chrono::{DateTime, Utc};

/// Source location captured at a log call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Source file path.
    pub file: String,
    /// Line number.
    pub line: u32,
}

impl Source {
    /// Captures the location of the calling code.
    #[must_use]
    #[track_caller]
    pub fn here() -> Self {
        let location = std::panic::Location::caller();
        Self {
            file: location.file().to_string(),
            line: location.line(),
        }
    }
}

/// A single log event.
///
/// Records are built by the caller, handed to a handler once, and not
/// retained afterwards. Attributes keep their emission order.
#[derive(Debug, Clone)]
pub struct Record {
    /// Event time.
    pub time: DateTime<Utc>,
    /// Severity level.
    pub level: Level,
    /// Human-readable message.
    pub message: String,
    /// Where the event was emitted, if captured.
    pub source: Option<Source>,
    attrs: Vec<Attr>,
}

impl Record {
    /// Creates a record with no attributes.
    #[must_use]
    pub fn new(time: DateTime<Utc>, level: Level, message: impl Into<String>) -> Self {
        Self {
            time,
            level,
            message: message.into(),
            source: None,
            attrs: Vec::new(),
        }
    }

    /// Creates a record stamped with the current time.
    #[must_use]
    pub fn now(level: Level, message: impl Into<String>) -> Self {
        Self::new(Utc::now(), level, message)
    }

    /// Appends attributes, preserving emission order.
    pub fn add_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        self.attrs.extend(attrs);
    }

    /// The attributes attached to this record, oldest first.
    #[must_use]
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }
}
