#![forbid(unsafe_code)]
// Pedantic lints stay advisory while the API surface settles.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Glint
//!
//! Human-readable log lines with a compact JSON attribute tail.
//!
//! Glint consumes structured log records (a timestamp, a severity
//! level, a message, and nested key/value attributes) and renders each
//! one as a single line:
//!
//! ```text
//! [10:30:45.123]   INFO: request served {"path":"/health","status":200}
//! ```
//!
//! The prefix stays scannable while the attributes keep their full
//! structure: groups become nested JSON objects, keys are sorted, and
//! the whole object sits at the end of the line where it is easy to
//! skim past or pipe into other tooling.
//!
//! ## Quick Start
//!
//! ```rust
//! use glint::{Attr, HandlerOptions, Level, PrettyHandler, Record};
//!
//! let handler = PrettyHandler::stdout(HandlerOptions::default());
//!
//! let mut record = Record::now(Level::Info, "server listening");
//! record.add_attrs([Attr::int("port", 8080), Attr::bool("tls", false)]);
//! handler.handle(&record).unwrap();
//! ```
//!
//! ## Derived contexts
//!
//! A renderer is a value: deriving with [`PrettyHandler::with_attrs`]
//! or [`PrettyHandler::with_group`] produces a sibling that shares the
//! same destination and adds persistent context to every record it
//! handles.
//!
//! ```rust
//! use glint::{Attr, HandlerOptions, Level, PrettyHandler, Record};
//!
//! let root = PrettyHandler::stdout(HandlerOptions::default());
//! let request = root
//!     .with_group("request")
//!     .with_attrs(vec![Attr::string("id", "9f2c")]);
//!
//! request.handle(&Record::now(Level::Info, "accepted")).unwrap();
//! // [12:01:33.410]   INFO: accepted {"request":{"id":"9f2c"}}
//! ```
//!
//! ## Rewriting fields
//!
//! Every field, prefix and attribute alike, can pass through a
//! [`ReplaceAttr`] hook that renames, reshapes, or suppresses it. See
//! the [`handler`] module for the contract.

pub mod attr;
pub mod error;
pub mod handler;
pub mod json;
pub mod level;
pub mod pretty;
pub mod record;

/// Standard keys used by the handlers in this crate.
pub mod keys {
    /// Key for the record timestamp.
    pub const TIMESTAMP: &str = "time";
    /// Key for the severity level.
    pub const LEVEL: &str = "level";
    /// Key for the message text.
    pub const MESSAGE: &str = "msg";
    /// Key for the source location.
    pub const SOURCE: &str = "source";
}

pub use attr::{Attr, Value};
pub use error::Error;
pub use handler::{Handler, HandlerOptions, ReplaceAttr};
pub use json::JsonHandler;
pub use level::{Level, ParseLevelError, ParseResult};
pub use pretty::PrettyHandler;
pub use record::{Record, Source};

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::{
        Attr, Error, Handler, HandlerOptions, JsonHandler, Level, ParseLevelError, ParseResult,
        PrettyHandler, Record, ReplaceAttr, Source, Value, keys,
    };
}
