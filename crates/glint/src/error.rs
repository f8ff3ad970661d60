//! Error types for record handling.

use std::io;
use thiserror::Error;

/// Errors that can occur while handling a record.
///
/// Each variant names the pipeline stage that failed, so callers can
/// tell a broken sink apart from a handler producing bad output.
#[derive(Error, Debug)]
pub enum Error {
    /// The wrapped handler failed while producing the attribute tree.
    #[error("inner handler failed: {0}")]
    Backend(#[source] Box<Error>),

    /// The wrapped handler's output was not a JSON object.
    #[error("decoding attrs failed: {0}")]
    DecodeAttrs(#[source] serde_json::Error),

    /// The attribute tree could not be re-encoded for display.
    #[error("encoding attrs failed: {0}")]
    EncodeAttrs(#[source] serde_json::Error),

    /// Writing to the destination failed.
    #[error("write error: {0}")]
    Io(#[from] io::Error),
}
