//! The handler capability seam.
//!
//! A [`Handler`] turns one [`Record`] into bytes. Handlers are
//! immutable values: the `with_*` methods derive new handlers carrying
//! extra context and leave the receiver untouched, so a single handler
//! can be shared freely across threads.

use crate::{Attr, Error, Level, Record};
use std::fmt;
use std::io;
use std::sync::Arc;

/// Callback that rewrites or suppresses a single attribute before it
/// is rendered.
///
/// The first argument is the attribute's group path: the names of the
/// groups enclosing it, outermost first. Built-in fields (timestamp,
/// level, message, source) are passed with an empty path. Returning
/// `None` drops the field entirely; returning an empty attribute (see
/// [`Attr::is_empty`]) has the same effect, so an intentionally empty
/// string value stays representable.
///
/// # Example
///
/// ```rust
/// use glint::{keys, ReplaceAttr};
/// use std::sync::Arc;
///
/// // Hide timestamps, e.g. to keep test output stable.
/// let hide_time: ReplaceAttr = Arc::new(|_groups: &[String], attr| {
///     if attr.key == keys::TIMESTAMP {
///         None
///     } else {
///         Some(attr)
///     }
/// });
/// # let _ = hide_time;
/// ```
pub type ReplaceAttr = Arc<dyn Fn(&[String], Attr) -> Option<Attr> + Send + Sync>;

/// Configuration shared by the handlers in this crate.
#[derive(Clone, Default)]
pub struct HandlerOptions {
    /// Minimum level a record must have to be handled.
    pub level: Level,
    /// Whether to include source locations in the output.
    pub add_source: bool,
    /// Optional attribute rewriter, applied field by field.
    pub replace_attr: Option<ReplaceAttr>,
}

impl fmt::Debug for HandlerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerOptions")
            .field("level", &self.level)
            .field("add_source", &self.add_source)
            .field("replace_attr", &self.replace_attr.is_some())
            .finish()
    }
}

/// Serializes log records to a destination writer.
pub trait Handler: Send + Sync {
    /// Reports whether a record at `level` would be handled at all.
    fn enabled(&self, level: Level) -> bool;

    /// Serializes one record to `out`.
    ///
    /// The destination is passed per call rather than owned, so a
    /// caller can hand over a buffer it already guards and decode the
    /// bytes under the same lock.
    fn handle(&self, record: &Record, out: &mut dyn io::Write) -> Result<(), Error>;

    /// Derives a handler whose persistent attributes include `attrs`.
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;

    /// Derives a handler positioned inside the group `name`.
    ///
    /// Attributes added later, whether through [`Handler::with_attrs`]
    /// or on the records themselves, nest under that group.
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}
