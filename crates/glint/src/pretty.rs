//! Human-readable line rendering.

use crate::{
    Attr, Error, Handler, HandlerOptions, JsonHandler, Level, Record, ReplaceAttr, Value, keys,
};
use serde_json::Map;
use std::fmt;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

/// Prefix timestamp layout: bracketed 24-hour clock with milliseconds.
const TIME_FORMAT: &str = "[%H:%M:%S%.3f]";

/// Minimum width of the level column, including the trailing colon.
const LEVEL_WIDTH: usize = 7;

/// Initial capacity of the shared scratch buffer.
const SCRATCH_CAPACITY: usize = 1024;

/// Renders records as human-readable lines with a compact JSON
/// attribute tail.
///
/// Each line is assembled from up to four segments, every one of them
/// optional: a bracketed timestamp, the right-justified level with a
/// trailing colon, the message, and the attribute object.
///
/// ```text
/// [10:30:45.123]   INFO: request served {"path":"/health","status":200}
/// ```
///
/// The attribute object is produced by an internal [`JsonHandler`]:
/// the handler serializes the record into a reused scratch buffer, the
/// bytes are decoded back into a key-ordered tree, and the tree is
/// re-encoded compactly at the end of the line. Deriving via
/// [`with_attrs`](Self::with_attrs) or [`with_group`](Self::with_group)
/// shares the scratch buffer and the sink with the parent, so a family
/// of renderers never interleaves output.
///
/// # Example
///
/// ```rust
/// use glint::{Attr, HandlerOptions, Level, PrettyHandler, Record};
///
/// let handler = PrettyHandler::stdout(HandlerOptions::default());
/// let mut record = Record::now(Level::Warn, "disk almost full");
/// record.add_attrs([Attr::string("mount", "/var"), Attr::int("free_mb", 512)]);
/// handler.handle(&record).unwrap();
/// ```
#[derive(Clone)]
pub struct PrettyHandler {
    inner: Arc<dyn Handler>,
    rewriter: Option<ReplaceAttr>,
    shared: Arc<Shared>,
    show_empty_attrs: bool,
}

/// State shared between a renderer and everything derived from it.
struct Shared {
    /// Reused serialization buffer, guarded across the whole
    /// serialize-then-decode sequence.
    scratch: Mutex<Vec<u8>>,
    /// Destination writer, locked only for the final single write.
    sink: Mutex<Box<dyn io::Write + Send>>,
}

/// Clears the scratch buffer when the critical section ends, on
/// success and on failure alike.
struct ScratchGuard<'a>(MutexGuard<'a, Vec<u8>>);

impl Drop for ScratchGuard<'_> {
    fn drop(&mut self) {
        self.0.clear();
    }
}

impl fmt::Debug for PrettyHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrettyHandler")
            .field("show_empty_attrs", &self.show_empty_attrs)
            .field("rewriter", &self.rewriter.is_some())
            .finish_non_exhaustive()
    }
}

impl PrettyHandler {
    /// Creates a renderer writing to `sink`.
    ///
    /// The rewriter in `options`, when present, is applied both to the
    /// prefix fields and to every attribute in the JSON tail. The
    /// reserved keys ([`keys::TIMESTAMP`], [`keys::LEVEL`],
    /// [`keys::MESSAGE`]) are always kept out of the tail so the
    /// prefix fields are not rendered twice; a rewriter that renames
    /// one of them therefore changes the prefix only.
    #[must_use]
    pub fn new(options: HandlerOptions, sink: impl io::Write + Send + 'static) -> Self {
        let HandlerOptions {
            level,
            add_source,
            replace_attr,
        } = options;
        let inner = JsonHandler::new(HandlerOptions {
            level,
            add_source,
            replace_attr: Some(suppress_reserved(replace_attr.clone())),
        });
        Self {
            inner: Arc::new(inner),
            rewriter: replace_attr,
            shared: Arc::new(Shared {
                scratch: Mutex::new(Vec::with_capacity(SCRATCH_CAPACITY)),
                sink: Mutex::new(Box::new(sink)),
            }),
            show_empty_attrs: false,
        }
    }

    /// Creates a renderer writing to standard output, with empty
    /// attribute objects shown as `{}`.
    #[must_use]
    pub fn stdout(options: HandlerOptions) -> Self {
        Self::new(options, io::stdout()).show_empty_attrs(true)
    }

    /// Sets whether an empty attribute set still renders as `{}`.
    #[must_use]
    pub fn show_empty_attrs(mut self, show: bool) -> Self {
        self.show_empty_attrs = show;
        self
    }

    /// Derives a renderer whose records also carry `attrs`.
    ///
    /// The derived renderer shares this renderer's sink and scratch
    /// buffer; only the attribute context differs.
    #[must_use]
    pub fn with_attrs(&self, attrs: Vec<Attr>) -> Self {
        Self {
            inner: self.inner.with_attrs(attrs),
            rewriter: self.rewriter.clone(),
            shared: Arc::clone(&self.shared),
            show_empty_attrs: self.show_empty_attrs,
        }
    }

    /// Derives a renderer whose subsequent attributes nest under
    /// `name` in the JSON tail.
    #[must_use]
    pub fn with_group(&self, name: &str) -> Self {
        Self {
            inner: self.inner.with_group(name),
            rewriter: self.rewriter.clone(),
            shared: Arc::clone(&self.shared),
            show_empty_attrs: self.show_empty_attrs,
        }
    }

    /// Reports whether a record at `level` would be rendered.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        self.inner.enabled(level)
    }

    /// Renders `record` as one line and writes it to the sink.
    ///
    /// On failure nothing is written; the error names the stage that
    /// failed and the renderer stays usable for later records.
    pub fn handle(&self, record: &Record) -> Result<(), Error> {
        let level = self
            .prefix_field(keys::LEVEL, Value::from(record.level))
            .map(|attr| format!("{}:", attr.value));
        let timestamp = self
            .prefix_field(
                keys::TIMESTAMP,
                Value::from(record.time.format(TIME_FORMAT).to_string()),
            )
            .map(|attr| attr.value.to_string());
        let message = self
            .prefix_field(keys::MESSAGE, Value::from(record.message.clone()))
            .map(|attr| attr.value.to_string());

        let attrs = self.compute_attrs(record)?;
        let tail = if self.show_empty_attrs || !attrs.is_empty() {
            Some(serde_json::to_string(&attrs).map_err(Error::EncodeAttrs)?)
        } else {
            None
        };

        let mut line = String::new();
        if let Some(timestamp) = timestamp.filter(|t| !t.is_empty()) {
            line.push_str(&timestamp);
            line.push(' ');
        }
        if let Some(level) = level.filter(|l| !l.is_empty()) {
            line.push_str(&format!("{level:>LEVEL_WIDTH$}"));
            line.push(' ');
        }
        if let Some(message) = message.filter(|m| !m.is_empty()) {
            line.push_str(&message);
            line.push(' ');
        }
        if let Some(tail) = tail {
            line.push_str(&tail);
        }
        line.push('\n');

        let mut sink = self.shared.sink.lock().unwrap_or_else(|e| e.into_inner());
        sink.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Seeds one prefix field and runs it through the rewriter.
    ///
    /// Returns `None` when the field was suppressed.
    fn prefix_field(&self, key: &str, value: Value) -> Option<Attr> {
        let attr = Attr::new(key, value);
        match &self.rewriter {
            Some(rewrite) => rewrite(&[], attr).filter(|a| !a.is_empty()),
            None => Some(attr),
        }
    }

    /// Materializes the record's attribute tree via the inner handler.
    ///
    /// The scratch buffer stays locked from the inner serialization
    /// through the decode, and is emptied again on every exit path.
    fn compute_attrs(&self, record: &Record) -> Result<Map<String, serde_json::Value>, Error> {
        let guard = self.shared.scratch.lock().unwrap_or_else(|e| e.into_inner());
        let mut scratch = ScratchGuard(guard);
        self.inner
            .handle(record, &mut *scratch.0)
            .map_err(|e| Error::Backend(Box::new(e)))?;
        serde_json::from_slice(scratch.0.as_slice()).map_err(Error::DecodeAttrs)
    }
}

/// Wraps `next` so the reserved prefix keys never reach the JSON tail,
/// at any group depth.
fn suppress_reserved(next: Option<ReplaceAttr>) -> ReplaceAttr {
    Arc::new(move |groups: &[String], attr: Attr| {
        if attr.key == keys::TIMESTAMP || attr.key == keys::LEVEL || attr.key == keys::MESSAGE {
            return None;
        }
        match &next {
            Some(rewrite) => rewrite(groups, attr),
            None => Some(attr),
        }
    })
}
