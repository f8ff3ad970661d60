//! JSON serialization of records.

use crate::{Attr, Error, Handler, HandlerOptions, Level, Record, Value, keys};
use chrono::SecondsFormat;
use serde_json::Map;
use std::io;
use std::sync::Arc;

/// One frame of derivation context.
#[derive(Debug, Clone)]
enum Scope {
    /// Attributes accumulated by `with_attrs`.
    Attrs(Vec<Attr>),
    /// A named group opened by `with_group`.
    Group(String),
}

/// A [`Handler`] that emits each record as one compact JSON object,
/// newline-terminated.
///
/// Built-in fields come first (`time` in RFC 3339 with milliseconds,
/// `level`, `source` when enabled, `msg`), followed by the attributes
/// from derived context and from the record itself. Groups become
/// nested objects; groups left empty after rewriting are omitted
/// entirely. Keys are emitted in lexicographic order, and when a key
/// collides the later value wins.
///
/// # Example
///
/// ```rust
/// use glint::{Attr, Handler, HandlerOptions, JsonHandler, Level, Record};
///
/// let handler = JsonHandler::new(HandlerOptions::default());
/// let mut record = Record::now(Level::Info, "hello");
/// record.add_attrs([Attr::int("answer", 42)]);
///
/// let mut out = Vec::new();
/// handler.handle(&record, &mut out).unwrap();
/// assert!(out.ends_with(b"}\n"));
/// ```
#[derive(Debug, Clone)]
pub struct JsonHandler {
    options: HandlerOptions,
    scopes: Vec<Scope>,
}

impl JsonHandler {
    /// Creates a handler with the given options.
    #[must_use]
    pub fn new(options: HandlerOptions) -> Self {
        Self {
            options,
            scopes: Vec::new(),
        }
    }

    /// Applies the configured rewriter to a non-group attribute.
    fn rewrite(&self, groups: &[String], attr: Attr) -> Option<Attr> {
        match &self.options.replace_attr {
            Some(rewrite) => rewrite(groups, attr),
            None => Some(attr),
        }
    }

    /// Inserts a built-in field at the root of the tree.
    ///
    /// Built-ins always pass through the rewriter, with an empty group
    /// path. A group-valued result is folded to an object as-is, with
    /// no further per-member rewriting.
    fn append_builtin(&self, root: &mut Map<String, serde_json::Value>, attr: Attr) {
        let Some(attr) = self.rewrite(&[], attr) else {
            return;
        };
        if attr.is_empty() {
            return;
        }
        root.insert(attr.key, attr.value.to_json());
    }

    /// Inserts one attribute into `map`, descending into groups.
    ///
    /// Group-valued attributes are not themselves rewritten; their
    /// members are, with the group's key appended to the path. A group
    /// with an empty key is inlined at the current level, and a group
    /// whose members all disappear is dropped.
    fn append_attr(
        &self,
        map: &mut Map<String, serde_json::Value>,
        path: &mut Vec<String>,
        attr: Attr,
    ) {
        let attr = if matches!(attr.value, Value::Group(_)) {
            attr
        } else {
            match self.rewrite(path, attr) {
                Some(attr) => attr,
                None => return,
            }
        };
        if attr.is_empty() {
            return;
        }
        let Attr { key, value } = attr;
        match value {
            Value::Group(members) => {
                if members.is_empty() {
                    return;
                }
                if key.is_empty() {
                    for member in members {
                        self.append_attr(map, path, member);
                    }
                } else {
                    let mut nested = Map::new();
                    path.push(key.clone());
                    for member in members {
                        self.append_attr(&mut nested, path, member);
                    }
                    path.pop();
                    if !nested.is_empty() {
                        map.insert(key, serde_json::Value::Object(nested));
                    }
                }
            }
            value => {
                map.insert(key, value.to_json());
            }
        }
    }

    /// Builds the full attribute tree for one record.
    fn build_tree(&self, record: &Record) -> Map<String, serde_json::Value> {
        let mut root = Map::new();

        self.append_builtin(
            &mut root,
            Attr::string(
                keys::TIMESTAMP,
                record.time.to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
        );
        self.append_builtin(&mut root, Attr::new(keys::LEVEL, record.level));
        if self.options.add_source {
            if let Some(source) = &record.source {
                self.append_builtin(
                    &mut root,
                    Attr::group(
                        keys::SOURCE,
                        vec![
                            Attr::string("file", source.file.clone()),
                            Attr::int("line", i64::from(source.line)),
                        ],
                    ),
                );
            }
        }
        self.append_builtin(&mut root, Attr::string(keys::MESSAGE, record.message.clone()));

        // Replay the derivation context, then the record's own attrs at
        // the innermost open group.
        let mut open: Vec<(String, Map<String, serde_json::Value>)> = Vec::new();
        let mut path: Vec<String> = Vec::new();
        for scope in &self.scopes {
            match scope {
                Scope::Attrs(attrs) => {
                    let target = open.last_mut().map_or(&mut root, |(_, map)| map);
                    for attr in attrs {
                        self.append_attr(target, &mut path, attr.clone());
                    }
                }
                Scope::Group(name) => {
                    open.push((name.clone(), Map::new()));
                    path.push(name.clone());
                }
            }
        }
        {
            let target = open.last_mut().map_or(&mut root, |(_, map)| map);
            for attr in record.attrs() {
                self.append_attr(target, &mut path, attr.clone());
            }
        }

        // Close groups innermost-first, dropping the ones that stayed
        // empty.
        while let Some((name, map)) = open.pop() {
            if map.is_empty() {
                continue;
            }
            let parent = open.last_mut().map_or(&mut root, |(_, m)| m);
            parent.insert(name, serde_json::Value::Object(map));
        }

        root
    }
}

impl Handler for JsonHandler {
    fn enabled(&self, level: Level) -> bool {
        level >= self.options.level
    }

    fn handle(&self, record: &Record, out: &mut dyn io::Write) -> Result<(), Error> {
        let tree = self.build_tree(record);
        serde_json::to_writer(&mut *out, &tree).map_err(|e| {
            if e.is_io() {
                Error::Io(e.into())
            } else {
                Error::EncodeAttrs(e)
            }
        })?;
        out.write_all(b"\n")?;
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        let mut next = self.clone();
        if !attrs.is_empty() {
            next.scopes.push(Scope::Attrs(attrs));
        }
        Arc::new(next)
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        let mut next = self.clone();
        if !name.is_empty() {
            next.scopes.push(Scope::Group(name.to_string()));
        }
        Arc::new(next)
    }
}
