//! YAML text emission.
//!
//! [`YamlEmitter`] renders a [`Node`] tree to text; [`YamlWriter`] is the
//! file-backed [`DocumentSink`] built on it.
//!
//! Layout rules:
//! - Block style by default; flow-style containers render on one line
//!   (`[ 1, 2, 3 ]`, `{ a: 1 }`), wrapping at the listing's line-break hints.
//! - Header scalars of a mapping are emitted before its other entries.
//! - A mapping inside a block listing starts on the line after its `-`.
//! - Plain strings are double-quoted when they would otherwise be misread.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::{
    DocumentError, DocumentSink, Listing, Mapping, Node, ScalarKind, ScalarNode, StringStyle,
};

/// Renders document trees as YAML text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YamlEmitter {
    indent_width: usize,
}

impl YamlEmitter {
    /// Default number of spaces per nesting level.
    pub const DEFAULT_INDENT_WIDTH: usize = 2;

    /// Creates an emitter. An indent width of zero is raised to one.
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent_width: indent_width.max(1),
        }
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    /// Render `node` as a complete document.
    pub fn emit(&self, node: &Node) -> String {
        let mut out = String::new();
        self.emit_into(node, &mut out);
        out
    }

    /// Append the rendering of `node` to `out`.
    pub fn emit_into(&self, node: &Node, out: &mut String) {
        match node {
            Node::Mapping(mapping) if is_block_mapping(mapping) => {
                self.block_mapping(mapping, 0, out)
            }
            Node::Listing(listing) if is_block_listing(listing) => {
                self.block_listing(listing, 0, out)
            }
            other => {
                self.inline(other, self.indent_width, out);
                out.push('\n');
            }
        }
    }

    fn block_mapping(&self, mapping: &Mapping, indent: usize, out: &mut String) {
        for (key, value) in header_first(mapping) {
            push_indent(out, indent);
            out.push_str(&plain_or_quoted(key));
            out.push(':');
            self.entry_value(value, indent, out);
        }
    }

    fn block_listing(&self, listing: &Listing, indent: usize, out: &mut String) {
        for item in listing.iter() {
            push_indent(out, indent);
            out.push('-');
            self.entry_value(item, indent, out);
        }
    }

    /// Value part of a `key:` or `-` line at `indent`.
    fn entry_value(&self, value: &Node, indent: usize, out: &mut String) {
        let nested = indent + self.indent_width;
        match value {
            Node::Mapping(mapping) if is_block_mapping(mapping) => {
                out.push('\n');
                self.block_mapping(mapping, nested, out);
            }
            Node::Listing(listing) if is_block_listing(listing) => {
                out.push('\n');
                self.block_listing(listing, nested, out);
            }
            other => {
                out.push(' ');
                self.inline(other, nested, out);
                out.push('\n');
            }
        }
    }

    /// Single-line rendering; `wrap_indent` is used after line-break hints.
    fn inline(&self, node: &Node, wrap_indent: usize, out: &mut String) {
        match node {
            Node::Scalar(scalar) => out.push_str(&scalar_text(scalar)),
            Node::Listing(listing) => {
                if listing.is_empty() {
                    out.push_str("[ ]");
                    return;
                }
                out.push('[');
                for (i, item) in listing.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    let wrap = if i == 0 {
                        listing.has_line_breaks()
                    } else {
                        listing.is_line_break_before(i)
                    };
                    if wrap {
                        out.push('\n');
                        push_indent(out, wrap_indent);
                    } else {
                        out.push(' ');
                    }
                    self.inline(item, wrap_indent, out);
                }
                out.push_str(" ]");
            }
            Node::Mapping(mapping) => {
                if mapping.is_empty() {
                    out.push_str("{ }");
                    return;
                }
                out.push('{');
                for (i, (key, value)) in header_first(mapping).enumerate() {
                    out.push_str(if i == 0 { " " } else { ", " });
                    out.push_str(&plain_or_quoted(key));
                    out.push_str(": ");
                    self.inline(value, wrap_indent, out);
                }
                out.push_str(" }");
            }
        }
    }
}

impl Default for YamlEmitter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INDENT_WIDTH)
    }
}

fn is_block_mapping(mapping: &Mapping) -> bool {
    !mapping.is_flow_style() && !mapping.is_empty()
}

fn is_block_listing(listing: &Listing) -> bool {
    !listing.is_flow_style() && !listing.is_empty()
}

fn is_header(node: &Node) -> bool {
    node.as_scalar().is_some_and(ScalarNode::is_header)
}

fn header_first(mapping: &Mapping) -> impl Iterator<Item = (&str, &Node)> {
    mapping
        .iter()
        .filter(|(_, value)| is_header(value))
        .chain(mapping.iter().filter(|(_, value)| !is_header(value)))
}

fn push_indent(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat(' ').take(indent));
}

fn scalar_text(scalar: &ScalarNode) -> Cow<'_, str> {
    match (scalar.style(), scalar.kind()) {
        (StringStyle::DoubleQuoted, _) => Cow::Owned(double_quoted(scalar.text())),
        (StringStyle::Plain, ScalarKind::String) => plain_or_quoted(scalar.text()),
        (StringStyle::Plain, _) => Cow::Borrowed(scalar.text()),
    }
}

fn plain_or_quoted(text: &str) -> Cow<'_, str> {
    if needs_quotes(text) {
        Cow::Owned(double_quoted(text))
    } else {
        Cow::Borrowed(text)
    }
}

const INDICATORS: &[char] = &[
    '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`',
];

const RESERVED_WORDS: &[&str] = &["true", "false", "yes", "no", "on", "off", "null", "~"];

/// Whether a plain string would be read back as something else.
///
/// Numeric-looking strings such as `1.0` stay plain.
fn needs_quotes(text: &str) -> bool {
    let Some(first) = text.chars().next() else {
        return true;
    };
    INDICATORS.contains(&first)
        || text.starts_with(char::is_whitespace)
        || text.ends_with(char::is_whitespace)
        || text.ends_with(':')
        || text.contains(": ")
        || text.contains(" #")
        || text.chars().any(char::is_control)
        || RESERVED_WORDS.iter().any(|word| text.eq_ignore_ascii_case(word))
}

fn double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

// ---------------------------------------------------------------------------
// YamlWriter
// ---------------------------------------------------------------------------

/// File-backed YAML sink.
///
/// Several documents may be put between `open_file` and `close_file`; they
/// are separated by `---`. The file is closed when the writer is dropped.
///
/// # Example
///
/// ```ignore
/// let mut writer = YamlWriter::new().with_indent_width(4);
/// writer.open_file(Path::new("scene.yaml"))?;
/// writer.put_node(&Node::Mapping(doc))?;
/// writer.close_file()?;
/// ```
#[derive(Debug, Default)]
pub struct YamlWriter {
    emitter: YamlEmitter,
    out: Option<BufWriter<File>>,
    path: Option<PathBuf>,
    documents: usize,
}

impl YamlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of spaces per nesting level.
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.set_indent_width(width);
        self
    }

    pub fn set_indent_width(&mut self, width: usize) {
        self.emitter = YamlEmitter::new(width);
    }

    pub fn indent_width(&self) -> usize {
        self.emitter.indent_width()
    }

    pub fn is_open(&self) -> bool {
        self.out.is_some()
    }

    /// Path of the currently open file.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Render `node` with this writer's settings without touching a file.
    pub fn to_yaml_string(&self, node: &Node) -> String {
        self.emitter.emit(node)
    }
}

impl DocumentSink for YamlWriter {
    fn open_file(&mut self, path: &Path) -> Result<(), DocumentError> {
        self.close_file()?;
        let file = File::create(path).map_err(|source| DocumentError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.out = Some(BufWriter::new(file));
        self.path = Some(path.to_path_buf());
        self.documents = 0;
        log::debug!("Opened YAML output {}", path.display());
        Ok(())
    }

    fn put_node(&mut self, node: &Node) -> Result<(), DocumentError> {
        let mut text = String::new();
        if self.documents > 0 {
            text.push_str("---\n");
        }
        self.emitter.emit_into(node, &mut text);

        let out = self.out.as_mut().ok_or(DocumentError::NotOpen)?;
        out.write_all(text.as_bytes())?;
        self.documents += 1;
        Ok(())
    }

    fn close_file(&mut self) -> Result<(), DocumentError> {
        let Some(mut out) = self.out.take() else {
            return Ok(());
        };
        let path = self.path.take();
        out.flush()?;
        if let Some(path) = path {
            log::debug!("Closed YAML output {}", path.display());
        }
        Ok(())
    }
}

impl Drop for YamlWriter {
    fn drop(&mut self) {
        if let Err(err) = self.close_file() {
            log::warn!("Failed to close YAML output: {err}");
        }
    }
}
