//! Ordered document tree.
//!
//! A document is a tree of [`Node`]s: key-ordered [`Mapping`]s, ordered
//! [`Listing`]s and [`ScalarNode`] leaves. Containers carry the float
//! format used when numbers are written into them, and a flow-style flag
//! telling the emitter to render them on one line.
//!
//! Numbers are formatted when they are written, so the tree holds exactly
//! the text that ends up in the output.

use crate::format::FloatFormat;

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

/// What a scalar's text represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Float,
    Int,
    Bool,
}

/// Quoting requested for a string scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringStyle {
    /// Written as is, quoted only if the text would otherwise be misread.
    #[default]
    Plain,
    /// Always written in double quotes.
    DoubleQuoted,
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarNode {
    text: String,
    kind: ScalarKind,
    style: StringStyle,
    header: bool,
}

impl ScalarNode {
    /// A string scalar.
    pub fn string(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ScalarKind::String,
            style: StringStyle::Plain,
            header: false,
        }
    }

    /// A float scalar rendered with `format`.
    pub fn float(value: f64, format: &FloatFormat) -> Self {
        Self {
            text: format.format(value),
            kind: ScalarKind::Float,
            style: StringStyle::Plain,
            header: false,
        }
    }

    /// An integer scalar.
    pub fn int(value: i64) -> Self {
        Self {
            text: value.to_string(),
            kind: ScalarKind::Int,
            style: StringStyle::Plain,
            header: false,
        }
    }

    /// A boolean scalar.
    pub fn bool(value: bool) -> Self {
        Self {
            text: if value { "true" } else { "false" }.to_owned(),
            kind: ScalarKind::Bool,
            style: StringStyle::Plain,
            header: false,
        }
    }

    /// Set the quoting style.
    #[must_use]
    pub fn with_style(mut self, style: StringStyle) -> Self {
        self.style = style;
        self
    }

    /// Mark the scalar as a structural header of its mapping.
    ///
    /// Header entries are emitted before all other entries of a mapping.
    #[must_use]
    pub fn as_header(mut self) -> Self {
        self.header = true;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    pub fn style(&self) -> StringStyle {
        self.style
    }

    pub fn is_header(&self) -> bool {
        self.header
    }

    /// The text, whatever the kind.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Read a numeric scalar back as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self.kind {
            ScalarKind::Float | ScalarKind::Int => match self.text.as_str() {
                ".nan" => Some(f64::NAN),
                ".inf" => Some(f64::INFINITY),
                "-.inf" => Some(f64::NEG_INFINITY),
                text => text.parse().ok(),
            },
            ScalarKind::String | ScalarKind::Bool => None,
        }
    }

    /// Read an integer scalar back as `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self.kind {
            ScalarKind::Int => self.text.parse().ok(),
            _ => None,
        }
    }

    /// Read a boolean scalar back.
    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            ScalarKind::Bool => Some(self.text == "true"),
            _ => None,
        }
    }
}

/// Values that can be written as a scalar into a container.
///
/// The container's float format is passed in so floating point values are
/// rendered the way the container asks for.
pub trait IntoScalar {
    fn into_scalar(self, format: &FloatFormat) -> ScalarNode;
}

impl IntoScalar for ScalarNode {
    fn into_scalar(self, _format: &FloatFormat) -> ScalarNode {
        self
    }
}

impl IntoScalar for f64 {
    fn into_scalar(self, format: &FloatFormat) -> ScalarNode {
        ScalarNode::float(self, format)
    }
}

impl IntoScalar for f32 {
    fn into_scalar(self, format: &FloatFormat) -> ScalarNode {
        ScalarNode::float(f64::from(self), format)
    }
}

macro_rules! impl_into_scalar_int {
    ($($ty:ty),*) => {
        $(
            impl IntoScalar for $ty {
                fn into_scalar(self, _format: &FloatFormat) -> ScalarNode {
                    ScalarNode::int(self as i64)
                }
            }
        )*
    };
}

impl_into_scalar_int!(i32, i64, u32, usize);

impl IntoScalar for bool {
    fn into_scalar(self, _format: &FloatFormat) -> ScalarNode {
        ScalarNode::bool(self)
    }
}

impl IntoScalar for &str {
    fn into_scalar(self, _format: &FloatFormat) -> ScalarNode {
        ScalarNode::string(self)
    }
}

impl IntoScalar for String {
    fn into_scalar(self, _format: &FloatFormat) -> ScalarNode {
        ScalarNode::string(self)
    }
}

impl IntoScalar for &String {
    fn into_scalar(self, _format: &FloatFormat) -> ScalarNode {
        ScalarNode::string(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// Any document value.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(ScalarNode),
    Mapping(Mapping),
    Listing(Listing),
}

impl Node {
    pub fn as_scalar(&self) -> Option<&ScalarNode> {
        match self {
            Node::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_listing(&self) -> Option<&Listing> {
        match self {
            Node::Listing(listing) => Some(listing),
            _ => None,
        }
    }
}

impl From<ScalarNode> for Node {
    fn from(scalar: ScalarNode) -> Self {
        Node::Scalar(scalar)
    }
}

impl From<Mapping> for Node {
    fn from(mapping: Mapping) -> Self {
        Node::Mapping(mapping)
    }
}

impl From<Listing> for Node {
    fn from(listing: Listing) -> Self {
        Node::Listing(listing)
    }
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// Key-ordered mapping.
///
/// Entries keep their insertion order. Inserting an existing key replaces
/// the value in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping {
    entries: Vec<(String, Node)>,
    float_format: FloatFormat,
    flow: bool,
}

impl Mapping {
    /// Creates an empty block-style mapping with the default float format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Write a scalar under `key`, formatting floats with this mapping's format.
    pub fn write(&mut self, key: impl Into<String>, value: impl IntoScalar) {
        let scalar = value.into_scalar(&self.float_format);
        self.insert(key, scalar);
    }

    /// Write a string scalar with an explicit quoting style.
    pub fn write_styled(&mut self, key: impl Into<String>, text: &str, style: StringStyle) {
        self.insert(key, ScalarNode::string(text).with_style(style));
    }

    /// Write a string scalar marked as a structural header.
    pub fn write_header(&mut self, key: impl Into<String>, text: &str) {
        self.insert(key, ScalarNode::string(text).as_header());
    }

    /// A detached block listing inheriting this mapping's float format.
    pub fn create_listing(&self) -> Listing {
        let mut listing = Listing::new();
        listing.set_float_format(self.float_format);
        listing
    }

    /// A detached flow listing inheriting this mapping's float format.
    pub fn create_flow_listing(&self) -> Listing {
        let mut listing = self.create_listing();
        listing.set_flow_style(true);
        listing
    }

    /// A detached mapping inheriting this mapping's float format.
    pub fn create_mapping(&self) -> Mapping {
        Mapping {
            float_format: self.float_format,
            ..Mapping::default()
        }
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn find_mapping(&self, key: &str) -> Option<&Mapping> {
        self.get(key).and_then(Node::as_mapping)
    }

    pub fn find_listing(&self, key: &str) -> Option<&Listing> {
        self.get(key).and_then(Node::as_listing)
    }

    pub fn find_scalar(&self, key: &str) -> Option<&ScalarNode> {
        self.get(key).and_then(Node::as_scalar)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove an entry, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set the format used for floats written from now on.
    pub fn set_float_format(&mut self, format: FloatFormat) {
        self.float_format = format;
    }

    pub fn float_format(&self) -> FloatFormat {
        self.float_format
    }

    pub fn set_flow_style(&mut self, flow: bool) {
        self.flow = flow;
    }

    pub fn is_flow_style(&self) -> bool {
        self.flow
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Ordered list of nodes.
///
/// Besides the values, a listing records line-break hints used by the
/// emitter to wrap long flow-style lists.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Listing {
    values: Vec<Node>,
    line_breaks: Vec<usize>,
    float_format: FloatFormat,
    flow: bool,
}

impl Listing {
    /// Creates an empty block-style listing with the default float format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scalar, formatting floats with this listing's format.
    pub fn append(&mut self, value: impl IntoScalar) {
        let scalar = value.into_scalar(&self.float_format);
        self.values.push(Node::Scalar(scalar));
    }

    /// Append a scalar, requesting a line break before every
    /// `max_columns`-th element.
    ///
    /// `num_values` is the final length of the list; lists that fit on one
    /// row (`num_values <= max_columns`) are never wrapped.
    pub fn append_wrapped(
        &mut self,
        value: impl IntoScalar,
        max_columns: usize,
        num_values: usize,
    ) {
        let index = self.values.len();
        if max_columns > 0 && num_values > max_columns && index > 0 && index % max_columns == 0 {
            self.line_breaks.push(index);
        }
        self.append(value);
    }

    /// Append any node.
    pub fn append_node(&mut self, node: impl Into<Node>) {
        self.values.push(node.into());
    }

    /// Reserve space for exactly `additional` more values.
    pub fn reserve(&mut self, additional: usize) {
        self.values.reserve_exact(additional);
    }

    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.values.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.values.iter()
    }

    /// Whether the emitter should break the line before element `index`.
    pub fn is_line_break_before(&self, index: usize) -> bool {
        self.line_breaks.binary_search(&index).is_ok()
    }

    pub fn has_line_breaks(&self) -> bool {
        !self.line_breaks.is_empty()
    }

    pub fn set_float_format(&mut self, format: FloatFormat) {
        self.float_format = format;
    }

    pub fn float_format(&self) -> FloatFormat {
        self.float_format
    }

    pub fn set_flow_style(&mut self, flow: bool) {
        self.flow = flow;
    }

    pub fn is_flow_style(&self) -> bool {
        self.flow
    }
}
