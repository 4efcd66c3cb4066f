//! # Standard Scene Document
//!
//! The output side of the scene writer: an ordered document tree
//! ([`Mapping`], [`Listing`], [`ScalarNode`]), the printf-style float
//! formatting policy applied to numeric scalars, and the sinks that turn a
//! tree into text.
//!
//! ```ignore
//! use stdscene_document::{Mapping, YamlEmitter};
//!
//! let mut doc = Mapping::new();
//! doc.write_header("type", "Box");
//! let mut size = doc.create_flow_listing();
//! size.append(1.0);
//! size.append(2.0);
//! doc.insert("size", size);
//!
//! assert_eq!(YamlEmitter::new(2).emit(&doc.into()), "type: Box\nsize: [ 1, 2 ]\n");
//! ```

mod error;
pub mod format;
mod memory;
mod sink;
pub mod value;
mod yaml;

pub use error::DocumentError;
pub use format::{FloatFormat, Notation};
pub use memory::{MemoryFile, MemorySink};
pub use sink::DocumentSink;
pub use value::{IntoScalar, Listing, Mapping, Node, ScalarKind, ScalarNode, StringStyle};
pub use yaml::{YamlEmitter, YamlWriter};
