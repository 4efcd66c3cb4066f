use std::path::Path;

use crate::{DocumentError, Node};

/// Destination for finished documents.
///
/// A sink is opened on a path, receives one or more root nodes and is then
/// closed. Implementations must accept `close_file` when nothing is open.
pub trait DocumentSink {
    /// Open `path` for writing, closing any previously opened file.
    fn open_file(&mut self, path: &Path) -> Result<(), DocumentError>;

    /// Write one root node as a document.
    fn put_node(&mut self, node: &Node) -> Result<(), DocumentError>;

    /// Flush and release the current file.
    fn close_file(&mut self) -> Result<(), DocumentError>;
}
