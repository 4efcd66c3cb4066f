use std::path::{Path, PathBuf};

use crate::{DocumentError, DocumentSink, Node, YamlEmitter};

/// A file as recorded by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryFile {
    /// Path the file was opened with.
    pub path: PathBuf,
    /// Root nodes put into the file, in order.
    pub nodes: Vec<Node>,
    /// YAML rendering of all documents.
    pub text: String,
}

/// In-memory document sink for tests and embedding.
///
/// Keeps every closed file together with its documents and their YAML
/// text. A sink created with [`refusing`](Self::refusing) fails every
/// `open_file` call, which is how callers exercise their open-failure
/// paths.
///
/// # Example
///
/// ```ignore
/// let mut sink = MemorySink::new();
/// sink.open_file(Path::new("scene.yaml"))?;
/// sink.put_node(&doc)?;
/// sink.close_file()?;
/// assert_eq!(sink.files()[0].text, "format: choreonoid_scene\n");
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    emitter: YamlEmitter,
    refuse_open: bool,
    current: Option<MemoryFile>,
    files: Vec<MemoryFile>,
    close_calls: usize,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink whose `open_file` always fails.
    pub fn refusing() -> Self {
        Self {
            refuse_open: true,
            ..Self::default()
        }
    }

    /// Set the YAML indent width used for the recorded text.
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.emitter = YamlEmitter::new(width);
        self
    }

    /// Files closed so far.
    pub fn files(&self) -> &[MemoryFile] {
        &self.files
    }

    /// The most recently closed file.
    pub fn last_file(&self) -> Option<&MemoryFile> {
        self.files.last()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Number of `close_file` calls, including ones with nothing open.
    pub fn close_calls(&self) -> usize {
        self.close_calls
    }

    fn finish_current(&mut self) {
        if let Some(file) = self.current.take() {
            self.files.push(file);
        }
    }
}

impl DocumentSink for MemorySink {
    fn open_file(&mut self, path: &Path) -> Result<(), DocumentError> {
        if self.refuse_open {
            return Err(DocumentError::Open {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "memory sink refuses to open files",
                ),
            });
        }
        self.finish_current();
        self.current = Some(MemoryFile {
            path: path.to_path_buf(),
            nodes: Vec::new(),
            text: String::new(),
        });
        Ok(())
    }

    fn put_node(&mut self, node: &Node) -> Result<(), DocumentError> {
        let file = self.current.as_mut().ok_or(DocumentError::NotOpen)?;
        if !file.nodes.is_empty() {
            file.text.push_str("---\n");
        }
        self.emitter.emit_into(node, &mut file.text);
        file.nodes.push(node.clone());
        Ok(())
    }

    fn close_file(&mut self) -> Result<(), DocumentError> {
        self.close_calls += 1;
        self.finish_current();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mapping;

    fn doc(value: i32) -> Node {
        let mut m = Mapping::new();
        m.write("value", value);
        m.into()
    }

    #[test]
    fn records_files() {
        let mut sink = MemorySink::new();
        sink.open_file(Path::new("a.yaml")).unwrap();
        assert!(sink.is_open());
        sink.put_node(&doc(1)).unwrap();
        sink.put_node(&doc(2)).unwrap();
        sink.close_file().unwrap();
        assert!(!sink.is_open());

        let file = sink.last_file().unwrap();
        assert_eq!(file.path, PathBuf::from("a.yaml"));
        assert_eq!(file.nodes.len(), 2);
        assert_eq!(file.text, "value: 1\n---\nvalue: 2\n");
        assert_eq!(sink.close_calls(), 1);
    }

    #[test]
    fn reopening_finishes_previous_file() {
        let mut sink = MemorySink::new();
        sink.open_file(Path::new("a.yaml")).unwrap();
        sink.open_file(Path::new("b.yaml")).unwrap();
        sink.close_file().unwrap();
        let paths: Vec<_> = sink.files().iter().map(|f| f.path.clone()).collect();
        assert_eq!(paths, [PathBuf::from("a.yaml"), PathBuf::from("b.yaml")]);
    }

    #[test]
    fn refusing_sink() {
        let mut sink = MemorySink::refusing();
        assert!(matches!(
            sink.open_file(Path::new("a.yaml")),
            Err(DocumentError::Open { .. })
        ));
        assert!(matches!(sink.put_node(&doc(1)), Err(DocumentError::NotOpen)));
        sink.close_file().unwrap();
        assert!(sink.files().is_empty());
    }
}
