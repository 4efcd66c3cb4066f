//! Resource path rewriting.
//!
//! Mesh URIs are passed through a [`PathParameterizer`] before they are
//! written, so documents can refer to resources relative to the document
//! or through named directory variables instead of machine-specific
//! absolute paths.
//!
//! All path handling here is lexical: paths are split on `/` (and `\`),
//! `.` and `..` segments are resolved textually and the filesystem is
//! never consulted.

use std::path::Path;

/// Rewrites resource paths for output.
pub trait PathParameterizer {
    fn parameterize(&self, path: &str) -> String;
}

impl<F> PathParameterizer for F
where
    F: Fn(&str) -> String,
{
    fn parameterize(&self, path: &str) -> String {
        self(path)
    }
}

/// Base-relative and `${NAME}` variable path rewriting.
///
/// For an absolute path, in order:
/// 1. under the base directory: the base-relative path;
/// 2. under one or more variable directories: `${NAME}/rest` for the
///    deepest matching directory;
/// 3. otherwise the normalized absolute path.
///
/// Relative paths and URIs with a scheme other than `file://` are kept as
/// given. Without a base directory and variables the processor is a
/// pass-through.
///
/// # Example
///
/// ```ignore
/// let processor = FilePathVariableProcessor::new()
///     .with_base_directory("/home/user/project")
///     .with_variable("SHARE", "/usr/share/choreonoid");
///
/// assert_eq!(processor.parameterize("/home/user/project/meshes/a.obj"), "meshes/a.obj");
/// assert_eq!(processor.parameterize("/usr/share/choreonoid/model/b.wrl"), "${SHARE}/model/b.wrl");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilePathVariableProcessor {
    base_directory: Option<LexicalPath>,
    variables: Vec<(String, LexicalPath)>,
}

impl FilePathVariableProcessor {
    /// Create a pass-through processor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base directory.
    #[must_use]
    pub fn with_base_directory(mut self, directory: impl AsRef<Path>) -> Self {
        self.set_base_directory(directory);
        self
    }

    /// Add a path variable.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, directory: impl AsRef<Path>) -> Self {
        self.set_variable(name, directory);
        self
    }

    /// Set the base directory. An empty path clears it.
    pub fn set_base_directory(&mut self, directory: impl AsRef<Path>) {
        let directory = directory.as_ref().to_string_lossy();
        self.base_directory = if directory.is_empty() {
            None
        } else {
            Some(LexicalPath::parse(&directory))
        };
    }

    /// Get the base directory in generic (`/`-separated) form.
    pub fn base_directory(&self) -> Option<String> {
        self.base_directory.as_ref().map(LexicalPath::to_generic)
    }

    /// Define or replace a path variable.
    pub fn set_variable(&mut self, name: impl Into<String>, directory: impl AsRef<Path>) {
        let name = name.into();
        let directory = LexicalPath::parse(&directory.as_ref().to_string_lossy());
        match self.variables.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = directory,
            None => self.variables.push((name, directory)),
        }
    }

    /// Get the directory of a path variable in generic form.
    pub fn variable(&self, name: &str) -> Option<String> {
        self.variables
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, directory)| directory.to_generic())
    }
}

impl PathParameterizer for FilePathVariableProcessor {
    fn parameterize(&self, path: &str) -> String {
        let path = match split_scheme(path) {
            Some(("file", rest)) => rest,
            Some(_) => return path.to_owned(),
            None => path,
        };

        let lexical = LexicalPath::parse(path);
        if !lexical.is_absolute() {
            return path.replace('\\', "/");
        }

        if let Some(rest) = self
            .base_directory
            .as_ref()
            .and_then(|base| lexical.strip_prefix(base))
        {
            return join_relative(rest);
        }

        let deepest = self
            .variables
            .iter()
            .filter_map(|(name, directory)| {
                lexical
                    .strip_prefix(directory)
                    .map(|rest| (name, directory.segments.len(), rest))
            })
            .max_by_key(|(_, depth, _)| *depth);

        match deepest {
            Some((name, _, [])) => format!("${{{name}}}"),
            Some((name, _, rest)) => format!("${{{name}}}/{}", rest.join("/")),
            None => lexical.to_generic(),
        }
    }
}

/// Split `scheme://rest`. The scheme must look like a URI scheme.
fn split_scheme(uri: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = uri.split_once("://")?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some((scheme, rest))
}

fn join_relative(segments: &[String]) -> String {
    if segments.is_empty() {
        ".".to_owned()
    } else {
        segments.join("/")
    }
}

// ---------------------------------------------------------------------------
// LexicalPath
// ---------------------------------------------------------------------------

/// A path split into root and normalized segments.
#[derive(Debug, Clone, PartialEq)]
struct LexicalPath {
    /// `""` for relative paths, `"/"` or a drive root such as `"C:/"`.
    root: String,
    segments: Vec<String>,
}

impl LexicalPath {
    fn parse(path: &str) -> Self {
        let generic = path.replace('\\', "/");
        let (root, rest) = split_root(&generic);

        let mut segments: Vec<String> = Vec::new();
        for segment in rest.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if segments.last().is_some_and(|last| last != "..") {
                        segments.pop();
                    } else if root.is_empty() {
                        segments.push("..".to_owned());
                    }
                }
                segment => segments.push(segment.to_owned()),
            }
        }

        Self {
            root: root.to_owned(),
            segments,
        }
    }

    fn is_absolute(&self) -> bool {
        !self.root.is_empty()
    }

    /// Segments after `prefix`, if `prefix` is an ancestor of (or equal to) this path.
    fn strip_prefix(&self, prefix: &LexicalPath) -> Option<&[String]> {
        (self.root == prefix.root && self.segments.starts_with(&prefix.segments))
            .then(|| &self.segments[prefix.segments.len()..])
    }

    fn to_generic(&self) -> String {
        if self.root.is_empty() {
            join_relative(&self.segments)
        } else {
            format!("{}{}", self.root, self.segments.join("/"))
        }
    }
}

fn split_root(path: &str) -> (&str, &str) {
    let bytes = path.as_bytes();
    if path.starts_with('/') {
        (&path[..1], &path[1..])
    } else if bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && bytes[2] == b'/'
    {
        (&path[..3], &path[3..])
    } else {
        ("", path)
    }
}
