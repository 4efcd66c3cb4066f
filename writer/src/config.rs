//! Writer settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::path::FilePathVariableProcessor;

/// Settings of a [`SceneWriter`](crate::SceneWriter).
///
/// Missing fields take their default values when deserializing, so a
/// settings file only needs to list what it changes:
///
/// ```ignore
/// let config = WriterConfig::from_ron_str(r#"(vertex_precision: 9)"#)?;
/// assert_eq!(config.indent_width, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Significant digits of mesh vertex coordinates.
    pub vertex_precision: usize,
    /// Spaces per nesting level in YAML output.
    pub indent_width: usize,
    /// Directory resource URIs are made relative to.
    pub base_directory: Option<PathBuf>,
    /// Named directories substituted as `${NAME}` in resource URIs.
    pub path_variables: Vec<(String, PathBuf)>,
}

impl WriterConfig {
    /// Default significant digits of vertex coordinates.
    pub const DEFAULT_VERTEX_PRECISION: usize = 7;
    /// Default YAML indent width.
    pub const DEFAULT_INDENT_WIDTH: usize = 2;

    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_vertex_precision(mut self, precision: usize) -> Self {
        self.vertex_precision = precision;
        self
    }

    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    #[must_use]
    pub fn with_base_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.base_directory = Some(directory.into());
        self
    }

    /// Add a path variable. Later entries with the same name win.
    #[must_use]
    pub fn with_path_variable(
        mut self,
        name: impl Into<String>,
        directory: impl Into<PathBuf>,
    ) -> Self {
        self.path_variables.push((name.into(), directory.into()));
        self
    }

    /// Parse settings from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Serialize settings as pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// A path processor for the configured base directory and variables.
    ///
    /// `directory` overrides the configured base directory.
    pub(crate) fn path_processor(&self, directory: Option<&Path>) -> FilePathVariableProcessor {
        let mut processor = FilePathVariableProcessor::new();
        if let Some(directory) = directory.or(self.base_directory.as_deref()) {
            processor.set_base_directory(directory);
        }
        for (name, directory) in &self.path_variables {
            processor.set_variable(name, directory);
        }
        processor
    }

    /// Whether any path rewriting is configured.
    pub(crate) fn has_path_settings(&self) -> bool {
        self.base_directory.is_some() || !self.path_variables.is_empty()
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            vertex_precision: Self::DEFAULT_VERTEX_PRECISION,
            indent_width: Self::DEFAULT_INDENT_WIDTH,
            base_directory: None,
            path_variables: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathParameterizer;

    #[test]
    fn defaults() {
        let config = WriterConfig::default();
        assert_eq!(config.vertex_precision, 7);
        assert_eq!(config.indent_width, 2);
        assert!(config.base_directory.is_none());
        assert!(config.path_variables.is_empty());
        assert!(!config.has_path_settings());
    }

    #[test]
    fn partial_ron_uses_defaults() {
        let config = WriterConfig::from_ron_str("(vertex_precision: 9)").unwrap();
        assert_eq!(config.vertex_precision, 9);
        assert_eq!(config.indent_width, 2);
    }

    #[test]
    fn full_ron() {
        let text = r#"(
            vertex_precision: 5,
            indent_width: 4,
            base_directory: Some("/data/scenes"),
            path_variables: [("SHARE", "/usr/share/choreonoid")],
        )"#;
        let config = WriterConfig::from_ron_str(text).unwrap();
        assert_eq!(
            config,
            WriterConfig::new()
                .with_vertex_precision(5)
                .with_indent_width(4)
                .with_base_directory("/data/scenes")
                .with_path_variable("SHARE", "/usr/share/choreonoid")
        );
        assert!(config.has_path_settings());
    }

    #[test]
    fn ron_round_trip() {
        let config = WriterConfig::new()
            .with_vertex_precision(3)
            .with_path_variable("MODELS", "/opt/models");
        let text = config.to_ron_string().unwrap();
        assert_eq!(WriterConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn invalid_ron_is_rejected() {
        assert!(WriterConfig::from_ron_str("(vertex_precision: \"seven\")").is_err());
    }

    #[test]
    fn path_processor_from_settings() {
        let config = WriterConfig::new()
            .with_base_directory("/data")
            .with_path_variable("SHARE", "/usr/share");
        let processor = config.path_processor(None);
        assert_eq!(processor.parameterize("/data/a.obj"), "a.obj");
        assert_eq!(processor.parameterize("/usr/share/b.obj"), "${SHARE}/b.obj");

        let processor = config.path_processor(Some(Path::new("/other")));
        assert_eq!(processor.parameterize("/other/c.obj"), "c.obj");
        assert_eq!(processor.parameterize("/data/a.obj"), "/data/a.obj");
    }
}
