//! Scene writer orchestrator.
//!
//! [`SceneWriter`] walks a scene graph depth-first and builds one mapping
//! per node: the node's `name`, the kind-specific fields from the
//! [`NodeDispatcher`], then the encoded children under `elements`.
//!
//! The in-memory form ([`SceneWriter::write_scene`]) references meshes
//! with a URI as resources. The file form always inlines mesh data, makes
//! remaining resource paths relative to the file's directory and wraps the
//! encoded nodes in the `choreonoid_scene` header.

use std::path::Path;

use stdscene_core::material::SgMaterial;
use stdscene_core::scene::SgNode;
use stdscene_document::{DocumentSink, FloatFormat, Mapping, Node, YamlWriter};

use crate::config::WriterConfig;
use crate::dispatch::NodeDispatcher;
use crate::encode::EncodeContext;
use crate::error::WriteError;
use crate::path::{FilePathVariableProcessor, PathParameterizer};

/// Value of the top-level `format` field.
pub const FORMAT_NAME: &str = "choreonoid_scene";
/// Value of the top-level `format_version` field.
pub const FORMAT_VERSION: &str = "1.0";
/// Value of the top-level `angle_unit` field.
pub const ANGLE_UNIT: &str = "degree";

/// Serializes scene graphs into `choreonoid_scene` documents.
///
/// A writer is reusable: settings persist between calls and writing the
/// same scene twice with the same settings produces identical documents.
///
/// # Example
///
/// ```ignore
/// use stdscene_core::scene::SgNode;
/// use stdscene_writer::SceneWriter;
///
/// let mut writer = SceneWriter::new();
/// let doc = writer.write_scene(&SgNode::group());
/// assert_eq!(doc.find_scalar("type").unwrap().text(), "Group");
///
/// writer.write_scene_file("scene.yaml", &SgNode::group().with_name("root"))?;
/// ```
#[derive(Debug)]
pub struct SceneWriter {
    dispatcher: NodeDispatcher,
    config: WriterConfig,
    vertex_format: FloatFormat,
    vertex_format_text: String,
    /// Material fields equal to this one are omitted.
    default_material: SgMaterial,
    path_processor: Option<FilePathVariableProcessor>,
    custom_parameterizer: Option<CustomParameterizer>,
    embed_all_meshes: bool,
}

/// Caller-provided parameterizer; replaces the built-in processor.
struct CustomParameterizer(Box<dyn PathParameterizer>);

impl std::fmt::Debug for CustomParameterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CustomParameterizer")
    }
}

impl SceneWriter {
    /// Create a writer with default settings.
    pub fn new() -> Self {
        Self::with_config(WriterConfig::default())
    }

    /// Create a writer from settings.
    pub fn with_config(config: WriterConfig) -> Self {
        let vertex_format = FloatFormat::general(config.vertex_precision);
        let path_processor = config
            .has_path_settings()
            .then(|| config.path_processor(None));
        Self {
            dispatcher: NodeDispatcher::new(),
            vertex_format_text: vertex_format.to_printf(),
            vertex_format,
            default_material: SgMaterial::default(),
            path_processor,
            custom_parameterizer: None,
            embed_all_meshes: false,
            config,
        }
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Set the significant digits of vertex coordinates.
    pub fn set_vertex_precision(&mut self, precision: usize) {
        self.config.vertex_precision = precision;
        self.vertex_format = FloatFormat::general(precision);
        self.vertex_format_text = self.vertex_format.to_printf();
    }

    pub fn vertex_precision(&self) -> usize {
        self.config.vertex_precision
    }

    /// printf-style format of vertex coordinates, e.g. `%.7g`.
    pub fn vertex_format(&self) -> &str {
        &self.vertex_format_text
    }

    /// Set the YAML indent width used by the file form.
    pub fn set_indent_width(&mut self, width: usize) {
        self.config.indent_width = width;
    }

    pub fn indent_width(&self) -> usize {
        self.config.indent_width
    }

    /// Set the directory resource URIs are made relative to.
    ///
    /// Configured path variables are kept. An empty path clears the base
    /// directory.
    pub fn set_base_directory(&mut self, directory: impl AsRef<Path>) {
        self.path_processor
            .get_or_insert_with(|| self.config.path_processor(None))
            .set_base_directory(directory);
    }

    /// Replace the built-in path processor for resource URIs.
    pub fn set_path_parameterizer(&mut self, parameterizer: impl PathParameterizer + 'static) {
        self.custom_parameterizer = Some(CustomParameterizer(Box::new(parameterizer)));
    }

    /// Replace the node dispatcher.
    pub fn set_dispatcher(&mut self, dispatcher: NodeDispatcher) {
        self.dispatcher = dispatcher;
    }

    pub fn dispatcher(&self) -> &NodeDispatcher {
        &self.dispatcher
    }

    // ------------------------------------------------------------------------
    // In-memory form
    // ------------------------------------------------------------------------

    /// Encode `node` and its subtree. Meshes with a URI are written as
    /// resource references.
    pub fn write_scene(&mut self, node: &SgNode) -> Mapping {
        self.embed_all_meshes = false;
        self.encode(node)
    }

    // ------------------------------------------------------------------------
    // File form
    // ------------------------------------------------------------------------

    /// Write `node` to a YAML file at `path`.
    pub fn write_scene_file(
        &mut self,
        path: impl AsRef<Path>,
        node: &SgNode,
    ) -> Result<(), WriteError> {
        let mut sink = YamlWriter::new().with_indent_width(self.config.indent_width);
        self.write_scenes_to_sink(&mut sink, path.as_ref(), &[node])
    }

    /// Write several top-level nodes into the `scene` list of one YAML file.
    pub fn write_scenes_file(
        &mut self,
        path: impl AsRef<Path>,
        nodes: &[SgNode],
    ) -> Result<(), WriteError> {
        let nodes: Vec<&SgNode> = nodes.iter().collect();
        let mut sink = YamlWriter::new().with_indent_width(self.config.indent_width);
        self.write_scenes_to_sink(&mut sink, path.as_ref(), &nodes)
    }

    /// Write `nodes` as one document through `sink`.
    ///
    /// Mesh data is always inlined and the base directory is set to the
    /// parent of `path`. The sink is closed before returning, whether or
    /// not writing succeeded.
    pub fn write_scenes_to_sink(
        &mut self,
        sink: &mut dyn DocumentSink,
        path: &Path,
        nodes: &[&SgNode],
    ) -> Result<(), WriteError> {
        if let Err(source) = sink.open_file(path) {
            if let Err(err) = sink.close_file() {
                log::warn!("Failed to close scene output after open failure: {err}");
            }
            return Err(WriteError::Open {
                path: path.to_path_buf(),
                source,
            });
        }

        let document = self.build_file_document(path, nodes);

        if let Err(err) = sink.put_node(&Node::Mapping(document)) {
            if let Err(close_err) = sink.close_file() {
                log::warn!("Failed to close scene output {}: {close_err}", path.display());
            }
            return Err(err.into());
        }
        sink.close_file()?;

        log::info!("Wrote {} scene node(s) to {}", nodes.len(), path.display());
        Ok(())
    }

    fn build_file_document(&mut self, path: &Path, nodes: &[&SgNode]) -> Mapping {
        self.embed_all_meshes = true;
        let directory = path.parent().unwrap_or_else(|| Path::new(""));
        self.set_base_directory(directory);

        let mut document = Mapping::new();
        document.write("format", FORMAT_NAME);
        document.write("format_version", FORMAT_VERSION);
        document.write("angle_unit", ANGLE_UNIT);

        let mut scene = document.create_listing();
        for node in nodes {
            scene.append_node(self.encode(node));
        }
        document.insert("scene", scene);
        document
    }

    // ------------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------------

    fn encode(&mut self, node: &SgNode) -> Mapping {
        let processor = self
            .path_processor
            .get_or_insert_with(|| self.config.path_processor(None));
        let path_parameterizer: &dyn PathParameterizer = match &self.custom_parameterizer {
            Some(custom) => custom.0.as_ref(),
            None => &*processor,
        };
        let ctx = EncodeContext {
            embed_all_meshes: self.embed_all_meshes,
            vertex_format: self.vertex_format,
            default_material: &self.default_material,
            path_parameterizer,
        };
        encode_node(&self.dispatcher, &ctx, node)
    }
}

impl Default for SceneWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_node(dispatcher: &NodeDispatcher, ctx: &EncodeContext<'_>, node: &SgNode) -> Mapping {
    let mut mapping = Mapping::new();

    if let Some(name) = node.name() {
        mapping.write("name", name);
    }

    if !dispatcher.dispatch(ctx, &mut mapping, node) {
        log::debug!(
            "No encoder for {:?} node; writing name and children only",
            node.kind_tag()
        );
    }

    if node.is_group_node() {
        let mut elements = mapping.create_listing();
        for child in node.children() {
            elements.append_node(encode_node(dispatcher, ctx, child));
        }
        if !elements.is_empty() {
            mapping.insert("elements", elements);
        }
    }

    mapping
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use stdscene_core::math::Vec3;
    use stdscene_core::mesh::SgMesh;
    use stdscene_document::MemorySink;

    use super::*;

    fn resource_shape() -> SgNode {
        let mesh = SgMesh::box_primitive(Vec3::new(1.0, 1.0, 1.0)).with_uri("/data/meshes/box.obj");
        SgNode::shape(Some(Arc::new(mesh)), None)
    }

    fn uri_of(doc: &Mapping) -> String {
        doc.find_mapping("geometry")
            .and_then(|geometry| geometry.find_scalar("uri"))
            .map(|uri| uri.text().to_owned())
            .unwrap_or_default()
    }

    #[test]
    fn vertex_precision_updates_format() {
        let mut writer = SceneWriter::new();
        assert_eq!(writer.vertex_precision(), 7);
        assert_eq!(writer.vertex_format(), "%.7g");
        writer.set_vertex_precision(4);
        assert_eq!(writer.vertex_precision(), 4);
        assert_eq!(writer.vertex_format(), "%.4g");
    }

    #[test]
    fn name_precedes_children() {
        let mut writer = SceneWriter::new();
        let scene = SgNode::group()
            .with_name("root")
            .with_child(SgNode::group().with_name("a"))
            .with_child(SgNode::group());
        let doc = writer.write_scene(&scene);
        let keys: Vec<&str> = doc.keys().collect();
        assert_eq!(keys, ["name", "type", "elements"]);
        assert_eq!(doc.find_listing("elements").unwrap().len(), 2);
    }

    #[test]
    fn empty_children_are_omitted() {
        let mut writer = SceneWriter::new();
        let doc = writer.write_scene(&SgNode::group().with_children(vec![]));
        assert!(!doc.contains_key("elements"));
    }

    #[test]
    fn configured_base_directory_applies_in_memory() {
        let mut writer = SceneWriter::with_config(WriterConfig::new().with_base_directory("/data"));
        assert_eq!(uri_of(&writer.write_scene(&resource_shape())), "meshes/box.obj");
    }

    #[test]
    fn set_base_directory_keeps_variables() {
        let config = WriterConfig::new().with_path_variable("DATA", "/data");
        let mut writer = SceneWriter::with_config(config);
        assert_eq!(uri_of(&writer.write_scene(&resource_shape())), "${DATA}/meshes/box.obj");

        writer.set_base_directory("/data/meshes");
        assert_eq!(uri_of(&writer.write_scene(&resource_shape())), "box.obj");
    }

    #[test]
    fn custom_parameterizer_is_used() {
        let mut writer = SceneWriter::new();
        writer.set_path_parameterizer(|path: &str| format!("custom:{path}"));
        assert_eq!(
            uri_of(&writer.write_scene(&resource_shape())),
            "custom:/data/meshes/box.obj"
        );
    }

    #[test]
    fn file_form_sets_base_directory() {
        let mut writer = SceneWriter::new();
        let mut sink = MemorySink::new();
        let path = PathBuf::from("/data/scene.yaml");
        writer
            .write_scenes_to_sink(&mut sink, &path, &[&SgNode::group()])
            .unwrap();
        assert_eq!(
            writer
                .path_processor
                .as_ref()
                .and_then(FilePathVariableProcessor::base_directory)
                .as_deref(),
            Some("/data")
        );
    }

    #[test]
    fn file_form_then_memory_form_switches_embedding() {
        let mut writer = SceneWriter::new();
        let mut sink = MemorySink::new();
        writer
            .write_scenes_to_sink(&mut sink, Path::new("/tmp/s.yaml"), &[&resource_shape()])
            .unwrap();
        let doc = writer.write_scene(&resource_shape());
        assert_eq!(
            doc.find_mapping("geometry")
                .and_then(|g| g.find_scalar("type"))
                .map(|t| t.text()),
            Some("Resource")
        );
    }
}
