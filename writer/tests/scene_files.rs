//! File-form output through YAML files and in-memory sinks.

mod common;

use std::fs;
use std::path::Path;

use common::*;
use stdscene_core::math::{rotation_from_angle_axis, Vec3};
use stdscene_core::scene::SgNode;
use stdscene_document::{DocumentError, DocumentSink, MemorySink, Node};
use stdscene_writer::{SceneWriter, WriteError, WriterConfig, FORMAT_NAME};

fn base_scene() -> SgNode {
    let rotation = rotation_from_angle_axis(Vec3::z(), std::f64::consts::FRAC_PI_2);
    SgNode::pos_transform(rotation, Vec3::zeros())
        .with_name("base")
        .with_child(box_shape(1.0, 2.0, 3.0))
}

const BASE_SCENE_YAML: &str = "\
format: choreonoid_scene
format_version: 1.0
angle_unit: degree
scene:
  -
    type: Transform
    name: base
    rotation: [ 0, 0, 1, 90 ]
    elements:
      -
        type: Shape
        geometry:
          type: Box
          size: [ 1, 2, 3 ]
";

/// Sink that opens but fails every `put_node`.
#[derive(Default)]
struct FailingSink {
    open: bool,
    close_calls: usize,
}

impl DocumentSink for FailingSink {
    fn open_file(&mut self, _path: &Path) -> Result<(), DocumentError> {
        self.open = true;
        Ok(())
    }

    fn put_node(&mut self, _node: &Node) -> Result<(), DocumentError> {
        Err(DocumentError::Io(std::io::Error::other("disk full")))
    }

    fn close_file(&mut self) -> Result<(), DocumentError> {
        self.open = false;
        self.close_calls += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// YAML files
// ---------------------------------------------------------------------------

#[test]
fn writes_yaml_file() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.yaml");

    SceneWriter::new()
        .write_scene_file(&path, &base_scene())
        .unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), BASE_SCENE_YAML);
}

#[test]
fn file_indent_width() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.yaml");

    let mut writer = SceneWriter::with_config(WriterConfig::new().with_indent_width(4));
    writer
        .write_scene_file(&path, &SgNode::group().with_name("root"))
        .unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "format: choreonoid_scene\n\
         format_version: 1.0\n\
         angle_unit: degree\n\
         scene:\n\
         \x20   -\n\
         \x20       type: Group\n\
         \x20       name: root\n"
    );
}

#[test]
fn several_scenes_share_one_document() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenes.yaml");

    let scenes = [SgNode::group().with_name("a"), SgNode::group().with_name("b")];
    SceneWriter::new().write_scenes_file(&path, &scenes).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains("---"));
    assert!(text.ends_with(
        "scene:\n  -\n    type: Group\n    name: a\n  -\n    type: Group\n    name: b\n"
    ));
}

#[test]
fn unopenable_file_is_an_error() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("scene.yaml");

    let err = SceneWriter::new()
        .write_scene_file(&path, &SgNode::group())
        .unwrap_err();

    assert!(matches!(&err, WriteError::Open { path: p, .. } if *p == path));
    assert!(!path.exists());
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

#[test]
fn memory_sink_receives_one_document() {
    init_logger();
    let mut sink = MemorySink::new();
    SceneWriter::new()
        .write_scenes_to_sink(&mut sink, Path::new("/scenes/base.yaml"), &[&base_scene()])
        .unwrap();

    assert!(!sink.is_open());
    assert_eq!(sink.close_calls(), 1);
    let file = sink.last_file().unwrap();
    assert_eq!(file.path, Path::new("/scenes/base.yaml"));
    assert_eq!(file.nodes.len(), 1);
    assert_eq!(file.text, BASE_SCENE_YAML);

    let document = file.nodes[0].as_mapping().unwrap();
    assert_eq!(
        document.keys().collect::<Vec<_>>(),
        ["format", "format_version", "angle_unit", "scene"]
    );
    assert_eq!(scalar(document, "format"), FORMAT_NAME);
    assert_eq!(scalar(document, "format_version"), "1.0");
    assert_eq!(scalar(document, "angle_unit"), "degree");
}

#[test]
fn refused_open_closes_sink() {
    init_logger();
    let mut sink = MemorySink::refusing();
    let result = SceneWriter::new().write_scenes_to_sink(
        &mut sink,
        Path::new("scene.yaml"),
        &[&SgNode::group()],
    );

    assert!(matches!(result, Err(WriteError::Open { .. })));
    assert_eq!(sink.close_calls(), 1);
    assert!(sink.files().is_empty());
}

#[test]
fn failed_put_closes_sink() {
    init_logger();
    let mut sink = FailingSink::default();
    let result = SceneWriter::new().write_scenes_to_sink(
        &mut sink,
        Path::new("scene.yaml"),
        &[&SgNode::group()],
    );

    assert!(matches!(result, Err(WriteError::Sink(DocumentError::Io(_)))));
    assert!(!sink.open);
    assert_eq!(sink.close_calls, 1);
}

// ---------------------------------------------------------------------------
// Mesh embedding
// ---------------------------------------------------------------------------

#[test]
fn file_form_embeds_resource_meshes() {
    init_logger();
    let node = shape(quad_mesh().with_uri("meshes/foo.obj"));
    let mut writer = SceneWriter::new();

    let in_memory = writer.write_scene(&node);
    let geometry = in_memory.find_mapping("geometry").unwrap();
    assert_eq!(scalar(geometry, "type"), "Resource");

    let mut sink = MemorySink::new();
    writer
        .write_scenes_to_sink(&mut sink, Path::new("/work/scene.yaml"), &[&node])
        .unwrap();
    let text = &sink.last_file().unwrap().text;
    assert!(text.contains(
        "      type: TriangleMesh\n\
         \x20     vertices: [ 0, 0, 0, 1, 0, 0, 1, 1, 0, 0, 1, 0 ]\n\
         \x20     triangles: [ 0, 1, 2, 0, 2, 3 ]\n"
    ));
    assert!(!text.contains("Resource"));

    let again = writer.write_scene(&node);
    assert_eq!(again, in_memory);
}

#[test]
fn file_output_is_repeatable() {
    init_logger();
    let mut writer = SceneWriter::new();
    let mut sink = MemorySink::new();
    let scene = base_scene();
    for _ in 0..2 {
        writer
            .write_scenes_to_sink(&mut sink, Path::new("scene.yaml"), &[&scene])
            .unwrap();
    }
    let files = sink.files();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].text, files[1].text);
}
