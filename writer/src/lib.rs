//! # Standard Scene Writer
//!
//! Serializes a [`stdscene_core`] scene graph into a `choreonoid_scene`
//! document (format version 1.0, angles in degrees).
//!
//! ## Architecture
//!
//! - [`SceneWriter`] - Traverses the graph, owns the settings and drives a
//!   [`DocumentSink`](stdscene_document::DocumentSink) for file output
//! - [`NodeDispatcher`] - Maps each node kind to its encoder, falling back
//!   to the nearest base kind
//! - [`encode`] - Encoders for groups, transforms, shapes, geometry and
//!   materials
//! - [`FilePathVariableProcessor`] - Rewrites resource URIs relative to a
//!   base directory or through `${NAME}` variables
//! - [`WriterConfig`] - Serializable writer settings
//!
//! ## Example
//!
//! ```ignore
//! use stdscene_core::math::Vec3;
//! use stdscene_core::mesh::SgMesh;
//! use stdscene_core::scene::SgNode;
//! use stdscene_writer::SceneWriter;
//! use std::sync::Arc;
//!
//! let scene = SgNode::group()
//!     .with_name("root")
//!     .with_child(SgNode::shape(
//!         Some(Arc::new(SgMesh::box_primitive(Vec3::new(1.0, 2.0, 3.0)))),
//!         None,
//!     ));
//!
//! let mut writer = SceneWriter::new();
//! writer.write_scene_file("scene.yaml", &scene)?;
//! ```

mod config;
mod dispatch;
pub mod encode;
mod error;
mod path;
mod writer;

pub use config::WriterConfig;
pub use dispatch::{EncodeFn, NodeDispatcher};
pub use encode::EncodeContext;
pub use error::WriteError;
pub use path::{FilePathVariableProcessor, PathParameterizer};
pub use writer::{SceneWriter, ANGLE_UNIT, FORMAT_NAME, FORMAT_VERSION};
