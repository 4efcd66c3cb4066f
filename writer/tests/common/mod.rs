//! Shared scene builders for the writer integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use stdscene_core::material::SgMaterial;
use stdscene_core::math::{Vec3, Vec3f};
use stdscene_core::mesh::SgMesh;
use stdscene_core::scene::SgNode;
use stdscene_document::{Listing, Mapping};

pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Unit quad in the XY plane: 4 vertices, 2 triangles.
pub fn quad_mesh() -> SgMesh {
    SgMesh::new()
        .with_vertices(vec![
            Vec3f::new(0.0, 0.0, 0.0),
            Vec3f::new(1.0, 0.0, 0.0),
            Vec3f::new(1.0, 1.0, 0.0),
            Vec3f::new(0.0, 1.0, 0.0),
        ])
        .with_triangles(&[[0, 1, 2], [0, 2, 3]])
}

pub fn shape(mesh: SgMesh) -> SgNode {
    SgNode::shape(Some(Arc::new(mesh)), None)
}

pub fn shape_with_material(mesh: SgMesh, material: SgMaterial) -> SgNode {
    SgNode::shape(Some(Arc::new(mesh)), Some(Arc::new(material)))
}

pub fn box_shape(x: f64, y: f64, z: f64) -> SgNode {
    shape(SgMesh::box_primitive(Vec3::new(x, y, z)))
}

pub fn scalar<'a>(mapping: &'a Mapping, key: &str) -> &'a str {
    mapping
        .find_scalar(key)
        .unwrap_or_else(|| panic!("missing scalar '{key}'"))
        .text()
}

pub fn scalars(listing: &Listing) -> Vec<String> {
    listing
        .iter()
        .map(|node| node.as_scalar().expect("scalar item").text().to_owned())
        .collect()
}

/// The mapping of the `index`-th child under `elements`.
pub fn element(mapping: &Mapping, index: usize) -> &Mapping {
    mapping
        .find_listing("elements")
        .and_then(|elements| elements.get(index))
        .and_then(|node| node.as_mapping())
        .expect("child mapping")
}
