//! Mesh generators for common shapes.
//!
//! Generated meshes keep their primitive description next to the triangle
//! data, so a writer can emit either form.

use std::f32::consts::PI;

use crate::math::{Vec3, Vec3f};

use super::data::{MeshPrimitive, SgMesh};

/// Generate a box mesh centered at the origin.
///
/// Produces 8 shared corner vertices and 12 triangles with outward
/// (counter-clockwise) winding. The mesh is marked solid.
pub fn generate_box(size: Vec3) -> SgMesh {
    let x = (size.x * 0.5) as f32;
    let y = (size.y * 0.5) as f32;
    let z = (size.z * 0.5) as f32;

    let vertices = vec![
        Vec3f::new(x, y, z),
        Vec3f::new(-x, y, z),
        Vec3f::new(-x, -y, z),
        Vec3f::new(x, -y, z),
        Vec3f::new(x, y, -z),
        Vec3f::new(-x, y, -z),
        Vec3f::new(-x, -y, -z),
        Vec3f::new(x, -y, -z),
    ];

    let triangles = [
        [0, 1, 2],
        [2, 3, 0],
        [0, 5, 1],
        [0, 4, 5],
        [1, 5, 6],
        [6, 2, 1],
        [2, 6, 7],
        [7, 3, 2],
        [3, 7, 4],
        [4, 0, 3],
        [4, 7, 6],
        [6, 5, 4],
    ];

    SgMesh::new()
        .with_primitive(MeshPrimitive::Box { size })
        .with_vertices(vertices)
        .with_triangles(&triangles)
        .with_solid(true)
}

/// Generate a UV sphere mesh.
///
/// Creates a sphere with the given radius, number of longitudinal segments,
/// and number of latitudinal rings.
///
/// # Arguments
///
/// * `radius` - Sphere radius
/// * `segments` - Number of longitudinal segments (around the equator)
/// * `rings` - Number of latitudinal rings (from pole to pole)
pub fn generate_sphere(radius: f64, segments: u32, rings: u32) -> SgMesh {
    let r = radius as f32;
    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    let mut triangles = Vec::with_capacity((rings * segments * 2) as usize);

    for ring in 0..=rings {
        let theta = ring as f32 * PI / rings as f32;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for segment in 0..=segments {
            let phi = segment as f32 * 2.0 * PI / segments as f32;
            vertices.push(Vec3f::new(
                sin_theta * phi.cos() * r,
                cos_theta * r,
                sin_theta * phi.sin() * r,
            ));
        }
    }

    for ring in 0..rings {
        for segment in 0..segments {
            let current = ring * (segments + 1) + segment;
            let next = current + segments + 1;
            triangles.push([current, next, current + 1]);
            triangles.push([current + 1, next, next + 1]);
        }
    }

    SgMesh::new()
        .with_primitive(MeshPrimitive::Sphere { radius })
        .with_vertices(vertices)
        .with_triangles(&triangles)
        .with_solid(true)
}
