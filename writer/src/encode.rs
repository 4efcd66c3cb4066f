//! Node encoders.
//!
//! Each encoder fills the mapping of one scene node with the fields
//! specific to its kind. The shared `name` field and the `elements` list of
//! children are written by the [`SceneWriter`](crate::SceneWriter).
//!
//! Encoders never fail: missing or unusable data is left out of the
//! document.

use stdscene_core::material::SgMaterial;
use stdscene_core::math::{angle_axis, degree, Vec3};
use stdscene_core::mesh::{MeshPrimitive, SgMesh};
use stdscene_core::scene::{SgNode, SgShape};
use stdscene_document::{FloatFormat, IntoScalar, Mapping, StringStyle};

use crate::path::PathParameterizer;

/// Float format of transform fields, independent of the vertex precision.
pub const TRANSFORM_FLOAT_FORMAT: FloatFormat = FloatFormat::general(7);

/// Values per row of a wrapped `vertices` list.
const VERTEX_VALUES_PER_ROW: usize = 12;
/// Values per row of a wrapped `triangles` list.
const INDEX_VALUES_PER_ROW: usize = 15;

/// Writer state visible to encoders during one traversal.
pub struct EncodeContext<'a> {
    /// Inline mesh data even when the mesh has a resource URI.
    pub embed_all_meshes: bool,
    /// Format of vertex coordinates.
    pub vertex_format: FloatFormat,
    /// Material fields equal to this one are not written.
    pub default_material: &'a SgMaterial,
    /// Rewrites resource URIs.
    pub path_parameterizer: &'a dyn PathParameterizer,
}

// ---------------------------------------------------------------------------
// Node kinds
// ---------------------------------------------------------------------------

/// `type: Group`
pub fn encode_group(_ctx: &EncodeContext<'_>, mapping: &mut Mapping, _node: &SgNode) {
    write_type(mapping, "Group");
}

/// `type: Transform` with `rotation` (axis and degrees) and `translation`.
///
/// An identity rotation and a zero translation are left out.
pub fn encode_pos_transform(_ctx: &EncodeContext<'_>, mapping: &mut Mapping, node: &SgNode) {
    let Some(transform) = node.as_pos_transform() else {
        return;
    };
    mapping.set_float_format(TRANSFORM_FLOAT_FORMAT);
    write_type(mapping, "Transform");

    let (axis, angle) = angle_axis(&transform.rotation);
    if angle != 0.0 {
        let mut rotation = mapping.create_flow_listing();
        for &component in axis.iter() {
            rotation.append(component);
        }
        rotation.append(degree(angle));
        mapping.insert("rotation", rotation);
    }
    if transform.translation != Vec3::zeros() {
        write_vector(mapping, "translation", transform.translation.as_slice());
    }
}

/// `type: Transform` with `scale`.
pub fn encode_scale_transform(_ctx: &EncodeContext<'_>, mapping: &mut Mapping, node: &SgNode) {
    let Some(transform) = node.as_scale_transform() else {
        return;
    };
    write_type(mapping, "Transform");
    write_vector(mapping, "scale", transform.scale.as_slice());
}

/// `type: Shape` with optional `appearance` and `geometry`.
pub fn encode_shape(ctx: &EncodeContext<'_>, mapping: &mut Mapping, node: &SgNode) {
    let Some(shape) = node.as_shape() else {
        return;
    };
    write_type(mapping, "Shape");

    if let Some(appearance) = encode_appearance(ctx, shape) {
        mapping.insert("appearance", appearance);
    }
    if let Some(geometry) = shape
        .mesh
        .as_deref()
        .and_then(|mesh| encode_geometry(ctx, mesh))
    {
        mapping.insert("geometry", geometry);
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Encode a mesh as a resource reference, a triangle mesh or a primitive.
///
/// Returns `None` when the mesh has no usable form.
pub fn encode_geometry(ctx: &EncodeContext<'_>, mesh: &SgMesh) -> Option<Mapping> {
    let mut geometry = Mapping::new();

    match mesh.uri().filter(|_| !ctx.embed_all_meshes) {
        Some(uri) => {
            geometry.write("type", "Resource");
            let uri = ctx.path_parameterizer.parameterize(uri);
            geometry.write_styled("uri", &uri, StringStyle::DoubleQuoted);
        }
        None => match *mesh.primitive() {
            MeshPrimitive::Mesh => {
                if !encode_triangle_mesh(ctx, &mut geometry, mesh) {
                    return None;
                }
            }
            MeshPrimitive::Box { size } => {
                geometry.write("type", "Box");
                write_vector(&mut geometry, "size", size.as_slice());
            }
            MeshPrimitive::Sphere { radius } => {
                geometry.write("type", "Sphere");
                geometry.write("radius", radius);
            }
            MeshPrimitive::Cylinder { radius, height } => {
                geometry.write("type", "Cylinder");
                geometry.write("radius", radius);
                geometry.write("height", height);
            }
            MeshPrimitive::Cone { radius, height } => {
                geometry.write("type", "Cone");
                geometry.write("radius", radius);
                geometry.write("height", height);
            }
            // Capsules are written with the Cone discriminator.
            MeshPrimitive::Capsule { radius, height } => {
                geometry.write("type", "Cone");
                geometry.write("radius", radius);
                geometry.write("height", height);
            }
            _ => {
                log::debug!(
                    "Skipping geometry with unsupported primitive {:?}",
                    mesh.primitive_type()
                );
                return None;
            }
        },
    }

    if mesh.crease_angle() > 0.0 {
        geometry.write("crease_angle", degree(f64::from(mesh.crease_angle())));
    }
    if mesh.is_solid() {
        geometry.write("solid", true);
    }

    Some(geometry)
}

/// `type: TriangleMesh` with flow-style `vertices` and `triangles`.
///
/// Returns false (and writes nothing) if the mesh lacks vertices or
/// triangles.
fn encode_triangle_mesh(ctx: &EncodeContext<'_>, geometry: &mut Mapping, mesh: &SgMesh) -> bool {
    let num_triangles = mesh.num_triangles();
    let vertices = match mesh.vertices() {
        Some(vertices) if !vertices.is_empty() && num_triangles > 0 => vertices,
        _ => {
            log::warn!(
                "Triangle mesh with {} vertices and {} triangles is not written",
                mesh.num_vertices(),
                num_triangles
            );
            return false;
        }
    };

    geometry.write("type", "TriangleMesh");

    let num_coordinates = vertices.len() * 3;
    let mut vertex_list = geometry.create_flow_listing();
    vertex_list.set_float_format(ctx.vertex_format);
    vertex_list.reserve(num_coordinates);
    for vertex in vertices {
        for &coordinate in vertex.iter() {
            vertex_list.append_wrapped(coordinate, VERTEX_VALUES_PER_ROW, num_coordinates);
        }
    }
    geometry.insert("vertices", vertex_list);

    let num_indices = num_triangles * 3;
    let mut index_list = geometry.create_flow_listing();
    index_list.reserve(num_indices);
    for &index in &mesh.triangle_vertices()[..num_indices] {
        index_list.append_wrapped(index, INDEX_VALUES_PER_ROW, num_indices);
    }
    geometry.insert("triangles", index_list);

    true
}

// ---------------------------------------------------------------------------
// Appearance
// ---------------------------------------------------------------------------

/// `{ material: ... }`, or `None` if the material would be empty.
pub fn encode_appearance(ctx: &EncodeContext<'_>, shape: &SgShape) -> Option<Mapping> {
    let material = encode_material(ctx, shape.material.as_deref()?)?;
    let mut appearance = Mapping::new();
    appearance.insert("material", material);
    Some(appearance)
}

/// Material fields that differ from the default material.
///
/// Returns `None` if every field equals the default.
pub fn encode_material(ctx: &EncodeContext<'_>, material: &SgMaterial) -> Option<Mapping> {
    let default = ctx.default_material;
    let mut mapping = Mapping::new();

    if material.diffuse_color != default.diffuse_color {
        write_vector(&mut mapping, "diffuse", material.diffuse_color.as_slice());
    }
    if material.emissive_color != default.emissive_color {
        write_vector(&mut mapping, "emissive", material.emissive_color.as_slice());
    }
    if material.specular_color != default.specular_color {
        write_vector(&mut mapping, "specular", material.specular_color.as_slice());
    }
    if material.shininess != default.shininess {
        mapping.write("shininess", material.shininess);
    }
    if material.transparency != default.transparency {
        mapping.write("transparency", material.transparency);
    }

    (!mapping.is_empty()).then_some(mapping)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The node type discriminator, rendered first in its mapping.
fn write_type(mapping: &mut Mapping, type_name: &str) {
    mapping.write_header("type", type_name);
}

/// A flow-style list of numbers in the mapping's float format.
fn write_vector<T: IntoScalar + Copy>(mapping: &mut Mapping, key: &str, values: &[T]) {
    let mut list = mapping.create_flow_listing();
    list.reserve(values.len());
    for &value in values {
        list.append(value);
    }
    mapping.insert(key, list);
}
