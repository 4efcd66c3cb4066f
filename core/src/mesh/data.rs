//! Scene mesh data.
//!
//! This module provides:
//! - [`MeshPrimitive`] - The parametric shape a mesh was built from, if any
//! - [`PrimitiveType`] - Plain tag for [`MeshPrimitive`]
//! - [`SgMesh`] - Geometry of a shape: optional resource URI, vertex and
//!   triangle data, crease angle and solid flag

use crate::math::{Vec3, Vec3f};

/// Parametric description of a mesh.
///
/// A mesh built from a primitive usually also carries generated triangle
/// data, but writers are free to emit the primitive parameters instead.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[non_exhaustive]
pub enum MeshPrimitive {
    /// Free-form triangle mesh.
    #[default]
    Mesh,
    /// Axis-aligned box with full edge lengths.
    Box { size: Vec3 },
    /// Sphere.
    Sphere { radius: f64 },
    /// Cylinder along the Y axis.
    Cylinder { radius: f64, height: f64 },
    /// Cone along the Y axis.
    Cone { radius: f64, height: f64 },
    /// Capsule along the Y axis. `height` is the length of the cylindrical part.
    Capsule { radius: f64, height: f64 },
    /// Torus in the XZ plane.
    Torus {
        radius: f64,
        cross_section_radius: f64,
    },
}

/// Primitive kind without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Mesh,
    Box,
    Sphere,
    Cylinder,
    Cone,
    Capsule,
    Torus,
}

impl MeshPrimitive {
    /// Get the parameterless kind of this primitive.
    pub fn primitive_type(&self) -> PrimitiveType {
        match self {
            Self::Mesh => PrimitiveType::Mesh,
            Self::Box { .. } => PrimitiveType::Box,
            Self::Sphere { .. } => PrimitiveType::Sphere,
            Self::Cylinder { .. } => PrimitiveType::Cylinder,
            Self::Cone { .. } => PrimitiveType::Cone,
            Self::Capsule { .. } => PrimitiveType::Capsule,
            Self::Torus { .. } => PrimitiveType::Torus,
        }
    }
}

/// Geometry attached to a shape node.
///
/// A mesh may reference an external resource through [`uri`](Self::uri)
/// (the file it was loaded from) while also holding the loaded vertex and
/// triangle data. Triangles are stored as a flat list of vertex indices,
/// three per triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SgMesh {
    uri: Option<String>,
    primitive: MeshPrimitive,
    vertices: Option<Vec<Vec3f>>,
    triangle_vertices: Vec<u32>,
    crease_angle: f32,
    solid: bool,
}

impl SgMesh {
    /// Create an empty free-form mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh describing a box with the given edge lengths.
    pub fn box_primitive(size: Vec3) -> Self {
        Self::new().with_primitive(MeshPrimitive::Box { size })
    }

    /// Create a mesh describing a sphere.
    pub fn sphere(radius: f64) -> Self {
        Self::new().with_primitive(MeshPrimitive::Sphere { radius })
    }

    /// Create a mesh describing a cylinder.
    pub fn cylinder(radius: f64, height: f64) -> Self {
        Self::new().with_primitive(MeshPrimitive::Cylinder { radius, height })
    }

    /// Create a mesh describing a cone.
    pub fn cone(radius: f64, height: f64) -> Self {
        Self::new().with_primitive(MeshPrimitive::Cone { radius, height })
    }

    /// Create a mesh describing a capsule.
    pub fn capsule(radius: f64, height: f64) -> Self {
        Self::new().with_primitive(MeshPrimitive::Capsule { radius, height })
    }

    /// Create a mesh describing a torus.
    pub fn torus(radius: f64, cross_section_radius: f64) -> Self {
        Self::new().with_primitive(MeshPrimitive::Torus {
            radius,
            cross_section_radius,
        })
    }

    /// Set the primitive description.
    #[must_use]
    pub fn with_primitive(mut self, primitive: MeshPrimitive) -> Self {
        self.primitive = primitive;
        self
    }

    /// Set the external resource URI.
    #[must_use]
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the vertex positions.
    #[must_use]
    pub fn with_vertices(mut self, vertices: Vec<Vec3f>) -> Self {
        self.vertices = Some(vertices);
        self
    }

    /// Set the triangles as vertex index triples.
    #[must_use]
    pub fn with_triangles(mut self, triangles: &[[u32; 3]]) -> Self {
        self.triangle_vertices = triangles.iter().flatten().copied().collect();
        self
    }

    /// Set the crease angle in radians.
    #[must_use]
    pub fn with_crease_angle(mut self, crease_angle: f32) -> Self {
        self.crease_angle = crease_angle;
        self
    }

    /// Set the solid flag (back faces may be culled).
    #[must_use]
    pub fn with_solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    /// Get the external resource URI. Empty URIs are reported as `None`.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref().filter(|uri| !uri.is_empty())
    }

    /// Get the primitive description.
    pub fn primitive(&self) -> &MeshPrimitive {
        &self.primitive
    }

    /// Get the primitive kind.
    pub fn primitive_type(&self) -> PrimitiveType {
        self.primitive.primitive_type()
    }

    /// Check whether the mesh holds at least one vertex.
    pub fn has_vertices(&self) -> bool {
        self.vertices.as_ref().is_some_and(|v| !v.is_empty())
    }

    /// Get the vertex positions, if any were set.
    pub fn vertices(&self) -> Option<&[Vec3f]> {
        self.vertices.as_deref()
    }

    /// Get the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.as_ref().map_or(0, Vec::len)
    }

    /// Get the flat triangle index list.
    pub fn triangle_vertices(&self) -> &[u32] {
        &self.triangle_vertices
    }

    /// Get the number of complete triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangle_vertices.len() / 3
    }

    /// Get the vertex indices of triangle `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_triangles()`.
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        let i = index * 3;
        [
            self.triangle_vertices[i],
            self.triangle_vertices[i + 1],
            self.triangle_vertices[i + 2],
        ]
    }

    /// Get the crease angle in radians.
    pub fn crease_angle(&self) -> f32 {
        self.crease_angle
    }

    /// Check the solid flag.
    pub fn is_solid(&self) -> bool {
        self.solid
    }
}
