//! Scene mesh types and generators.
//!
//! - [`SgMesh`] - Shape geometry (resource URI, vertices, triangles, flags)
//! - [`MeshPrimitive`] / [`PrimitiveType`] - Parametric shape descriptions
//! - Generators for common shapes (box, sphere)

mod data;
pub mod generators;

pub use data::{MeshPrimitive, PrimitiveType, SgMesh};
