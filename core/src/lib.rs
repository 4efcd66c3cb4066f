//! # Standard Scene Core
//!
//! Plain data types describing a robotics scene graph: grouping and
//! transform nodes, shapes with meshes or parametric primitives, and
//! materials. The types are built programmatically (or by a loader) and
//! consumed read-only by `stdscene-writer`.

pub mod material;
pub mod math;
pub mod mesh;
pub mod scene;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
