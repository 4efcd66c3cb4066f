//! Scene graph types.
//!
//! These types are format-agnostic and can be produced by any loader or
//! built programmatically.
//!
//! - [`SgNode`] - A node in the scene tree (name + kind payload)
//! - [`SgNodeKind`] - Kind-specific payload (group, transforms, shape, ...)
//! - [`NodeKind`] - Plain kind tag with base-kind information

mod types;

pub use types::{
    NodeKind, SgGroup, SgNode, SgNodeKind, SgPointSet, SgPosTransform, SgScaleTransform, SgShape,
    SgSwitchableGroup,
};
