//! Scene graph data types.

use std::sync::Arc;

use crate::material::SgMaterial;
use crate::math::{Rotation, Vec3, Vec3f};
use crate::mesh::SgMesh;

/// Plain tag identifying the concrete kind of a [`SgNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Group,
    SwitchableGroup,
    PosTransform,
    ScaleTransform,
    Shape,
    PointSet,
}

impl NodeKind {
    /// Every kind, in declaration order.
    pub const ALL: [NodeKind; 6] = [
        NodeKind::Group,
        NodeKind::SwitchableGroup,
        NodeKind::PosTransform,
        NodeKind::ScaleTransform,
        NodeKind::Shape,
        NodeKind::PointSet,
    ];

    /// Number of kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index in `0..COUNT`, usable for lookup tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The kind this kind specializes, if any.
    ///
    /// Switchable groups and transforms are groups; shapes and point sets
    /// are leaves without a more general kind.
    pub const fn base(self) -> Option<NodeKind> {
        match self {
            NodeKind::SwitchableGroup | NodeKind::PosTransform | NodeKind::ScaleTransform => {
                Some(NodeKind::Group)
            }
            NodeKind::Group | NodeKind::Shape | NodeKind::PointSet => None,
        }
    }
}

/// Child container shared by all group-like nodes.
#[derive(Debug, Clone, Default)]
pub struct SgGroup {
    /// Child nodes in document order.
    pub children: Vec<SgNode>,
}

/// A group whose children can be switched off as a whole.
#[derive(Debug, Clone)]
pub struct SgSwitchableGroup {
    pub group: SgGroup,
    pub turned_on: bool,
}

/// Rigid transform: rotation followed by translation.
#[derive(Debug, Clone)]
pub struct SgPosTransform {
    pub group: SgGroup,
    pub rotation: Rotation,
    pub translation: Vec3,
}

/// Per-axis scale.
#[derive(Debug, Clone)]
pub struct SgScaleTransform {
    pub group: SgGroup,
    pub scale: Vec3,
}

/// Visible geometry with an optional material.
///
/// Meshes and materials are shared between shapes through `Arc`.
#[derive(Debug, Clone, Default)]
pub struct SgShape {
    pub mesh: Option<Arc<SgMesh>>,
    pub material: Option<Arc<SgMaterial>>,
}

/// A cloud of points.
#[derive(Debug, Clone, Default)]
pub struct SgPointSet {
    pub vertices: Vec<Vec3f>,
    pub point_size: f64,
}

/// Kind-specific payload of a [`SgNode`].
#[derive(Debug, Clone)]
pub enum SgNodeKind {
    Group(SgGroup),
    SwitchableGroup(SgSwitchableGroup),
    PosTransform(SgPosTransform),
    ScaleTransform(SgScaleTransform),
    Shape(SgShape),
    PointSet(SgPointSet),
}

/// A node in a scene graph tree.
///
/// Nodes own their children, so a tree built from `SgNode` values is
/// acyclic by construction. Resources that are shared between nodes
/// (meshes, materials) are reference counted.
#[derive(Debug, Clone)]
pub struct SgNode {
    /// Node name, if any.
    pub name: Option<String>,
    /// Kind tag and kind-specific data.
    pub kind: SgNodeKind,
}

impl SgNode {
    /// Creates a node of the given kind without a name.
    pub fn new(kind: SgNodeKind) -> Self {
        Self { name: None, kind }
    }

    /// Creates an empty group.
    pub fn group() -> Self {
        Self::new(SgNodeKind::Group(SgGroup::default()))
    }

    /// Creates an empty switchable group.
    pub fn switchable_group(turned_on: bool) -> Self {
        Self::new(SgNodeKind::SwitchableGroup(SgSwitchableGroup {
            group: SgGroup::default(),
            turned_on,
        }))
    }

    /// Creates an empty rigid transform.
    pub fn pos_transform(rotation: Rotation, translation: Vec3) -> Self {
        Self::new(SgNodeKind::PosTransform(SgPosTransform {
            group: SgGroup::default(),
            rotation,
            translation,
        }))
    }

    /// Creates an empty scale transform.
    pub fn scale_transform(scale: Vec3) -> Self {
        Self::new(SgNodeKind::ScaleTransform(SgScaleTransform {
            group: SgGroup::default(),
            scale,
        }))
    }

    /// Creates a shape node.
    pub fn shape(mesh: Option<Arc<SgMesh>>, material: Option<Arc<SgMaterial>>) -> Self {
        Self::new(SgNodeKind::Shape(SgShape { mesh, material }))
    }

    /// Creates a point set node.
    pub fn point_set(vertices: Vec<Vec3f>) -> Self {
        Self::new(SgNodeKind::PointSet(SgPointSet {
            vertices,
            point_size: 0.0,
        }))
    }

    /// Set the node name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the child nodes.
    ///
    /// Ignored (with a warning) for leaf kinds.
    #[must_use]
    pub fn with_children(mut self, children: Vec<SgNode>) -> Self {
        match self.group_mut() {
            Some(group) => group.children = children,
            None => log::warn!(
                "{:?} node cannot hold children; {} dropped",
                self.kind_tag(),
                children.len()
            ),
        }
        self
    }

    /// Append one child node. See [`with_children`](Self::with_children).
    #[must_use]
    pub fn with_child(mut self, child: SgNode) -> Self {
        match self.group_mut() {
            Some(group) => group.children.push(child),
            None => log::warn!("{:?} node cannot hold children", self.kind_tag()),
        }
        self
    }

    /// Get the node name. Empty names are reported as `None`.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Get the kind tag.
    pub fn kind_tag(&self) -> NodeKind {
        match &self.kind {
            SgNodeKind::Group(_) => NodeKind::Group,
            SgNodeKind::SwitchableGroup(_) => NodeKind::SwitchableGroup,
            SgNodeKind::PosTransform(_) => NodeKind::PosTransform,
            SgNodeKind::ScaleTransform(_) => NodeKind::ScaleTransform,
            SgNodeKind::Shape(_) => NodeKind::Shape,
            SgNodeKind::PointSet(_) => NodeKind::PointSet,
        }
    }

    /// Get the child container of a group-like node.
    pub fn as_group(&self) -> Option<&SgGroup> {
        match &self.kind {
            SgNodeKind::Group(group) => Some(group),
            SgNodeKind::SwitchableGroup(s) => Some(&s.group),
            SgNodeKind::PosTransform(t) => Some(&t.group),
            SgNodeKind::ScaleTransform(t) => Some(&t.group),
            SgNodeKind::Shape(_) | SgNodeKind::PointSet(_) => None,
        }
    }

    fn group_mut(&mut self) -> Option<&mut SgGroup> {
        match &mut self.kind {
            SgNodeKind::Group(group) => Some(group),
            SgNodeKind::SwitchableGroup(s) => Some(&mut s.group),
            SgNodeKind::PosTransform(t) => Some(&mut t.group),
            SgNodeKind::ScaleTransform(t) => Some(&mut t.group),
            SgNodeKind::Shape(_) | SgNodeKind::PointSet(_) => None,
        }
    }

    /// Check whether this node can hold children.
    pub fn is_group_node(&self) -> bool {
        self.as_group().is_some()
    }

    /// Get the child nodes (empty for leaf kinds).
    pub fn children(&self) -> &[SgNode] {
        self.as_group().map_or(&[], |group| group.children.as_slice())
    }

    /// Count this node and all of its descendants.
    pub fn count_nodes(&self) -> usize {
        1 + self.children().iter().map(SgNode::count_nodes).sum::<usize>()
    }

    /// Get the transform data if this is a rigid transform.
    pub fn as_pos_transform(&self) -> Option<&SgPosTransform> {
        match &self.kind {
            SgNodeKind::PosTransform(t) => Some(t),
            _ => None,
        }
    }

    /// Get the scale data if this is a scale transform.
    pub fn as_scale_transform(&self) -> Option<&SgScaleTransform> {
        match &self.kind {
            SgNodeKind::ScaleTransform(t) => Some(t),
            _ => None,
        }
    }

    /// Get the shape data if this is a shape.
    pub fn as_shape(&self) -> Option<&SgShape> {
        match &self.kind {
            SgNodeKind::Shape(shape) => Some(shape),
            _ => None,
        }
    }
}
