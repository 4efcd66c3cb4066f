//! Node kind to encoder dispatch.

use std::fmt;

use stdscene_core::scene::{NodeKind, SgNode};
use stdscene_document::Mapping;

use crate::encode::{self, EncodeContext};

/// Encoder for the kind-specific fields of a node.
pub type EncodeFn = fn(&EncodeContext<'_>, &mut Mapping, &SgNode);

/// Table of encoders indexed by [`NodeKind`].
///
/// A kind without its own encoder uses the encoder of the nearest base
/// kind (see [`NodeKind::base`]); kinds with no registered ancestor are not
/// encoded at all.
#[derive(Clone)]
pub struct NodeDispatcher {
    table: [Option<EncodeFn>; NodeKind::COUNT],
}

impl NodeDispatcher {
    /// Dispatcher with the standard encoders for groups, transforms and shapes.
    pub fn new() -> Self {
        Self::empty()
            .with_encoder(NodeKind::Group, encode::encode_group)
            .with_encoder(NodeKind::PosTransform, encode::encode_pos_transform)
            .with_encoder(NodeKind::ScaleTransform, encode::encode_scale_transform)
            .with_encoder(NodeKind::Shape, encode::encode_shape)
    }

    /// Dispatcher without encoders.
    pub fn empty() -> Self {
        Self {
            table: [None; NodeKind::COUNT],
        }
    }

    /// Register the encoder of `kind`, replacing any previous one.
    #[must_use]
    pub fn with_encoder(mut self, kind: NodeKind, encoder: EncodeFn) -> Self {
        self.table[kind.index()] = Some(encoder);
        self
    }

    /// Whether `kind` has its own encoder (base kinds are not consulted).
    pub fn is_registered(&self, kind: NodeKind) -> bool {
        self.table[kind.index()].is_some()
    }

    /// The encoder used for `kind`, following base kinds.
    pub fn resolve(&self, kind: NodeKind) -> Option<EncodeFn> {
        let mut current = Some(kind);
        while let Some(kind) = current {
            if let Some(encoder) = self.table[kind.index()] {
                return Some(encoder);
            }
            current = kind.base();
        }
        None
    }

    /// Run the encoder for `node`. Returns whether one ran.
    pub fn dispatch(&self, ctx: &EncodeContext<'_>, mapping: &mut Mapping, node: &SgNode) -> bool {
        match self.resolve(node.kind_tag()) {
            Some(encoder) => {
                encoder(ctx, mapping, node);
                true
            }
            None => false,
        }
    }
}

impl Default for NodeDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NodeDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered: Vec<NodeKind> = NodeKind::ALL
            .into_iter()
            .filter(|kind| self.is_registered(*kind))
            .collect();
        f.debug_struct("NodeDispatcher")
            .field("registered", &registered)
            .finish()
    }
}
