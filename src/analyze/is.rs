//! Node classification predicates.
//!
//! Total functions over any node: unknown object types are neither groups
//! nor meshes and classify as primitive passthroughs.

use crate::scene::{Node, NodeKind};

#[inline]
#[must_use]
pub fn is_not_removed(node: &Node) -> bool {
    !node.removed
}

#[inline]
#[must_use]
pub fn is_group(node: &Node) -> bool {
    matches!(node.kind, NodeKind::Group)
}

#[inline]
#[must_use]
pub fn is_mesh(node: &Node) -> bool {
    matches!(node.kind, NodeKind::Mesh(_))
}

#[inline]
#[must_use]
pub fn is_bone(node: &Node) -> bool {
    matches!(node.kind, NodeKind::Bone)
}

/// A directional or spot light whose aim target is a separate node.
#[inline]
#[must_use]
pub fn is_targeted_light(node: &Node) -> bool {
    matches!(&node.kind, NodeKind::Light(light) if light.kind.supports_target() && light.target.is_some())
}

/// Nodes emitted as `<primitive object={...} />`, referencing the loaded
/// object instead of rebuilding it: bones and object types without an
/// intrinsic element.
#[inline]
#[must_use]
pub fn is_primitive(node: &Node) -> bool {
    matches!(node.kind, NodeKind::Bone | NodeKind::Primitive { .. })
}

/// How a node is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Group,
    Mesh,
    SkinnedMesh,
    Light,
    Camera,
    /// Passthrough of the loaded object: bones and unknown object types.
    Primitive,
}

#[must_use]
pub fn element_kind(node: &Node) -> ElementKind {
    match &node.kind {
        NodeKind::Group => ElementKind::Group,
        NodeKind::Mesh(mesh) if mesh.skinned => ElementKind::SkinnedMesh,
        NodeKind::Mesh(_) => ElementKind::Mesh,
        NodeKind::Light(_) => ElementKind::Light,
        NodeKind::Camera(_) => ElementKind::Camera,
        NodeKind::Bone | NodeKind::Primitive { .. } => ElementKind::Primitive,
    }
}
