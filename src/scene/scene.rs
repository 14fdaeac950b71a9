use serde_json::{Map, Value};
use slotmap::SlotMap;

use crate::animation::AnimationClip;
use crate::resources::{Geometry, Material};
use crate::scene::node::{Node, NodeKind};
use crate::scene::{GeometryKey, MaterialKey, NodeHandle};

/// Scene graph container
///
/// Owns every node in an arena addressed by [`NodeHandle`]s. Parent links are
/// plain handles, so upward walks during compaction never fight the borrow
/// checker. Geometries and materials live in their own pools and are shared by
/// handle between mesh nodes.
#[derive(Debug, Clone)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub(crate) root: NodeHandle,

    // ==== Resource pools ====
    pub geometries: SlotMap<GeometryKey, Geometry>,
    pub materials: SlotMap<MaterialKey, Material>,
    pub animations: Vec<AnimationClip>,

    /// `asset.extras` of the source file (author, license, ...).
    pub extras: Map<String, Value>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::group("Scene"));
        Self {
            nodes,
            root,
            geometries: SlotMap::with_key(),
            materials: SlotMap::with_key(),
            animations: Vec::new(),
            extras: Map::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    /// True when the root handle still refers to a live node.
    #[must_use]
    pub fn has_root(&self) -> bool {
        self.nodes.contains_key(self.root)
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    /// Inserts a node without attaching it anywhere.
    pub fn create_node(&mut self, node: Node) -> NodeHandle {
        self.nodes.insert(node)
    }

    /// Adds a node under the scene root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let root = self.root;
        self.add_to_parent(node, root)
    }

    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);
        self.attach(handle, parent);
        handle
    }

    /// Points a directional or spot light at `target`.
    pub fn set_light_target(&mut self, light: NodeHandle, target: NodeHandle) -> bool {
        match self.nodes.get_mut(light).map(|n| &mut n.kind) {
            Some(NodeKind::Light(l)) if l.kind.supports_target() => {
                l.target = Some(target);
                true
            }
            _ => false,
        }
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Moves `child` to the end of `parent`'s children.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        let index = self.nodes.get(parent).map_or(0, |p| p.children.len());
        self.insert_child(child, parent, index);
    }

    /// Moves `child` into `parent`'s children at `index` (clamped).
    pub fn insert_child(&mut self, child: NodeHandle, parent: NodeHandle, index: usize) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            log::error!("Node not found during attach!");
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("Cannot attach node below its own descendant!");
            return;
        }

        // 1. Detach from old parent, keeping the target index stable when
        //    the child moves within the same parent.
        let mut index = index;
        if let Some(old) = self.nodes[child].parent
            && let Some(pos) = self.nodes[old].children.iter().position(|&x| x == child)
        {
            self.nodes[old].children.remove(pos);
            if old == parent && pos < index {
                index -= 1;
            }
        }

        // 2. Attach to new
        let siblings = &mut self.nodes[parent].children;
        let index = index.min(siblings.len());
        siblings.insert(index, child);

        self.nodes[child].parent = Some(parent);
    }

    /// Unlinks `child` from its parent. The node stays in the arena.
    pub fn detach(&mut self, child: NodeHandle) {
        let Some(parent) = self.nodes.get(child).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent)
            && let Some(pos) = p.children.iter().position(|&x| x == child)
        {
            p.children.remove(pos);
        }
        self.nodes[child].parent = None;
    }

    /// True when `ancestor` lies on the parent chain of `node`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(|n| n.parent);
        }
        false
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// Depth-first pre-order walk starting at `start` (inclusive).
    #[must_use]
    pub fn traverse(&self, start: NodeHandle) -> Vec<NodeHandle> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![start];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            order.push(handle);
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    /// Nodes reachable from the root, in pre-order.
    #[must_use]
    pub fn descendants(&self) -> Vec<NodeHandle> {
        self.traverse(self.root)
    }

    // ========================================================================
    // Resource pools
    // ========================================================================

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryKey {
        self.geometries.insert(geometry)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialKey {
        self.materials.insert(material)
    }

    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.push(clip);
    }

    #[inline]
    #[must_use]
    pub fn geometry(&self, key: GeometryKey) -> Option<&Geometry> {
        self.geometries.get(key)
    }

    #[inline]
    #[must_use]
    pub fn material(&self, key: MaterialKey) -> Option<&Material> {
        self.materials.get(key)
    }
}
