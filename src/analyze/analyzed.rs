use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashSet};

use crate::analyze::is::{is_bone, is_mesh, is_not_removed, is_targeted_light};
use crate::analyze::naming::{GeometrySignature, mesh_key, node_name, sanitize_mesh_name};
use crate::analyze::props::{Props, calculate_props};
use crate::analyze::prune::{PruneStrategy, all_prune_strategies};
use crate::errors::{JsxError, Result};
use crate::options::AnalyzeOptions;
use crate::scene::{MaterialKey, Node, NodeHandle, NodeKind, Scene};

/// Upper bound on prune passes when iterating to a fixpoint.
pub const MAX_PRUNE_PASSES: usize = 16;

/// A geometry shared by one or more mesh nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGeometry {
    /// Number of mesh nodes rendering this geometry/material pair.
    pub count: usize,
    /// Unique name of the shared instance (`instances.<name>`).
    pub name: String,
    /// Accessor of the first node that uses it, e.g. `nodes.Wheel`.
    pub node: String,
}

/// Derived per-node view used by the prop calculator and the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    /// Accessor of the loaded object, e.g. `nodes.Helmet`.
    pub node: String,
    /// Rendered through a shared instance instead of its own element.
    pub instanced: bool,
    /// The scene has animation clips.
    pub animated: bool,
}

fn describe(node: &Node) -> String {
    format!("{} '{}'", node.kind.type_name(), node.name)
}

/// Analyzed scene: duplicate registries plus the pruned graph.
///
/// Construction runs the whole analysis once:
/// 1. collect every node (pre-order) for compaction,
/// 2. build geometry/material duplicate tables,
/// 3. drop geometries that occur once (unless instancing everything),
/// 4. prune and compact, twice unless `keep_groups` is set.
///
/// The analyzer owns the scene for the duration of the run; take it back
/// with [`AnalyzedScene::into_scene`].
pub struct AnalyzedScene {
    scene: Scene,
    options: AnalyzeOptions,

    /// All nodes of the scene, in traversal order at construction time.
    objects: Vec<NodeHandle>,

    dup_geometries: IndexMap<GeometrySignature, DuplicateGeometry, FxBuildHasher>,
    dup_materials: IndexMap<String, usize, FxBuildHasher>,

    /// Nodes aimed at by targeted lights; never pruned.
    light_targets: FxHashSet<NodeHandle>,
    /// Lights aiming at a target node.
    targeted_lights: Vec<NodeHandle>,

    strategies: Vec<Box<dyn PruneStrategy>>,
    prune_passes: usize,
}

impl AnalyzedScene {
    /// Analyzes `scene` with the built-in prune strategies.
    pub fn new(scene: Scene, options: AnalyzeOptions) -> Result<Self> {
        Self::with_strategies(scene, options, all_prune_strategies())
    }

    /// Analyzes `scene` with a custom, ordered list of prune strategies.
    pub fn with_strategies(
        scene: Scene,
        options: AnalyzeOptions,
        strategies: Vec<Box<dyn PruneStrategy>>,
    ) -> Result<Self> {
        if !scene.has_root() {
            return Err(JsxError::MissingRoot);
        }

        let objects = scene.descendants();
        let targeted_lights: Vec<NodeHandle> = objects
            .iter()
            .copied()
            .filter(|&h| is_targeted_light(&scene.nodes[h]))
            .collect();
        let light_targets = targeted_lights
            .iter()
            .filter_map(|&h| scene.nodes[h].light_data().and_then(|light| light.target))
            .collect();

        let mut analyzed = Self {
            scene,
            options,
            objects,
            dup_geometries: IndexMap::default(),
            dup_materials: IndexMap::default(),
            light_targets,
            targeted_lights,
            strategies,
            prune_passes: 0,
        };

        analyzed.collect_duplicates();
        analyzed.prune_duplicates();
        analyzed.prune_all_strategies();

        Ok(analyzed)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    #[must_use]
    pub fn options(&self) -> &AnalyzeOptions {
        &self.options
    }

    /// Every node collected at construction, in traversal order.
    #[inline]
    #[must_use]
    pub fn objects(&self) -> &[NodeHandle] {
        &self.objects
    }

    /// Returns the scene, consuming the analysis.
    #[must_use]
    pub fn into_scene(self) -> Scene {
        self.scene
    }

    #[must_use]
    pub fn has_animations(&self) -> bool {
        !self.scene.animations.is_empty()
    }

    #[must_use]
    pub fn has_instances(&self) -> bool {
        self.options.instancing() && !self.dup_geometries.is_empty()
    }

    #[must_use]
    pub fn duplicate_geometries(&self) -> &IndexMap<GeometrySignature, DuplicateGeometry, FxBuildHasher> {
        &self.dup_geometries
    }

    #[must_use]
    pub fn duplicate_geometry_values(&self) -> Vec<&DuplicateGeometry> {
        self.dup_geometries.values().collect()
    }

    #[must_use]
    pub fn duplicate_materials(&self) -> &IndexMap<String, usize, FxBuildHasher> {
        &self.dup_materials
    }

    /// Number of prune + compact passes executed.
    #[inline]
    #[must_use]
    pub fn prune_passes(&self) -> usize {
        self.prune_passes
    }

    #[must_use]
    pub fn is_light_target(&self, handle: NodeHandle) -> bool {
        self.light_targets.contains(&handle)
    }

    /// Target emitted inside `light` as `<primitive object={light.target} />`.
    ///
    /// Only childless targets outside the light's ancestor chain are nested.
    /// Any other target stays at its own position in the tree.
    #[must_use]
    pub fn nested_target(&self, light: NodeHandle) -> Option<NodeHandle> {
        let node = self.scene.get_node(light)?;
        if node.removed || !is_targeted_light(node) {
            return None;
        }
        let target = node.light_data()?.target?;
        let target_node = self.scene.get_node(target)?;
        let nested =
            target != light && target_node.children.is_empty() && !self.scene.is_ancestor(target, light);
        nested.then_some(target)
    }

    /// True when `handle` is emitted by a light instead of at its own position.
    #[must_use]
    pub fn is_nested_target(&self, handle: NodeHandle) -> bool {
        self.is_light_target(handle)
            && self
                .targeted_lights
                .iter()
                .any(|&light| self.nested_target(light) == Some(handle))
    }

    /// Shared instance record of a mesh node, if it has one.
    #[must_use]
    pub fn duplicate_of(&self, handle: NodeHandle) -> Option<&DuplicateGeometry> {
        let node = self.scene.get_node(handle)?;
        self.dup_geometries.get(&mesh_key(&self.scene, node)?)
    }

    pub fn get_info(&self, handle: NodeHandle) -> Result<ObjectInfo> {
        let node = self.scene.get_node(handle).ok_or(JsxError::NodeNotFound(handle))?;
        let threshold = usize::from(!self.options.instance_all);
        let instanced = self.options.instancing()
            && node
                .mesh_data()
                .is_some_and(|mesh| mesh.geometry.is_some() && !mesh.materials.is_empty())
            && self.duplicate_of(handle).is_some_and(|dup| dup.count > threshold);

        Ok(ObjectInfo {
            node: node_name(node),
            instanced,
            animated: self.has_animations(),
        })
    }

    pub fn calculate_props(&self, handle: NodeHandle) -> Result<Props> {
        calculate_props(self, handle)
    }

    /// Live nodes reachable from the root, in pre-order.
    #[must_use]
    pub fn live_nodes(&self) -> Vec<NodeHandle> {
        self.scene
            .descendants()
            .into_iter()
            .filter(|&h| self.scene.get_node(h).is_some_and(is_not_removed))
            .collect()
    }

    fn live_matching(&self, predicate: impl Fn(&Node) -> bool) -> Vec<NodeHandle> {
        self.live_nodes()
            .into_iter()
            .filter(|&h| predicate(&self.scene.nodes[h]))
            .collect()
    }

    #[must_use]
    pub fn meshes(&self) -> Vec<NodeHandle> {
        self.live_matching(is_mesh)
    }

    #[must_use]
    pub fn bones(&self) -> Vec<NodeHandle> {
        self.live_matching(is_bone)
    }

    /// Live nodes of object types without an intrinsic element.
    #[must_use]
    pub fn primitives(&self) -> Vec<NodeHandle> {
        self.live_matching(|n| matches!(n.kind, NodeKind::Primitive { .. }))
    }

    /// Named materials used by live meshes, each once, in first-use order.
    #[must_use]
    pub fn materials(&self) -> Vec<MaterialKey> {
        let mut seen = FxHashSet::default();
        self.meshes()
            .into_iter()
            .filter_map(|h| self.scene.nodes[h].mesh_data())
            .flat_map(|mesh| mesh.materials.iter().copied())
            .filter(|&key| self.scene.material(key).is_some_and(|m| !m.name.is_empty()) && seen.insert(key))
            .collect()
    }

    /// True when any live node matches `predicate`.
    pub fn includes(&self, predicate: impl Fn(&Node) -> bool) -> bool {
        self.live_nodes().into_iter().any(|h| predicate(&self.scene.nodes[h]))
    }

    // ========================================================================
    // Duplicate detection
    // ========================================================================

    fn unique_name(&self, attempt: &str) -> String {
        (0..)
            .map(|index| if index > 0 { format!("{attempt}{index}") } else { attempt.to_string() })
            .find(|candidate| !self.dup_geometries.values().any(|dup| &dup.name == candidate))
            .unwrap_or_else(|| attempt.to_string())
    }

    fn collect_duplicates(&mut self) {
        for handle in self.scene.descendants() {
            let node = &self.scene.nodes[handle];
            let NodeKind::Mesh(mesh) = &node.kind else {
                continue;
            };

            for &key in &mesh.materials {
                if let Some(material) = self.scene.material(key)
                    && !material.name.is_empty()
                {
                    *self.dup_materials.entry(material.name.clone()).or_insert(0) += 1;
                }
            }

            let Some(key) = mesh_key(&self.scene, node) else {
                continue;
            };
            if let Some(duplicate) = self.dup_geometries.get_mut(&key) {
                duplicate.count += 1;
            } else {
                let name = self.unique_name(&sanitize_mesh_name(node));
                let duplicate = DuplicateGeometry {
                    count: 1,
                    name,
                    node: node_name(node),
                };
                self.dup_geometries.insert(key, duplicate);
            }
        }
    }

    fn prune_duplicates(&mut self) {
        if self.options.instance_all {
            return;
        }
        // A geometry used once is not worth sharing
        self.dup_geometries.retain(|_, duplicate| {
            let keep = duplicate.count > 1;
            if !keep {
                log::debug!("Deleted duplicate geometry: {}", duplicate.name);
            }
            keep
        });
    }

    // ========================================================================
    // Pruning
    // ========================================================================

    /// Post-order walk marking removable nodes. Returns the number of nodes
    /// marked during this visit.
    pub fn visit_and_prune(&mut self, handle: NodeHandle) -> Result<usize> {
        let node = self.scene.get_node(handle).ok_or(JsxError::NodeNotFound(handle))?;
        let children = node.children.clone();

        // A removed node only gives its descendants a chance
        if node.removed {
            let mut removed = 0;
            for child in children {
                removed += self.visit_and_prune(child)?;
            }
            return Ok(removed);
        }

        // Bones emitted as a single primitive carry their whole subtree
        if is_bone(node) && !self.options.bones {
            return Ok(0);
        }

        let mut removed = 0;
        for child in children {
            removed += self.visit_and_prune(child)?;
        }

        if self.is_exempt(handle) {
            return Ok(removed);
        }
        if self.prune(handle)? {
            removed += 1;
        }
        Ok(removed)
    }

    fn is_exempt(&self, handle: NodeHandle) -> bool {
        handle == self.scene.root()
            || self.light_targets.contains(&handle)
            || (self.options.bones && self.scene.get_node(handle).is_some_and(is_bone))
    }

    fn prune(&mut self, handle: NodeHandle) -> Result<bool> {
        let props = self.calculate_props(handle)?;

        let Some(strategy) = self.strategies.iter().find(|s| s.prune(self, handle, &props)) else {
            return Ok(false);
        };
        log::debug!("Pruned ({}): {}", strategy.name(), describe(&self.scene.nodes[handle]));

        self.scene.nodes[handle].removed = true;
        Ok(true)
    }

    /// Rewrites the graph after a prune pass: children of removed nodes move
    /// to their nearest surviving ancestor, then removed nodes are detached.
    pub fn compact(&mut self) -> Result<()> {
        let root = self.scene.root();

        // 1. Reparent first, so chains of removed ancestors hand their
        //    descendants to the first survivor.
        for &handle in &self.objects {
            let node = self.scene.get_node(handle).ok_or(JsxError::NodeNotFound(handle))?;
            if !node.removed || node.children.is_empty() {
                continue;
            }
            let children = node.children.clone();

            let mut parent = node.parent;
            while let Some(p) = parent
                && self.scene.get_node(p).is_some_and(|n| n.removed)
            {
                parent = self.scene.nodes[p].parent;
            }
            let parent = parent.unwrap_or(root);

            let siblings = &self.scene.nodes[parent].children;
            let mut index = siblings.iter().position(|&c| c == handle).unwrap_or(siblings.len());
            for child in children {
                self.scene.insert_child(child, parent, index);
                index += 1;
            }
        }

        // 2. Detach removed nodes
        for &handle in &self.objects {
            if self.scene.get_node(handle).is_some_and(|n| n.removed) {
                self.scene.detach(handle);
            }
        }
        Ok(())
    }

    fn prune_pass(&mut self) -> Result<usize> {
        let removed = self.visit_and_prune(self.scene.root())?;
        self.compact()?;
        self.prune_passes += 1;
        log::info!("Prune pass {}: removed {removed} node(s)", self.prune_passes);
        Ok(removed)
    }

    fn run_prune_passes(&mut self) -> Result<()> {
        if self.options.keep_groups {
            self.prune_pass()?;
            return Ok(());
        }

        // Dry run, then a second pass for nodes the first compaction exposed
        self.prune_pass()?;
        let mut removed = self.prune_pass()?;

        while self.options.prune_to_fixpoint && removed > 0 && self.prune_passes < MAX_PRUNE_PASSES {
            removed = self.prune_pass()?;
        }
        Ok(())
    }

    fn prune_all_strategies(&mut self) {
        // Partial pruning still yields a usable graph
        if let Err(e) = self.run_prune_passes() {
            log::error!("Error during pruning: {e}");
        }
    }
}
