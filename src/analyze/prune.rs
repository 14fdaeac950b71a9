//! Prune strategies
//!
//! Each strategy decides whether a node is structurally redundant. The
//! analyzer evaluates them in list order and stops at the first match, so a
//! node is removed by exactly one strategy. New strategies are appended to the
//! list handed to [`AnalyzedScene::with_strategies`].
//!
//! Strategies only ever mark nodes whose removal is visually neutral:
//! - `EmptyGroup`: a group without children contributes nothing.
//! - `GeometrylessMesh`: a childless mesh without geometry draws nothing.
//! - `PassthroughGroup`: a group with no props (identity transform, default
//!   flags, no name) can hand its children to its parent unchanged.

use crate::analyze::analyzed::AnalyzedScene;
use crate::analyze::is::{is_group, is_mesh};
use crate::analyze::props::Props;
use crate::scene::NodeHandle;

/// Predicate deciding whether a node can be removed.
pub trait PruneStrategy {
    /// Short name used in debug logs.
    fn name(&self) -> &'static str;

    /// Returns `true` when `node` is now removable.
    fn prune(&self, analyzed: &AnalyzedScene, node: NodeHandle, props: &Props) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyGroup;

impl PruneStrategy for EmptyGroup {
    fn name(&self) -> &'static str {
        "empty-group"
    }

    fn prune(&self, analyzed: &AnalyzedScene, node: NodeHandle, _props: &Props) -> bool {
        analyzed
            .scene()
            .get_node(node)
            .is_some_and(|n| is_group(n) && n.children().is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GeometrylessMesh;

impl PruneStrategy for GeometrylessMesh {
    fn name(&self) -> &'static str {
        "geometryless-mesh"
    }

    fn prune(&self, analyzed: &AnalyzedScene, node: NodeHandle, _props: &Props) -> bool {
        analyzed.scene().get_node(node).is_some_and(|n| {
            is_mesh(n)
                && n.children().is_empty()
                && n.mesh_data().is_some_and(|mesh| mesh.geometry.is_none())
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughGroup;

impl PruneStrategy for PassthroughGroup {
    fn name(&self) -> &'static str {
        "passthrough-group"
    }

    fn prune(&self, analyzed: &AnalyzedScene, node: NodeHandle, props: &Props) -> bool {
        props.is_empty() && analyzed.scene().get_node(node).is_some_and(is_group)
    }
}

/// Built-in strategies in evaluation order.
#[must_use]
pub fn all_prune_strategies() -> Vec<Box<dyn PruneStrategy>> {
    vec![
        Box::new(EmptyGroup),
        Box::new(GeometrylessMesh),
        Box::new(PassthroughGroup),
    ]
}
