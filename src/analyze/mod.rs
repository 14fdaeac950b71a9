//! Scene analysis
//!
//! Turns a loaded [`Scene`](crate::scene::Scene) into the pruned graph the
//! code generator walks:
//! - `is`: node classification predicates
//! - `naming`: identifier sanitizing and loaded-object accessors
//! - `props`: per-node property sets with rounding and symbolic angles
//! - `prune`: pluggable strategies deciding which nodes are redundant
//! - `analyzed`: duplicate tables, prune passes and compaction

pub mod analyzed;
pub mod is;
pub mod naming;
pub mod props;
pub mod prune;

pub use analyzed::{AnalyzedScene, DuplicateGeometry, MAX_PRUNE_PASSES, ObjectInfo};
pub use naming::GeometrySignature;
pub use props::{PropValue, Props, SymbolicAngle, calculate_props, format_number, round_angle, round_number};
pub use prune::{EmptyGroup, GeometrylessMesh, PassthroughGroup, PruneStrategy, all_prune_strategies};
