//! Scene graph module
//!
//! In-memory scene graph handed to the analyzer by an external loader:
//! - Node: scene node (hierarchy, transform, kind payload, removal tag)
//! - Transform: position / Euler rotation / scale triples
//! - Scene: node arena plus geometry, material and animation pools
//! - Camera / Light: kind payloads for camera and light nodes

pub mod camera;
pub mod light;
pub mod node;
pub mod scene;
pub mod transform;

pub use camera::{Camera, ProjectionType};
pub use light::{Light, LightKind};
pub use node::{MeshData, Node, NodeKind};
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct GeometryKey;
    pub struct MaterialKey;
}
