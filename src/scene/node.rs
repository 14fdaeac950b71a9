use serde_json::{Map, Value};
use smallvec::SmallVec;

use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::transform::Transform;
use crate::scene::{GeometryKey, MaterialKey, NodeHandle};

/// Mesh payload: shared geometry and material references.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub geometry: Option<GeometryKey>,
    /// One material for regular meshes, several for multi-material meshes.
    pub materials: SmallVec<[MaterialKey; 1]>,
    /// Skinned meshes bind a skeleton and are emitted as `<skinnedMesh>`.
    pub skinned: bool,
}

impl MeshData {
    #[must_use]
    pub fn new(geometry: GeometryKey, material: MaterialKey) -> Self {
        let mut materials = SmallVec::new();
        materials.push(material);
        Self {
            geometry: Some(geometry),
            materials,
            skinned: false,
        }
    }
}

/// What a node represents. Unknown object types loaded from the source file
/// end up as [`NodeKind::Primitive`] and are passed through untouched.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Group,
    Mesh(MeshData),
    Bone,
    Light(Light),
    Camera(Camera),
    Primitive { type_name: String },
}

impl NodeKind {
    /// three.js class name of the object, used for typed shape fields.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Group => "Group",
            Self::Mesh(mesh) if mesh.skinned => "SkinnedMesh",
            Self::Mesh(_) => "Mesh",
            Self::Bone => "Bone",
            Self::Light(light) => light.kind.class_name(),
            Self::Camera(camera) => camera.element_name(),
            Self::Primitive { type_name } => type_name,
        }
    }
}

/// A scene graph node.
///
/// # Hierarchy
///
/// - `parent`: handle to the parent node (None for the root and for detached nodes)
/// - `children`: ordered child handles
///
/// # Removal tag
///
/// Pruning only sets `removed`; the node stays in the graph until
/// compaction reparents its children and detaches it.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,

    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub transform: Transform,

    // === Object flags ===
    pub visible: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub frustum_culled: bool,
    pub render_order: i32,
    pub user_data: Map<String, Value>,

    pub(crate) removed: bool,
}

impl Node {
    #[must_use]
    pub fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
            cast_shadow: false,
            receive_shadow: false,
            frustum_culled: true,
            render_order: 0,
            user_data: Map::new(),
            removed: false,
        }
    }

    #[must_use]
    pub fn group(name: &str) -> Self {
        Self::new(name, NodeKind::Group)
    }

    #[must_use]
    pub fn mesh(name: &str, mesh: MeshData) -> Self {
        Self::new(name, NodeKind::Mesh(mesh))
    }

    #[must_use]
    pub fn bone(name: &str) -> Self {
        Self::new(name, NodeKind::Bone)
    }

    #[must_use]
    pub fn light(name: &str, light: Light) -> Self {
        Self::new(name, NodeKind::Light(light))
    }

    #[must_use]
    pub fn camera(name: &str, camera: Camera) -> Self {
        Self::new(name, NodeKind::Camera(camera))
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    #[inline]
    #[must_use]
    pub fn mesh_data(&self) -> Option<&MeshData> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn light_data(&self) -> Option<&Light> {
        match &self.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }
}
