use bitflags::bitflags;
use uuid::Uuid;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct GeometryFeatures: u32 {
        const USE_MORPHING = 1 << 0;
    }
}

/// Shared vertex/index data referenced by mesh nodes.
///
/// Only identity and metadata are kept: the analyzer groups meshes by the
/// geometry they point at, and the generator references the geometry through
/// the node that owns it.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub uuid: Uuid,
    pub name: String,
    pub features: GeometryFeatures,
    /// Morph target names, in attribute order.
    pub morph_targets: Vec<String>,
}

impl Geometry {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            features: GeometryFeatures::empty(),
            morph_targets: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_morph_targets(mut self, names: &[&str]) -> Self {
        self.morph_targets = names.iter().map(|n| (*n).to_string()).collect();
        self.features.set(GeometryFeatures::USE_MORPHING, !self.morph_targets.is_empty());
        self
    }

    #[inline]
    #[must_use]
    pub fn has_morph_targets(&self) -> bool {
        self.features.contains(GeometryFeatures::USE_MORPHING)
    }
}
