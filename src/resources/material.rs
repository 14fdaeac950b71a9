use uuid::Uuid;

/// Material reference data.
///
/// Materials are referenced by name from the generated component
/// (`materials.Name`), so the name and three.js class are all that matters
/// here.
#[derive(Debug, Clone)]
pub struct Material {
    pub uuid: Uuid,
    pub name: String,
    /// three.js class, e.g. `MeshStandardMaterial`.
    pub type_name: String,
}

impl Material {
    #[must_use]
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            type_name: type_name.to_string(),
        }
    }

    #[must_use]
    pub fn standard(name: &str) -> Self {
        Self::new(name, "MeshStandardMaterial")
    }

    #[must_use]
    pub fn physical(name: &str) -> Self {
        Self::new(name, "MeshPhysicalMaterial")
    }

    /// Stable identity used in geometry signatures: the name when set,
    /// otherwise the uuid.
    #[must_use]
    pub fn identity(&self) -> String {
        if self.name.is_empty() {
            self.uuid.to_string()
        } else {
            self.name.clone()
        }
    }
}
