use glam::Vec3;

use crate::scene::NodeHandle;

/// Light type, mirroring the three.js light classes the generator targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    Ambient,
    Hemisphere,
    Directional,
    Point,
    Spot,
    RectArea,
}

impl LightKind {
    /// Intrinsic JSX element for this light type.
    #[must_use]
    pub fn element_name(self) -> &'static str {
        match self {
            Self::Ambient => "ambientLight",
            Self::Hemisphere => "hemisphereLight",
            Self::Directional => "directionalLight",
            Self::Point => "pointLight",
            Self::Spot => "spotLight",
            Self::RectArea => "rectAreaLight",
        }
    }

    /// three.js class name.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Ambient => "AmbientLight",
            Self::Hemisphere => "HemisphereLight",
            Self::Directional => "DirectionalLight",
            Self::Point => "PointLight",
            Self::Spot => "SpotLight",
            Self::RectArea => "RectAreaLight",
        }
    }

    /// Whether this light type aims at a separate target object.
    #[must_use]
    pub fn supports_target(self) -> bool {
        matches!(self, Self::Directional | Self::Spot)
    }
}

#[derive(Debug, Clone)]
pub struct Light {
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f32,
    /// Cut-off range for point and spot lights (0 = infinite).
    pub distance: f32,
    pub decay: f32,
    /// Spot cone angle in radians.
    pub angle: f32,
    pub penumbra: f32,
    pub cast_shadow: bool,
    /// Aim target of directional and spot lights. The target is itself a
    /// node of the scene graph (usually a child of the light).
    pub target: Option<NodeHandle>,
}

impl Light {
    pub const DEFAULT_DECAY: f32 = 2.0;
    pub const DEFAULT_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

    #[must_use]
    pub fn new(kind: LightKind) -> Self {
        Self {
            kind,
            color: Vec3::ONE,
            intensity: 1.0,
            distance: 0.0,
            decay: Self::DEFAULT_DECAY,
            angle: Self::DEFAULT_ANGLE,
            penumbra: 0.0,
            cast_shadow: false,
            target: None,
        }
    }

    #[must_use]
    pub fn new_directional(color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            ..Self::new(LightKind::Directional)
        }
    }

    #[must_use]
    pub fn new_point(color: Vec3, intensity: f32, distance: f32) -> Self {
        Self {
            color,
            intensity,
            distance,
            ..Self::new(LightKind::Point)
        }
    }

    #[must_use]
    pub fn new_spot(color: Vec3, intensity: f32, distance: f32, angle: f32, penumbra: f32) -> Self {
        Self {
            color,
            intensity,
            distance,
            angle,
            penumbra,
            ..Self::new(LightKind::Spot)
        }
    }

    /// Color as a lowercase `#rrggbb` string.
    #[must_use]
    pub fn hex_color(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.color.x),
            channel(self.color.y),
            channel(self.color.z)
        )
    }
}
