#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionType {
    Perspective,
    Orthographic,
}

/// Camera parameters as exposed by the loaded scene.
///
/// Field defaults follow three.js so the prop calculator can omit values
/// that the runtime would apply anyway.
#[derive(Debug, Clone)]
pub struct Camera {
    pub projection_type: ProjectionType,
    /// Vertical field of view in degrees (perspective only).
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub zoom: f32,

    // Orthographic frustum
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Camera {
    pub const DEFAULT_FOV: f32 = 50.0;
    pub const DEFAULT_NEAR: f32 = 0.1;
    pub const DEFAULT_FAR: f32 = 2000.0;

    #[must_use]
    pub fn new_perspective(fov: f32, near: f32, far: f32) -> Self {
        Self {
            projection_type: ProjectionType::Perspective,
            fov,
            near,
            far,
            zoom: 1.0,
            left: -1.0,
            right: 1.0,
            top: 1.0,
            bottom: -1.0,
        }
    }

    #[must_use]
    pub fn new_orthographic(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Self {
        Self {
            projection_type: ProjectionType::Orthographic,
            fov: Self::DEFAULT_FOV,
            near,
            far,
            zoom: 1.0,
            left,
            right,
            top,
            bottom,
        }
    }

    /// Component name of the drei camera used to reconstruct this camera.
    #[must_use]
    pub fn element_name(&self) -> &'static str {
        match self.projection_type {
            ProjectionType::Perspective => "PerspectiveCamera",
            ProjectionType::Orthographic => "OrthographicCamera",
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new_perspective(Self::DEFAULT_FOV, Self::DEFAULT_NEAR, Self::DEFAULT_FAR)
    }
}
