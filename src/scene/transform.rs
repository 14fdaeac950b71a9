use glam::Vec3;

/// Transform component
///
/// Local position, Euler rotation (XYZ order, radians) and scale of a node,
/// stored the way the loader hands them over so emitted values match the
/// source data without a quaternion round trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }

    /// Sets the Euler rotation (XYZ order).
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Vec3::new(x, y, z);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
