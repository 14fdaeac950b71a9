/// A named animation clip of the loaded scene.
///
/// Keyframe data is not needed for code generation; the generator only emits
/// the clip names as a literal union type.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: &str, duration: f32) -> Self {
        Self {
            name: name.to_string(),
            duration,
        }
    }
}
