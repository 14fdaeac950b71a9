pub mod clip;

pub use clip::AnimationClip;
