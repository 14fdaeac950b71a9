#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod analyze;
pub mod animation;
pub mod codegen;
pub mod errors;
pub mod options;
pub mod resources;
pub mod scene;

pub use analyze::{AnalyzedScene, DuplicateGeometry, ObjectInfo, PropValue, Props, PruneStrategy};
pub use animation::AnimationClip;
pub use codegen::{GeneratedJsx, JsxElement, SourceFormatter};
pub use errors::{JsxError, Result};
pub use options::{AnalyzeOptions, GenerateOptions, Options};
pub use resources::{Geometry, Material};
pub use scene::{Camera, Light, LightKind, MeshData, Node, NodeHandle, NodeKind, Scene, Transform};
