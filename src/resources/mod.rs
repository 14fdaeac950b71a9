//! Shared resource definitions
//!
//! Geometry and material records referenced by mesh nodes. They carry
//! identity and naming metadata only; vertex data stays with the loader.

pub mod geometry;
pub mod material;

pub use geometry::{Geometry, GeometryFeatures};
pub use material::Material;
