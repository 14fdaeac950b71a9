//! Code generation
//!
//! - `ir`: element tree and component module representation
//! - `generator`: builds the IR from an analyzed scene and renders it
//! - `template`: embedded component template and its minijinja environment

pub mod generator;
pub mod ir;
pub mod template;

pub use generator::{GeneratedJsx, SourceFormatter, resolve_model_load_path};
pub use ir::{ComponentModule, InstanceField, JsxAttr, JsxElement, ModuleFeatures, ShapeField};
