//! Analysis & Generation Options
//!
//! Configuration record handed to the analyzer and the code generator.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use myth_jsx::options::{AnalyzeOptions, Options};
//!
//! // Defaults: 3 digits of precision, no instancing, two prune passes
//! let options = Options::default();
//!
//! // Share duplicated geometries through instancing
//! let analyze = AnalyzeOptions {
//!     instance: true,
//!     shadows: true,
//!     ..Default::default()
//! };
//!
//! // Or read the record the CLI layer produced
//! let options = Options::from_json_str(r#"{ "componentName": "Helmet", "instanceAll": true }"#)?;
//! ```

use serde::Deserialize;

use crate::analyze::naming::sanitize_identifier;
use crate::errors::Result;

/// Options consumed by [`AnalyzedScene`](crate::analyze::AnalyzedScene) and
/// the prop calculator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzeOptions {
    /// Number of decimal digits kept for emitted numbers.
    pub precision: u32,
    /// Emit bones as elements instead of a single `<primitive>` passthrough.
    pub bones: bool,
    /// Share geometries that occur more than once.
    pub instance: bool,
    /// Share every geometry, including ones that occur once.
    pub instance_all: bool,
    /// Skip the dry-run prune pass.
    pub keep_groups: bool,
    /// Keep original node names on the emitted elements.
    pub keep_names: bool,
    /// Emit `castShadow` / `receiveShadow` on meshes.
    pub shadows: bool,
    /// Emit `userData` on elements.
    pub meta: bool,
    /// Repeat prune passes until nothing changes instead of stopping after two.
    pub prune_to_fixpoint: bool,
}

impl AnalyzeOptions {
    pub const DEFAULT_PRECISION: u32 = 3;

    /// True when either instancing mode is requested.
    #[inline]
    #[must_use]
    pub fn instancing(&self) -> bool {
        self.instance || self.instance_all
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            precision: Self::DEFAULT_PRECISION,
            bones: false,
            instance: false,
            instance_all: false,
            keep_groups: false,
            keep_names: false,
            shadows: false,
            meta: false,
            prune_to_fixpoint: false,
        }
    }
}

/// Options consumed by the code generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateOptions {
    /// Name of the generated root component.
    pub component_name: String,
    /// Path or URL the component loads the model from.
    pub model_load_path: String,
    /// Header comment text, `Auto-generated` when unset.
    pub header: Option<String>,
    /// Human readable size of the model files, listed in the header.
    pub size: Option<String>,
    /// Export the root component as the default export.
    pub export_default: bool,
    /// Load the model through the Draco decoder.
    pub draco: bool,
    /// Emit TypeScript (interfaces and casts) rather than plain JSX.
    pub types: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            component_name: "Model".to_string(),
            model_load_path: "model.glb".to_string(),
            header: None,
            size: None,
            export_default: false,
            draco: false,
            types: true,
        }
    }
}

impl GenerateOptions {
    /// Defaults for loading `path`, with the component named after the file
    /// stem: `models/my-car.glb` gives `My_car`.
    #[must_use]
    pub fn for_model(path: &str) -> Self {
        let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
        let stem = file.split_once('.').map_or(file, |(stem, _)| stem);

        let mut options = Self {
            model_load_path: path.to_string(),
            ..Self::default()
        };
        let mut chars = stem.chars();
        if let Some(first) = chars.next() {
            let capitalized = first.to_uppercase().collect::<String>() + chars.as_str();
            options.component_name = sanitize_identifier(&capitalized);
        }
        options
    }
}

/// The complete configuration record, as read from a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    #[serde(flatten)]
    pub analyze: AnalyzeOptions,
    #[serde(flatten)]
    pub generate: GenerateOptions,
}

impl Options {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
