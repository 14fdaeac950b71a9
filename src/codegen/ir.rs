//! Component IR
//!
//! Intermediate representation between the analyzed scene and the emitted
//! source text. Elements render themselves; the surrounding module is
//! rendered by the component template.

use std::fmt;

use bitflags::bitflags;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::analyze::{PropValue, Props};

bitflags! {
    /// Module-level switches that select template branches.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ModuleFeatures: u32 {
        const HAS_ANIMATIONS  = 1 << 0;
        const HAS_INSTANCES   = 1 << 1;
        const HAS_PRIMITIVES  = 1 << 2;
        const EXPORT_DEFAULT  = 1 << 3;
        const USE_DRACO       = 1 << 4;
    }
}

impl ModuleFeatures {
    /// Expands the flags into the template's `features` map.
    #[must_use]
    pub fn to_flags(self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("has_animations".into(), self.contains(Self::HAS_ANIMATIONS).into());
        map.insert("has_instances".into(), self.contains(Self::HAS_INSTANCES).into());
        map.insert("has_primitives".into(), self.contains(Self::HAS_PRIMITIVES).into());
        map.insert("export_default".into(), self.contains(Self::EXPORT_DEFAULT).into());
        map.insert("draco".into(), self.contains(Self::USE_DRACO).into());
        map
    }
}

// ============================================================================
// Elements
// ============================================================================

/// One attribute of an element, written according to its value kind:
/// `key="text"`, bare `key`, or `key={expr}`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxAttr {
    pub key: String,
    pub value: PropValue,
}

impl fmt::Display for JsxAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            PropValue::Str(text) => write!(f, "{}=\"{}\"", self.key, text.replace('"', "&quot;")),
            PropValue::Flag => f.write_str(&self.key),
            value => write!(f, "{}={{{value}}}", self.key),
        }
    }
}

/// A JSX element with its attributes and child elements.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxElement {
    pub tag: String,
    pub attrs: Vec<JsxAttr>,
    pub children: Vec<JsxElement>,
}

impl JsxElement {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: PropValue) -> Self {
        self.attrs.push(JsxAttr {
            key: key.into(),
            value,
        });
        self
    }

    /// Appends calculated props, preserving their order.
    #[must_use]
    pub fn with_props(mut self, props: Props) -> Self {
        self.attrs.extend(props.into_iter().map(|(key, value)| JsxAttr {
            key: key.to_string(),
            value,
        }));
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<JsxElement>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&PropValue> {
        self.attrs.iter().find(|a| a.key == key).map(|a| &a.value)
    }

    /// Renders the element tree, indenting two spaces per level.
    #[must_use]
    pub fn render(&self, depth: usize) -> String {
        let mut out = String::new();
        self.write_to(&mut out, depth);
        out
    }

    fn write_to(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&self.tag);
        for attr in &self.attrs {
            out.push(' ');
            out.push_str(&attr.to_string());
        }

        if self.children.is_empty() {
            out.push_str(" />\n");
            return;
        }

        out.push_str(">\n");
        for child in &self.children {
            child.write_to(out, depth + 1);
        }
        out.push_str(&indent);
        out.push_str("</");
        out.push_str(&self.tag);
        out.push_str(">\n");
    }
}

impl fmt::Display for JsxElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render(0).trim_end())
    }
}

// ============================================================================
// Module
// ============================================================================

/// A typed field of the loaded-model shape, e.g. `Helmet: Mesh`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShapeField {
    pub key: String,
    pub type_name: String,
}

/// An entry of the shared instances table, e.g. `Wheel: nodes.Wheel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceField {
    pub name: String,
    pub node: String,
}

/// Everything the component template needs, minus the render-time switches.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentModule {
    // === Header ===
    pub header: String,
    pub size: Option<String>,
    /// `Key: value` lines from the asset extras.
    pub extras: Vec<String>,

    // === Names ===
    pub component_name: String,
    pub gltf_name: String,
    pub props_name: String,
    pub action_name: String,
    pub instances_name: String,

    // === Loader ===
    /// Quoted path literal.
    pub model_load_path: String,
    pub three_imports: Vec<String>,

    // === Shape ===
    pub nodes: Vec<ShapeField>,
    pub materials: Vec<ShapeField>,
    /// Quoted clip names.
    pub action_names: Vec<String>,
    pub instances: Vec<InstanceField>,

    #[serde(skip)]
    pub features: ModuleFeatures,
    #[serde(skip)]
    pub elements: Vec<JsxElement>,
}

impl ComponentModule {
    /// Root children rendered at the nesting depth of the template body.
    #[must_use]
    pub fn render_elements(&self, depth: usize) -> String {
        self.elements.iter().map(|e| e.render(depth)).collect()
    }
}
