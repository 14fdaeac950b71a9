//! Component generator
//!
//! Walks an [`AnalyzedScene`] and produces a [`ComponentModule`]: the typed
//! model shape, the shared instances table, and the element tree of the root
//! `<group>`. Rendering goes through the component template.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::analyze::is::{ElementKind, element_kind, is_bone, is_primitive};
use crate::analyze::naming::{is_var_name, property_key, quote};
use crate::analyze::{AnalyzedScene, ObjectInfo, PropValue};
use crate::codegen::ir::{ComponentModule, InstanceField, JsxElement, ModuleFeatures, ShapeField};
use crate::codegen::template::{COMPONENT_TEMPLATE, render};
use crate::errors::{JsxError, Result};
use crate::options::GenerateOptions;
use crate::scene::{Node, NodeHandle, NodeKind};

/// Nesting depth of root children inside the component body.
const BODY_DEPTH: usize = 3;

/// External pretty-printer applied to the rendered source.
pub trait SourceFormatter {
    fn format(&self, source: &str) -> Result<String>;
}

impl<F> SourceFormatter for F
where
    F: Fn(&str) -> Result<String>,
{
    fn format(&self, source: &str) -> Result<String> {
        self(source)
    }
}

#[derive(Serialize)]
struct TemplateContext<'a> {
    #[serde(flatten)]
    module: &'a ComponentModule,
    features: Map<String, Value>,
    types: bool,
    body: String,
}

/// A generated component, ready to be rendered as TSX or JSX.
#[derive(Debug, Clone)]
pub struct GeneratedJsx {
    module: ComponentModule,
    types: bool,
}

impl GeneratedJsx {
    pub fn new(analyzed: &AnalyzedScene, options: &GenerateOptions) -> Result<Self> {
        let name = &options.component_name;
        if !is_var_name(name) {
            return Err(JsxError::InvalidComponentName(name.clone()));
        }

        let builder = ElementBuilder {
            analyzed,
            bones: analyzed.options().bones,
        };
        let root = analyzed.scene().root();
        let root_node = analyzed.scene().get_node(root).ok_or(JsxError::MissingRoot)?;
        let mut elements = Vec::new();
        for &child in root_node.children() {
            elements.extend(builder.generate(child)?);
        }

        let mut features = ModuleFeatures::empty();
        features.set(ModuleFeatures::HAS_ANIMATIONS, analyzed.has_animations());
        features.set(ModuleFeatures::HAS_INSTANCES, analyzed.has_instances());
        features.set(
            ModuleFeatures::HAS_PRIMITIVES,
            analyzed.includes(is_primitive)
                || analyzed
                    .live_nodes()
                    .into_iter()
                    .any(|h| analyzed.nested_target(h).is_some()),
        );
        features.set(ModuleFeatures::EXPORT_DEFAULT, options.export_default);
        features.set(ModuleFeatures::USE_DRACO, options.draco);

        let nodes = node_shape(analyzed);
        let materials = material_shape(analyzed);
        let three_imports = three_imports(features, &nodes, &materials);

        let instances = if features.contains(ModuleFeatures::HAS_INSTANCES) {
            analyzed
                .duplicate_geometry_values()
                .into_iter()
                .map(|dup| InstanceField {
                    name: dup.name.clone(),
                    node: dup.node.clone(),
                })
                .collect()
        } else {
            Vec::new()
        };

        let module = ComponentModule {
            header: options.header.clone().unwrap_or_else(|| "Auto-generated".to_string()),
            size: options.size.clone(),
            extras: extras_lines(&analyzed.scene().extras),
            component_name: name.clone(),
            gltf_name: format!("{name}GLTF"),
            props_name: format!("{name}Props"),
            action_name: format!("{name}Action"),
            instances_name: format!("{name}Instances"),
            model_load_path: quote(&resolve_model_load_path(&options.model_load_path)),
            three_imports,
            nodes,
            materials,
            action_names: analyzed.scene().animations.iter().map(|clip| quote(&clip.name)).collect(),
            instances,
            features,
            elements,
        };

        log::debug!(
            "Generated {} with {} root element(s), features {:?}",
            module.component_name,
            module.elements.len(),
            features
        );

        Ok(Self {
            module,
            types: options.types,
        })
    }

    #[inline]
    #[must_use]
    pub fn module(&self) -> &ComponentModule {
        &self.module
    }

    /// Renders TSX or JSX according to the `types` option.
    pub fn render(&self) -> Result<String> {
        self.render_source(self.types)
    }

    pub fn to_tsx(&self) -> Result<String> {
        self.render_source(true)
    }

    /// Plain JSX: no interfaces, type annotations or casts.
    pub fn to_jsx(&self) -> Result<String> {
        self.render_source(false)
    }

    pub fn format_with(&self, formatter: &impl SourceFormatter) -> Result<String> {
        formatter.format(&self.render()?)
    }

    fn render_source(&self, types: bool) -> Result<String> {
        let ctx = TemplateContext {
            module: &self.module,
            features: self.module.features.to_flags(),
            types,
            body: self.module.render_elements(BODY_DEPTH),
        };
        render(COMPONENT_TEMPLATE, &ctx)
    }
}

// ============================================================================
// Element tree
// ============================================================================

struct ElementBuilder<'a> {
    analyzed: &'a AnalyzedScene,
    bones: bool,
}

impl ElementBuilder<'_> {
    /// Elements emitted for `handle`: usually one, none for light targets,
    /// and the spliced children of removed nodes.
    fn generate(&self, handle: NodeHandle) -> Result<Vec<JsxElement>> {
        let scene = self.analyzed.scene();
        let node = scene.get_node(handle).ok_or(JsxError::NodeNotFound(handle))?;

        if node.is_removed() {
            return self.generate_children(node);
        }
        // Emitted inside the light that aims at it
        if self.analyzed.is_nested_target(handle) {
            return Ok(Vec::new());
        }

        let info = self.analyzed.get_info(handle)?;
        if is_bone(node) && !self.bones {
            let element = JsxElement::new("primitive").with_attr("object", PropValue::Expr(info.node));
            return Ok(vec![element]);
        }

        let mut children = Vec::new();
        if let Some(target) = self.analyzed.nested_target(handle) {
            let element = JsxElement::new("primitive")
                .with_attr("object", PropValue::Expr(format!("{}.target", info.node)))
                .with_props(self.analyzed.calculate_props(target)?);
            children.push(element);
        }
        children.extend(self.generate_children(node)?);

        let mut element = JsxElement::new(self.element_name(handle, node, &info));
        if is_primitive(node) {
            element = element.with_attr("object", PropValue::Expr(info.node.clone()));
        }
        let element = element
            .with_props(self.analyzed.calculate_props(handle)?)
            .with_children(children);
        Ok(vec![element])
    }

    fn generate_children(&self, node: &Node) -> Result<Vec<JsxElement>> {
        let mut elements = Vec::new();
        for &child in node.children() {
            elements.extend(self.generate(child)?);
        }
        Ok(elements)
    }

    fn element_name(&self, handle: NodeHandle, node: &Node, info: &ObjectInfo) -> String {
        let tag = match (element_kind(node), &node.kind) {
            (ElementKind::Mesh | ElementKind::SkinnedMesh, _) if info.instanced => {
                if let Some(dup) = self.analyzed.duplicate_of(handle) {
                    return format!("instances.{}", dup.name);
                }
                "mesh"
            }
            (ElementKind::Group, _) => "group",
            (ElementKind::Mesh, _) => "mesh",
            (ElementKind::SkinnedMesh, _) => "skinnedMesh",
            (ElementKind::Light, NodeKind::Light(light)) => light.kind.element_name(),
            (ElementKind::Camera, NodeKind::Camera(camera)) => camera.element_name(),
            _ => "primitive",
        };
        tag.to_string()
    }
}

// ============================================================================
// Module pieces
// ============================================================================

fn node_shape(analyzed: &AnalyzedScene) -> Vec<ShapeField> {
    let scene = analyzed.scene();
    let targeted_lights = analyzed
        .live_nodes()
        .into_iter()
        .filter(|&h| analyzed.nested_target(h).is_some());

    let mut fields: IndexMap<String, String, FxBuildHasher> = IndexMap::default();
    for handle in analyzed
        .meshes()
        .into_iter()
        .chain(analyzed.bones())
        .chain(analyzed.primitives())
        .chain(targeted_lights)
    {
        let Some(node) = scene.get_node(handle) else {
            continue;
        };
        fields
            .entry(property_key(&node.name))
            .or_insert_with(|| node.kind.type_name().to_string());
    }
    fields
        .into_iter()
        .map(|(key, type_name)| ShapeField { key, type_name })
        .collect()
}

fn material_shape(analyzed: &AnalyzedScene) -> Vec<ShapeField> {
    let scene = analyzed.scene();
    let mut fields: IndexMap<String, String, FxBuildHasher> = IndexMap::default();
    for material in analyzed.materials().into_iter().filter_map(|key| scene.material(key)) {
        fields
            .entry(property_key(&material.name))
            .or_insert_with(|| material.type_name.clone());
    }
    fields
        .into_iter()
        .map(|(key, type_name)| ShapeField { key, type_name })
        .collect()
}

/// three.js types referenced by the typed shape, sorted.
fn three_imports(features: ModuleFeatures, nodes: &[ShapeField], materials: &[ShapeField]) -> Vec<String> {
    let mut imports: Vec<String> = nodes
        .iter()
        .chain(materials)
        .map(|field| field.type_name.clone())
        .collect();
    if features.contains(ModuleFeatures::HAS_ANIMATIONS) {
        imports.push("AnimationClip".to_string());
        imports.push("Group".to_string());
    }
    if imports.is_empty() {
        imports.push("Mesh".to_string());
    }
    imports.sort();
    imports.dedup();
    imports
}

fn extras_lines(extras: &Map<String, Value>) -> Vec<String> {
    extras
        .iter()
        .map(|(key, value)| {
            let mut chars = key.chars();
            let key = match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            };
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("{key}: {value}")
        })
        .collect()
}

/// Absolute URLs and rooted paths pass through, anything else gets a
/// leading `/`.
#[must_use]
pub fn resolve_model_load_path(path: &str) -> String {
    if path.to_ascii_lowercase().starts_with("http") || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
